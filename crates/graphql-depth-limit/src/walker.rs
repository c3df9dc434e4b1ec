//! The depth walker: a recursive evaluator producing one depth value per
//! operation.
//!
//! An operation's depth is the length of the longest chain of non-ignored
//! fields from its root, leaves included: `{ a { b { c } } }` has depth 3.
//! Named fragments and inline fragments are transparent, they forward the
//! walk at the same level; only crossing into a field adds a level.

use crate::context::ValidationContext;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticData;
use crate::document::FragmentIndex;
use crate::error::DepthLimitError;
use crate::ignore::IgnorePolicy;
use apollo_parser::cst;
use apollo_parser::cst::CstNode;
use apollo_parser::SyntaxNode;
use std::ops::Range;

/// Sentinel returned by a branch that reported a diagnostic. The diagnostic
/// is the authoritative signal; the sentinel only feeds local
/// max-aggregation so sibling branches keep being explored.
const ERROR_DEPTH: i32 = -1;

/// Fragment names on the active expansion path.
///
/// A spread resolving to a name already on the path is a cycle; recursing
/// into it would never terminate.
#[derive(Debug, Default)]
struct RecursionStack(Vec<String>);

impl RecursionStack {
    fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|entered| entered == name)
    }

    fn push(&mut self, name: String) {
        self.0.push(name);
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

/// Per-operation traversal state. One walker evaluates one operation.
pub(crate) struct DepthWalker<'a> {
    pub(crate) fragments: &'a FragmentIndex,
    pub(crate) max_depth: usize,
    pub(crate) operation_name: &'a str,
    pub(crate) ignore: &'a IgnorePolicy,
}

impl DepthWalker<'_> {
    /// Depth of `operation`, counting its root fields as level 1.
    pub(crate) fn operation_depth(
        &self,
        operation: &cst::OperationDefinition,
        ctx: &mut ValidationContext,
    ) -> Result<i32, DepthLimitError> {
        let mut entered = RecursionStack::default();
        self.selection_set_depth(operation.selection_set(), 1, ctx, &mut entered)
    }

    /// Max depth over the children of a depth-transparent container
    /// (operation definition, fragment definition, or inline fragment).
    ///
    /// GraphQL grammar disallows empty selection sets, but the CST is
    /// error-tolerant: a missing or empty set reduces to 0 rather than
    /// crashing the `max` reduction.
    fn selection_set_depth(
        &self,
        selection_set: Option<cst::SelectionSet>,
        level: usize,
        ctx: &mut ValidationContext,
        entered: &mut RecursionStack,
    ) -> Result<i32, DepthLimitError> {
        let mut deepest: Option<i32> = None;
        if let Some(selection_set) = selection_set {
            for selection in selection_set.selections() {
                let depth = self.selection_depth(&selection, level, ctx, entered)?;
                deepest = Some(deepest.map_or(depth, |current| current.max(depth)));
            }
        }
        Ok(deepest.unwrap_or(0))
    }

    /// Depth contributed by one selection occupying field level `level`.
    fn selection_depth(
        &self,
        selection: &cst::Selection,
        level: usize,
        ctx: &mut ValidationContext,
        entered: &mut RecursionStack,
    ) -> Result<i32, DepthLimitError> {
        match selection {
            cst::Selection::Field(field) => self.field_depth(field, level, ctx, entered),
            cst::Selection::FragmentSpread(spread) => {
                self.spread_depth(spread, level, ctx, entered)
            }
            cst::Selection::InlineFragment(inline) => {
                self.selection_set_depth(inline.selection_set(), level, ctx, entered)
            }
        }
    }

    fn field_depth(
        &self,
        field: &cst::Field,
        level: usize,
        ctx: &mut ValidationContext,
        entered: &mut RecursionStack,
    ) -> Result<i32, DepthLimitError> {
        let name = match field.name() {
            Some(name) => name.text().to_string(),
            None => return Err(DepthLimitError::MalformedNode { kind: "field" }),
        };

        // Introspection fields never count toward depth; configured ignore
        // rules are additive to that built-in skip. Ignored fields are
        // exempt from the limit check as well, sub-selections included.
        if name.starts_with("__") || self.ignore.matches(&name) {
            return Ok(0);
        }

        if level > self.max_depth {
            ctx.report_error(Diagnostic::new(
                Some(node_range(field.syntax())),
                DiagnosticData::DepthExceeded {
                    operation: self.operation_name.to_string(),
                    max_depth: self.max_depth,
                },
            ));
            return Ok(ERROR_DEPTH);
        }

        // One level for the field itself, charged exactly once however many
        // children it has. A leaf is depth 1 at its own level.
        Ok(1 + self.selection_set_depth(field.selection_set(), level + 1, ctx, entered)?)
    }

    fn spread_depth(
        &self,
        spread: &cst::FragmentSpread,
        level: usize,
        ctx: &mut ValidationContext,
        entered: &mut RecursionStack,
    ) -> Result<i32, DepthLimitError> {
        let name = match spread.fragment_name().and_then(|name| name.name()) {
            Some(name) => name.text().to_string(),
            None => return Err(DepthLimitError::MalformedNode { kind: "fragment spread" }),
        };

        let fragment = match self.fragments.get(&name) {
            Some(fragment) => fragment,
            None => {
                ctx.report_error(Diagnostic::new(
                    Some(node_range(spread.syntax())),
                    DiagnosticData::FragmentNotFound { name },
                ));
                return Ok(ERROR_DEPTH);
            }
        };

        if entered.contains(&name) {
            ctx.report_error(Diagnostic::new(
                Some(node_range(spread.syntax())),
                DiagnosticData::FragmentCycle { name },
            ));
            return Ok(ERROR_DEPTH);
        }

        // Fragment inclusion is depth-transparent: the fragment's selection
        // set is evaluated as if it replaced the spread, at the same level.
        entered.push(name);
        let depth = self.selection_set_depth(fragment.selection_set(), level, ctx, entered);
        entered.pop();
        depth
    }
}

fn node_range(node: &SyntaxNode) -> Range<usize> {
    let range = node.text_range();
    range.start().into()..range.end().into()
}
