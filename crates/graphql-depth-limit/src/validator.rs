use crate::context::ValidationContext;
use crate::document;
use crate::error::DepthLimitError;
use crate::ignore::IgnorePolicy;
use crate::ignore::IgnoreRule;
use crate::walker::DepthWalker;
use indexmap::IndexMap;
use std::fmt;
use tracing::debug;
use tracing::error;

/// Computed depth per operation, keyed by operation name (`""` for the
/// anonymous operation), in definition order.
///
/// Operations that reported a diagnostic are recorded as `-1`: that entry
/// marks "invalid", not a depth, and must not be compared against limits
/// downstream.
pub type DepthMap = IndexMap<String, i32>;

type Callback = Box<dyn Fn(&DepthMap) + Send + Sync>;

/// The depth limit validation rule.
///
/// Built once from a limit, optional ignore rules, and an optional observer
/// callback; immutable afterwards and reusable across any number of
/// documents. See the [crate documentation](crate) for an example.
pub struct DepthLimit {
    max_depth: usize,
    ignore: IgnorePolicy,
    callback: Option<Callback>,
}

impl DepthLimit {
    /// Create a rule enforcing `max_depth` as the maximum number of nested
    /// field levels per operation.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ignore: IgnorePolicy::default(),
            callback: None,
        }
    }

    /// Add a rule exempting matching field names from depth counting.
    /// May be chained to configure several rules.
    pub fn ignore(mut self, rule: IgnoreRule) -> Self {
        self.ignore.push(rule);
        self
    }

    /// Add several ignore rules at once.
    pub fn ignore_all(mut self, rules: impl IntoIterator<Item = IgnoreRule>) -> Self {
        for rule in rules {
            self.ignore.push(rule);
        }
        self
    }

    /// Observe the complete [`DepthMap`] of every validation run. The
    /// callback is invoked exactly once per run, after all operations have
    /// been walked, and only if no fatal error aborted the run.
    pub fn on_complete(mut self, callback: impl Fn(&DepthMap) + Send + Sync + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// The configured limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate the context's document.
    ///
    /// Walks every operation, reporting each violation through
    /// [`ValidationContext::report_error`] without aborting sibling branches
    /// or sibling operations, and returns the depth of each operation.
    ///
    /// `Err` is reserved for fatal problems ([`DepthLimitError`]); a
    /// document that merely exceeds the limit is an `Ok` outcome whose
    /// diagnostics are in the context.
    pub fn validate(&self, ctx: &mut ValidationContext) -> Result<DepthMap, DepthLimitError> {
        match self.run(ctx) {
            Ok(depths) => Ok(depths),
            Err(err) => {
                error!("depth validation aborted: {err}");
                Err(err)
            }
        }
    }

    fn run(&self, ctx: &mut ValidationContext) -> Result<DepthMap, DepthLimitError> {
        let fragments = document::fragment_index(ctx.document());
        let operations = document::operation_index(ctx.document());

        let mut depths = DepthMap::with_capacity(operations.len());
        for (name, operation) in &operations {
            let walker = DepthWalker {
                fragments: &fragments,
                max_depth: self.max_depth,
                operation_name: name,
                ignore: &self.ignore,
            };
            let reported_before = ctx.errors().len();
            let depth = walker.operation_depth(operation, ctx)?;
            let depth = if ctx.errors().len() > reported_before {
                -1
            } else {
                depth
            };
            depths.insert(name.clone(), depth);
        }
        debug!(
            operations = depths.len(),
            max_depth = self.max_depth,
            "computed operation depths"
        );

        if let Some(callback) = &self.callback {
            callback(&depths);
        }
        Ok(depths)
    }
}

impl fmt::Debug for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthLimit")
            .field("max_depth", &self.max_depth)
            .field("ignore", &self.ignore)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
