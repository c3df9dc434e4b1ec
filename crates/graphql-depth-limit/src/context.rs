use crate::diagnostics::Diagnostic;
use crate::diagnostics::GraphQLError;
use apollo_parser::cst;
use apollo_parser::cst::CstNode;

/// The document under validation together with the diagnostics accumulated
/// while validating it.
///
/// This is the error-reporting channel between the depth walker and the
/// host: per-document violations are [reported](Self::report_error) here and
/// never abort traversal, so one run surfaces as many violations as
/// possible. After validation the host inspects [`errors`](Self::errors) to
/// decide whether the request fails.
///
/// CST handles are reference-counted, so constructing a context does not
/// copy the document.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    document: cst::Document,
    errors: Vec<Diagnostic>,
}

impl ValidationContext {
    /// Create a context for one parsed document.
    pub fn new(document: cst::Document) -> Self {
        Self {
            document,
            errors: Vec::new(),
        }
    }

    /// The document being validated.
    pub fn document(&self) -> &cst::Document {
        &self.document
    }

    /// Record a diagnostic. Reporting never stops traversal.
    pub fn report_error(&mut self, error: Diagnostic) {
        self.errors.push(error);
    }

    /// Diagnostics reported so far, in reporting order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Consume the context, keeping only the diagnostics.
    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }

    /// All diagnostics as serializable GraphQL response errors, with
    /// line/column locations resolved against the document source.
    pub fn to_graphql_errors(&self) -> Vec<GraphQLError> {
        let source_text = self.document.syntax().text().to_string();
        self.errors
            .iter()
            .map(|error| error.to_graphql_error(&source_text))
            .collect()
    }
}
