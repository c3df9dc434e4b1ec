/// Fatal errors that abort a whole validation run.
///
/// These indicate a broken configuration or an input shape the depth walker
/// was not designed for, as opposed to the per-document [`Diagnostic`]s that
/// accumulate in a [`ValidationContext`] without stopping traversal.
///
/// [`Diagnostic`]: crate::Diagnostic
/// [`ValidationContext`]: crate::ValidationContext
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DepthLimitError {
    /// An ignore rule string did not compile as a regular expression.
    ///
    /// Raised by [`IgnoreRule::pattern`][crate::IgnoreRule::pattern] at
    /// configuration time, before any document is validated.
    #[error("invalid ignore pattern `{pattern}`: {message}")]
    InvalidIgnorePattern {
        /// The pattern as supplied in the configuration.
        pattern: String,
        /// The regex engine's description of what is wrong with it.
        message: String,
    },

    /// The walker reached a CST node missing a required child, such as a
    /// field or fragment spread without a name.
    ///
    /// This only happens for documents with syntax errors; callers are
    /// expected to check [`SyntaxTree::errors`] before validating.
    ///
    /// [`SyntaxTree::errors`]: apollo_parser::SyntaxTree::errors
    #[error("depth walker cannot handle malformed {kind} node")]
    MalformedNode {
        /// Which kind of node was malformed.
        kind: &'static str,
    },
}
