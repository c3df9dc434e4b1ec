use serde::Deserialize;
use serde::Serialize;
use std::ops::Range;

/// Structured data about a diagnostic.
///
/// The `Display` implementation is the user-visible message and is stable:
/// hosts migrating from the original JavaScript `graphql-depth-limit` rule
/// can match on it verbatim.
#[derive(Debug, Clone, Hash, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DiagnosticData {
    /// An operation's field nesting went past the configured limit.
    #[error("'{operation}' exceeds maximum operation depth of {max_depth}")]
    DepthExceeded {
        /// Name of the operation, `""` for the anonymous operation.
        operation: String,
        /// The configured limit.
        max_depth: usize,
    },
    /// A fragment spread referenced a name with no matching fragment
    /// definition in the document.
    ///
    /// The leading quote is asymmetric in the JavaScript
    /// `graphql-depth-limit` rule and is preserved for message compatibility.
    #[error("'Fragment {name} not found")]
    FragmentNotFound {
        /// Name of the fragment not defined in the document.
        name: String,
    },
    /// A fragment spread resolved to a fragment already being expanded on
    /// the current traversal path.
    #[error("Cannot spread fragment \"{name}\" within itself")]
    FragmentCycle {
        /// Name of the fragment that spreads itself.
        name: String,
    },
}

/// A diagnostic reported while walking one document.
///
/// Pairs the structured [`DiagnosticData`] with the byte range of the
/// offending CST node in the document source, when the node carries one.
#[derive(Debug, Clone, Hash, PartialEq, Eq, thiserror::Error)]
#[error("{data}")]
pub struct Diagnostic {
    pub(crate) range: Option<Range<usize>>,
    pub(crate) data: DiagnosticData,
}

impl Diagnostic {
    pub(crate) fn new(range: Option<Range<usize>>, data: DiagnosticData) -> Self {
        Self { range, data }
    }

    /// What went wrong, with enough structure to match on.
    pub fn data(&self) -> &DiagnosticData {
        &self.data
    }

    /// Byte range of the offending node in the document source.
    pub fn range(&self) -> Option<Range<usize>> {
        self.range.clone()
    }

    /// The user-visible message, same as the `Display` implementation.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Convert to the serializable error shape used in GraphQL responses,
    /// translating the byte range into a 1-based line/column location.
    ///
    /// `source_text` must be the text the document was parsed from.
    pub fn to_graphql_error(&self, source_text: &str) -> GraphQLError {
        let locations = self
            .range
            .as_ref()
            .and_then(|range| GraphQLLocation::from_offset(source_text, range.start))
            .into_iter()
            .collect();
        GraphQLError {
            message: self.to_string(),
            locations,
        }
    }
}

/// A serializable [error](https://spec.graphql.org/October2021/#sec-Errors.Error-result-format),
/// as found in the `errors` list of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations relevant to the error, if any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub locations: Vec<GraphQLLocation>,
}

/// A source location (line and column numbers) for a [`GraphQLError`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLLocation {
    /// The line number for this location, starting at 1 for the first line.
    pub line: usize,
    /// The column number for this location, starting at 1 and counting
    /// characters (Unicode Scalar Values) like [`str::chars`].
    pub column: usize,
}

impl GraphQLLocation {
    /// Translate a byte offset into `source_text` to a line/column pair.
    pub(crate) fn from_offset(source_text: &str, offset: usize) -> Option<Self> {
        if offset > source_text.len() {
            return None;
        }
        let mut line = 1;
        let mut column = 1;
        for (index, ch) in source_text.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Some(Self { line, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_from_offset() {
        let source = "query {\n  user\n}\n";
        assert_eq!(
            GraphQLLocation::from_offset(source, 0),
            Some(GraphQLLocation { line: 1, column: 1 })
        );
        // `user` starts after "query {\n  ".
        assert_eq!(
            GraphQLLocation::from_offset(source, 10),
            Some(GraphQLLocation { line: 2, column: 3 })
        );
        assert_eq!(GraphQLLocation::from_offset(source, 1000), None);
    }

    #[test]
    fn depth_exceeded_message_is_verbatim() {
        let data = DiagnosticData::DepthExceeded {
            operation: "Deep".to_string(),
            max_depth: 3,
        };
        assert_eq!(
            data.to_string(),
            "'Deep' exceeds maximum operation depth of 3"
        );
    }

    #[test]
    fn fragment_not_found_keeps_asymmetric_quote() {
        let data = DiagnosticData::FragmentNotFound {
            name: "F".to_string(),
        };
        assert_eq!(data.to_string(), "'Fragment F not found");
    }
}
