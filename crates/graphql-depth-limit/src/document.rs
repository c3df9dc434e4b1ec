//! Single-pass indexes over a document's top-level definitions.

use apollo_parser::cst;
use indexmap::IndexMap;

/// Fragment name → fragment definition, in definition order.
pub(crate) type FragmentIndex = IndexMap<String, cst::FragmentDefinition>;

/// Operation name → operation definition, in definition order, with `""` as
/// the key for the anonymous operation.
pub(crate) type OperationIndex = IndexMap<String, cst::OperationDefinition>;

/// Collect the document's fragment definitions.
///
/// On duplicate names the last definition wins, matching the host
/// convention. Fragments without a name only occur in documents with syntax
/// errors and cannot be referenced, so they are skipped.
pub(crate) fn fragment_index(document: &cst::Document) -> FragmentIndex {
    let mut index = FragmentIndex::new();
    for definition in document.definitions() {
        if let cst::Definition::FragmentDefinition(fragment) = definition {
            if let Some(name) = fragment.fragment_name().and_then(|name| name.name()) {
                index.insert(name.text().to_string(), fragment);
            }
        }
    }
    index
}

/// Collect the document's operation definitions, queries and mutations
/// alike. Last definition wins on duplicate names.
pub(crate) fn operation_index(document: &cst::Document) -> OperationIndex {
    let mut index = OperationIndex::new();
    for definition in document.definitions() {
        if let cst::Definition::OperationDefinition(operation) = definition {
            let name = operation
                .name()
                .map(|name| name.text().to_string())
                .unwrap_or_default();
            index.insert(name, operation);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_parser::Parser;

    fn parse(input: &str) -> cst::Document {
        let tree = Parser::new(input).parse();
        assert!(tree.errors().next().is_none(), "unexpected parse errors");
        tree.document()
    }

    #[test]
    fn collects_fragments_by_name() {
        let document = parse(
            "
            query Q { a { ...F ...G } }
            fragment F on T { x }
            fragment G on T { y }
            ",
        );
        let fragments = fragment_index(&document);
        assert_eq!(
            fragments.keys().collect::<Vec<_>>(),
            ["F", "G"],
        );
    }

    #[test]
    fn last_fragment_definition_wins() {
        let document = parse(
            "
            query Q { ...F }
            fragment F on T { x }
            fragment F on T { x y }
            ",
        );
        let fragments = fragment_index(&document);
        assert_eq!(fragments.len(), 1);
        let selections = fragments["F"]
            .selection_set()
            .expect("fragment has a selection set")
            .selections()
            .count();
        assert_eq!(selections, 2);
    }

    #[test]
    fn anonymous_operation_keyed_by_empty_string() {
        let document = parse("{ a } query Named { b } mutation M { c }");
        let operations = operation_index(&document);
        assert_eq!(
            operations.keys().collect::<Vec<_>>(),
            ["", "Named", "M"],
        );
    }

    #[test]
    fn type_system_definitions_are_ignored() {
        let document = parse("type Query { a: Int } query Q { a }");
        assert!(fragment_index(&document).is_empty());
        assert_eq!(operation_index(&document).len(), 1);
    }
}
