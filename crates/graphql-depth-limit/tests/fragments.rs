use crate::check;
use expect_test::expect;
use graphql_depth_limit::DiagnosticData;
use pretty_assertions::assert_eq;

#[test]
fn named_fragments_count_like_inline_selections() {
    let (depths, ctx) = check(
        "
        query Q { a { ...F } }
        fragment F on T { b { c } }
        ",
        10,
    );
    assert_eq!(depths["Q"], 3);
    assert!(ctx.errors().is_empty());
}

#[test]
fn fragments_cannot_hide_excess_depth() {
    let (depths, ctx) = check(
        "
        query Deep { a { ...F } }
        fragment F on T { b { c { d } } }
        ",
        3,
    );
    assert_eq!(depths["Deep"], -1);
    expect!["'Deep' exceeds maximum operation depth of 3"]
        .assert_eq(&ctx.errors()[0].message());
}

#[test]
fn shared_fragment_in_multiple_branches() {
    let (depths, ctx) = check(
        "
        query Q { a { ...F } b { c { ...F } } }
        fragment F on T { leaf }
        ",
        10,
    );
    assert_eq!(depths["Q"], 3);
    assert!(ctx.errors().is_empty());
}

#[test]
fn missing_fragment_is_reported() {
    let (depths, ctx) = check("query Q {...Ghost}", 10);
    assert_eq!(depths["Q"], -1);
    assert_eq!(ctx.errors().len(), 1);
    expect!["'Fragment Ghost not found"].assert_eq(&ctx.errors()[0].message());
    assert!(matches!(
        ctx.errors()[0].data(),
        DiagnosticData::FragmentNotFound { name } if name == "Ghost"
    ));
}

#[test]
fn missing_fragment_does_not_stop_sibling_branches() {
    let (depths, ctx) = check("query Q { ...Ghost a { b } }", 10);
    assert_eq!(depths["Q"], -1);
    assert_eq!(ctx.errors().len(), 1);
}

#[test]
fn self_spread_terminates_with_a_diagnostic() {
    let (depths, ctx) = check(
        "
        query Q { ...F }
        fragment F on T { a ...F }
        ",
        10,
    );
    assert_eq!(depths["Q"], -1);
    expect![[r#"Cannot spread fragment "F" within itself"#]]
        .assert_eq(&ctx.errors()[0].message());
}

#[test]
fn mutual_spread_terminates() {
    let (depths, ctx) = check(
        "
        query Q { ...F }
        fragment F on T { a { ...G } }
        fragment G on T { b { ...F } }
        ",
        10,
    );
    assert_eq!(depths["Q"], -1);
    assert!(ctx
        .errors()
        .iter()
        .any(|e| matches!(e.data(), DiagnosticData::FragmentCycle { name } if name == "F")));
}

#[test]
fn fragment_chains_accumulate_depth() {
    let (depths, ctx) = check(
        "
        query Q { a { ...F } }
        fragment F on T { b ...G }
        fragment G on T { c { ...H } }
        fragment H on T { leaf }
        ",
        10,
    );
    assert_eq!(depths["Q"], 3);
    assert!(ctx.errors().is_empty());
}
