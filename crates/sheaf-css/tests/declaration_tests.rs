//! Integration tests for style declarations: commit, ownership,
//! serialization and `var()` resolution.

use std::collections::HashMap;

use sheaf_css::declaration::{DeclarationError, StyleDeclaration};
use sheaf_css::errors::{CollectingErrorSink, Report, ShorthandError};
use sheaf_css::value::StyleValue;

const MARGIN: [&str; 4] = ["margin-top", "margin-right", "margin-bottom", "margin-left"];

#[test]
fn test_shorthand_serializes_back() {
    let declaration = StyleDeclaration::parse("margin: 1px 2px");
    assert_eq!(declaration.len(), 4);
    assert_eq!(declaration.item(0), Some("margin-top"));
    assert_eq!(declaration.css_text(), "margin: 1px 2px;");

    let value = declaration.property_value("margin").unwrap();
    assert!(matches!(value, StyleValue::Shorthand(_)));
    assert_eq!(value.css_text(), "1px 2px");
}

#[test]
fn test_longhand_takes_ownership_away() {
    let mut declaration = StyleDeclaration::parse("margin: 1px 2px");
    assert!(declaration.ledger().is_substitutable("margin", &MARGIN));

    declaration.set_property("margin-left", "5px", false).unwrap();
    let ledger = declaration.ledger();
    assert!(!ledger.is_substitutable("margin", &MARGIN));
    assert_eq!(ledger.get("margin").map(|r| r.value.owned.len()), Some(3));

    // The builder still covers all four sides.
    assert_eq!(declaration.css_text(), "margin: 1px 2px 1px 5px;");
}

#[test]
fn test_border_falls_back_to_narrower_shorthands() {
    let mut declaration = StyleDeclaration::parse("border: 1px solid red");
    assert_eq!(declaration.css_text(), "border: 1px solid red;");

    declaration
        .set_property("border-top-color", "blue", false)
        .unwrap();
    let text = declaration.css_text();
    assert!(
        text.starts_with("border-width: 1px; border-style: solid; border-color: blue red red;"),
        "{text}"
    );
}

#[test]
fn test_border_resets_border_image() {
    let declaration = StyleDeclaration::parse("border-image: url(a.png) 30; border: 1px solid red");
    assert!(declaration.ledger().get("border-image").is_none());
    assert_eq!(declaration.css_text(), "border: 1px solid red;");
}

#[test]
fn test_transition_lists_repeat_to_the_longest() {
    let declaration = StyleDeclaration::parse(
        "transition-property: a, b; transition-duration: 1s; \
         transition-timing-function: ease; transition-delay: 0s",
    );
    assert_eq!(declaration.css_text(), "transition: a 1s, b 1s;");
}

#[test]
fn test_transition_lists_that_do_not_divide_stay_longhands() {
    let declaration = StyleDeclaration::parse(
        "transition-property: a, b, c; transition-duration: 1s, 2s; \
         transition-timing-function: ease; transition-delay: 0s",
    );
    assert_eq!(
        declaration.css_text(),
        "transition-property: a, b, c; transition-duration: 1s, 2s; \
         transition-timing-function: ease; transition-delay: 0s;"
    );
}

#[test]
fn test_minified_text() {
    let declaration = StyleDeclaration::parse("border: inherit");
    assert_eq!(declaration.minified_css_text(), "border:inherit");

    let declaration = StyleDeclaration::parse("margin: 1px 2px !important; color: red");
    assert_eq!(
        declaration.minified_css_text(),
        "margin:1px 2px!important;color:red"
    );
}

#[test]
fn test_unset_and_revert_collapse() {
    let declaration = StyleDeclaration::parse("list-style: unset; margin: revert");
    assert_eq!(declaration.css_text(), "list-style: unset; margin: revert;");
}

#[test]
fn test_mixed_box_keywords_stay_longhands() {
    let declaration = StyleDeclaration::parse("margin: 1px inherit");
    assert!(!declaration.ledger().is_nonmixed("margin"));
    assert_eq!(
        declaration.css_text(),
        "margin-top: 1px; margin-right: inherit; margin-bottom: 1px; margin-left: inherit;"
    );
}

#[test]
fn test_priority_compat_comes_last() {
    let declaration = StyleDeclaration::parse("color: red\\9; margin: 0; color: blue");
    assert_eq!(
        declaration.css_text(),
        "margin: 0; color: blue; color: red\\9;"
    );
    assert_eq!(declaration.ledger().compat_entries().len(), 1);

    let declaration = StyleDeclaration::parse("width: 1px; width: 2px !ie");
    assert_eq!(declaration.css_text(), "width: 1px; width: 2px !ie;");
}

#[test]
fn test_priority() {
    let mut declaration = StyleDeclaration::new();
    declaration.set_property("margin", "1px", true).unwrap();
    declaration
        .set_property("padding", "2px !important", false)
        .unwrap();
    assert!(declaration.property_priority("margin"));
    assert!(declaration.property_priority("padding"));
    assert!(declaration.property_priority("padding-left"));
    assert_eq!(
        declaration.css_text(),
        "margin: 1px !important; padding: 2px !important;"
    );

    declaration
        .set_property("margin-top", "3px", false)
        .unwrap();
    assert!(!declaration.property_priority("margin"));
}

#[test]
fn test_remove_property() {
    let mut declaration = StyleDeclaration::parse("margin: 1px 2px; color: red");
    assert_eq!(declaration.remove_property("margin"), "1px 2px");
    assert_eq!(declaration.len(), 1);
    assert_eq!(declaration.item(0), Some("color"));
    assert!(declaration.ledger().get("margin").is_none());

    assert_eq!(declaration.remove_property("color"), "red");
    assert!(declaration.is_empty());
    assert_eq!(declaration.remove_property("color"), "");
}

#[test]
fn test_rejected_declarations() {
    let mut declaration = StyleDeclaration::new();
    assert_eq!(
        declaration.set_property("no such!", "1px", false),
        Err(DeclarationError::UnknownProperty("no such!".to_string()))
    );
    assert_eq!(
        declaration.set_property("margin", "  ", false),
        Err(DeclarationError::Empty("margin".to_string()))
    );
    assert!(matches!(
        declaration.set_property("border-width", "1px solid", false),
        Err(DeclarationError::Shorthand(ShorthandError::GrammarMismatch { .. }))
    ));
    assert!(declaration.is_empty());
}

#[test]
fn test_failed_shorthand_keeps_earlier_values() {
    let mut declaration = StyleDeclaration::parse("margin: 1px");
    assert!(declaration.set_property("margin", "1px 2px 3px 4px 5px", false).is_err());
    assert_eq!(declaration.css_text(), "margin: 1px;");
}

#[test]
fn test_error_sink_receives_reports() {
    let sink = CollectingErrorSink::new();
    let mut declaration = StyleDeclaration::with_error_sink(Box::new(sink.clone()));
    let rejected = declaration.set_css_text("margin: 1px 2px 3px 4px 5px; padding: 1px");

    assert_eq!(rejected.len(), 1);
    assert_eq!(
        sink.reports(),
        vec![Report::WrongValueCount {
            shorthand: "margin".to_string(),
            count: 5,
        }]
    );
    assert_eq!(declaration.css_text(), "padding: 1px;");
}

#[test]
fn test_set_css_text_replaces_everything() {
    let mut declaration = StyleDeclaration::parse("margin: 1px; color: red\\9");
    let rejected = declaration.set_css_text("padding: 2px");
    assert!(rejected.is_empty());
    assert_eq!(declaration.css_text(), "padding: 2px;");
}

#[test]
fn test_custom_properties_keep_case_and_text() {
    let declaration = StyleDeclaration::parse("--Main-Color: #ABC; COLOR: red");
    assert_eq!(declaration.item(0), Some("--Main-Color"));
    assert_eq!(declaration.item(1), Some("color"));
    assert_eq!(declaration.css_text(), "--Main-Color: #ABC; color: red;");
}

// ===========================================================================
// var()
// ===========================================================================

#[test]
fn test_pending_shorthand_keeps_source_text() {
    let mut declaration = StyleDeclaration::parse("margin: var(--x)");
    assert_eq!(declaration.css_text(), "margin: var(--x);");
    assert_eq!(declaration.resolve_variables(&HashMap::new()), 0);
    assert_eq!(declaration.css_text(), "margin: var(--x);");

    // The other sides still come from the shorthand text.
    declaration.set_property("margin-top", "1px", false).unwrap();
    assert_eq!(declaration.css_text(), "margin: var(--x); margin-top: 1px;");
    assert_eq!(
        declaration.minified_css_text(),
        "margin:var(--x);margin-top:1px"
    );
}

#[test]
fn test_overridden_pending_shorthand_reparses_the_same() {
    let mut first = StyleDeclaration::parse("--x: 5px; margin: var(--x) 2px; margin-top: 3px");
    assert_eq!(
        first.css_text(),
        "--x: 5px; margin: var(--x) 2px; margin-top: 3px;"
    );

    let mut second = StyleDeclaration::parse(&first.css_text());
    assert_eq!(second.css_text(), first.css_text());

    assert_eq!(first.resolve_variables(&HashMap::new()), 1);
    assert_eq!(second.resolve_variables(&HashMap::new()), 1);
    assert_eq!(first.css_text(), "--x: 5px; margin: 3px 2px 5px;");
    assert_eq!(second.css_text(), first.css_text());
}

#[test]
fn test_fully_overridden_pending_shorthand_is_dropped() {
    let mut declaration = StyleDeclaration::parse("padding: var(--p)");
    for side in ["top", "right", "bottom", "left"] {
        declaration
            .set_property(&format!("padding-{side}"), "1px", false)
            .unwrap();
    }
    assert_eq!(declaration.css_text(), "padding: 1px;");
}

#[test]
fn test_resolve_from_declared_custom_property() {
    let mut declaration = StyleDeclaration::parse("--gap: 4px; margin: var(--gap) 8px");
    assert_eq!(declaration.css_text(), "--gap: 4px; margin: var(--gap) 8px;");
    assert_eq!(declaration.resolve_variables(&HashMap::new()), 1);
    assert_eq!(declaration.css_text(), "--gap: 4px; margin: 4px 8px;");
    assert!(declaration.ledger().is_substitutable("margin", &MARGIN));
}

#[test]
fn test_resolve_fallback_and_external_values() {
    let mut declaration = StyleDeclaration::parse("padding: var(--missing, 2px); width: var(--w)");
    let external = HashMap::from([("--w".to_string(), "10px".to_string())]);
    assert_eq!(declaration.resolve_variables(&external), 2);
    assert_eq!(declaration.css_text(), "padding: 2px; width: 10px;");
}

#[test]
fn test_declared_custom_property_wins() {
    let mut declaration = StyleDeclaration::parse("--w: 1px; width: var(--w)");
    let external = HashMap::from([("--w".to_string(), "99px".to_string())]);
    assert_eq!(declaration.resolve_variables(&external), 1);
    assert_eq!(declaration.css_text(), "--w: 1px; width: 1px;");
}
