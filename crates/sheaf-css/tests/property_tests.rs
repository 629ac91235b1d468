//! Property tests: rebuilt shorthand text always reads back to the same
//! longhands, and is never longer than what was written.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use sheaf_css::database::ShorthandDatabase;
use sheaf_css::declaration::StyleDeclaration;
use sheaf_css::lexical::lex_value;
use sheaf_css::shorthand::{RecomposeOptions, decompose, recompose};

fn lengths(values: &[u8]) -> String {
    values
        .iter()
        .map(|value| format!("{value}px"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn rebuilds_to_same_longhands(shorthand: &str, text: &str) -> Option<usize> {
    let info = ShorthandDatabase::global().shorthand(shorthand)?;
    let expansion = decompose(info, &lex_value(text).ok()?).ok()?;
    let rebuilt = recompose(info, &expansion, RecomposeOptions::default())?;
    let again = decompose(info, &lex_value(&rebuilt).ok()?).ok()?;
    (again == expansion).then(|| rebuilt.split_whitespace().count())
}

#[quickcheck]
fn prop_box_rebuild_is_stable_and_short(values: Vec<u8>) -> TestResult {
    if values.is_empty() || values.len() > 4 {
        return TestResult::discard();
    }
    match rebuilds_to_same_longhands("margin", &lengths(&values)) {
        Some(count) => TestResult::from_bool(count <= values.len()),
        None => TestResult::failed(),
    }
}

#[quickcheck]
fn prop_radius_rebuild_is_stable(horizontal: Vec<u8>, vertical: Vec<u8>) -> TestResult {
    if horizontal.is_empty() || horizontal.len() > 4 || vertical.len() > 4 {
        return TestResult::discard();
    }
    let mut text = lengths(&horizontal);
    if !vertical.is_empty() {
        text.push_str(" / ");
        text.push_str(&lengths(&vertical));
    }
    TestResult::from_bool(rebuilds_to_same_longhands("border-radius", &text).is_some())
}

#[quickcheck]
fn prop_declaration_text_reparses(top: u8, right: u8, important: bool) -> bool {
    let priority = if important { " !important" } else { "" };
    let first = StyleDeclaration::parse(&format!("padding: {top}px {right}px{priority}"));
    let second = StyleDeclaration::parse(&first.css_text());
    first.entries() == second.entries() && first.css_text() == second.css_text()
}
