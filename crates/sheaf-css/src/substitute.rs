//! CSS Custom Properties `var()` Substitution
//!
//! [CSS Custom Properties for Cascading Variables Module Level 1 § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
//!
//! "If a property value contains one or more `var()` functions, and those
//! functions are syntactically valid, the entire property's grammar must be
//! assumed to be valid at parse time. It is only syntax-checked at
//! computed-value time, after `var()` functions have been substituted."
//!
//! Values left pending by the declaration are resolved here, then fed back
//! through the normal property setter.

use std::collections::HashMap;

use crate::lexical::LexicalUnit;

/// Maximum substitution depth to prevent infinite recursion from cycles.
///
/// [§ 2.3 Resolving Dependency Cycles](https://www.w3.org/TR/css-variables-1/#cycles)
///
/// "If there is a cycle in the dependency graph, all the custom properties
/// in the cycle are invalid at computed-value time."
///
/// A depth limit stands in for cycle detection.
pub const MAX_SUBSTITUTION_DEPTH: u32 = 32;

/// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// Check if lexical units contain any `var()` function references.
#[must_use]
pub fn contains_var(units: &[LexicalUnit]) -> bool {
    units.iter().any(LexicalUnit::contains_var)
}

/// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// "To substitute a `var()` in a property's value:
///  2. If the value of the custom property named by the first argument to
///     the `var()` function is anything but the initial value, replace the
///     `var()` function by the value of the corresponding custom property.
///  3. Otherwise, if the `var()` function has a fallback value as its second
///     argument, replace the `var()` function by the fallback value. If there
///     are any `var()` references in the fallback, substitute them as well.
///  4. Otherwise, the property containing the `var()` function is invalid at
///     computed-value time."
///
/// Custom property values may themselves reference other custom
/// properties; those are substituted one level deeper.
///
/// Returns `None` if substitution fails (guaranteed-invalid / cycle).
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn substitute_var(
    units: &[LexicalUnit],
    custom_properties: &HashMap<String, Vec<LexicalUnit>>,
    depth: u32,
) -> Option<Vec<LexicalUnit>> {
    // [§ 2.3](https://www.w3.org/TR/css-variables-1/#cycles)
    if depth > MAX_SUBSTITUTION_DEPTH {
        return None;
    }

    let mut result = Vec::with_capacity(units.len());
    for unit in units {
        match unit {
            LexicalUnit::Function { name, arguments } if name.eq_ignore_ascii_case("var") => {
                let (property, fallback) = parse_var_arguments(arguments);
                let property = property?;

                if let Some(value) = custom_properties.get(property) {
                    // Step 2: substitute the custom property's own value.
                    result.extend(substitute_var(value, custom_properties, depth + 1)?);
                } else if let Some(fallback) = fallback {
                    // Step 3: the fallback, with its own var() substituted.
                    result.extend(substitute_var(fallback, custom_properties, depth + 1)?);
                } else {
                    // Step 4: invalid at computed-value time.
                    return None;
                }
            }
            LexicalUnit::Function { name, arguments } => {
                // e.g. calc(var(--x) + 1px)
                result.push(LexicalUnit::Function {
                    name: name.clone(),
                    arguments: substitute_var(arguments, custom_properties, depth + 1)?,
                });
            }
            other => result.push(other.clone()),
        }
    }
    Some(result)
}

/// Parse the arguments of a `var()` function.
///
/// [§ 3](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// "`var()` = var( <custom-property-name> \[, <declaration-value>\]? )"
///
/// Returns the `--*` name (or `None` when the first argument is not one)
/// and everything after the first comma as the fallback.
fn parse_var_arguments(arguments: &[LexicalUnit]) -> (Option<&str>, Option<&[LexicalUnit]>) {
    let name = match arguments.first() {
        Some(LexicalUnit::Ident(ident)) if ident.starts_with("--") => Some(ident.as_str()),
        _ => return (None, None),
    };
    let fallback = match arguments.get(1) {
        Some(LexicalUnit::Comma) => arguments.get(2..),
        // Anything else after the name makes the reference invalid.
        Some(_) => return (None, None),
        None => None,
    };
    (name, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::lex_value;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, Vec<LexicalUnit>> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), lex_value(value).unwrap()))
            .collect()
    }

    fn substitute(text: &str, custom: &HashMap<String, Vec<LexicalUnit>>) -> Option<Vec<LexicalUnit>> {
        substitute_var(&lex_value(text).unwrap(), custom, 0)
    }

    #[test]
    fn test_substitute_basic() {
        let custom = props(&[("--color", "red")]);
        assert_eq!(
            substitute("1px solid var(--color)", &custom),
            Some(lex_value("1px solid red").unwrap())
        );
    }

    #[test]
    fn test_substitute_fallback_with_commas() {
        let custom = props(&[]);
        assert_eq!(
            substitute("var(--missing, Arial, sans-serif)", &custom),
            Some(lex_value("Arial, sans-serif").unwrap())
        );
    }

    #[test]
    fn test_substitute_nested_fallback() {
        let custom = props(&[("--color", "green")]);
        assert_eq!(
            substitute("var(--missing, var(--color))", &custom),
            Some(lex_value("green").unwrap())
        );
    }

    #[test]
    fn test_substitute_inside_function() {
        let custom = props(&[("--x", "2px")]);
        assert_eq!(
            substitute("calc(var(--x) + 1px)", &custom),
            Some(lex_value("calc(2px + 1px)").unwrap())
        );
    }

    #[test]
    fn test_substitute_missing_no_fallback() {
        assert_eq!(substitute("var(--missing)", &props(&[])), None);
    }

    #[test]
    fn test_substitute_cycle_is_invalid() {
        let custom = props(&[("--a", "var(--b)"), ("--b", "var(--a)")]);
        assert_eq!(substitute("var(--a)", &custom), None);
    }

    #[test]
    fn test_substitute_depth_limit() {
        let custom = props(&[("--a", "ok")]);
        let units = lex_value("var(--a)").unwrap();
        assert_eq!(substitute_var(&units, &custom, MAX_SUBSTITUTION_DEPTH + 1), None);
    }

    #[test]
    fn test_contains_var() {
        assert!(contains_var(&lex_value("calc(var(--x) + 1px)").unwrap()));
        assert!(!contains_var(&lex_value("red").unwrap()));
    }
}
