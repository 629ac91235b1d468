use thiserror::Error;

use super::{ColorValue, CssWideKeyword, PendingValue, Separator, StyleValue, TypedValue, ValueList};
use crate::lexical::{LexicalUnit, units_to_text};

/// [§ 4.2 Color functions](https://www.w3.org/TR/css-color-4/#color-syntax)
const COLOR_FUNCTIONS: &[&str] = &[
    "rgb",
    "rgba",
    "hsl",
    "hsla",
    "hwb",
    "lab",
    "lch",
    "oklab",
    "oklch",
    "color",
    "color-mix",
    "light-dark",
];

/// Whether `name` is a color function.
#[must_use]
pub fn is_color_function(name: &str) -> bool {
    COLOR_FUNCTIONS.iter().any(|f| f.eq_ignore_ascii_case(name))
}

/// A lexical unit (or sequence) that cannot form a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// No units at all.
    #[error("empty value")]
    Empty,
    /// A separator where a value was expected.
    #[error("unexpected '{0}' where a value was expected")]
    UnexpectedSeparator(String),
}

/// Create the value for a single lexical unit.
///
/// `subproperty` tags CSS-wide keywords that a shorthand broadcast to its
/// longhands.
///
/// # Errors
///
/// Commas, slashes and operators are not values on their own and yield
/// [`ValueError::UnexpectedSeparator`].
pub fn create_value(unit: &LexicalUnit, subproperty: bool) -> Result<StyleValue, ValueError> {
    let typed = match unit {
        LexicalUnit::Ident(name) => {
            if let Some(keyword) = CssWideKeyword::from_ident(name) {
                return Ok(StyleValue::keyword(keyword, subproperty));
            }
            TypedValue::Ident(name.clone())
        }
        LexicalUnit::Integer(value) => TypedValue::Integer(*value),
        LexicalUnit::Real(value) => TypedValue::Number(*value),
        LexicalUnit::Percentage(value) => TypedValue::Percentage(*value),
        LexicalUnit::Dimension { value, unit } => TypedValue::Dimension {
            value: *value,
            unit: unit.clone(),
        },
        LexicalUnit::String(text) => TypedValue::String(text.clone()),
        LexicalUnit::Uri(uri) => TypedValue::Uri(uri.clone()),
        LexicalUnit::Hash(hex) => TypedValue::Color(ColorValue::Hex(hex.clone())),
        LexicalUnit::Function { .. } if unit.contains_var() => {
            return Ok(StyleValue::Pending(PendingValue {
                shorthand: None,
                raw: unit.to_string(),
            }));
        }
        LexicalUnit::Function { name, arguments } => {
            if is_color_function(name) {
                TypedValue::Color(ColorValue::Function {
                    name: name.clone(),
                    arguments: arguments.clone(),
                })
            } else {
                TypedValue::Function {
                    name: name.clone(),
                    arguments: arguments.clone(),
                }
            }
        }
        LexicalUnit::LineNames(names) => TypedValue::LineNames(names.clone()),
        LexicalUnit::Comma | LexicalUnit::Slash | LexicalUnit::Operator(_) => {
            return Err(ValueError::UnexpectedSeparator(unit.to_string()));
        }
    };
    Ok(StyleValue::Typed(typed))
}

/// Create the value for a whole longhand value.
///
/// Top-level commas make a comma list of layers; several units within a
/// layer make a space list. A `var()` anywhere makes the whole value
/// pending.
///
/// # Errors
///
/// [`ValueError::Empty`] for no units or an empty layer, and
/// [`ValueError::UnexpectedSeparator`] for slashes or operators outside a
/// function.
pub fn value_from_units(units: &[LexicalUnit], subproperty: bool) -> Result<StyleValue, ValueError> {
    if units.is_empty() {
        return Err(ValueError::Empty);
    }
    if units.iter().any(LexicalUnit::contains_var) {
        return Ok(StyleValue::Pending(PendingValue {
            shorthand: None,
            raw: units_to_text(units, false),
        }));
    }
    if units.contains(&LexicalUnit::Comma) {
        let layers = units
            .split(|unit| *unit == LexicalUnit::Comma)
            .map(|layer| space_list(layer, subproperty))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(StyleValue::List(ValueList {
            separator: Separator::Comma,
            items: layers,
        }));
    }
    space_list(units, subproperty)
}

fn space_list(units: &[LexicalUnit], subproperty: bool) -> Result<StyleValue, ValueError> {
    if units.is_empty() {
        return Err(ValueError::Empty);
    }
    let items = units
        .iter()
        .map(|unit| create_value(unit, subproperty))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StyleValue::list(Separator::Space, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::lex_value;

    fn value(text: &str) -> StyleValue {
        value_from_units(&lex_value(text).unwrap(), false).unwrap()
    }

    #[test]
    fn test_keyword_and_typed() {
        assert_eq!(value("INHERIT").as_keyword(), Some(CssWideKeyword::Inherit));
        assert!(value("solid").is_ident("solid"));
        assert!(matches!(
            value("#fff"),
            StyleValue::Typed(TypedValue::Color(ColorValue::Hex(_)))
        ));
    }

    #[test]
    fn test_lists() {
        let layers = value("a 1s, b 2s");
        assert!(layers.is_comma_list());
        assert_eq!(layers.layers().len(), 2);
        assert_eq!(layers.layers()[0].parts().len(), 2);
        assert_eq!(layers.css_text(), "a 1s, b 2s");
        assert_eq!(layers.minified_text(), "a 1s,b 2s");
    }

    #[test]
    fn test_var_is_pending() {
        assert!(value("calc(var(--x) + 1px)").is_pending());
    }

    #[test]
    fn test_separator_is_error() {
        let units = lex_value("1px / 2px").unwrap();
        assert!(matches!(
            value_from_units(&units, false),
            Err(ValueError::UnexpectedSeparator(_))
        ));
    }
}
