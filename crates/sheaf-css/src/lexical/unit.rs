use std::fmt;

use serde::Serialize;

/// One lexed component of a CSS property value.
///
/// Whitespace is not a unit: it only separates units. Commas and slashes are
/// kept because shorthand grammars use them as structural separators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum LexicalUnit {
    /// An identifier such as `auto`, `solid` or `--main-color`.
    Ident(String),
    /// A number without fractional part or exponent, e.g. `3`.
    Integer(i64),
    /// Any other number, e.g. `1.5` or `2e3`.
    Real(f64),
    /// A percentage such as `50%`.
    Percentage(f64),
    /// A number with a unit such as `10px` or `200ms`.
    Dimension {
        /// Numeric part.
        value: f64,
        /// Unit, as written.
        unit: String,
    },
    /// A quoted string, unescaped.
    String(String),
    /// A `url(...)` reference.
    Uri(String),
    /// A `#` hash, e.g. the `ff0000` of `#ff0000`.
    Hash(String),
    /// A function such as `rgb(0 0 0 / 50%)` or `repeat(2, 1fr)`.
    Function {
        /// Function name, as written.
        name: String,
        /// Arguments, with commas, slashes and operators preserved.
        arguments: Vec<LexicalUnit>,
    },
    /// A bracketed grid line-name group, e.g. `[header-start main]`.
    LineNames(Vec<String>),
    /// `,`
    Comma,
    /// `/`
    Slash,
    /// `+`, `-` or `*` between operands.
    Operator(char),
}

impl LexicalUnit {
    /// Whether this is the identifier `keyword` (ASCII case-insensitive).
    #[must_use]
    pub fn is_ident(&self, keyword: &str) -> bool {
        matches!(self, Self::Ident(name) if name.eq_ignore_ascii_case(keyword))
    }

    /// The identifier text, if this is an identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this is a function named `name` (ASCII case-insensitive).
    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        matches!(self, Self::Function { name: n, .. } if n.eq_ignore_ascii_case(name))
    }

    /// Whether this is a `var()` reference, at any nesting depth.
    #[must_use]
    pub fn contains_var(&self) -> bool {
        match self {
            Self::Function { name, arguments } => {
                name.eq_ignore_ascii_case("var") || arguments.iter().any(Self::contains_var)
            }
            _ => false,
        }
    }

    /// Whether this unit is a separator (comma, slash or operator).
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Comma | Self::Slash | Self::Operator(_))
    }

    /// Whether this is a numeric zero (`0`, `0.0`, `0px`, `0%`).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(value) => *value == 0,
            Self::Real(value) | Self::Percentage(value) | Self::Dimension { value, .. } => {
                *value == 0.0
            }
            _ => false,
        }
    }

    /// Write this unit as CSS text.
    ///
    /// Minified output drops optional whitespace and leading zeros.
    pub fn write_to(&self, out: &mut String, minified: bool) {
        match self {
            Self::Ident(name) => out.push_str(name),
            Self::Integer(value) => out.push_str(&value.to_string()),
            Self::Real(value) => out.push_str(&format_number(*value, minified)),
            Self::Percentage(value) => {
                out.push_str(&format_number(*value, minified));
                out.push('%');
            }
            Self::Dimension { value, unit } => {
                out.push_str(&format_number(*value, minified));
                out.push_str(unit);
            }
            Self::String(text) => write_quoted(out, text),
            Self::Uri(uri) => {
                out.push_str("url(");
                if uri.chars().any(|c| c.is_whitespace() || "()'\"\\".contains(c)) {
                    write_quoted(out, uri);
                } else {
                    out.push_str(uri);
                }
                out.push(')');
            }
            Self::Hash(name) => {
                out.push('#');
                out.push_str(name);
            }
            Self::Function { name, arguments } => {
                out.push_str(name);
                out.push('(');
                write_units(out, arguments, minified);
                out.push(')');
            }
            Self::LineNames(names) => {
                out.push('[');
                out.push_str(&names.join(" "));
                out.push(']');
            }
            Self::Comma => out.push(','),
            Self::Slash => out.push('/'),
            Self::Operator(op) => out.push(*op),
        }
    }
}

impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, false);
        f.write_str(&out)
    }
}

/// Format a CSS number: integral values without a fractional part, and
/// in minified mode without the leading zero (`.5`).
#[must_use]
pub fn format_number(value: f64, minified: bool) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let text = value.to_string();
    if minified {
        if let Some(rest) = text.strip_prefix("0.") {
            return format!(".{rest}");
        }
        if let Some(rest) = text.strip_prefix("-0.") {
            return format!("-.{rest}");
        }
    }
    text
}

/// Serialize a unit sequence the way it appears inside a value.
#[must_use]
pub fn units_to_text(units: &[LexicalUnit], minified: bool) -> String {
    let mut out = String::new();
    write_units(&mut out, units, minified);
    out
}

fn write_units(out: &mut String, units: &[LexicalUnit], minified: bool) {
    for (index, unit) in units.iter().enumerate() {
        match unit {
            LexicalUnit::Comma => out.push_str(if minified { "," } else { ", " }),
            LexicalUnit::Slash => out.push_str(if minified { "/" } else { " / " }),
            _ => {
                let after_separator = index > 0
                    && matches!(units[index - 1], LexicalUnit::Comma | LexicalUnit::Slash);
                if index > 0 && !after_separator {
                    out.push(' ');
                }
                unit.write_to(out, minified);
            }
        }
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0, false), "1");
        assert_eq!(format_number(0.5, false), "0.5");
        assert_eq!(format_number(0.5, true), ".5");
        assert_eq!(format_number(-0.25, true), "-.25");
        assert_eq!(format_number(-0.0, false), "0");
    }

    #[test]
    fn test_function_text() {
        let unit = LexicalUnit::Function {
            name: "rgb".to_string(),
            arguments: vec![
                LexicalUnit::Integer(0),
                LexicalUnit::Integer(0),
                LexicalUnit::Integer(0),
                LexicalUnit::Slash,
                LexicalUnit::Percentage(50.0),
            ],
        };
        assert_eq!(unit.to_string(), "rgb(0 0 0 / 50%)");
        let mut minified = String::new();
        unit.write_to(&mut minified, true);
        assert_eq!(minified, "rgb(0 0 0/50%)");
    }
}
