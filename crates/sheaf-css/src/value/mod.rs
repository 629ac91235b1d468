//! CSS value model.
//!
//! [§ 4 Textual Data Types](https://www.w3.org/TR/css-values-4/#textual-values)
//!
//! A [`StyleValue`] is what a declaration stores for one longhand. Besides
//! ordinary typed values and lists it has two synthetic markers the shorthand
//! engine relies on: [`PendingValue`] for values that still contain `var()`
//! and [`UnknownValue`] for text kept verbatim (browser hacks, unknown
//! properties).

mod factory;

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::lexical::LexicalUnit;

pub use factory::{ValueError, create_value, is_color_function, value_from_units};

/// [§ 7.3 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
///
/// "All CSS properties accept the CSS-wide keyword values as the entire
/// property value."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CssWideKeyword {
    /// `inherit`
    Inherit,
    /// `initial`
    Initial,
    /// `unset`
    Unset,
    /// `revert`
    Revert,
}

impl CssWideKeyword {
    /// Parse an identifier as a CSS-wide keyword.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        ident.parse().ok()
    }
}

/// A CSS-wide keyword stored on a property.
///
/// `subproperty` records that the keyword was broadcast from a shorthand.
/// It does not take part in equality.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KeywordValue {
    /// The keyword.
    pub keyword: CssWideKeyword,
    /// Set when the keyword came from a shorthand assignment.
    pub subproperty: bool,
}

impl PartialEq for KeywordValue {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword
    }
}

/// A color that is not a plain identifier.
///
/// Named colors (`red`, `currentcolor`) are kept as identifiers; whether an
/// identifier is a color depends on the property it is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "form", content = "value", rename_all = "kebab-case")]
pub enum ColorValue {
    /// `#rgb`, `#rrggbb`, `#rrggbbaa`...
    Hex(String),
    /// `rgb()`, `hsl()`, `color-mix()` and the other color functions.
    Function {
        /// Function name.
        name: String,
        /// Raw arguments.
        arguments: Vec<LexicalUnit>,
    },
}

/// A single typed component value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum TypedValue {
    /// A keyword or custom identifier.
    Ident(String),
    /// An integer.
    Integer(i64),
    /// A non-integer number.
    Number(f64),
    /// A percentage.
    Percentage(f64),
    /// A length, time, angle, flex or other dimension.
    Dimension {
        /// Numeric part.
        value: f64,
        /// Unit, as written.
        unit: String,
    },
    /// A string.
    String(String),
    /// A URL.
    Uri(String),
    /// A hex color or color function.
    Color(ColorValue),
    /// Any other function (`calc()`, `linear-gradient()`, `repeat()`...).
    Function {
        /// Function name.
        name: String,
        /// Raw arguments.
        arguments: Vec<LexicalUnit>,
    },
    /// A grid line-name group.
    LineNames(Vec<String>),
}

impl TypedValue {
    /// The lexical unit that spells this value.
    #[must_use]
    pub fn to_lexical_unit(&self) -> LexicalUnit {
        match self {
            Self::Ident(name) => LexicalUnit::Ident(name.clone()),
            Self::Integer(value) => LexicalUnit::Integer(*value),
            Self::Number(value) => LexicalUnit::Real(*value),
            Self::Percentage(value) => LexicalUnit::Percentage(*value),
            Self::Dimension { value, unit } => LexicalUnit::Dimension {
                value: *value,
                unit: unit.clone(),
            },
            Self::String(text) => LexicalUnit::String(text.clone()),
            Self::Uri(uri) => LexicalUnit::Uri(uri.clone()),
            Self::Color(ColorValue::Hex(hex)) => LexicalUnit::Hash(hex.clone()),
            Self::Color(ColorValue::Function { name, arguments })
            | Self::Function { name, arguments } => LexicalUnit::Function {
                name: name.clone(),
                arguments: arguments.clone(),
            },
            Self::LineNames(names) => LexicalUnit::LineNames(names.clone()),
        }
    }
}

/// How the items of a [`ValueList`] are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// One multi-part value, e.g. `0% 0%`.
    Space,
    /// Independent layers, e.g. `fade 1s, slide 2s`.
    Comma,
}

/// A space- or comma-separated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueList {
    /// Separator between items.
    pub separator: Separator,
    /// The items, in order.
    pub items: Vec<StyleValue>,
}

/// Longhand names a shorthand assignment still owns.
pub type OwnedLonghands = SmallVec<[String; 8]>;

/// The value of a shorthand as a unit: its text plus the longhands it set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShorthandValue {
    /// Shorthand property name.
    pub shorthand: String,
    /// Value text as given (or as rebuilt).
    pub source_text: String,
    /// Minified form of the value text.
    pub minified_text: String,
    /// Whether the shorthand was `!important`.
    pub important: bool,
    /// Longhands this shorthand assignment still owns.
    pub owned: OwnedLonghands,
}

/// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// "If a property contains one or more `var()` functions, and those functions
/// are syntactically valid, the entire property's grammar must be assumed to
/// be valid at parse time."
///
/// A longhand whose value (or whose shorthand's value) is waiting for
/// `var()` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingValue {
    /// The shorthand the raw text belongs to, if the longhand got it from one.
    pub shorthand: Option<String>,
    /// The unsubstituted value text.
    pub raw: String,
}

/// Text kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownValue {
    /// Raw value text.
    pub raw: String,
    /// Set for browser-hack values (`!ie`, `\9`).
    pub priority_compat: bool,
}

/// A value stored for a property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum StyleValue {
    /// A CSS-wide keyword.
    Keyword(KeywordValue),
    /// A single typed value.
    Typed(TypedValue),
    /// A space- or comma-separated list.
    List(ValueList),
    /// A shorthand seen as a unit.
    Shorthand(ShorthandValue),
    /// Waiting for `var()` substitution.
    Pending(PendingValue),
    /// Verbatim text.
    Unknown(UnknownValue),
}

impl StyleValue {
    /// An identifier value.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Typed(TypedValue::Ident(name.into()))
    }

    /// A CSS-wide keyword value.
    #[must_use]
    pub const fn keyword(keyword: CssWideKeyword, subproperty: bool) -> Self {
        Self::Keyword(KeywordValue {
            keyword,
            subproperty,
        })
    }

    /// A list value. A single item is returned unwrapped.
    #[must_use]
    pub fn list(separator: Separator, mut items: Vec<Self>) -> Self {
        if items.len() == 1
            && let Some(item) = items.pop()
        {
            return item;
        }
        Self::List(ValueList { separator, items })
    }

    /// The CSS-wide keyword, if this is one.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<CssWideKeyword> {
        match self {
            Self::Keyword(value) => Some(value.keyword),
            _ => None,
        }
    }

    /// The identifier, if this is a single identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Typed(TypedValue::Ident(name)) => Some(name),
            _ => None,
        }
    }

    /// Whether this is the identifier `keyword` (ASCII case-insensitive).
    #[must_use]
    pub fn is_ident(&self, keyword: &str) -> bool {
        self.as_ident()
            .is_some_and(|name| name.eq_ignore_ascii_case(keyword))
    }

    /// Whether this value waits on `var()` substitution.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Whether this value is verbatim text.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Whether this is a comma-separated (layered) list.
    #[must_use]
    pub const fn is_comma_list(&self) -> bool {
        matches!(
            self,
            Self::List(ValueList {
                separator: Separator::Comma,
                ..
            })
        )
    }

    /// The layers of a comma list, or the value itself as the only layer.
    #[must_use]
    pub fn layers(&self) -> &[Self] {
        match self {
            Self::List(ValueList {
                separator: Separator::Comma,
                items,
            }) => items,
            _ => std::slice::from_ref(self),
        }
    }

    /// The parts of a space list, or the value itself as the only part.
    #[must_use]
    pub fn parts(&self) -> &[Self] {
        match self {
            Self::List(ValueList {
                separator: Separator::Space,
                items,
            }) => items,
            _ => std::slice::from_ref(self),
        }
    }

    /// Whether this is a numeric zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Typed(typed) => typed.to_lexical_unit().is_zero(),
            _ => false,
        }
    }

    /// Lexical units spelling this value (separators included).
    #[must_use]
    pub fn to_lexical_units(&self) -> Vec<LexicalUnit> {
        let mut units = Vec::new();
        self.collect_units(&mut units);
        units
    }

    fn collect_units(&self, units: &mut Vec<LexicalUnit>) {
        match self {
            Self::Keyword(value) => units.push(LexicalUnit::Ident(value.keyword.to_string())),
            Self::Typed(typed) => units.push(typed.to_lexical_unit()),
            Self::List(list) => {
                for (index, item) in list.items.iter().enumerate() {
                    if index > 0 && list.separator == Separator::Comma {
                        units.push(LexicalUnit::Comma);
                    }
                    item.collect_units(units);
                }
            }
            Self::Shorthand(_) | Self::Pending(_) | Self::Unknown(_) => {}
        }
    }

    /// Serialize into `out`.
    pub fn write_to(&self, out: &mut String, minified: bool) {
        match self {
            Self::Keyword(value) => out.push_str(value.keyword.as_ref()),
            Self::Typed(typed) => typed.to_lexical_unit().write_to(out, minified),
            Self::List(list) => {
                for (index, item) in list.items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(match (list.separator, minified) {
                            (Separator::Space, _) => " ",
                            (Separator::Comma, false) => ", ",
                            (Separator::Comma, true) => ",",
                        });
                    }
                    item.write_to(out, minified);
                }
            }
            Self::Shorthand(value) => out.push_str(if minified {
                &value.minified_text
            } else {
                &value.source_text
            }),
            // [CSSOM § 6.7](https://drafts.csswg.org/cssom/#serialize-a-css-value)
            // A longhand set from a shorthand that is pending substitution
            // serializes as the empty string.
            Self::Pending(value) => {
                if value.shorthand.is_none() {
                    out.push_str(&value.raw);
                }
            }
            Self::Unknown(value) => out.push_str(&value.raw),
        }
    }

    /// Normal CSS text.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, false);
        out
    }

    /// Minified CSS text.
    #[must_use]
    pub fn minified_text(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, true);
        out
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}
