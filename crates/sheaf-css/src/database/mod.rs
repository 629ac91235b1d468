//! Shorthand database.
//!
//! [CSS Cascade 4 § 2.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow
//! authors to specify the values of several properties with a single
//! property."
//!
//! A read-only, process-wide table built once on first use: which
//! longhands each shorthand sets, and what each longhand accepts. It is the
//! identifier/grammar oracle the decomposers and builders consult.

mod colors;
mod longhands;
mod shorthands;

use std::collections::HashMap;

use bitflags::bitflags;
use once_cell::sync::Lazy;

use crate::lexical::{LexicalUnit, lex_value};
use crate::shorthand::ShorthandKind;
use crate::value::{CssWideKeyword, StyleValue, UnknownValue, is_color_function, value_from_units};

bitflags! {
    /// Kinds of typed value a longhand accepts besides its keywords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ValueKinds: u16 {
        /// `<length>`
        const LENGTH = 1 << 0;
        /// `<percentage>`
        const PERCENTAGE = 1 << 1;
        /// `<number>`
        const NUMBER = 1 << 2;
        /// `<integer>`
        const INTEGER = 1 << 3;
        /// `<color>`
        const COLOR = 1 << 4;
        /// `<image>`
        const IMAGE = 1 << 5;
        /// `<string>`
        const STRING = 1 << 6;
        /// `<time>`
        const TIME = 1 << 7;
        /// `<flex>` (`fr`)
        const FLEX = 1 << 8;
        /// `<custom-ident>`
        const CUSTOM_IDENT = 1 << 9;
        /// Negative numeric values are invalid.
        const NON_NEGATIVE = 1 << 10;
        /// `<length-percentage>`
        const LENGTH_PERCENTAGE = Self::LENGTH.bits() | Self::PERCENTAGE.bits();
    }
}

/// [§ 6.1 Dimensions](https://www.w3.org/TR/css-values-4/#dimensions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// `px`, `em`, `vw`...
    Length,
    /// `s`, `ms`
    Time,
    /// `deg`, `rad`, `grad`, `turn`
    Angle,
    /// `fr`
    Flex,
    /// `dpi`, `dpcm`, `dppx`, `x`
    Resolution,
    /// Anything else.
    Unknown,
}

/// Classify a dimension unit (ASCII case-insensitive).
#[must_use]
pub fn unit_class(unit: &str) -> UnitClass {
    const LENGTH_UNITS: &[&str] = &[
        "px", "em", "rem", "ex", "rex", "ch", "rch", "ic", "ric", "cap", "rcap", "lh", "rlh",
        "vw", "vh", "vi", "vb", "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "cqw",
        "cqh", "cqi", "cqb", "cqmin", "cqmax", "cm", "mm", "q", "in", "pt", "pc",
    ];
    let unit = unit.to_ascii_lowercase();
    match unit.as_str() {
        "s" | "ms" => UnitClass::Time,
        "deg" | "rad" | "grad" | "turn" => UnitClass::Angle,
        "fr" => UnitClass::Flex,
        "dpi" | "dpcm" | "dppx" | "x" => UnitClass::Resolution,
        other if LENGTH_UNITS.contains(&other) => UnitClass::Length,
        _ => UnitClass::Unknown,
    }
}

/// [§ 4.6.1 Math functions](https://www.w3.org/TR/css-values-4/#math)
const MATH_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp", "-webkit-calc"];

/// Whether `name` is a named color (including `transparent`,
/// `currentcolor` and system colors).
#[must_use]
pub fn is_named_color(name: &str) -> bool {
    colors::NAMED_COLORS
        .iter()
        .any(|color| color.eq_ignore_ascii_case(name))
}

/// [§ 4.2 Author-defined Identifiers](https://www.w3.org/TR/css-values-4/#custom-idents)
///
/// "The CSS-wide keywords are not valid <custom-ident>s. The default
/// keyword is reserved and is also not a valid <custom-ident>."
#[must_use]
pub fn is_custom_ident(name: &str) -> bool {
    CssWideKeyword::from_ident(name).is_none() && !name.eq_ignore_ascii_case("default")
}

/// Whether `name` is an `<image>` function.
#[must_use]
pub fn is_image_function(name: &str) -> bool {
    longhands::IMAGE_FUNCTIONS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(name))
}

/// Whether `name` is a timing-function keyword.
#[must_use]
pub fn is_timing_keyword(name: &str) -> bool {
    longhands::TIMING_KEYWORDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(name))
}

/// What the database knows about one longhand.
#[derive(Debug)]
pub struct LonghandInfo {
    name: &'static str,
    initial: StyleValue,
    initial_text: &'static str,
    inherited: bool,
    kinds: ValueKinds,
    identifiers: &'static [&'static str],
    functions: &'static [&'static str],
}

impl LonghandInfo {
    /// Property name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// [CSS Cascade 4 § 7.1](https://www.w3.org/TR/css-cascade-4/#initial-values)
    #[must_use]
    pub const fn initial(&self) -> &StyleValue {
        &self.initial
    }

    /// Initial value as text.
    #[must_use]
    pub const fn initial_text(&self) -> &'static str {
        self.initial_text
    }

    /// Whether the property is inherited.
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Accepted value kinds.
    #[must_use]
    pub const fn kinds(&self) -> ValueKinds {
        self.kinds
    }

    /// Keywords the property accepts.
    #[must_use]
    pub const fn identifiers(&self) -> &'static [&'static str] {
        self.identifiers
    }

    /// Whether `ident` is one of this property's keywords.
    #[must_use]
    pub fn is_legal_identifier(&self, ident: &str) -> bool {
        self.identifiers
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ident))
    }

    /// Whether a single lexical unit is a valid (complete or partial)
    /// value for this property.
    #[must_use]
    pub fn accepts(&self, unit: &LexicalUnit) -> bool {
        let kinds = self.kinds;
        let sign_ok = |value: f64| !kinds.contains(ValueKinds::NON_NEGATIVE) || value >= 0.0;

        match unit {
            LexicalUnit::Ident(name) => {
                self.is_legal_identifier(name)
                    || (kinds.contains(ValueKinds::COLOR) && is_named_color(name))
                    || (kinds.contains(ValueKinds::CUSTOM_IDENT) && is_custom_ident(name))
            }
            LexicalUnit::Integer(value) => {
                #[allow(clippy::cast_precision_loss)]
                let value = *value as f64;
                (kinds.intersects(ValueKinds::INTEGER | ValueKinds::NUMBER)
                    || (kinds.contains(ValueKinds::LENGTH) && value == 0.0))
                    && sign_ok(value)
            }
            LexicalUnit::Real(value) => kinds.contains(ValueKinds::NUMBER) && sign_ok(*value),
            LexicalUnit::Percentage(value) => {
                kinds.contains(ValueKinds::PERCENTAGE) && sign_ok(*value)
            }
            LexicalUnit::Dimension { value, unit } => {
                let kind = match unit_class(unit) {
                    UnitClass::Length => ValueKinds::LENGTH,
                    UnitClass::Time => ValueKinds::TIME,
                    UnitClass::Flex => ValueKinds::FLEX,
                    UnitClass::Angle | UnitClass::Resolution | UnitClass::Unknown => {
                        return false;
                    }
                };
                kinds.contains(kind) && sign_ok(*value)
            }
            LexicalUnit::String(_) => kinds.contains(ValueKinds::STRING),
            LexicalUnit::Uri(_) => kinds.contains(ValueKinds::IMAGE),
            LexicalUnit::Hash(hex) => {
                kinds.contains(ValueKinds::COLOR)
                    && matches!(hex.len(), 3 | 4 | 6 | 8)
                    && hex.chars().all(|c| c.is_ascii_hexdigit())
            }
            LexicalUnit::Function { name, .. } => {
                if is_color_function(name) {
                    kinds.contains(ValueKinds::COLOR)
                } else if is_image_function(name) {
                    kinds.contains(ValueKinds::IMAGE)
                } else if MATH_FUNCTIONS.iter().any(|f| f.eq_ignore_ascii_case(name)) {
                    kinds.intersects(
                        ValueKinds::LENGTH_PERCENTAGE
                            | ValueKinds::NUMBER
                            | ValueKinds::INTEGER
                            | ValueKinds::TIME
                            | ValueKinds::FLEX,
                    )
                } else {
                    self.functions.iter().any(|f| f.eq_ignore_ascii_case(name))
                }
            }
            LexicalUnit::LineNames(_)
            | LexicalUnit::Comma
            | LexicalUnit::Slash
            | LexicalUnit::Operator(_) => false,
        }
    }
}

/// What the database knows about one shorthand.
#[derive(Debug)]
pub struct ShorthandInfo {
    name: &'static str,
    kind: ShorthandKind,
    longhands: &'static [&'static str],
    reset_only: &'static [&'static str],
}

impl ShorthandInfo {
    /// Property name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Grammar family.
    #[must_use]
    pub const fn kind(&self) -> ShorthandKind {
        self.kind
    }

    /// Longhands the shorthand sets from its value, in canonical order.
    #[must_use]
    pub const fn longhands(&self) -> &'static [&'static str] {
        self.longhands
    }

    /// Longhands the shorthand resets to their initial value but cannot
    /// express.
    #[must_use]
    pub const fn reset_only(&self) -> &'static [&'static str] {
        self.reset_only
    }

    /// Every longhand the shorthand assigns: value longhands first, then
    /// reset-only ones.
    pub fn all_longhands(&self) -> impl Iterator<Item = &'static str> + use<> {
        let longhands = self.longhands;
        let reset_only = self.reset_only;
        longhands.iter().chain(reset_only).copied()
    }
}

/// The shorthand database.
#[derive(Debug)]
pub struct ShorthandDatabase {
    longhands: HashMap<&'static str, LonghandInfo>,
    shorthands: HashMap<&'static str, ShorthandInfo>,
    containing: HashMap<&'static str, Vec<&'static str>>,
}

static DATABASE: Lazy<ShorthandDatabase> = Lazy::new(ShorthandDatabase::build);

impl ShorthandDatabase {
    /// The process-wide database, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &DATABASE
    }

    fn build() -> Self {
        let longhands = longhands::LONGHANDS
            .iter()
            .map(|spec| {
                let initial = lex_value(spec.initial)
                    .ok()
                    .and_then(|units| value_from_units(&units, false).ok())
                    .unwrap_or_else(|| {
                        StyleValue::Unknown(UnknownValue {
                            raw: spec.initial.to_string(),
                            priority_compat: false,
                        })
                    });
                let info = LonghandInfo {
                    name: spec.name,
                    initial,
                    initial_text: spec.initial,
                    inherited: spec.inherited,
                    kinds: spec.kinds,
                    identifiers: spec.identifiers,
                    functions: spec.functions,
                };
                (spec.name, info)
            })
            .collect();

        let shorthands = shorthands::SHORTHANDS
            .iter()
            .map(|spec| {
                let info = ShorthandInfo {
                    name: spec.name,
                    kind: spec.kind,
                    longhands: spec.longhands,
                    reset_only: spec.reset_only,
                };
                (spec.name, info)
            })
            .collect::<HashMap<_, _>>();

        let mut containing: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for &name in shorthands::SERIALIZATION_ORDER {
            if let Some(info) = shorthands.get(name) {
                for longhand in info.all_longhands() {
                    containing.entry(longhand).or_default().push(name);
                }
            }
        }

        log::debug!(
            target: "sheaf::database",
            "built shorthand database: {} longhands, {} shorthands",
            longhands::LONGHANDS.len(),
            shorthands.len()
        );

        Self {
            longhands,
            shorthands,
            containing,
        }
    }

    /// Information about a longhand.
    #[must_use]
    pub fn longhand(&self, name: &str) -> Option<&LonghandInfo> {
        self.longhands.get(name)
    }

    /// Information about a shorthand.
    #[must_use]
    pub fn shorthand(&self, name: &str) -> Option<&ShorthandInfo> {
        self.shorthands.get(name)
    }

    /// Whether `name` is a known shorthand.
    #[must_use]
    pub fn is_shorthand(&self, name: &str) -> bool {
        self.shorthands.contains_key(name)
    }

    /// Value longhands of a shorthand in canonical order; empty for
    /// anything that is not a shorthand.
    #[must_use]
    pub fn subproperties_of(&self, shorthand: &str) -> &'static [&'static str] {
        self.shorthand(shorthand)
            .map(ShorthandInfo::longhands)
            .unwrap_or_default()
    }

    /// Whether `text` is a keyword of `longhand`.
    #[must_use]
    pub fn is_legal_identifier(&self, longhand: &str, text: &str) -> bool {
        self.longhand(longhand)
            .is_some_and(|info| info.is_legal_identifier(text))
    }

    /// Whether the database has a keyword set for `longhand`.
    #[must_use]
    pub fn has_known_identifier_set(&self, longhand: &str) -> bool {
        self.longhand(longhand)
            .is_some_and(|info| !info.identifiers.is_empty())
    }

    /// Initial value of `longhand`.
    #[must_use]
    pub fn initial_value(&self, longhand: &str) -> Option<&StyleValue> {
        self.longhand(longhand).map(LonghandInfo::initial)
    }

    /// Whether `longhand` is inherited.
    #[must_use]
    pub fn is_inherited(&self, longhand: &str) -> bool {
        self.longhand(longhand)
            .is_some_and(LonghandInfo::is_inherited)
    }

    /// Whether `unit` is acceptable for `longhand`.
    #[must_use]
    pub fn accepts(&self, longhand: &str, unit: &LexicalUnit) -> bool {
        self.longhand(longhand).is_some_and(|info| info.accepts(unit))
    }

    /// Shorthands that set `longhand`, in serialization priority order.
    #[must_use]
    pub fn shorthands_containing(&self, longhand: &str) -> &[&'static str] {
        self.containing
            .get(longhand)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All shorthands, in serialization priority order.
    #[must_use]
    pub const fn serialization_order(&self) -> &'static [&'static str] {
        shorthands::SERIALIZATION_ORDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_longhand_is_described() {
        let db = ShorthandDatabase::global();
        for spec in shorthands::SHORTHANDS {
            for longhand in spec.longhands.iter().chain(spec.reset_only) {
                let info = db
                    .longhand(longhand)
                    .unwrap_or_else(|| panic!("{}: no entry for {longhand}", spec.name));
                assert!(
                    !matches!(info.initial(), StyleValue::Unknown(_)),
                    "{longhand}: initial value did not parse"
                );
            }
        }
    }

    #[test]
    fn test_serialization_order_covers_every_shorthand() {
        let db = ShorthandDatabase::global();
        for spec in shorthands::SHORTHANDS {
            assert!(
                db.serialization_order().contains(&spec.name),
                "{} missing from the serialization order",
                spec.name
            );
        }
    }

    #[test]
    fn test_wider_shorthands_come_first() {
        let db = ShorthandDatabase::global();
        assert_eq!(
            db.shorthands_containing("border-top-width"),
            ["border", "border-width", "border-top"]
        );
        assert_eq!(db.shorthands_containing("border-image-slice"), ["border", "border-image"]);
        assert!(db.shorthands_containing("color").is_empty());
    }

    #[test]
    fn test_oracle() {
        let db = ShorthandDatabase::global();
        assert_eq!(db.subproperties_of("gap"), ["row-gap", "column-gap"]);
        assert!(db.subproperties_of("color").is_empty());
        assert!(db.is_legal_identifier("border-top-style", "dashed"));
        assert!(!db.is_legal_identifier("border-top-style", "red"));
        assert!(db.has_known_identifier_set("flex-direction"));
        assert!(db.is_inherited("font-size"));
        assert!(!db.is_inherited("margin-top"));
        assert!(db.accepts("margin-top", &LexicalUnit::Ident("auto".to_string())));
        assert!(!db.accepts("padding-top", &LexicalUnit::Ident("auto".to_string())));
    }

    #[test]
    fn test_unit_class() {
        assert_eq!(unit_class("PX"), UnitClass::Length);
        assert_eq!(unit_class("ms"), UnitClass::Time);
        assert_eq!(unit_class("fr"), UnitClass::Flex);
        assert_eq!(unit_class("furlong"), UnitClass::Unknown);
    }
}
