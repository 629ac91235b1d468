//! `flex`
//!
//! [CSS Flexbox 1 § 7.1](https://www.w3.org/TR/css-flexbox-1/#flex-property)
//!
//! "none | [ <'flex-grow'> <'flex-shrink'>? || <'flex-basis'> ]"

use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{StyleValue, TypedValue};

const GROW: &str = "flex-grow";
const SHRINK: &str = "flex-shrink";
const BASIS: &str = "flex-basis";

fn is_number(unit: &LexicalUnit) -> bool {
    matches!(unit, LexicalUnit::Integer(_) | LexicalUnit::Real(_))
}

fn integer(value: i64) -> StyleValue {
    StyleValue::Typed(TypedValue::Integer(value))
}

/// `0%`, the basis implied when a number is given without one.
fn zero_percent() -> StyleValue {
    StyleValue::Typed(TypedValue::Percentage(0.0))
}

/// [§ 7.1.1 Basic Values of flex](https://www.w3.org/TR/css-flexbox-1/#flex-common)
///
/// "When omitted from the flex shorthand, its specified value is 1."
/// "When omitted from the flex shorthand, its specified value is 0."
pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let mut expansion = ctx.expansion();
    let auto = || StyleValue::ident("auto");

    // STEP 1: Keyword forms.
    // "none: Equivalent to 0 0 auto." "auto: Equivalent to 1 1 auto."
    match units {
        [only] if only.is_ident("none") => {
            expansion.set(GROW, integer(0));
            expansion.set(SHRINK, integer(0));
            expansion.set(BASIS, auto());
            return Ok(expansion);
        }
        [only] if only.is_ident("auto") => {
            expansion.set(GROW, integer(1));
            expansion.set(SHRINK, integer(1));
            expansion.set(BASIS, auto());
            return Ok(expansion);
        }
        _ => {}
    }

    // STEP 2: "<grow> <shrink>?" and "<basis>", in either order.
    let mut grow = None;
    let mut shrink = None;
    let mut basis = None;
    let mut index = 0;
    while let Some(unit) = units.get(index) {
        if grow.is_none() && is_number(unit) && ctx.accepts(GROW, unit) {
            grow = Some(ctx.value(unit)?);
            if let Some(next) = units.get(index + 1)
                && is_number(next)
                && ctx.accepts(SHRINK, next)
            {
                shrink = Some(ctx.value(next)?);
                index += 1;
            }
        } else if basis.is_none() && ctx.accepts(BASIS, unit) {
            // A unitless zero basis is a length.
            basis = Some(if unit.is_zero() && is_number(unit) {
                StyleValue::Typed(TypedValue::Dimension {
                    value: 0.0,
                    unit: "px".to_string(),
                })
            } else {
                ctx.value(unit)?
            });
        } else {
            return Err(ctx.mismatch(Some(unit)));
        }
        index += 1;
    }

    // STEP 3: Omitted grow and shrink are 1, an omitted basis is 0%.
    expansion.set(GROW, grow.unwrap_or_else(|| integer(1)));
    expansion.set(SHRINK, shrink.unwrap_or_else(|| integer(1)));
    expansion.set(BASIS, basis.unwrap_or_else(zero_percent));
    Ok(expansion)
}

/// Whether `value` is the number `expected`.
fn is_number_value(value: &StyleValue, expected: i64) -> bool {
    match value {
        StyleValue::Typed(TypedValue::Integer(actual)) => *actual == expected,
        #[allow(clippy::cast_precision_loss)]
        StyleValue::Typed(TypedValue::Number(actual)) => (*actual - expected as f64).abs() < f64::EPSILON,
        _ => false,
    }
}

fn is_zero_percent(value: &StyleValue) -> bool {
    matches!(value, StyleValue::Typed(TypedValue::Percentage(_))) && value.is_zero()
}

pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let grow = ctx.value(GROW)?;
    let shrink = ctx.value(SHRINK)?;
    let basis = ctx.value(BASIS)?;

    // RULE: Keyword forms first, then the common `0`.
    if basis.is_ident("auto") {
        if is_number_value(grow, 1) && is_number_value(shrink, 1) {
            return Some("auto".to_string());
        }
        if is_number_value(grow, 0) && is_number_value(shrink, 0) {
            return Some("none".to_string());
        }
    }
    if is_number_value(grow, 0) && is_number_value(shrink, 1) && is_zero_percent(basis) {
        return Some("0".to_string());
    }

    let write_basis = !is_zero_percent(basis);
    let shrink_is_one = is_number_value(shrink, 1);
    let mut writer = ctx.writer();
    if !(is_number_value(grow, 1) && shrink_is_one && write_basis) {
        writer.value(grow);
        if !shrink_is_one {
            writer.value(shrink);
        }
    }
    if write_basis {
        if basis.is_zero() && !matches!(basis, StyleValue::Typed(TypedValue::Dimension { .. })) {
            // A bare `0` here would be read back as a flex factor.
            writer.text("0px");
        } else {
            writer.value(basis);
        }
    }
    Some(writer.finish())
}
