//! `columns`
//!
//! [CSS Multi-column 1 § 3.3](https://www.w3.org/TR/css-multicol-1/#columns)
//!
//! "<'column-width'> || <'column-count'>"

use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;

const WIDTH: &str = "column-width";
const COUNT: &str = "column-count";

/// `auto` fits either longhand, so it is only counted. A longhand given
/// no concrete value stays `auto`.
pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    if units.len() > 2 {
        return Err(ctx.count_error(units.len()));
    }

    let mut expansion = ctx.expansion();
    let mut width = None;
    let mut count = None;
    for unit in units {
        match unit {
            _ if unit.is_ident("auto") => {}
            // "<integer [1,∞]>"
            LexicalUnit::Integer(value) if count.is_none() => {
                if *value < 1 {
                    return Err(ctx.mismatch(Some(unit)));
                }
                count = Some(ctx.value(unit)?);
            }
            // "<length [0,∞]>"; a zero width is not a useful column width.
            LexicalUnit::Dimension { value, .. }
                if width.is_none() && *value > 0.0 && ctx.accepts(WIDTH, unit) =>
            {
                width = Some(ctx.value(unit)?);
            }
            _ => return Err(ctx.mismatch(Some(unit))),
        }
    }

    if let Some(width) = width {
        expansion.set(WIDTH, width);
    }
    if let Some(count) = count {
        expansion.set(COUNT, count);
    }
    Ok(expansion)
}

pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let width = ctx.value(WIDTH)?;
    let count = ctx.value(COUNT)?;
    // Zero is a legal longhand value but not a legal shorthand one.
    if width.is_zero() || count.is_zero() {
        return None;
    }

    let mut writer = ctx.writer();
    if !width.is_ident("auto") {
        writer.value(width);
    }
    if !count.is_ident("auto") {
        writer.value(count);
    }
    if writer.is_empty() {
        writer.text("auto");
    }
    Some(writer.finish())
}
