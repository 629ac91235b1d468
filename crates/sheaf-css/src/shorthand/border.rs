//! `border` and the single-line shorthands shaped like it: `border-top`
//! (and the other sides), `outline` and `column-rule`.
//!
//! [§ 4.4 Border Shorthands](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
//!
//! "<line-width> || <line-style> || <color>"

use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::StyleValue;

/// Width, style and color, in that order.
type Line = [Option<StyleValue>; 3];

/// Parse `<line-width> || <line-style> || <color>` against the three
/// longhands of one side.
///
/// Each component may appear once, in any order. The color ends the value:
/// anything after it is a grammar mismatch.
fn parse_line(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
    longhands: [&str; 3],
) -> Result<Line, ShorthandError> {
    let mut line: Line = [None, None, None];
    for unit in units {
        if unit.is_separator() || line[2].is_some() {
            return Err(ctx.mismatch(Some(unit)));
        }
        let Some(slot) = (0..3).find(|&slot| line[slot].is_none() && ctx.accepts(longhands[slot], unit))
        else {
            return Err(ctx.mismatch(Some(unit)));
        };
        line[slot] = Some(ctx.value(unit)?);
    }
    Ok(line)
}

pub(super) fn decompose_side(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let longhands = ctx.longhands();
    let names = [longhands[0], longhands[1], longhands[2]];
    let line = parse_line(ctx, units, names)?;

    let mut expansion = ctx.expansion();
    for (longhand, value) in names.into_iter().zip(line) {
        expansion.set(longhand, value.unwrap_or_else(|| ctx.initial(longhand)));
    }
    Ok(expansion)
}

/// [§ 4.4](https://www.w3.org/TR/css-backgrounds-3/#propdef-border)
///
/// "The border property is a shorthand property for setting the same
/// width, color, and style for all four borders of a box. Unlike the
/// shorthand margin and padding properties, the border property cannot
/// set different values on the four borders."
///
/// It also resets `border-image` to its initial value.
pub(super) fn decompose_border(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let longhands = ctx.longhands();
    // Validate against the top side; all four share one grammar.
    let line = parse_line(ctx, units, [longhands[0], longhands[4], longhands[8]])?;

    let mut expansion = ctx.expansion();
    for (component, value) in line.into_iter().enumerate() {
        for side in 0..4 {
            let longhand = longhands[component * 4 + side];
            let value = value.clone().unwrap_or_else(|| ctx.initial(longhand));
            expansion.set(longhand, value);
        }
    }
    Ok(expansion)
}

/// Write the components that differ from their initial value. A line with
/// nothing to write is spelled by its style's initial value (`none`).
fn write_line(ctx: &RecomposeContext<'_>, longhands: [&str; 3], values: [&StyleValue; 3]) -> String {
    let mut writer = ctx.writer();
    for (longhand, value) in longhands.into_iter().zip(values) {
        if !ctx.is_initial(longhand, value) {
            writer.value(value);
        }
    }
    if writer.is_empty() {
        writer.text(ctx.initial_text(longhands[1]));
    }
    writer.finish()
}

pub(super) fn recompose_side(ctx: &RecomposeContext<'_>) -> Option<String> {
    let longhands = ctx.longhands();
    let names = [longhands[0], longhands[1], longhands[2]];
    let values = [ctx.value(names[0])?, ctx.value(names[1])?, ctx.value(names[2])?];
    Some(write_line(ctx, names, values))
}

/// `border` can only be built when all four sides agree.
pub(super) fn recompose_border(ctx: &RecomposeContext<'_>) -> Option<String> {
    let longhands = ctx.longhands();
    let mut values = Vec::with_capacity(3);
    for component in 0..3 {
        let top = ctx.value(longhands[component * 4])?;
        for side in 1..4 {
            if ctx.value(longhands[component * 4 + side])? != top {
                return None;
            }
        }
        values.push(top);
    }
    Some(write_line(
        ctx,
        [longhands[0], longhands[4], longhands[8]],
        [values[0], values[1], values[2]],
    ))
}
