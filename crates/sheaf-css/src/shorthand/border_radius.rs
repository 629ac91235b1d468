//! `border-radius`
//!
//! [§ 5.1 Curve Radii](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
//!
//! "<length-percentage [0,∞]>{1,4} [ / <length-percentage [0,∞]>{1,4} ]?"

use super::cursor::split_slashes;
use super::{DecomposeContext, Expansion, RecomposeContext, box_count, box_sides};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{Separator, StyleValue};

/// "The four values for each radii are given in the order top-left,
/// top-right, bottom-right, bottom-left. If bottom-left is omitted it is
/// the same as top-right. If bottom-right is omitted it is the same as
/// top-left. If top-right is omitted it is the same as top-left."
///
/// "If values are given before and after the slash, then the values
/// before the slash set the horizontal radius and the values after the
/// slash set the vertical radius. If there is no slash, then the values
/// set both radii equally."
pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let corners = ctx.longhands();

    // STEP 1: At most one slash, with values on both sides.
    let groups = split_slashes(units);
    if groups.len() > 2 {
        let extra = units.iter().filter(|unit| **unit == LexicalUnit::Slash).nth(1);
        return Err(ctx.mismatch(extra));
    }

    // STEP 2: Each group is 1 to 4 radii, expanded by the box rule.
    let mut radii = Vec::with_capacity(2);
    for group in groups {
        if let Some(separator) = group.iter().find(|unit| unit.is_separator()) {
            return Err(ctx.mismatch(Some(separator)));
        }
        if group.is_empty() || group.len() > 4 {
            return Err(ctx.count_error(group.len()));
        }
        let mut values = Vec::with_capacity(group.len());
        for unit in group {
            if !ctx.accepts(corners[0], unit) {
                return Err(ctx.mismatch(Some(unit)));
            }
            values.push(ctx.value(unit)?);
        }
        radii.push(box_sides(group.len()).map(|index| values[index].clone()));
    }

    // STEP 3: A corner is "h" without a slash, "h v" with one.
    let mut expansion = ctx.expansion();
    for (corner_index, corner) in corners.iter().enumerate() {
        let horizontal = radii[0][corner_index].clone();
        let value = match radii.get(1) {
            Some(vertical) => StyleValue::list(
                Separator::Space,
                vec![horizontal, vertical[corner_index].clone()],
            ),
            None => horizontal,
        };
        expansion.set(corner, value);
    }
    Ok(expansion)
}

pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let mut horizontal = Vec::with_capacity(4);
    let mut vertical = Vec::with_capacity(4);
    let mut elliptical = false;
    for index in 0..4 {
        let parts = ctx.value_at(index)?.parts();
        match parts {
            [radius] => {
                horizontal.push(radius);
                vertical.push(radius);
            }
            [h, v] => {
                horizontal.push(h);
                vertical.push(v);
                elliptical = true;
            }
            _ => return None,
        }
    }
    let horizontal: [&StyleValue; 4] = horizontal.try_into().ok()?;
    let vertical: [&StyleValue; 4] = vertical.try_into().ok()?;

    let mut writer = ctx.writer();
    for radius in horizontal.iter().take(box_count(&horizontal)) {
        writer.value(radius);
    }
    if elliptical {
        writer.slash();
        for radius in vertical.iter().take(box_count(&vertical)) {
            writer.value(radius);
        }
    }
    Some(writer.finish())
}
