//! Box shorthands: `margin`, `padding`, `border-width`, `border-style`,
//! `border-color` and `inset`.
//!
//! [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)

use super::{DecomposeContext, Expansion, RecomposeContext, box_count, box_sides};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{CssWideKeyword, StyleValue};

/// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom margins are set to the first value and
/// the right and left margins are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set to
/// the second, and the bottom is set to the third. If there are four values,
/// they apply to the top, right, bottom, and left, respectively."
pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let sides = ctx.longhands();
    let mut expansion = ctx.expansion();

    // STEP 1: Count the values. Separators are never box values.
    if let Some(separator) = units.iter().find(|unit| unit.is_separator()) {
        return Err(ctx.mismatch(Some(separator)));
    }
    if units.is_empty() || units.len() > 4 {
        return Err(ctx.count_error(units.len()));
    }

    // STEP 2: Validate each value against the grammar of the first side it
    // lands on. A CSS-wide keyword next to other values is tolerated but
    // marks the assignment as mixed.
    let mapping = box_sides(units.len());
    let mut values = Vec::with_capacity(units.len());
    for (index, unit) in units.iter().enumerate() {
        let side = mapping
            .iter()
            .position(|&source| source == index)
            .map_or(sides[0], |position| sides[position]);
        if let Some(keyword) = unit.as_ident().and_then(CssWideKeyword::from_ident) {
            values.push(StyleValue::keyword(keyword, true));
            expansion.nonmixed = false;
        } else if ctx.accepts(side, unit) {
            values.push(ctx.value(unit)?);
        } else {
            return Err(ctx.mismatch(Some(unit)));
        }
    }

    // STEP 3: Apply the box rule, cloning values shared by several sides.
    for (side, &source) in sides.iter().zip(mapping.iter()) {
        expansion.set(side, values[source].clone());
    }
    Ok(expansion)
}

/// The shortest of the 1/2/3/4-value forms reproducing all four sides.
///
/// Declines when the last assignment mixed CSS-wide keywords with other
/// values; browsers disagree on how such a box serializes.
pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    if !ctx.nonmixed() {
        return None;
    }
    let sides = [
        ctx.value_at(0)?,
        ctx.value_at(1)?,
        ctx.value_at(2)?,
        ctx.value_at(3)?,
    ];
    let mut writer = ctx.writer();
    for side in sides.iter().take(box_count(&sides)) {
        if side.is_comma_list() {
            return None;
        }
        writer.value(side);
    }
    Some(writer.finish())
}
