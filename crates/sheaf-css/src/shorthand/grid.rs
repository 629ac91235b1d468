//! Grid placement shorthands: `grid-row`, `grid-column` and `grid-area`.
//!
//! [CSS Grid 2 § 8.4](https://www.w3.org/TR/css-grid-2/#placement-shorthands)

use super::cursor::split_slashes;
use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::database::is_custom_ident;
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::StyleValue;

/// A `<custom-ident>` usable as a line name.
fn is_line_name(name: &str) -> bool {
    is_custom_ident(name) && !name.eq_ignore_ascii_case("auto") && !name.eq_ignore_ascii_case("span")
}

/// [§ 8.3 Line-based Placement](https://www.w3.org/TR/css-grid-2/#typedef-grid-row-start-grid-line)
///
/// ```text
/// <grid-line> = auto | <custom-ident>
///             | [ <integer [-∞,-1]> | <integer [1,∞]> ] && <custom-ident>?
///             | [ span && [ <integer [1,∞]> || <custom-ident> ] ]
/// ```
fn parse_line(ctx: &DecomposeContext, units: &[LexicalUnit]) -> Result<StyleValue, ShorthandError> {
    if let [only] = units
        && only.is_ident("auto")
    {
        return ctx.value(only);
    }

    let mut span = false;
    let mut integer = None;
    let mut name = false;
    for unit in units {
        match unit {
            _ if unit.is_ident("span") && !span => span = true,
            LexicalUnit::Integer(value) if integer.is_none() && *value != 0 => integer = Some(*value),
            LexicalUnit::Ident(ident) if !name && is_line_name(ident) => name = true,
            _ => return Err(ctx.mismatch(Some(unit))),
        }
    }

    let valid = match (span, integer) {
        (true, Some(value)) => value > 0,
        (true, None) => name,
        (false, _) => integer.is_some() || name,
    };
    if !valid {
        return Err(ctx.mismatch(units.first()));
    }
    ctx.values(units)
}

/// [§ 8.4](https://www.w3.org/TR/css-grid-2/#placement-shorthands)
///
/// "When the second value is omitted, if the first value is a
/// <custom-ident>, the grid-row-end/grid-column-end longhand is also set to
/// that <custom-ident>; otherwise, it is set to auto."
fn default_from(value: &StyleValue) -> StyleValue {
    match value.as_ident() {
        Some(name) if is_line_name(name) => value.clone(),
        _ => StyleValue::ident("auto"),
    }
}

pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let longhands = ctx.longhands();

    // STEP 1: One line per slash-separated segment.
    let segments = split_slashes(units);
    if segments.len() > longhands.len() {
        return Err(ctx.count_error(segments.len()));
    }
    let mut lines = Vec::with_capacity(longhands.len());
    for segment in segments {
        if segment.is_empty() {
            return Err(ctx.mismatch(units.iter().find(|unit| **unit == LexicalUnit::Slash)));
        }
        lines.push(parse_line(ctx, segment)?);
    }

    // STEP 2: Fill omitted lines from the line they mirror.
    // grid-area: "If grid-column-start is omitted, it is set to the value of
    // grid-row-start. If grid-row-end is omitted, it is set to the value of
    // grid-row-start. If grid-column-end is omitted, it is set to the value
    // of grid-column-start." (Each through the <custom-ident> rule.)
    while lines.len() < longhands.len() {
        let source = match (longhands.len(), lines.len()) {
            (4, 3) => 1,
            _ => 0,
        };
        let filled = default_from(&lines[source]);
        lines.push(filled);
    }

    let mut expansion = ctx.expansion();
    for (longhand, line) in longhands.iter().zip(lines) {
        expansion.set(longhand, line);
    }
    Ok(expansion)
}

/// Trailing lines equal to the value they would default to are dropped.
pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let mut lines = Vec::with_capacity(ctx.longhands().len());
    for index in 0..ctx.longhands().len() {
        lines.push(ctx.value_at(index)?);
    }

    let omittable = |index: usize| {
        let source = usize::from(lines.len() == 4 && index == 3);
        *lines[index] == default_from(lines[source])
    };
    let mut count = lines.len();
    while count > 1 && omittable(count - 1) {
        count -= 1;
    }

    let mut writer = ctx.writer();
    for (index, line) in lines.iter().take(count).enumerate() {
        if index > 0 {
            writer.slash();
        }
        writer.value(line);
    }
    Some(writer.finish())
}
