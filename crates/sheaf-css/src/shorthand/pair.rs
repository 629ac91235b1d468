//! Two-longhand shorthands.
//!
//! Sequence shorthands (`overflow`, `margin-block`...) clone a single value
//! into both longhands. Pair shorthands (`place-content`, `gap`...) clone
//! the first value only when the second longhand accepts it, and give the
//! second longhand its initial value otherwise.

use super::cursor::Cursor;
use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::StyleValue;

pub(super) fn decompose_sequence(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let [first, second] = [ctx.longhands()[0], ctx.longhands()[1]];
    let mut expansion = ctx.expansion();

    if let Some(separator) = units.iter().find(|unit| unit.is_separator()) {
        return Err(ctx.mismatch(Some(separator)));
    }
    match units {
        [only] => {
            if !ctx.accepts(first, only) || !ctx.accepts(second, only) {
                return Err(ctx.mismatch(Some(only)));
            }
            let value = ctx.value(only)?;
            expansion.set(first, value.clone());
            expansion.set(second, value);
        }
        [a, b] => {
            if !ctx.accepts(first, a) {
                return Err(ctx.mismatch(Some(a)));
            }
            if !ctx.accepts(second, b) {
                return Err(ctx.mismatch(Some(b)));
            }
            expansion.set(first, ctx.value(a)?);
            expansion.set(second, ctx.value(b)?);
        }
        _ => return Err(ctx.count_error(units.len())),
    }
    Ok(expansion)
}

pub(super) fn recompose_sequence(ctx: &RecomposeContext<'_>) -> Option<String> {
    let first = ctx.value_at(0)?;
    let second = ctx.value_at(1)?;
    let mut writer = ctx.writer();
    writer.value(first);
    if second != first {
        writer.value(second);
    }
    Some(writer.finish())
}

/// [CSS Box Alignment 3 § 4](https://www.w3.org/TR/css-align-3/#baseline-values)
///
/// Prefixes that combine with a following keyword: `first baseline`,
/// `safe center`, `legacy left`.
fn prefix_follower(prefix: &str) -> Option<&'static [&'static str]> {
    const BASELINE: &[&str] = &["baseline"];
    const LEGACY: &[&str] = &["left", "right", "center"];
    const POSITIONS: &[&str] = &[
        "center",
        "start",
        "end",
        "self-start",
        "self-end",
        "flex-start",
        "flex-end",
        "left",
        "right",
    ];
    match prefix.to_ascii_lowercase().as_str() {
        "first" | "last" => Some(BASELINE),
        "safe" | "unsafe" => Some(POSITIONS),
        "legacy" => Some(LEGACY),
        _ => None,
    }
}

/// Consume one value of `longhand`, which may span two units for the
/// prefixed alignment forms.
fn consume_value(
    ctx: &DecomposeContext,
    cursor: &mut Cursor<'_>,
    longhand: &str,
) -> Result<Option<StyleValue>, ShorthandError> {
    let Some(unit) = cursor.peek() else {
        return Ok(None);
    };
    if let Some(units) = prefixed(cursor.remaining(), |kw| ctx.is_legal_identifier(longhand, kw)) {
        let _ = cursor.advance();
        let _ = cursor.advance();
        return ctx.values(units).map(Some);
    }
    if unit.is_separator() || !ctx.accepts(longhand, unit) {
        return Ok(None);
    }
    let _ = cursor.advance();
    ctx.value(unit).map(Some)
}

/// The two-unit prefixed form at the head of `units`, if there is one.
///
/// `legacy` may also follow its keyword (`left legacy`).
fn prefixed(units: &[LexicalUnit], legal: impl Fn(&str) -> bool) -> Option<&[LexicalUnit]> {
    let [first, second, ..] = units else {
        return None;
    };
    let (a, b) = (first.as_ident()?, second.as_ident()?);
    let fits = |prefix: &str, keyword: &str| {
        prefix_follower(prefix).is_some_and(|followers| {
            followers.iter().any(|f| f.eq_ignore_ascii_case(keyword))
        })
    };
    let prefix_legal = |prefix: &str| match prefix.to_ascii_lowercase().as_str() {
        "first" | "last" => legal("baseline"),
        "safe" | "unsafe" => legal("center"),
        _ => legal(prefix),
    };
    let forward = fits(a, b) && prefix_legal(a) && (legal(b) || a.eq_ignore_ascii_case("legacy"));
    let backward = b.eq_ignore_ascii_case("legacy") && fits(b, a) && legal(b);
    (forward || backward).then(|| &units[..2])
}

/// Whether `units` would be accepted as a whole by `longhand`.
fn fits_whole(ctx: &DecomposeContext, longhand: &str, units: &[LexicalUnit]) -> bool {
    let mut cursor = Cursor::new(units);
    matches!(consume_value(ctx, &mut cursor, longhand), Ok(Some(_))) && cursor.is_exhausted()
}

pub(super) fn decompose_pair(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let [first, second] = [ctx.longhands()[0], ctx.longhands()[1]];
    let mut expansion = ctx.expansion();
    let mut cursor = Cursor::new(units);

    // STEP 1: The first value must fit the first longhand.
    let start = cursor.remaining();
    let Some(first_value) = consume_value(ctx, &mut cursor, first)? else {
        return Err(ctx.mismatch(cursor.peek()));
    };
    let first_units = &start[..start.len() - cursor.remaining().len()];

    // STEP 2: With no second value, mirror the first when the second
    // longhand accepts it, else fall back to the initial value.
    let second_value = if cursor.is_exhausted() {
        if fits_whole(ctx, second, first_units) {
            first_value.clone()
        } else {
            ctx.initial(second)
        }
    } else {
        let Some(value) = consume_value(ctx, &mut cursor, second)? else {
            return Err(ctx.mismatch(cursor.peek()));
        };
        value
    };

    if !cursor.is_exhausted() {
        return Err(ctx.mismatch(cursor.peek()));
    }
    expansion.set(first, first_value);
    expansion.set(second, second_value);
    Ok(expansion)
}

/// Mirror of [`decompose_pair`]: the second value is omitted exactly when
/// decomposing the first alone would reproduce it.
pub(super) fn recompose_pair(ctx: &RecomposeContext<'_>) -> Option<String> {
    let [first, second] = [ctx.longhands()[0], ctx.longhands()[1]];
    let first_value = ctx.value(first)?;
    let second_value = ctx.value(second)?;

    let first_fits_second = {
        let units = first_value.to_lexical_units();
        second_accepts(ctx, second, &units)
    };
    let implied = if first_fits_second {
        first_value
    } else {
        ctx.initial(second)?
    };

    let mut writer = ctx.writer();
    writer.value(first_value);
    if second_value != implied {
        writer.value(second_value);
    }
    Some(writer.finish())
}

/// Recompose-side counterpart of [`fits_whole`].
fn second_accepts(ctx: &RecomposeContext<'_>, longhand: &str, units: &[LexicalUnit]) -> bool {
    match units {
        [unit] => ctx.accepts(longhand, unit),
        [_, _] => prefixed(units, |kw| ctx.is_legal_identifier(longhand, kw)).is_some(),
        _ => false,
    }
}
