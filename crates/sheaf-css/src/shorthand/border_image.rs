//! `border-image`
//!
//! [§ 6.7 Border Image Shorthand](https://www.w3.org/TR/css-backgrounds-3/#border-image)
//!
//! "<'border-image-source'> || <'border-image-slice'>
//! [ / <'border-image-width'> | / <'border-image-width'>? / <'border-image-outset'> ]?
//! || <'border-image-repeat'>"

use super::cursor::Cursor;
use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::StyleValue;

const SOURCE: &str = "border-image-source";
const SLICE: &str = "border-image-slice";
const WIDTH: &str = "border-image-width";
const OUTSET: &str = "border-image-outset";
const REPEAT: &str = "border-image-repeat";

/// Consume up to `max` consecutive units that `longhand` accepts.
fn take_run<'a>(
    ctx: &DecomposeContext,
    cursor: &mut Cursor<'a>,
    longhand: &str,
    max: usize,
) -> &'a [LexicalUnit] {
    let start = cursor.remaining();
    let mut count = 0;
    while count < max && cursor.advance_if(|unit| ctx.accepts(longhand, unit)).is_some() {
        count += 1;
    }
    &start[..count]
}

/// `<number [0,∞]> | <percentage [0,∞]>]{1,4} && fill?`
fn take_slice<'a>(
    ctx: &DecomposeContext,
    cursor: &mut Cursor<'a>,
) -> Result<&'a [LexicalUnit], ShorthandError> {
    let start = cursor.remaining();
    let leading_fill = cursor.advance_ident("fill");
    let mut numbers = 0;
    while numbers < 4
        && cursor
            .advance_if(|unit| !unit.is_ident("fill") && ctx.accepts(SLICE, unit))
            .is_some()
    {
        numbers += 1;
    }
    if numbers == 0 {
        return Err(ctx.mismatch(cursor.peek()));
    }
    let trailing_fill = !leading_fill && cursor.advance_ident("fill");
    let taken = numbers + usize::from(leading_fill || trailing_fill);
    Ok(&start[..taken])
}

pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let mut cursor = Cursor::new(units);
    let mut source = None;
    let mut slice = None;
    let mut width = None;
    let mut outset = None;
    let mut repeat = None;

    while let Some(unit) = cursor.peek() {
        if source.is_none() && ctx.accepts(SOURCE, unit) {
            let _ = cursor.advance();
            source = Some(ctx.value(unit)?);
        } else if slice.is_none() && ctx.accepts(SLICE, unit) {
            slice = Some(ctx.values(take_slice(ctx, &mut cursor)?)?);

            // RULE: "/ width", "/ width / outset" or "/ / outset".
            if cursor.advance_slash() {
                let widths = take_run(ctx, &mut cursor, WIDTH, 4);
                if !widths.is_empty() {
                    width = Some(ctx.values(widths)?);
                }
                if cursor.advance_slash() {
                    let outsets = take_run(ctx, &mut cursor, OUTSET, 4);
                    outset = Some(ctx.values(outsets)?);
                } else if widths.is_empty() {
                    return Err(ctx.mismatch(cursor.peek()));
                }
            }
        } else if repeat.is_none() && ctx.accepts(REPEAT, unit) {
            repeat = Some(ctx.values(take_run(ctx, &mut cursor, REPEAT, 2))?);
        } else {
            return Err(ctx.mismatch(Some(unit)));
        }
    }

    let mut expansion = ctx.expansion();
    for (longhand, value) in [
        (SOURCE, source),
        (SLICE, slice),
        (WIDTH, width),
        (OUTSET, outset),
        (REPEAT, repeat),
    ] {
        if let Some(value) = value {
            expansion.set(longhand, value);
        }
    }
    Ok(expansion)
}

/// A declared component and whether it differs from its initial value.
fn component<'a>(ctx: &RecomposeContext<'a>, longhand: &str) -> Option<(&'a StyleValue, bool)> {
    let value = ctx.value(longhand)?;
    Some((value, !ctx.is_initial(longhand, value)))
}

pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let (source, write_source) = component(ctx, SOURCE)?;
    let (slice, write_slice) = component(ctx, SLICE)?;
    let (width, write_width) = component(ctx, WIDTH)?;
    let (outset, write_outset) = component(ctx, OUTSET)?;
    let (repeat, write_repeat) = component(ctx, REPEAT)?;

    let mut writer = ctx.writer();
    if write_source {
        writer.value(source);
    }
    if write_slice || write_width || write_outset {
        writer.value(slice);
        if write_width || write_outset {
            writer.slash();
            if write_width {
                writer.value(width);
            }
            if write_outset {
                writer.slash();
                writer.value(outset);
            }
        }
    }
    if write_repeat {
        writer.value(repeat);
    }
    if writer.is_empty() {
        writer.text(ctx.initial_text(SOURCE));
    }
    Some(writer.finish())
}
