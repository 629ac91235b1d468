//! `list-style`
//!
//! [CSS Lists 3 § 3.4](https://www.w3.org/TR/css-lists-3/#list-style-property)
//!
//! "<'list-style-position'> || <'list-style-image'> || <'list-style-type'>"

use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::StyleValue;

const POSITION: &str = "list-style-position";
const IMAGE: &str = "list-style-image";
const TYPE: &str = "list-style-type";

/// `none` is legal for both the image and the type, so it is counted and
/// assigned once the other components are known.
pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let mut position = None;
    let mut image = None;
    let mut kind = None;
    let mut nones = 0;

    for unit in units {
        if unit.is_ident("none") {
            nones += 1;
            if nones > 2 {
                return Err(ctx.mismatch(Some(unit)));
            }
        } else if position.is_none() && ctx.accepts(POSITION, unit) {
            position = Some(ctx.value(unit)?);
        } else if image.is_none() && ctx.accepts(IMAGE, unit) {
            image = Some(ctx.value(unit)?);
        } else if kind.is_none() && ctx.accepts(TYPE, unit) {
            kind = Some(ctx.value(unit)?);
        } else {
            return Err(ctx.mismatch(Some(unit)));
        }
    }

    // RULE: "Using a value of none in the shorthand is potentially
    // ambiguous, as none is a valid value for both list-style-image and
    // list-style-type. To resolve this ambiguity, a value of none in the
    // shorthand must be applied to whichever of the two properties aren't
    // otherwise set by the shorthand."
    let none = || StyleValue::ident("none");
    let (image, kind) = match (nones, image, kind) {
        (0, image, kind) => (image, kind),
        (1, None, Some(kind)) => (Some(none()), Some(kind)),
        (1, Some(image), None) => (Some(image), Some(none())),
        (1 | 2, None, None) => (Some(none()), Some(none())),
        _ => return Err(ctx.mismatch(units.iter().rfind(|unit| unit.is_ident("none")))),
    };

    let mut expansion = ctx.expansion();
    for (longhand, value) in [(POSITION, position), (IMAGE, image), (TYPE, kind)] {
        if let Some(value) = value {
            expansion.set(longhand, value);
        }
    }
    Ok(expansion)
}

pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let position = ctx.value(POSITION)?;
    let image = ctx.value(IMAGE)?;
    let kind = ctx.value(TYPE)?;

    let mut writer = ctx.writer();
    if !ctx.is_initial(POSITION, position) {
        writer.value(position);
    }
    if kind.is_ident("none") {
        // A single `none` covers the image when it is `none` too.
        if !image.is_ident("none") {
            writer.value(image);
        }
        writer.value(kind);
    } else {
        if !ctx.is_initial(IMAGE, image) {
            writer.value(image);
        }
        if !ctx.is_initial(TYPE, kind) {
            writer.value(kind);
        }
    }
    if writer.is_empty() {
        writer.text(ctx.initial_text(POSITION));
    }
    Some(writer.finish())
}
