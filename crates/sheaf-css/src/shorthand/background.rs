//! `background`
//!
//! [§ 3.10 Backgrounds Shorthand](https://www.w3.org/TR/css-backgrounds-3/#background)
//!
//! ```text
//! <bg-layer> = <bg-image> || <bg-position> [ / <bg-size> ]? || <repeat-style>
//!            || <attachment> || <visual-box> || <visual-box>
//! <final-bg-layer> = <bg-layer> || <'background-color'>
//! ```

use super::cursor::{Cursor, split_layers};
use super::{DecomposeContext, Expansion, RecomposeContext, TextWriter};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{Separator, StyleValue};

const IMAGE: &str = "background-image";
const POSITION: &str = "background-position";
const SIZE: &str = "background-size";
const REPEAT: &str = "background-repeat";
const ATTACHMENT: &str = "background-attachment";
const ORIGIN: &str = "background-origin";
const CLIP: &str = "background-clip";
const COLOR: &str = "background-color";

/// Longhands that hold one item per layer, in canonical order.
const LAYERED: [&str; 7] = [IMAGE, POSITION, SIZE, REPEAT, ATTACHMENT, ORIGIN, CLIP];

/// One parsed layer; `None` means "not given".
#[derive(Default)]
struct Layer {
    image: Option<StyleValue>,
    position: Option<StyleValue>,
    size: Option<StyleValue>,
    repeat: Option<StyleValue>,
    attachment: Option<StyleValue>,
    origin: Option<StyleValue>,
    clip: Option<StyleValue>,
}

impl Layer {
    /// Resolve omitted components to their initial values, in
    /// [`LAYERED`] order.
    fn resolve(self, ctx: &DecomposeContext) -> Vec<StyleValue> {
        // "If one <visual-box> value is present then it sets both
        // background-origin and background-clip to that value."
        let clip = match (&self.origin, self.clip) {
            (_, Some(clip)) => Some(clip),
            (Some(origin), None) => Some(origin.clone()),
            (None, None) => None,
        };
        let components = [
            self.image,
            self.position,
            self.size,
            self.repeat,
            self.attachment,
            self.origin,
            clip,
        ];
        LAYERED
            .into_iter()
            .zip(components)
            .map(|(longhand, value)| value.unwrap_or_else(|| ctx.initial(longhand)))
            .collect()
    }
}

/// Consume up to `max` consecutive units accepted by `longhand` and not
/// rejected by `exclude`.
fn take_run<'a>(
    ctx: &DecomposeContext,
    cursor: &mut Cursor<'a>,
    longhand: &str,
    max: usize,
    exclude: &[&str],
) -> &'a [LexicalUnit] {
    let start = cursor.remaining();
    let mut count = 0;
    while count < max
        && cursor
            .advance_if(|unit| {
                ctx.accepts(longhand, unit) && !exclude.iter().any(|kw| unit.is_ident(kw))
            })
            .is_some()
    {
        count += 1;
    }
    &start[..count]
}

fn parse_layer(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
    is_final: bool,
    color: &mut Option<StyleValue>,
) -> Result<Layer, ShorthandError> {
    let mut layer = Layer::default();
    let mut cursor = Cursor::new(units);

    while let Some(unit) = cursor.peek() {
        if layer.image.is_none() && ctx.accepts(IMAGE, unit) {
            let _ = cursor.advance();
            layer.image = Some(ctx.value(unit)?);
        } else if layer.position.is_none() && ctx.accepts(POSITION, unit) {
            layer.position = Some(ctx.values(take_run(ctx, &mut cursor, POSITION, 4, &[]))?);

            // RULE: "<bg-position> [ / <bg-size> ]?"
            if cursor.advance_slash() {
                let size = if let Some(keyword) =
                    cursor.advance_if(|unit| unit.is_ident("cover") || unit.is_ident("contain"))
                {
                    std::slice::from_ref(keyword)
                } else {
                    take_run(ctx, &mut cursor, SIZE, 2, &["cover", "contain"])
                };
                if size.is_empty() {
                    return Err(ctx.mismatch(cursor.peek()));
                }
                layer.size = Some(ctx.values(size)?);
            }
        } else if layer.repeat.is_none() && ctx.accepts(REPEAT, unit) {
            let repeat = if let Some(axis) =
                cursor.advance_if(|unit| unit.is_ident("repeat-x") || unit.is_ident("repeat-y"))
            {
                std::slice::from_ref(axis)
            } else {
                take_run(ctx, &mut cursor, REPEAT, 2, &["repeat-x", "repeat-y"])
            };
            layer.repeat = Some(ctx.values(repeat)?);
        } else if layer.attachment.is_none() && ctx.accepts(ATTACHMENT, unit) {
            let _ = cursor.advance();
            layer.attachment = Some(ctx.value(unit)?);
        } else if layer.origin.is_none() && layer.clip.is_none() && ctx.accepts(ORIGIN, unit) {
            let _ = cursor.advance();
            layer.origin = Some(ctx.value(unit)?);
        } else if layer.clip.is_none() && ctx.accepts(CLIP, unit) {
            let _ = cursor.advance();
            layer.clip = Some(ctx.value(unit)?);
        } else if is_final && color.is_none() && ctx.accepts(COLOR, unit) {
            let _ = cursor.advance();
            *color = Some(ctx.value(unit)?);
        } else {
            return Err(ctx.mismatch(Some(unit)));
        }
    }
    Ok(layer)
}

pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let layers = split_layers(units);
    let mut color = None;
    let mut columns: [Vec<StyleValue>; 7] = Default::default();

    for (index, units) in layers.iter().enumerate() {
        if units.is_empty() {
            return Err(ShorthandError::list_shape(ctx.name(), "empty background layer"));
        }
        let is_final = index + 1 == layers.len();
        let layer = parse_layer(ctx, units, is_final, &mut color)?;
        for (column, value) in columns.iter_mut().zip(layer.resolve(ctx)) {
            column.push(value);
        }
    }

    let mut expansion = ctx.expansion();
    for (longhand, column) in LAYERED.into_iter().zip(columns) {
        expansion.set(longhand, StyleValue::list(Separator::Comma, column));
    }
    if let Some(color) = color {
        expansion.set(COLOR, color);
    }
    Ok(expansion)
}

pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let mut columns = Vec::with_capacity(LAYERED.len());
    for longhand in LAYERED {
        columns.push(ctx.value(longhand)?.layers());
    }
    let color = ctx.value(COLOR)?;
    if color.is_comma_list() {
        return None;
    }

    // Shorter lists repeat; they must tile the longest one exactly.
    let count = columns.iter().map(|column| column.len()).max()?;
    if columns.iter().any(|column| column.is_empty() || count % column.len() != 0) {
        return None;
    }

    let mut writer = ctx.writer();
    for index in 0..count {
        if index > 0 {
            writer.comma();
        }
        let item = |column: usize| &columns[column][index % columns[column].len()];
        let [image, position, size, repeat, attachment, origin, clip] =
            [0, 1, 2, 3, 4, 5, 6].map(item);
        let mut wrote = false;
        let mut write = |writer: &mut TextWriter, value: &StyleValue| {
            writer.value(value);
            wrote = true;
        };

        if !ctx.is_initial(IMAGE, image) {
            write(&mut writer, image);
        }
        let size_given = !ctx.is_initial(SIZE, size);
        if size_given || !ctx.is_initial(POSITION, position) {
            write(&mut writer, position);
            if size_given {
                writer.slash();
                write(&mut writer, size);
            }
        }
        if !ctx.is_initial(REPEAT, repeat) {
            write(&mut writer, repeat);
        }
        if !ctx.is_initial(ATTACHMENT, attachment) {
            write(&mut writer, attachment);
        }
        if origin == clip {
            write(&mut writer, origin);
        } else if !ctx.is_initial(ORIGIN, origin) || !ctx.is_initial(CLIP, clip) {
            write(&mut writer, origin);
            write(&mut writer, clip);
        }
        if index + 1 == count && !ctx.is_initial(COLOR, color) {
            write(&mut writer, color);
        }
        if !wrote {
            writer.text(ctx.initial_text(IMAGE));
        }
    }
    Some(writer.finish())
}
