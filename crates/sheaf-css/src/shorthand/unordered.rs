//! Shorthands whose longhands may appear in any order, each once:
//! `flex-flow`, `text-decoration` and `text-emphasis`.
//!
//! [CSS Flexbox 1 § 5.3](https://www.w3.org/TR/css-flexbox-1/#flex-flow-property)
//! [CSS Text Decoration 4 § 2.6](https://www.w3.org/TR/css-text-decor-4/#text-decoration-property)

use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{Separator, StyleValue};

/// How many adjacent units a longhand's value may span.
fn max_parts(longhand: &str) -> usize {
    match longhand {
        // underline || overline || line-through || blink
        "text-decoration-line" => 4,
        // [ filled | open ] || [ dot | circle | ... ]
        "text-emphasis-style" => 2,
        _ => 1,
    }
}

pub(super) fn decompose(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let longhands = ctx.longhands();
    let mut slots: Vec<Vec<StyleValue>> = vec![Vec::new(); longhands.len()];
    let mut previous: Option<usize> = None;

    for unit in units {
        if unit.is_separator() {
            return Err(ctx.mismatch(Some(unit)));
        }
        let value = ctx.value(unit)?;

        // RULE: A multi-part longhand keeps taking adjacent units it accepts.
        let continues = previous.filter(|&slot| {
            let values = &slots[slot];
            values.len() < max_parts(longhands[slot])
                && ctx.accepts(longhands[slot], unit)
                && !unit.is_ident("none")
                && !values.iter().any(|v| v.is_ident("none") || *v == value)
        });
        let slot = match continues {
            Some(slot) => slot,
            None => {
                let Some(slot) = (0..longhands.len())
                    .find(|&slot| slots[slot].is_empty() && ctx.accepts(longhands[slot], unit))
                else {
                    return Err(ctx.mismatch(Some(unit)));
                };
                slot
            }
        };
        slots[slot].push(value);
        previous = Some(slot);
    }

    let mut expansion = ctx.expansion();
    for (longhand, values) in longhands.iter().zip(slots) {
        if !values.is_empty() {
            expansion.set(longhand, StyleValue::list(Separator::Space, values));
        }
    }
    Ok(expansion)
}

/// Non-initial longhands in canonical order; the first longhand's initial
/// value when every longhand is initial.
pub(super) fn recompose(ctx: &RecomposeContext<'_>) -> Option<String> {
    let longhands = ctx.longhands();
    let mut writer = ctx.writer();
    for &longhand in longhands {
        let value = ctx.value(longhand)?;
        if !ctx.is_initial(longhand, value) {
            writer.value(value);
        }
    }
    if writer.is_empty() {
        writer.text(ctx.initial_text(longhands[0]));
    }
    Some(writer.finish())
}
