//! Comma-layered shorthands: `animation` and `transition`.
//!
//! Each layer is an unordered set of per-longhand values. A longhand with
//! one layer holds a single value, otherwise a comma list with one item
//! per layer.

use super::cursor::split_layers;
use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::database::{UnitClass, unit_class};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{Separator, StyleValue};

const ANIMATION_NAME: &str = "animation-name";
const ANIMATION_DURATION: &str = "animation-duration";
const ANIMATION_DELAY: &str = "animation-delay";

const TRANSITION_PROPERTY: &str = "transition-property";
const TRANSITION_DURATION: &str = "transition-duration";
const TRANSITION_TIMING: &str = "transition-timing-function";
const TRANSITION_DELAY: &str = "transition-delay";

fn is_time(unit: &LexicalUnit) -> bool {
    matches!(unit, LexicalUnit::Dimension { unit, .. } if unit_class(unit) == UnitClass::Time)
}

/// Split into layers, parse each into one value per longhand (in
/// canonical order), and transpose into one column per longhand.
fn decompose_layers(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let longhands = ctx.longhands();
    let mut columns: Vec<Vec<StyleValue>> = vec![Vec::new(); longhands.len()];
    for layer in split_layers(units) {
        if layer.is_empty() {
            return Err(ShorthandError::list_shape(ctx.name(), "empty layer"));
        }
        let values = parse_layer(ctx, layer)?;
        for ((column, longhand), value) in columns.iter_mut().zip(longhands).zip(values) {
            column.push(value.unwrap_or_else(|| ctx.initial(longhand)));
        }
    }

    let mut expansion = ctx.expansion();
    for (longhand, column) in longhands.iter().zip(columns) {
        expansion.set(longhand, StyleValue::list(Separator::Comma, column));
    }
    Ok(expansion)
}

/// Both shorthands put the free-form identifier longhand first, then the
/// duration, the easing function and the delay.
const DURATION: usize = 1;
const DELAY: usize = 3;

/// Place each unit in the first still-empty slot whose longhand accepts it.
///
/// A time goes to the duration first and the delay second; the free-form
/// identifier longhand (slot 0) is tried last.
fn parse_layer(
    ctx: &DecomposeContext,
    layer: &[LexicalUnit],
) -> Result<Vec<Option<StyleValue>>, ShorthandError> {
    let longhands = ctx.longhands();
    let mut slots = vec![None; longhands.len()];
    for unit in layer {
        let free = |slot: &usize| slots[*slot].is_none() && ctx.accepts(longhands[*slot], unit);
        let slot = if is_time(unit) {
            [DURATION, DELAY].into_iter().find(free)
        } else {
            (1..longhands.len())
                .chain([0])
                .filter(|&slot| slot != DURATION && slot != DELAY)
                .find(free)
        };
        let Some(slot) = slot else {
            return Err(ctx.mismatch(Some(unit)));
        };
        slots[slot] = Some(ctx.value(unit)?);
    }
    Ok(slots)
}

/// [CSS Animations 1 § 3.11](https://www.w3.org/TR/css-animations-1/#animation)
///
/// "<single-animation> = <time [0s,∞]> || <easing-function> || <time> ||
/// <single-animation-iteration-count> || <single-animation-direction> ||
/// <single-animation-fill-mode> || <single-animation-play-state> ||
/// [ none | <keyframes-name> ]"
///
/// "Note that order is also important within each animation definition:
/// the first value in each <single-animation> that can be parsed as a
/// <time> is assigned to the animation-duration, and the second value in
/// each <single-animation> that can be parsed as a <time> is assigned to
/// animation-delay."
pub(super) fn decompose_animation(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    decompose_layers(ctx, units)
}

/// [CSS Transitions 1 § 2.5](https://www.w3.org/TR/css-transitions-1/#transition-shorthand-property)
///
/// "<single-transition> = [ none | <single-transition-property> ] ||
/// <time> || <easing-function> || <time>"
///
/// "If there is more than one <single-transition> in the shorthand, and
/// any of the transitions has none as the <single-transition-property>,
/// then the declaration is invalid."
pub(super) fn decompose_transition(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let expansion = decompose_layers(ctx, units)?;

    let properties = expansion.get(TRANSITION_PROPERTY).map(StyleValue::layers);
    if let Some(properties) = properties
        && properties.len() > 1
        && properties.iter().any(|property| property.is_ident("none"))
    {
        return Err(ShorthandError::list_shape(
            ctx.name(),
            "'none' is only valid in a single transition",
        ));
    }
    Ok(expansion)
}

/// Every layered longhand's items plus the layer count, or `None` when the
/// lists do not tile the longest one.
fn layer_columns<'a>(ctx: &RecomposeContext<'a>) -> Option<(Vec<&'a [StyleValue]>, usize)> {
    let mut columns = Vec::with_capacity(ctx.longhands().len());
    for &longhand in ctx.longhands() {
        columns.push(ctx.value(longhand)?.layers());
    }
    let count = columns.iter().map(|column| column.len()).max()?;
    if columns
        .iter()
        .any(|column| column.is_empty() || count % column.len() != 0)
    {
        return None;
    }
    Some((columns, count))
}

/// Whether the identifier `name` would be read as a value of `longhand`.
fn clashes(ctx: &RecomposeContext<'_>, longhand: &str, name: &StyleValue) -> bool {
    name.as_ident()
        .is_some_and(|ident| ctx.is_legal_identifier(longhand, ident))
}

pub(super) fn recompose_animation(ctx: &RecomposeContext<'_>) -> Option<String> {
    let longhands = ctx.longhands();
    let (columns, count) = layer_columns(ctx)?;

    let mut writer = ctx.writer();
    for index in 0..count {
        if index > 0 {
            writer.comma();
        }
        let item = |slot: usize| &columns[slot][index % columns[slot].len()];
        let name = item(0);
        let name_given = !ctx.is_initial(ANIMATION_NAME, name);
        let mut wrote = false;

        // RULE: The duration is written whenever the delay is, so the delay
        // stays the second time.
        let delay_given = !ctx.is_initial(ANIMATION_DELAY, item(DELAY));
        if delay_given || !ctx.is_initial(ANIMATION_DURATION, item(DURATION)) {
            writer.value(item(DURATION));
            wrote = true;
        }
        for (slot, &longhand) in longhands.iter().enumerate().skip(DURATION + 1) {
            let value = item(slot);
            let given = if longhand == ANIMATION_DELAY {
                delay_given
            } else {
                !ctx.is_initial(longhand, value) || (name_given && clashes(ctx, longhand, name))
            };
            if given {
                writer.value(value);
                wrote = true;
            }
        }
        if name_given || !wrote {
            writer.value(name);
        }
    }
    Some(writer.finish())
}

pub(super) fn recompose_transition(ctx: &RecomposeContext<'_>) -> Option<String> {
    let (columns, count) = layer_columns(ctx)?;
    if count > 1 && columns[0].iter().any(|property| property.is_ident("none")) {
        return None;
    }

    let mut writer = ctx.writer();
    for index in 0..count {
        if index > 0 {
            writer.comma();
        }
        let item = |slot: usize| &columns[slot][index % columns[slot].len()];
        let [property, duration, timing, delay] = [0, 1, 2, 3].map(item);
        let mut wrote = false;

        // RULE: A property named like an easing keyword goes last, after an
        // explicit easing function.
        let clash = clashes(ctx, TRANSITION_TIMING, property);
        let property_given = !ctx.is_initial(TRANSITION_PROPERTY, property);
        if property_given && !clash {
            writer.value(property);
            wrote = true;
        }
        let delay_given = !ctx.is_initial(TRANSITION_DELAY, delay);
        if delay_given || !ctx.is_initial(TRANSITION_DURATION, duration) {
            writer.value(duration);
            wrote = true;
        }
        if clash || !ctx.is_initial(TRANSITION_TIMING, timing) {
            writer.value(timing);
            wrote = true;
        }
        if delay_given {
            writer.value(delay);
            wrote = true;
        }
        if property_given && clash {
            writer.value(property);
            wrote = true;
        }
        if !wrote {
            writer.text(ctx.initial_text(TRANSITION_PROPERTY));
        }
    }
    Some(writer.finish())
}
