//! `font` and `font-variant`.
//!
//! [CSS Fonts 4 § 2.8](https://www.w3.org/TR/css-fonts-4/#font-prop)

use super::cursor::{Cursor, split_layers};
use super::{DecomposeContext, Expansion, RecomposeContext};
use crate::database::{UnitClass, unit_class};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{Separator, StyleValue};

const STYLE: &str = "font-style";
const CAPS: &str = "font-variant-caps";
const WEIGHT: &str = "font-weight";
const STRETCH: &str = "font-stretch";
const SIZE: &str = "font-size";
const LINE_HEIGHT: &str = "line-height";
const FAMILY: &str = "font-family";

/// [CSS Fonts 4 § 2.8](https://www.w3.org/TR/css-fonts-4/#valdef-font-caption)
///
/// System font keywords. The shorthand stores the keyword as the family
/// and resets everything else.
const SYSTEM_FONTS: &[&str] = &[
    "caption",
    "icon",
    "menu",
    "message-box",
    "small-caption",
    "status-bar",
];

fn is_system_font(name: &str) -> bool {
    SYSTEM_FONTS.iter().any(|font| font.eq_ignore_ascii_case(name))
}

/// The prefix components that may precede the size.
#[derive(Default)]
struct Prefix {
    style: Option<StyleValue>,
    caps: Option<StyleValue>,
    weight: Option<StyleValue>,
    stretch: Option<StyleValue>,
}

/// "<font-weight-absolute> = [normal | bold | <number [1,1000]>]"
fn is_weight(ctx: &DecomposeContext, unit: &LexicalUnit) -> bool {
    match unit {
        LexicalUnit::Integer(value) => (1..=1000).contains(value),
        LexicalUnit::Real(value) => (1.0..=1000.0).contains(value),
        LexicalUnit::Ident(_) => !unit.is_ident("normal") && ctx.accepts(WEIGHT, unit),
        _ => false,
    }
}

/// `[ <'font-style'> || <font-variant-css2> || <'font-weight'> ||
/// <font-stretch-css3> ]?`
///
/// `normal` fills any one of the four slots, so it is only counted.
fn parse_prefix(ctx: &DecomposeContext, cursor: &mut Cursor<'_>) -> Result<Prefix, ShorthandError> {
    let mut prefix = Prefix::default();
    let mut count = 0;

    while let Some(unit) = cursor.peek() {
        if unit.is_ident("normal") {
            let _ = cursor.advance();
        } else if prefix.style.is_none() && (unit.is_ident("italic") || unit.is_ident("oblique")) {
            let _ = cursor.advance();
            let style = ctx.value(unit)?;
            // RULE: "oblique <angle>?"
            let angle = unit.is_ident("oblique").then(|| {
                cursor.advance_if(|next| {
                    matches!(next, LexicalUnit::Dimension { unit, .. } if unit_class(unit) == UnitClass::Angle)
                })
            });
            prefix.style = Some(match angle.flatten() {
                Some(angle) => StyleValue::list(Separator::Space, vec![style, ctx.value(angle)?]),
                None => style,
            });
        } else if prefix.caps.is_none() && unit.is_ident("small-caps") {
            let _ = cursor.advance();
            prefix.caps = Some(ctx.value(unit)?);
        } else if prefix.weight.is_none() && is_weight(ctx, unit) {
            let _ = cursor.advance();
            prefix.weight = Some(ctx.value(unit)?);
        } else if prefix.stretch.is_none()
            && matches!(unit, LexicalUnit::Ident(_))
            && ctx.accepts(STRETCH, unit)
        {
            let _ = cursor.advance();
            prefix.stretch = Some(ctx.value(unit)?);
        } else {
            break;
        }
        count += 1;
        if count > 4 {
            return Err(ctx.mismatch(Some(unit)));
        }
    }
    Ok(prefix)
}

/// `<family-name> = <string> | <custom-ident>+`
fn parse_family(ctx: &DecomposeContext, units: &[LexicalUnit]) -> Result<StyleValue, ShorthandError> {
    if units.is_empty() {
        return Err(ctx.mismatch(None));
    }
    let mut families = Vec::new();
    for family in split_layers(units) {
        match family {
            [] => return Err(ctx.mismatch(units.iter().find(|unit| **unit == LexicalUnit::Comma))),
            [single] if ctx.accepts(FAMILY, single) => families.push(ctx.value(single)?),
            words => {
                if let Some(bad) = words.iter().find(|unit| !matches!(unit, LexicalUnit::Ident(_))) {
                    return Err(ctx.mismatch(Some(bad)));
                }
                families.push(ctx.values(words)?);
            }
        }
    }
    Ok(StyleValue::list(Separator::Comma, families))
}

/// [CSS Fonts 4 § 2.8](https://www.w3.org/TR/css-fonts-4/#font-prop)
///
/// "[ [ <'font-style'> || <font-variant-css2> || <'font-weight'> ||
/// <font-width-css3> ]? <'font-size'> [ / <'line-height'> ]? <'font-family'># ]
/// | <system-family-name>"
///
/// Every longhand the grammar cannot express is reset to its initial value.
pub(super) fn decompose_font(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let mut expansion = ctx.expansion();

    // STEP 1: A system font keyword stands alone.
    if let [LexicalUnit::Ident(name)] = units
        && is_system_font(name)
    {
        expansion.set(FAMILY, StyleValue::ident(name.clone()));
        return Ok(expansion);
    }

    // STEP 2: Optional style, small-caps, weight and stretch.
    let mut cursor = Cursor::new(units);
    let prefix = parse_prefix(ctx, &mut cursor)?;

    // STEP 3: The size is required.
    let Some(size) = cursor.advance_if(|unit| ctx.accepts(SIZE, unit)) else {
        return Err(ctx.mismatch(cursor.peek()));
    };

    // STEP 4: "/ <'line-height'>"
    let line_height = if cursor.advance_slash() {
        match cursor.advance_if(|unit| ctx.accepts(LINE_HEIGHT, unit)) {
            Some(unit) => Some(ctx.value(unit)?),
            None => return Err(ctx.mismatch(cursor.peek())),
        }
    } else {
        None
    };

    // STEP 5: The rest is the family list.
    let family = parse_family(ctx, cursor.remaining())?;

    for (longhand, value) in [
        (STYLE, prefix.style),
        (CAPS, prefix.caps),
        (WEIGHT, prefix.weight),
        (STRETCH, prefix.stretch),
        (SIZE, Some(ctx.value(size)?)),
        (LINE_HEIGHT, line_height),
        (FAMILY, Some(family)),
    ] {
        if let Some(value) = value {
            expansion.set(longhand, value);
        }
    }
    Ok(expansion)
}

pub(super) fn recompose_font(ctx: &RecomposeContext<'_>) -> Option<String> {
    let style = ctx.value(STYLE)?;
    let caps = ctx.value(CAPS)?;
    let weight = ctx.value(WEIGHT)?;
    let stretch = ctx.value(STRETCH)?;
    let size = ctx.value(SIZE)?;
    let line_height = ctx.value(LINE_HEIGHT)?;
    let family = ctx.value(FAMILY)?;

    // RULE: Only the CSS 2.1 `small-caps` and keyword stretches fit.
    if !caps.is_ident("normal") && !caps.is_ident("small-caps") {
        return None;
    }
    if stretch.as_ident().is_none() {
        return None;
    }

    let rest_initial = [
        (STYLE, style),
        (CAPS, caps),
        (WEIGHT, weight),
        (STRETCH, stretch),
        (SIZE, size),
        (LINE_HEIGHT, line_height),
    ]
    .into_iter()
    .all(|(longhand, value)| ctx.is_initial(longhand, value));
    if rest_initial && family.as_ident().is_some_and(is_system_font) {
        return family.as_ident().map(ToString::to_string);
    }

    let mut writer = ctx.writer();
    for (longhand, value) in [(STYLE, style), (CAPS, caps), (WEIGHT, weight), (STRETCH, stretch)] {
        if !ctx.is_initial(longhand, value) {
            writer.value(value);
        }
    }
    writer.value(size);
    if !ctx.is_initial(LINE_HEIGHT, line_height) {
        writer.slash();
        writer.value(line_height);
    }
    writer.value(family);
    Some(writer.finish())
}

// ===========================================================================
// font-variant
// ===========================================================================

const LIGATURES: &str = "font-variant-ligatures";

/// Sub-properties that take a single keyword.
const SINGLE_VALUED: &[&str] = &["font-variant-caps", "font-variant-position"];

/// [CSS Fonts 4 § 6.11](https://www.w3.org/TR/css-fonts-4/#font-variant-prop)
///
/// "normal | none | [ [ <common-lig-values> || <discretionary-lig-values>
/// || <historical-lig-values> || <contextual-alt-values> ] || ... ]"
///
/// "The value normal resets all subproperties of font-variant to their
/// initial value. The none value sets font-variant-ligatures to none and
/// resets all other font feature properties to their initial value."
pub(super) fn decompose_variant(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let longhands = ctx.longhands();
    let mut expansion = ctx.expansion();

    match units {
        [only] if only.is_ident("normal") => return Ok(expansion),
        [only] if only.is_ident("none") => {
            expansion.set(LIGATURES, ctx.value(only)?);
            return Ok(expansion);
        }
        _ => {}
    }

    // Tokens of one sub-grammar need not be adjacent.
    let mut collected: Vec<Vec<StyleValue>> = vec![Vec::new(); longhands.len()];
    for unit in units {
        if unit.is_separator() || unit.is_ident("normal") || unit.is_ident("none") {
            return Err(ctx.mismatch(Some(unit)));
        }
        let Some(slot) = longhands.iter().position(|longhand| ctx.accepts(longhand, unit)) else {
            return Err(ctx.mismatch(Some(unit)));
        };
        let value = ctx.value(unit)?;
        let values = &mut collected[slot];
        if values.contains(&value)
            || (SINGLE_VALUED.contains(&longhands[slot]) && !values.is_empty())
        {
            return Err(ctx.mismatch(Some(unit)));
        }
        values.push(value);
    }

    for (longhand, values) in longhands.iter().zip(collected) {
        if !values.is_empty() {
            expansion.set(longhand, StyleValue::list(Separator::Space, values));
        }
    }
    Ok(expansion)
}

pub(super) fn recompose_variant(ctx: &RecomposeContext<'_>) -> Option<String> {
    let mut values = Vec::with_capacity(ctx.longhands().len());
    for &longhand in ctx.longhands() {
        values.push((longhand, ctx.value(longhand)?));
    }
    let others_normal = values
        .iter()
        .filter(|(longhand, _)| *longhand != LIGATURES)
        .all(|(_, value)| value.is_ident("normal"));
    let ligatures = values
        .iter()
        .find(|(longhand, _)| *longhand == LIGATURES)
        .map(|(_, value)| *value)?;

    if ligatures.is_ident("none") {
        // RULE: `none` cannot be combined with other features.
        return others_normal.then(|| "none".to_string());
    }
    if others_normal && ligatures.is_ident("normal") {
        return Some("normal".to_string());
    }

    let mut writer = ctx.writer();
    for (_, value) in values {
        if !value.is_ident("normal") {
            writer.value(value);
        }
    }
    Some(writer.finish())
}
