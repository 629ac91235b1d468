//! `grid-template` and `grid`.
//!
//! [CSS Grid 2 § 7.4](https://www.w3.org/TR/css-grid-2/#explicit-grid-shorthand)
//! [CSS Grid 2 § 7.8](https://www.w3.org/TR/css-grid-2/#grid-shorthand)

use super::cursor::split_slashes;
use super::{DecomposeContext, Expansion, RecomposeContext, TextWriter};
use crate::errors::ShorthandError;
use crate::lexical::LexicalUnit;
use crate::value::{Separator, StyleValue, TypedValue};

const ROWS: &str = "grid-template-rows";
const COLUMNS: &str = "grid-template-columns";
const AREAS: &str = "grid-template-areas";
const AUTO_ROWS: &str = "grid-auto-rows";
const AUTO_COLUMNS: &str = "grid-auto-columns";
const AUTO_FLOW: &str = "grid-auto-flow";

/// Keywords that are a whole track list on their own.
const WHOLE_LIST_KEYWORDS: &[&str] = &["none", "subgrid", "masonry"];

/// Track list: `none`, or line names and track sizes.
///
/// Implicit track lists (`grid-auto-rows`) take neither `none` nor line
/// names.
fn parse_track_list(
    ctx: &DecomposeContext,
    longhand: &str,
    units: &[LexicalUnit],
    explicit: bool,
) -> Result<StyleValue, ShorthandError> {
    if let [only] = units
        && explicit
        && WHOLE_LIST_KEYWORDS.iter().any(|kw| only.is_ident(kw))
    {
        return ctx.value(only);
    }
    let mut sizes = 0;
    for unit in units {
        match unit {
            LexicalUnit::LineNames(_) if explicit => {}
            _ if WHOLE_LIST_KEYWORDS.iter().any(|kw| unit.is_ident(kw)) => {
                return Err(ctx.mismatch(Some(unit)));
            }
            _ if ctx.accepts(longhand, unit) => sizes += 1,
            _ => return Err(ctx.mismatch(Some(unit))),
        }
    }
    if sizes == 0 {
        return Err(ctx.mismatch(units.first()));
    }
    ctx.values(units)
}

/// Number of cells in one row of `grid-template-areas`.
fn area_columns(row: &str) -> usize {
    row.split_whitespace().count()
}

/// The three explicit-grid values: rows, columns and areas.
struct Template {
    rows: StyleValue,
    columns: StyleValue,
    areas: StyleValue,
}

/// ```text
/// none
/// | [ <'grid-template-rows'> / <'grid-template-columns'> ]
/// | [ <line-names>? <string> <track-size>? <line-names>? ]+
///   [ / <explicit-track-list> ]?
/// ```
fn parse_template(ctx: &DecomposeContext, units: &[LexicalUnit]) -> Result<Template, ShorthandError> {
    let none = || StyleValue::ident("none");

    // STEP 1: `none` resets the explicit grid.
    if let [only] = units
        && only.is_ident("none")
    {
        return Ok(Template {
            rows: none(),
            columns: none(),
            areas: none(),
        });
    }

    let slash = units.iter().position(|unit| *unit == LexicalUnit::Slash);
    let has_strings = units.iter().any(|unit| matches!(unit, LexicalUnit::String(_)));

    // STEP 2: Without strings it is "rows / columns".
    if !has_strings {
        let segments = split_slashes(units);
        let [rows, columns] = segments.as_slice() else {
            return Err(ctx.mismatch(units.iter().filter(|u| **u == LexicalUnit::Slash).nth(1)));
        };
        return Ok(Template {
            rows: parse_track_list(ctx, ROWS, rows, true)?,
            columns: parse_track_list(ctx, COLUMNS, columns, true)?,
            areas: none(),
        });
    }

    // STEP 3: The areas form. Rows are strings, each with an optional size
    // (default `auto`); line names on either side of a row boundary merge.
    let (row_units, column_units) = match slash {
        Some(index) => (&units[..index], Some(&units[index + 1..])),
        None => (units, None),
    };
    let mut rows = Vec::new();
    let mut strings = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut index = 0;
    while index < row_units.len() {
        if let LexicalUnit::LineNames(group) = &row_units[index] {
            names.extend(group.iter().cloned());
            index += 1;
            continue;
        }
        let LexicalUnit::String(area) = &row_units[index] else {
            return Err(ctx.mismatch(Some(&row_units[index])));
        };
        if !names.is_empty() {
            rows.push(StyleValue::Typed(TypedValue::LineNames(std::mem::take(&mut names))));
        }
        if let Some(first) = strings.first().and_then(string_text)
            && area_columns(first) != area_columns(area)
        {
            return Err(ShorthandError::list_shape(
                ctx.name(),
                "grid-template-areas rows have different numbers of columns",
            ));
        }
        if area_columns(area) == 0 {
            return Err(ctx.mismatch(Some(&row_units[index])));
        }
        strings.push(StyleValue::Typed(TypedValue::String(area.clone())));
        index += 1;

        // RULE: "<track-size>?", which excludes repeat().
        match row_units.get(index) {
            Some(size)
                if !matches!(size, LexicalUnit::String(_) | LexicalUnit::LineNames(_))
                    && !size.is_function("repeat")
                    && !WHOLE_LIST_KEYWORDS.iter().any(|kw| size.is_ident(kw))
                    && ctx.accepts(ROWS, size) =>
            {
                rows.push(ctx.value(size)?);
                index += 1;
            }
            _ => rows.push(StyleValue::ident("auto")),
        }
    }
    if !names.is_empty() {
        rows.push(StyleValue::Typed(TypedValue::LineNames(names)));
    }

    let columns = match column_units {
        Some(units) => {
            if units.iter().any(|unit| matches!(unit, LexicalUnit::String(_))) {
                return Err(ctx.mismatch(units.iter().find(|u| matches!(u, LexicalUnit::String(_)))));
            }
            parse_track_list(ctx, COLUMNS, units, true)?
        }
        None => none(),
    };
    Ok(Template {
        rows: StyleValue::list(Separator::Space, rows),
        columns,
        areas: StyleValue::list(Separator::Space, strings),
    })
}

/// The text of a string value.
fn string_text(value: &StyleValue) -> Option<&str> {
    match value {
        StyleValue::Typed(TypedValue::String(text)) => Some(text),
        _ => None,
    }
}

fn set_template(expansion: &mut Expansion, template: Template) {
    expansion.set(ROWS, template.rows);
    expansion.set(COLUMNS, template.columns);
    expansion.set(AREAS, template.areas);
}

pub(super) fn decompose_template(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let mut expansion = ctx.expansion();
    set_template(&mut expansion, parse_template(ctx, units)?);
    Ok(expansion)
}

/// Write the explicit grid, or decline when it has no shorthand spelling.
fn write_template(
    writer: &mut TextWriter,
    rows: &StyleValue,
    columns: &StyleValue,
    areas: &StyleValue,
) -> Option<()> {
    let is_none = |value: &StyleValue| value.is_ident("none");

    if is_none(areas) {
        if is_none(rows) && is_none(columns) {
            writer.text("none");
        } else {
            writer.value(rows);
            writer.slash();
            writer.value(columns);
        }
        return Some(());
    }

    // RULE: Each area string takes the next track size; names pass through.
    let strings = areas.parts();
    let mut next = strings.iter();
    let mut previous_was_names = false;
    for item in rows.parts() {
        match item {
            StyleValue::Typed(TypedValue::LineNames(_)) => {
                // Adjacent groups would merge when read back.
                if previous_was_names {
                    return None;
                }
                writer.value(item);
                previous_was_names = true;
            }
            _ => {
                let string = next.next()?;
                if string_text(string).is_none() {
                    return None;
                }
                if matches!(item, StyleValue::Typed(TypedValue::Function { name, .. }) if name.eq_ignore_ascii_case("repeat"))
                    || is_none(item)
                {
                    return None;
                }
                writer.value(string);
                if !item.is_ident("auto") {
                    writer.value(item);
                }
                previous_was_names = false;
            }
        }
    }
    if next.next().is_some() {
        return None;
    }
    if !is_none(columns) {
        writer.slash();
        writer.value(columns);
    }
    Some(())
}

pub(super) fn recompose_template(ctx: &RecomposeContext<'_>) -> Option<String> {
    let mut writer = ctx.writer();
    write_template(&mut writer, ctx.value(ROWS)?, ctx.value(COLUMNS)?, ctx.value(AREAS)?)?;
    Some(writer.finish())
}

// ===========================================================================
// grid
// ===========================================================================

/// `auto-flow && dense?` followed by an optional implicit track list.
///
/// Returns whether `dense` was given and the remaining units.
fn parse_auto_flow<'a>(
    ctx: &DecomposeContext,
    units: &'a [LexicalUnit],
) -> Result<(bool, &'a [LexicalUnit]), ShorthandError> {
    match units {
        [first, second, rest @ ..]
            if (first.is_ident("auto-flow") && second.is_ident("dense"))
                || (first.is_ident("dense") && second.is_ident("auto-flow")) =>
        {
            Ok((true, rest))
        }
        [first, rest @ ..] if first.is_ident("auto-flow") => Ok((false, rest)),
        _ => Err(ctx.mismatch(units.first())),
    }
}

fn flow_value(direction: &str, dense: bool) -> StyleValue {
    let mut items = vec![StyleValue::ident(direction)];
    if dense {
        items.push(StyleValue::ident("dense"));
    }
    StyleValue::list(Separator::Space, items)
}

/// ```text
/// <'grid-template'>
/// | <'grid-template-rows'> / [ auto-flow && dense? ] <'grid-auto-columns'>?
/// | [ auto-flow && dense? ] <'grid-auto-rows'>? / <'grid-template-columns'>
/// ```
///
/// "Also, the gutter properties are reset by this shorthand, even though
/// they can't be set by it." Here: the implicit-grid longhands a form does
/// not mention are reset to their initial values.
pub(super) fn decompose_grid(
    ctx: &DecomposeContext,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let mut expansion = ctx.expansion();
    let segments = split_slashes(units);
    let mentions_auto_flow =
        |segment: &[LexicalUnit]| segment.iter().any(|unit| unit.is_ident("auto-flow"));

    match segments.as_slice() {
        [rows, flow] if mentions_auto_flow(flow) => {
            if mentions_auto_flow(rows) {
                return Err(ctx.mismatch(rows.iter().find(|u| u.is_ident("auto-flow"))));
            }
            let (dense, auto_columns) = parse_auto_flow(ctx, flow)?;
            expansion.set(ROWS, parse_track_list(ctx, ROWS, rows, true)?);
            if !auto_columns.is_empty() {
                expansion.set(
                    AUTO_COLUMNS,
                    parse_track_list(ctx, AUTO_COLUMNS, auto_columns, false)?,
                );
            }
            expansion.set(AUTO_FLOW, flow_value("column", dense));
        }
        [flow, columns] if mentions_auto_flow(flow) => {
            let (dense, auto_rows) = parse_auto_flow(ctx, flow)?;
            if !auto_rows.is_empty() {
                expansion.set(AUTO_ROWS, parse_track_list(ctx, AUTO_ROWS, auto_rows, false)?);
            }
            expansion.set(COLUMNS, parse_track_list(ctx, COLUMNS, columns, true)?);
            expansion.set(AUTO_FLOW, flow_value("row", dense));
        }
        _ => set_template(&mut expansion, parse_template(ctx, units)?),
    }
    Ok(expansion)
}

pub(super) fn recompose_grid(ctx: &RecomposeContext<'_>) -> Option<String> {
    let rows = ctx.value(ROWS)?;
    let columns = ctx.value(COLUMNS)?;
    let areas = ctx.value(AREAS)?;
    let auto_rows = ctx.value(AUTO_ROWS)?;
    let auto_columns = ctx.value(AUTO_COLUMNS)?;
    let flow = ctx.value(AUTO_FLOW)?;

    let mut writer = ctx.writer();
    let auto_rows_initial = ctx.is_initial(AUTO_ROWS, auto_rows);
    let auto_columns_initial = ctx.is_initial(AUTO_COLUMNS, auto_columns);

    // RULE: Without implicit-grid settings it is a grid-template value.
    if auto_rows_initial && auto_columns_initial && ctx.is_initial(AUTO_FLOW, flow) {
        write_template(&mut writer, rows, columns, areas)?;
        return Some(writer.finish());
    }
    if !areas.is_ident("none") {
        return None;
    }

    let parts = flow.parts();
    let dense = parts.iter().any(|part| part.is_ident("dense"));
    let column = parts.iter().any(|part| part.is_ident("column"));
    let write_flow = |writer: &mut TextWriter| {
        writer.text("auto-flow");
        if dense {
            writer.text("dense");
        }
    };

    if column {
        if !auto_rows_initial || !columns.is_ident("none") {
            return None;
        }
        writer.value(rows);
        writer.slash();
        write_flow(&mut writer);
        if !auto_columns_initial {
            writer.value(auto_columns);
        }
    } else {
        if !auto_columns_initial || !rows.is_ident("none") {
            return None;
        }
        write_flow(&mut writer);
        if !auto_rows_initial {
            writer.value(auto_rows);
        }
        writer.slash();
        writer.value(columns);
    }
    Some(writer.finish())
}
