//! Shorthand decomposition and recomposition.
//!
//! [CSS Cascade 4 § 2.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! Every shorthand belongs to one [`ShorthandKind`]. A kind pairs a
//! decomposer, which splits a lexed value into longhand values, with a
//! builder, which rebuilds the shortest shorthand text from declared
//! longhands or declines. The two directions live side by side in the
//! family modules so their omission rules stay mirror images.
//!
//! Decomposition is pure: it returns an [`Expansion`] that the declaration
//! commits. Building reads longhands through [`LonghandSource`].

pub mod cursor;

mod background;
mod border;
mod border_image;
mod border_radius;
mod box_model;
mod columns;
mod flex;
mod font;
mod grid;
mod grid_template;
mod layered;
mod list_style;
mod pair;
mod unordered;

use serde::Serialize;
use strum_macros::Display;

use crate::database::{ShorthandDatabase, ShorthandInfo};
use crate::errors::ShorthandError;
use crate::lexical::{LexicalUnit, units_to_text};
use crate::value::{CssWideKeyword, PendingValue, Separator, StyleValue, create_value};

pub use cursor::Cursor;

/// Grammar family of a shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ShorthandKind {
    /// `margin`, `padding`, `border-width`, `border-style`, `border-color`, `inset`
    Box,
    /// Two positional longhands, one value cloned into both.
    Sequence,
    /// Two longhands where the second mirrors the first when it can.
    Pair,
    /// `border`
    Border,
    /// `border-top`, `outline`, `column-rule`...
    BorderSide,
    /// `border-radius`
    BorderRadius,
    /// `border-image`
    BorderImage,
    /// `background`
    Background,
    /// `font`
    Font,
    /// `font-variant`
    FontVariant,
    /// `list-style`
    ListStyle,
    /// `flex`
    Flex,
    /// Any-order sets such as `flex-flow` and `text-decoration`.
    Unordered,
    /// `grid-row`, `grid-column`, `grid-area`
    GridPlacement,
    /// `grid-template`
    GridTemplate,
    /// `grid`
    Grid,
    /// `columns`
    Columns,
    /// `animation`
    Animation,
    /// `transition`
    Transition,
}

impl ShorthandKind {
    /// Whether the builder understands comma-separated layers.
    #[must_use]
    pub const fn is_list_aware(self) -> bool {
        matches!(self, Self::Background | Self::Animation | Self::Transition)
    }

    fn decompose(
        self,
        ctx: &DecomposeContext,
        units: &[LexicalUnit],
    ) -> Result<Expansion, ShorthandError> {
        match self {
            Self::Box => box_model::decompose(ctx, units),
            Self::Sequence => pair::decompose_sequence(ctx, units),
            Self::Pair => pair::decompose_pair(ctx, units),
            Self::Border => border::decompose_border(ctx, units),
            Self::BorderSide => border::decompose_side(ctx, units),
            Self::BorderRadius => border_radius::decompose(ctx, units),
            Self::BorderImage => border_image::decompose(ctx, units),
            Self::Background => background::decompose(ctx, units),
            Self::Font => font::decompose_font(ctx, units),
            Self::FontVariant => font::decompose_variant(ctx, units),
            Self::ListStyle => list_style::decompose(ctx, units),
            Self::Flex => flex::decompose(ctx, units),
            Self::Unordered => unordered::decompose(ctx, units),
            Self::GridPlacement => grid::decompose(ctx, units),
            Self::GridTemplate => grid_template::decompose_template(ctx, units),
            Self::Grid => grid_template::decompose_grid(ctx, units),
            Self::Columns => columns::decompose(ctx, units),
            Self::Animation => layered::decompose_animation(ctx, units),
            Self::Transition => layered::decompose_transition(ctx, units),
        }
    }

    fn recompose(self, ctx: &RecomposeContext<'_>) -> Option<String> {
        match self {
            Self::Box => box_model::recompose(ctx),
            Self::Sequence => pair::recompose_sequence(ctx),
            Self::Pair => pair::recompose_pair(ctx),
            Self::Border => border::recompose_border(ctx),
            Self::BorderSide => border::recompose_side(ctx),
            Self::BorderRadius => border_radius::recompose(ctx),
            Self::BorderImage => border_image::recompose(ctx),
            Self::Background => background::recompose(ctx),
            Self::Font => font::recompose_font(ctx),
            Self::FontVariant => font::recompose_variant(ctx),
            Self::ListStyle => list_style::recompose(ctx),
            Self::Flex => flex::recompose(ctx),
            Self::Unordered => unordered::recompose(ctx),
            Self::GridPlacement => grid::recompose(ctx),
            Self::GridTemplate => grid_template::recompose_template(ctx),
            Self::Grid => grid_template::recompose_grid(ctx),
            Self::Columns => columns::recompose(ctx),
            Self::Animation => layered::recompose_animation(ctx),
            Self::Transition => layered::recompose_transition(ctx),
        }
    }
}

// ===========================================================================
// Decomposition
// ===========================================================================

/// Longhand values produced by decomposing one shorthand value.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    shorthand: &'static str,
    entries: Vec<(&'static str, StyleValue)>,
    nonmixed: bool,
    pending: bool,
}

impl Expansion {
    fn new(info: &ShorthandInfo) -> Self {
        Self {
            shorthand: info.name(),
            entries: Vec::new(),
            nonmixed: true,
            pending: false,
        }
    }

    /// Every longhand gets the same CSS-wide keyword.
    fn broadcast(info: &ShorthandInfo, keyword: CssWideKeyword) -> Self {
        let mut expansion = Self::new(info);
        for longhand in info.all_longhands() {
            expansion.set(longhand, StyleValue::keyword(keyword, true));
        }
        expansion
    }

    /// Every longhand waits on `var()` substitution of the whole value.
    fn pending(info: &ShorthandInfo, raw: String) -> Self {
        let mut expansion = Self::new(info);
        expansion.pending = true;
        for longhand in info.all_longhands() {
            expansion.set(
                longhand,
                StyleValue::Pending(PendingValue {
                    shorthand: Some(info.name().to_string()),
                    raw: raw.clone(),
                }),
            );
        }
        expansion
    }

    pub(crate) fn set(&mut self, longhand: &'static str, value: StyleValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == longhand) {
            entry.1 = value;
        } else {
            self.entries.push((longhand, value));
        }
    }

    fn is_set(&self, longhand: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == longhand)
    }

    /// Give unset longhands their initial value and put the entries in
    /// canonical order.
    fn fill_initial(&mut self, info: &ShorthandInfo, db: &ShorthandDatabase) {
        for longhand in info.all_longhands() {
            if !self.is_set(longhand) {
                self.set(longhand, initial_of(db, longhand));
            }
        }
        let order: Vec<&str> = info.all_longhands().collect();
        self.entries
            .sort_by_key(|(name, _)| order.iter().position(|o| o == name));
    }

    /// The shorthand that was decomposed.
    #[must_use]
    pub const fn shorthand(&self) -> &'static str {
        self.shorthand
    }

    /// Value assigned to `longhand`.
    #[must_use]
    pub fn get(&self, longhand: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(name, _)| *name == longhand)
            .map(|(_, value)| value)
    }

    /// All assignments, value longhands first, then reset-only ones.
    #[must_use]
    pub fn entries(&self) -> &[(&'static str, StyleValue)] {
        &self.entries
    }

    /// `false` when a box shorthand mixed CSS-wide keywords with other values.
    #[must_use]
    pub const fn is_nonmixed(&self) -> bool {
        self.nonmixed
    }

    /// Whether the value was left pending `var()` substitution.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

fn initial_of(db: &ShorthandDatabase, longhand: &str) -> StyleValue {
    db.initial_value(longhand)
        .cloned()
        .unwrap_or_else(|| StyleValue::keyword(CssWideKeyword::Initial, true))
}

/// What a decomposer can see: the shorthand and the database.
pub(crate) struct DecomposeContext {
    info: &'static ShorthandInfo,
    db: &'static ShorthandDatabase,
}

impl DecomposeContext {
    const fn name(&self) -> &'static str {
        self.info.name()
    }

    const fn longhands(&self) -> &'static [&'static str] {
        self.info.longhands()
    }

    fn expansion(&self) -> Expansion {
        Expansion::new(self.info)
    }

    fn accepts(&self, longhand: &str, unit: &LexicalUnit) -> bool {
        self.db.accepts(longhand, unit)
    }

    fn is_legal_identifier(&self, longhand: &str, ident: &str) -> bool {
        self.db.is_legal_identifier(longhand, ident)
    }

    fn initial(&self, longhand: &str) -> StyleValue {
        initial_of(self.db, longhand)
    }

    /// Value of one unit.
    fn value(&self, unit: &LexicalUnit) -> Result<StyleValue, ShorthandError> {
        create_value(unit, false).map_err(|_| self.mismatch(Some(unit)))
    }

    /// Value of several units: the unit itself, or a space list.
    fn values(&self, units: &[LexicalUnit]) -> Result<StyleValue, ShorthandError> {
        if units.is_empty() {
            return Err(self.mismatch(None));
        }
        let items = units
            .iter()
            .map(|unit| self.value(unit))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StyleValue::list(Separator::Space, items))
    }

    fn mismatch(&self, unit: Option<&LexicalUnit>) -> ShorthandError {
        ShorthandError::mismatch(self.name(), unit)
    }

    fn count_error(&self, count: usize) -> ShorthandError {
        ShorthandError::count(self.name(), count)
    }
}

/// Decompose a lexed shorthand value into longhand values.
///
/// Shared steps run first: a `var()` anywhere leaves every longhand
/// pending, a lone CSS-wide keyword is broadcast to every longhand, and a
/// CSS-wide keyword next to other values is rejected (box shorthands
/// excepted, see [`Expansion::is_nonmixed`]). Longhands the grammar left
/// unset get their initial value.
///
/// # Errors
///
/// A [`ShorthandError`] naming the first ungrammatical token, a wrong
/// value count, a forbidden keyword mix or an unsupported list shape.
pub fn decompose(
    info: &'static ShorthandInfo,
    units: &[LexicalUnit],
) -> Result<Expansion, ShorthandError> {
    let db = ShorthandDatabase::global();
    let ctx = DecomposeContext { info, db };

    if units.is_empty() {
        return Err(ctx.count_error(0));
    }

    // [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#variables-in-shorthands)
    // "If a shorthand property contains a var() ... its longhand
    // sub-properties must be filled in with a special, unobservable-to-
    // authors pending-substitution value."
    if units.iter().any(LexicalUnit::contains_var) {
        return Ok(Expansion::pending(info, units_to_text(units, false)));
    }

    if let [LexicalUnit::Ident(name)] = units
        && let Some(keyword) = CssWideKeyword::from_ident(name)
    {
        return Ok(Expansion::broadcast(info, keyword));
    }

    if info.kind() != ShorthandKind::Box
        && let Some(keyword) = units
            .iter()
            .filter_map(LexicalUnit::as_ident)
            .find(|name| CssWideKeyword::from_ident(name).is_some())
    {
        return Err(ShorthandError::keyword_mix(info.name(), keyword));
    }

    let mut expansion = info.kind().decompose(&ctx, units)?;
    expansion.fill_initial(info, db);
    Ok(expansion)
}

// ===========================================================================
// Recomposition
// ===========================================================================

/// A declared longhand as seen by a builder.
#[derive(Debug, Clone, Copy)]
pub struct Declared<'a> {
    /// The value.
    pub value: &'a StyleValue,
    /// Whether it is `!important`.
    pub important: bool,
}

/// Read access to declared longhands.
pub trait LonghandSource {
    /// The declared value of `longhand`, if any.
    fn declared(&self, longhand: &str) -> Option<Declared<'_>>;
}

impl LonghandSource for Expansion {
    fn declared(&self, longhand: &str) -> Option<Declared<'_>> {
        self.get(longhand).map(|value| Declared {
            value,
            important: false,
        })
    }
}

/// How to build shorthand text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomposeOptions {
    /// Only longhands with this importance may be combined.
    pub important: bool,
    /// Produce minified text.
    pub minified: bool,
    /// `false` when the box shorthand was last set from a mix of CSS-wide
    /// keywords and other values; the box builder then declines.
    pub nonmixed: bool,
}

impl RecomposeOptions {
    /// Normal text for longhands of the given importance.
    #[must_use]
    pub const fn new(important: bool) -> Self {
        Self {
            important,
            minified: false,
            nonmixed: true,
        }
    }

    /// Same options, minified.
    #[must_use]
    pub const fn minified(mut self) -> Self {
        self.minified = true;
        self
    }
}

impl Default for RecomposeOptions {
    fn default() -> Self {
        Self::new(false)
    }
}

/// What a builder can see.
pub(crate) struct RecomposeContext<'a> {
    info: &'static ShorthandInfo,
    db: &'static ShorthandDatabase,
    source: &'a dyn LonghandSource,
    options: RecomposeOptions,
}

impl<'a> RecomposeContext<'a> {
    const fn longhands(&self) -> &'static [&'static str] {
        self.info.longhands()
    }

    /// Declared value of a longhand.
    fn value(&self, longhand: &str) -> Option<&'a StyleValue> {
        self.source.declared(longhand).map(|declared| declared.value)
    }

    /// Declared value of the `index`th value longhand.
    fn value_at(&self, index: usize) -> Option<&'a StyleValue> {
        self.value(self.longhands().get(index)?)
    }

    fn initial(&self, longhand: &str) -> Option<&'static StyleValue> {
        self.db.initial_value(longhand)
    }

    fn initial_text(&self, longhand: &str) -> &'static str {
        self.db
            .longhand(longhand)
            .map_or("initial", |info| info.initial_text())
    }

    fn is_initial(&self, longhand: &str, value: &StyleValue) -> bool {
        self.initial(longhand) == Some(value)
    }

    fn is_legal_identifier(&self, longhand: &str, ident: &str) -> bool {
        self.db.is_legal_identifier(longhand, ident)
    }

    fn accepts(&self, longhand: &str, unit: &LexicalUnit) -> bool {
        self.db.accepts(longhand, unit)
    }

    const fn nonmixed(&self) -> bool {
        self.options.nonmixed
    }

    const fn writer(&self) -> TextWriter {
        TextWriter::new(self.options.minified)
    }
}

/// Builds shorthand value text with the right separators for the mode.
pub(crate) struct TextWriter {
    out: String,
    minified: bool,
    need_space: bool,
}

impl TextWriter {
    const fn new(minified: bool) -> Self {
        Self {
            out: String::new(),
            minified,
            need_space: false,
        }
    }

    fn value(&mut self, value: &StyleValue) {
        if self.need_space {
            self.out.push(' ');
        }
        value.write_to(&mut self.out, self.minified);
        self.need_space = true;
    }

    fn text(&mut self, text: &str) {
        if self.need_space {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.need_space = true;
    }

    fn slash(&mut self) {
        if self.minified {
            self.out.push('/');
        } else if self.out.ends_with(" / ") {
            // Consecutive slashes around an omitted component.
            self.out.push_str("/ ");
        } else {
            self.out.push_str(" / ");
        }
        self.need_space = false;
    }

    fn comma(&mut self) {
        self.out.push_str(if self.minified { "," } else { ", " });
        self.need_space = false;
    }

    const fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Longhands whose own grammar is a comma list even outside layered
/// shorthands.
fn allows_comma_list(longhand: &str) -> bool {
    longhand == "font-family"
}

/// Build the shortest shorthand text for the declared longhands, or
/// decline with `None`.
///
/// Shared preconditions run first: every value longhand must be declared
/// with the requested importance, no value may be pending or verbatim,
/// reset-only longhands (when declared) must hold their initial value, and
/// only layered shorthands may see comma lists. A declared set that is
/// entirely one CSS-wide keyword collapses to that keyword; a partial
/// keyword set declines.
#[must_use]
pub fn recompose(
    info: &'static ShorthandInfo,
    source: &dyn LonghandSource,
    options: RecomposeOptions,
) -> Option<String> {
    let db = ShorthandDatabase::global();
    let ctx = RecomposeContext {
        info,
        db,
        source,
        options,
    };

    let mut keywords = Vec::new();
    let mut present: Vec<&str> = Vec::new();
    for &longhand in info.longhands() {
        let declared = source.declared(longhand)?;
        if declared.important != options.important || !is_embeddable(declared.value) {
            return None;
        }
        keywords.push(declared.value.as_keyword());
        present.push(longhand);
    }
    for &longhand in info.reset_only() {
        let Some(declared) = source.declared(longhand) else {
            continue;
        };
        if declared.important != options.important || !is_embeddable(declared.value) {
            return None;
        }
        let keyword = declared.value.as_keyword();
        if keyword.is_none() && !ctx.is_initial(longhand, declared.value) {
            return None;
        }
        keywords.push(keyword);
        present.push(longhand);
    }

    // [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serialize-a-css-value)
    // "If all of longhands have the same CSS-wide keyword, return it.
    // If any of longhands has a CSS-wide keyword, return the empty string."
    if let Some(&Some(first)) = keywords.first() {
        return (keywords.iter().all(|keyword| *keyword == Some(first))
            && keyword_collapses(db, first, &present))
            .then(|| first.to_string());
    }
    if keywords.iter().any(Option::is_some) {
        return None;
    }

    if !info.kind().is_list_aware() {
        for &longhand in info.longhands() {
            if !allows_comma_list(longhand) && ctx.value(longhand)?.is_comma_list() {
                return None;
            }
        }
    }

    info.kind().recompose(&ctx)
}

/// Whether `keyword` on every one of `longhands` means the same thing as
/// the keyword on the shorthand.
///
/// RULE: `unset` and `revert` act as `inherit` on inherited longhands and
/// as `initial` on the rest, so they only collapse over one inheritance
/// class.
fn keyword_collapses(db: &ShorthandDatabase, keyword: CssWideKeyword, longhands: &[&str]) -> bool {
    if !matches!(keyword, CssWideKeyword::Unset | CssWideKeyword::Revert) {
        return true;
    }
    let mut classes = longhands.iter().map(|longhand| db.is_inherited(longhand));
    classes
        .next()
        .is_none_or(|first| classes.all(|inherited| inherited == first))
}

/// Values a builder may write back into shorthand text.
const fn is_embeddable(value: &StyleValue) -> bool {
    !matches!(
        value,
        StyleValue::Pending(_) | StyleValue::Unknown(_) | StyleValue::Shorthand(_)
    )
}

/// The fewest box values (1 to 4) that reproduce `sides` under the CSS box
/// rule, in top/right/bottom/left order.
fn box_count<T: PartialEq>(sides: &[T; 4]) -> usize {
    let [top, right, bottom, left] = sides;
    if left != right {
        4
    } else if bottom != top {
        3
    } else if right != top {
        2
    } else {
        1
    }
}

/// Which of the given values each box side takes for `count` values.
const fn box_sides(count: usize) -> [usize; 4] {
    match count {
        1 => [0, 0, 0, 0],
        2 => [0, 1, 0, 1],
        3 => [0, 1, 2, 1],
        _ => [0, 1, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_collapse_over_inheritance_classes() {
        let db = ShorthandDatabase::global();
        let mixed = ["margin-top", "font-size"];
        let same = ["font-size", "font-style"];

        assert!(keyword_collapses(db, CssWideKeyword::Inherit, &mixed));
        assert!(keyword_collapses(db, CssWideKeyword::Initial, &mixed));
        assert!(!keyword_collapses(db, CssWideKeyword::Unset, &mixed));
        assert!(!keyword_collapses(db, CssWideKeyword::Revert, &mixed));
        assert!(keyword_collapses(db, CssWideKeyword::Unset, &same));
        assert!(keyword_collapses(db, CssWideKeyword::Revert, &same));
    }
}
