//! Style declarations: the concrete owner of longhand entries.
//!
//! [CSSOM § 6.6.1 The CSSStyleDeclaration Interface](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
//!
//! A [`StyleDeclaration`] stores one entry per longhand (plus custom
//! properties), decomposes shorthands on the way in and recomposes them on
//! the way out. Shorthand ownership and browser-hack values live in the
//! [`Ledger`].

pub mod ledger;

use std::collections::{HashMap, HashSet};
use std::fmt;

use sheaf_common::warning::warn_once;
use thiserror::Error;

use crate::database::{ShorthandDatabase, ShorthandInfo};
use crate::errors::{ErrorSink, LogErrorSink, ShorthandError};
use crate::lexical::{
    LexError, LexicalUnit, RawDeclaration, lex_value, parse_declaration_list, split_priority,
    units_to_text,
};
use crate::shorthand::{self, Declared, Expansion, LonghandSource, RecomposeOptions};
use crate::substitute::substitute_var;
use crate::value::{
    CssWideKeyword, OwnedLonghands, ShorthandValue, StyleValue, UnknownValue, ValueError,
    value_from_units,
};

pub use ledger::{CompatEntry, Ledger, ShorthandRecord};

/// Why a declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// Not a property name.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
    /// The value text was empty.
    #[error("{0}: empty value")]
    Empty(String),
    /// The value text could not be lexed.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A shorthand value did not match its grammar.
    #[error(transparent)]
    Shorthand(#[from] ShorthandError),
    /// A longhand value could not be built.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Where decomposed longhand values are committed.
pub trait DeclarationSink {
    /// Store `value` for `longhand`, replacing any earlier value in place.
    fn set_longhand(&mut self, longhand: &str, value: StyleValue, important: bool);

    /// The value stored for `longhand`.
    fn longhand(&self, longhand: &str) -> Option<&StyleValue>;

    /// Store the initial value of `longhand`.
    fn reset_to_initial(&mut self, longhand: &str, important: bool);

    /// `shorthand` no longer speaks for `longhand`.
    fn remove_ownership(&mut self, shorthand: &str, longhand: &str);
}

/// One stored property.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationEntry {
    /// Property name.
    pub name: String,
    /// Its value.
    pub value: StyleValue,
    /// Whether it is `!important`.
    pub important: bool,
}

/// A block of declarations, as found in a style rule or `style` attribute.
pub struct StyleDeclaration {
    entries: Vec<DeclarationEntry>,
    ledger: Ledger,
    error_sink: Box<dyn ErrorSink>,
}

impl fmt::Debug for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleDeclaration")
            .field("entries", &self.entries)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl Default for StyleDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

/// `[-]?[a-z][a-z0-9-]*`, which covers vendor prefixes.
fn is_property_name(name: &str) -> bool {
    let body = name.strip_prefix('-').unwrap_or(name);
    body.starts_with(|c: char| c.is_ascii_lowercase())
        && body
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if is_custom_property(name) {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

impl StyleDeclaration {
    /// An empty declaration that logs rejected values.
    #[must_use]
    pub fn new() -> Self {
        Self::with_error_sink(Box::new(LogErrorSink))
    }

    /// An empty declaration reporting to `sink`.
    #[must_use]
    pub fn with_error_sink(sink: Box<dyn ErrorSink>) -> Self {
        Self {
            entries: Vec::new(),
            ledger: Ledger::new(),
            error_sink: sink,
        }
    }

    /// Parse a declaration block.
    ///
    /// Rejected declarations are skipped; see [`Self::set_css_text`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut declaration = Self::new();
        let _ = declaration.set_css_text(text);
        declaration
    }

    /// Replace the error sink.
    pub fn set_error_sink(&mut self, sink: Box<dyn ErrorSink>) {
        self.error_sink = sink;
    }

    /// The ownership ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Stored entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[DeclarationEntry] {
        &self.entries
    }

    fn entry(&self, name: &str) -> Option<&DeclarationEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    // =======================================================================
    // Setting
    // =======================================================================

    /// [CSSOM § 6.6.1 setProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// Set a property from value text. `value` may end in `!important`,
    /// which has the same effect as passing `important`.
    ///
    /// # Errors
    ///
    /// [`DeclarationError`] when the property is unknown, the value is
    /// empty or cannot be lexed, or a shorthand value does not match its
    /// grammar. Shorthand errors are also sent to the error sink. A failed
    /// call leaves the declaration unchanged.
    pub fn set_property(
        &mut self,
        name: &str,
        value: &str,
        important: bool,
    ) -> Result<(), DeclarationError> {
        let (text, flagged, priority_compat) = split_priority(value);
        self.apply(RawDeclaration {
            name: normalize_name(name),
            value: text.to_string(),
            important: important || flagged,
            priority_compat,
        })
    }

    /// Replace every declaration with those in `text`.
    ///
    /// Each rejected declaration is skipped and returned; shorthand
    /// errors have already gone to the error sink, the others are logged.
    pub fn set_css_text(&mut self, text: &str) -> Vec<DeclarationError> {
        self.clear();
        let mut rejected = Vec::new();
        for raw in parse_declaration_list(text) {
            if let Err(error) = self.apply(raw) {
                if !matches!(error, DeclarationError::Shorthand(_)) {
                    let _ = warn_once("declaration", &error.to_string());
                }
                rejected.push(error);
            }
        }
        rejected
    }

    fn apply(&mut self, raw: RawDeclaration) -> Result<(), DeclarationError> {
        let RawDeclaration {
            name,
            value,
            important,
            priority_compat,
        } = raw;
        if value.trim().is_empty() {
            return Err(DeclarationError::Empty(name));
        }

        if is_custom_property(&name) {
            // [CSS Variables § 2](https://www.w3.org/TR/css-variables-1/#defining-variables)
            // "The value of a custom property is ... its specified value
            // (the token sequence)". Kept as written.
            self.set_longhand(
                &name,
                StyleValue::Unknown(UnknownValue {
                    raw: value.trim().to_string(),
                    priority_compat: false,
                }),
                important,
            );
            return Ok(());
        }

        let db = ShorthandDatabase::global();
        let shorthand_info = db.shorthand(&name);
        // RULE: longhands outside the database are stored unchecked.
        if shorthand_info.is_none() && db.longhand(&name).is_none() && !is_property_name(&name) {
            return Err(DeclarationError::UnknownProperty(name));
        }

        // RULE: a hack value never replaces the standard one.
        if priority_compat {
            let raw = if value.ends_with("\\9") {
                value
            } else {
                format!("{value} !ie")
            };
            self.ledger.record_compat(&name, &raw);
            return Ok(());
        }

        let units = lex_value(&value)?;
        if let Some(info) = shorthand_info {
            let expansion = match shorthand::decompose(info, &units) {
                Ok(expansion) => expansion,
                Err(error) => {
                    self.error_sink.report(&error);
                    return Err(error.into());
                }
            };
            self.commit(info, &expansion, &units, important);
        } else {
            let value = value_from_units(&units, false)?;
            self.set_longhand(&name, value, important);
            self.ledger.forget_longhand(&name);
        }
        Ok(())
    }

    /// Commit a decomposed shorthand and record its ownership.
    fn commit(
        &mut self,
        info: &'static ShorthandInfo,
        expansion: &Expansion,
        units: &[LexicalUnit],
        important: bool,
    ) {
        let db = ShorthandDatabase::global();
        let name = info.name();

        // STEP 1: Other shorthands lose every longhand this one assigns.
        for (longhand, _) in expansion.entries() {
            for &other in db.shorthands_containing(longhand) {
                if other != name {
                    self.remove_ownership(other, longhand);
                }
            }
        }

        // STEP 2: Store the values.
        for (longhand, value) in expansion.entries() {
            let resets = info.reset_only().contains(longhand)
                && db.initial_value(longhand) == Some(value);
            if resets {
                self.reset_to_initial(longhand, important);
            } else {
                self.set_longhand(longhand, value.clone(), important);
            }
        }

        // STEP 3: Record the assignment.
        let owned: OwnedLonghands = info.all_longhands().map(str::to_string).collect();
        self.ledger.record(
            name,
            &units_to_text(units, false),
            &units_to_text(units, true),
            important,
            owned,
            expansion.is_nonmixed(),
        );

        log::debug!(
            target: "sheaf::declaration",
            "{name}: committed {} longhands{}",
            expansion.entries().len(),
            if expansion.is_pending() { " (pending var())" } else { "" }
        );
    }

    // =======================================================================
    // Reading
    // =======================================================================

    /// [CSSOM § 6.6.1 getPropertyValue()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// The value of a longhand or custom property, or for a shorthand a
    /// [`StyleValue::Shorthand`] rebuilt from its longhands.
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<StyleValue> {
        let name = normalize_name(name);
        let db = ShorthandDatabase::global();
        let Some(info) = db.shorthand(&name) else {
            return self.entry(&name).map(|entry| entry.value.clone());
        };
        let important = self.declared(info.longhands().first()?)?.important;
        let source_text = self.shorthand_text(info, important, false)?;
        let minified_text = self.shorthand_text(info, important, true)?;
        Some(StyleValue::Shorthand(ShorthandValue {
            shorthand: name,
            source_text,
            minified_text,
            important,
            owned: info.all_longhands().map(str::to_string).collect(),
        }))
    }

    /// [CSSOM § 6.6.1 getPropertyPriority()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertypriority)
    ///
    /// Whether the property is `!important`. A shorthand is important when
    /// all of its longhands are.
    #[must_use]
    pub fn property_priority(&self, name: &str) -> bool {
        let name = normalize_name(name);
        let db = ShorthandDatabase::global();
        match db.shorthand(&name) {
            Some(info) => info
                .longhands()
                .iter()
                .all(|longhand| self.entry(longhand).is_some_and(|entry| entry.important)),
            None => self.entry(&name).is_some_and(|entry| entry.important),
        }
    }

    /// [CSSOM § 6.6.1 removeProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-removeproperty)
    ///
    /// Remove a property (for a shorthand, all of its longhands) and return
    /// the text it had.
    pub fn remove_property(&mut self, name: &str) -> String {
        let name = normalize_name(name);
        let previous = self
            .property_value(&name)
            .map(|value| value.css_text())
            .unwrap_or_default();
        let db = ShorthandDatabase::global();
        if let Some(info) = db.shorthand(&name) {
            let removed: Vec<&str> = info.all_longhands().collect();
            self.entries
                .retain(|entry| !removed.contains(&entry.name.as_str()));
            for longhand in removed {
                self.ledger.forget_longhand(longhand);
            }
            let _ = self.ledger.drop(&name);
        } else {
            self.entries.retain(|entry| entry.name != name);
            self.ledger.forget_longhand(&name);
        }
        self.ledger.remove_compat(&name);
        previous
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// [CSSOM § 6.6.1 item()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-item)
    ///
    /// Name of the property at `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.name.as_str())
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ledger.clear();
    }

    // =======================================================================
    // Serialization
    // =======================================================================

    /// [CSSOM § 6.6.1 cssText](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    #[must_use]
    pub fn css_text(&self) -> String {
        self.serialize(false)
    }

    /// Like [`Self::css_text`] without optional whitespace.
    #[must_use]
    pub fn minified_css_text(&self) -> String {
        self.serialize(true)
    }

    /// [CSSOM § 6.6.1.1](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
    ///
    /// "To serialize a CSS declaration block declaration block means to
    /// run the steps below:
    ///  1. Let list be an empty array.
    ///  2. Let already serialized be an empty array.
    ///  3. Declaration loop: For each CSS declaration declaration in
    ///     declaration block's declarations ..."
    fn serialize(&self, minified: bool) -> String {
        let db = ShorthandDatabase::global();
        let mut list: Vec<String> = Vec::new();
        let mut done: HashSet<&str> = HashSet::new();

        'declarations: for entry in &self.entries {
            let property = entry.name.as_str();
            if done.contains(property) {
                continue;
            }

            // RULE: A var() shorthand that still owns some of its longhands
            // is written as recorded, ahead of the longhands set since.
            if let Some(record) = self.waiting_record(property) {
                let value = &record.value;
                let text = if minified {
                    &value.minified_text
                } else {
                    &value.source_text
                };
                list.push(declaration_text(&value.shorthand, text, value.important, minified));
                for longhand in &value.owned {
                    if self.is_waiting_on(longhand, &value.shorthand) {
                        let _ = done.insert(longhand.as_str());
                    }
                }
                if done.contains(property) {
                    continue;
                }
            }

            // STEP 3.3: Shorthand loop, in priority order.
            for &name in db.shorthands_containing(property) {
                let Some(info) = db.shorthand(name) else {
                    continue;
                };
                if info.longhands().iter().any(|longhand| done.contains(longhand)) {
                    continue;
                }
                let Some(text) = self.shorthand_text(info, entry.important, minified) else {
                    continue;
                };
                list.push(declaration_text(name, &text, entry.important, minified));
                for longhand in info.all_longhands() {
                    if self.entry(longhand).is_some() {
                        let _ = done.insert(longhand);
                    }
                }
                continue 'declarations;
            }

            let _ = done.insert(property);
            // A longhand still waiting on its shorthand's var() has no
            // text of its own.
            if matches!(&entry.value, StyleValue::Pending(pending) if pending.shorthand.is_some())
            {
                continue;
            }
            let text = if minified {
                entry.value.minified_text()
            } else {
                entry.value.css_text()
            };
            list.push(declaration_text(property, &text, entry.important, minified));
        }

        // RULE: hack values come after every standard declaration.
        for compat in self.ledger.compat_entries() {
            list.push(declaration_text(&compat.property, &compat.value.raw, false, minified));
        }

        list.join(if minified { ";" } else { " " })
    }

    /// Shorthand text for the declared longhands: the builder's output, or
    /// the recorded text while every longhand waits on its `var()`.
    fn shorthand_text(
        &self,
        info: &'static ShorthandInfo,
        important: bool,
        minified: bool,
    ) -> Option<String> {
        let name = info.name();
        if self.is_pending_unit(info, important) {
            let record = self.ledger.get(name)?;
            return Some(if minified {
                record.value.minified_text.clone()
            } else {
                record.value.source_text.clone()
            });
        }
        let options = RecomposeOptions {
            important,
            minified,
            nonmixed: self.ledger.is_nonmixed(name),
        };
        shorthand::recompose(info, self, options)
    }

    /// Whether `longhand` still holds the pending value of `shorthand`.
    fn is_waiting_on(&self, longhand: &str, shorthand: &str) -> bool {
        self.entry(longhand).is_some_and(|entry| {
            matches!(&entry.value, StyleValue::Pending(pending)
                if pending.shorthand.as_deref() == Some(shorthand))
        })
    }

    /// The ledger record of a shorthand containing `longhand` whose
    /// `var()` value some owned longhand still waits on.
    fn waiting_record(&self, longhand: &str) -> Option<&ShorthandRecord> {
        ShorthandDatabase::global()
            .shorthands_containing(longhand)
            .iter()
            .filter_map(|shorthand| self.ledger.get(shorthand))
            .find(|record| {
                record
                    .value
                    .owned
                    .iter()
                    .any(|owned| self.is_waiting_on(owned, &record.value.shorthand))
            })
    }

    /// Whether all longhands of `info` still hold the pending value of one
    /// live assignment to it.
    fn is_pending_unit(&self, info: &'static ShorthandInfo, important: bool) -> bool {
        let all: Vec<&str> = info.all_longhands().collect();
        let Some(record) = self.ledger.get(info.name()) else {
            return false;
        };
        record.value.important == important
            && self.ledger.is_substitutable(info.name(), &all)
            && all.iter().all(|longhand| {
                self.entry(longhand)
                    .is_some_and(|entry| entry.important == important)
                    && self.is_waiting_on(longhand, info.name())
            })
    }

    // =======================================================================
    // var() substitution
    // =======================================================================

    /// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
    ///
    /// Substitute `var()` in every pending value and commit the result.
    /// Custom properties declared here take precedence over
    /// `custom_properties`. Returns how many properties were resolved;
    /// values that still cannot be substituted stay pending.
    #[allow(clippy::implicit_hasher)]
    pub fn resolve_variables(&mut self, custom_properties: &HashMap<String, String>) -> usize {
        let mut variables: HashMap<String, Vec<LexicalUnit>> = HashMap::new();
        for entry in &self.entries {
            if is_custom_property(&entry.name)
                && let Ok(units) = lex_value(&entry.value.css_text())
            {
                let _ = variables.insert(entry.name.clone(), units);
            }
        }
        for (name, text) in custom_properties {
            if let Ok(units) = lex_value(text) {
                let _ = variables.entry(name.clone()).or_insert(units);
            }
        }

        // STEP 1: Collect the pending work before changing anything.
        let mut work: Vec<PendingWork> = Vec::new();
        for entry in &self.entries {
            let StyleValue::Pending(pending) = &entry.value else {
                continue;
            };
            let item = match &pending.shorthand {
                Some(shorthand) if work.iter().any(|w| w.from_shorthand && w.name == *shorthand) => {
                    continue;
                }
                Some(shorthand) => PendingWork {
                    name: shorthand.clone(),
                    from_shorthand: true,
                    raw: pending.raw.clone(),
                    important: entry.important,
                },
                None => PendingWork {
                    name: entry.name.clone(),
                    from_shorthand: false,
                    raw: pending.raw.clone(),
                    important: entry.important,
                },
            };
            work.push(item);
        }

        // STEP 2: Substitute and commit.
        let mut resolved = 0;
        for item in work {
            let substituted = lex_value(&item.raw)
                .ok()
                .and_then(|units| substitute_var(&units, &variables, 0));
            let Some(units) = substituted else {
                let _ = warn_once(
                    "var",
                    &format!("{}: cannot substitute var() in '{}'", item.name, item.raw),
                );
                continue;
            };
            let outcome = if item.from_shorthand {
                self.resolve_shorthand(&item.name, &units, item.important)
            } else {
                self.resolve_longhand(&item.name, &units, item.important)
            };
            match outcome {
                Ok(()) => resolved += 1,
                Err(DeclarationError::Shorthand(_)) => {}
                Err(error) => {
                    let _ = warn_once("var", &format!("{}: {error}", item.name));
                }
            }
        }
        resolved
    }

    fn resolve_longhand(
        &mut self,
        name: &str,
        units: &[LexicalUnit],
        important: bool,
    ) -> Result<(), DeclarationError> {
        let value = value_from_units(units, false)?;
        self.set_longhand(name, value, important);
        Ok(())
    }

    /// Decompose the substituted value and commit it to the longhands that
    /// still wait on this shorthand.
    fn resolve_shorthand(
        &mut self,
        name: &str,
        units: &[LexicalUnit],
        important: bool,
    ) -> Result<(), DeclarationError> {
        let db = ShorthandDatabase::global();
        let info = db
            .shorthand(name)
            .ok_or_else(|| DeclarationError::UnknownProperty(name.to_string()))?;
        let expansion = match shorthand::decompose(info, units) {
            Ok(expansion) => expansion,
            Err(error) => {
                self.error_sink.report(&error);
                return Err(error.into());
            }
        };
        for (longhand, value) in expansion.entries() {
            let waiting = matches!(
                self.longhand(longhand),
                Some(StyleValue::Pending(pending)) if pending.shorthand.as_deref() == Some(name)
            );
            if waiting {
                self.set_longhand(longhand, value.clone(), important);
            }
        }
        if let Some(record) = self.ledger.get(name).cloned() {
            self.ledger.record(
                name,
                &units_to_text(units, false),
                &units_to_text(units, true),
                record.value.important,
                record.value.owned,
                expansion.is_nonmixed(),
            );
        }
        Ok(())
    }
}

/// A pending value waiting for substitution.
struct PendingWork {
    /// Longhand, or the shorthand the raw text belongs to.
    name: String,
    from_shorthand: bool,
    raw: String,
    important: bool,
}

fn declaration_text(name: &str, value: &str, important: bool, minified: bool) -> String {
    match (minified, important) {
        (false, false) => format!("{name}: {value};"),
        (false, true) => format!("{name}: {value} !important;"),
        (true, false) => format!("{name}:{value}"),
        (true, true) => format!("{name}:{value}!important"),
    }
}

impl DeclarationSink for StyleDeclaration {
    fn set_longhand(&mut self, longhand: &str, value: StyleValue, important: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == longhand) {
            entry.value = value;
            entry.important = important;
        } else {
            self.entries.push(DeclarationEntry {
                name: longhand.to_string(),
                value,
                important,
            });
        }
    }

    fn longhand(&self, longhand: &str) -> Option<&StyleValue> {
        self.entry(longhand).map(|entry| &entry.value)
    }

    fn reset_to_initial(&mut self, longhand: &str, important: bool) {
        let initial = ShorthandDatabase::global()
            .initial_value(longhand)
            .cloned()
            .unwrap_or_else(|| StyleValue::keyword(CssWideKeyword::Initial, true));
        self.set_longhand(longhand, initial, important);
    }

    fn remove_ownership(&mut self, shorthand: &str, longhand: &str) {
        self.ledger.remove_ownership(shorthand, longhand);
    }
}

impl LonghandSource for StyleDeclaration {
    fn declared(&self, longhand: &str) -> Option<Declared<'_>> {
        self.entry(longhand).map(|entry| Declared {
            value: &entry.value,
            important: entry.important,
        })
    }
}
