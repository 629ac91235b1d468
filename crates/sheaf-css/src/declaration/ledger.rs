//! Shorthand ownership and priority-compat bookkeeping.
//!
//! [CSSOM § 6.6.1](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
//!
//! A shorthand assignment leaves a record naming the longhands it still
//! owns. While a record owns every longhand of its shorthand, the text the
//! author wrote can be serialized back as a unit; a later independent
//! longhand assignment takes that longhand away.

use crate::value::{OwnedLonghands, ShorthandValue, UnknownValue};

/// What the ledger remembers about one shorthand assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandRecord {
    /// The shorthand as written, with the longhands it still owns.
    pub value: ShorthandValue,
    /// `false` when a box shorthand mixed CSS-wide keywords with values.
    pub nonmixed: bool,
}

/// A browser-hack declaration kept verbatim beside the standard ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatEntry {
    /// Property name.
    pub property: String,
    /// The value text.
    pub value: UnknownValue,
}

/// Ownership records and the priority-compat side table.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<ShorthandRecord>,
    compat: Vec<CompatEntry>,
}

impl Ledger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a shorthand assignment, replacing any earlier record for the
    /// same shorthand.
    pub fn record(
        &mut self,
        shorthand: &str,
        source_text: &str,
        minified_text: &str,
        important: bool,
        owned: OwnedLonghands,
        nonmixed: bool,
    ) {
        let record = ShorthandRecord {
            value: ShorthandValue {
                shorthand: shorthand.to_string(),
                source_text: source_text.to_string(),
                minified_text: minified_text.to_string(),
                important,
                owned,
            },
            nonmixed,
        };
        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|existing| existing.value.shorthand == shorthand)
        {
            *existing = record;
        } else {
            self.records.push(record);
        }
    }

    /// An independent assignment to `longhand`: no shorthand owns it any
    /// longer. Records left owning nothing are dropped.
    pub fn forget_longhand(&mut self, longhand: &str) {
        for record in &mut self.records {
            record.value.owned.retain(|owned| owned != longhand);
        }
        self.records.retain(|record| !record.value.owned.is_empty());
    }

    /// Take `longhand` away from one shorthand's record.
    pub fn remove_ownership(&mut self, shorthand: &str, longhand: &str) {
        if let Some(record) = self.record_mut(shorthand) {
            record.value.owned.retain(|owned| owned != longhand);
        }
        self.records.retain(|record| !record.value.owned.is_empty());
    }

    /// Forget the record for `shorthand`. Returns whether there was one.
    pub fn drop(&mut self, shorthand: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.value.shorthand != shorthand);
        self.records.len() != before
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.records.clear();
        self.compat.clear();
    }

    /// The record for `shorthand`.
    #[must_use]
    pub fn get(&self, shorthand: &str) -> Option<&ShorthandRecord> {
        self.records
            .iter()
            .find(|record| record.value.shorthand == shorthand)
    }

    fn record_mut(&mut self, shorthand: &str) -> Option<&mut ShorthandRecord> {
        self.records
            .iter_mut()
            .find(|record| record.value.shorthand == shorthand)
    }

    /// Whether the recorded text of `shorthand` still stands for all of
    /// `all_longhands`.
    #[must_use]
    pub fn is_substitutable(&self, shorthand: &str, all_longhands: &[&str]) -> bool {
        self.get(shorthand).is_some_and(|record| {
            all_longhands
                .iter()
                .all(|longhand| record.value.owned.iter().any(|owned| owned == longhand))
        })
    }

    /// The nonmixed flag of the last assignment to `shorthand`; `true`
    /// when there is no record.
    #[must_use]
    pub fn is_nonmixed(&self, shorthand: &str) -> bool {
        self.get(shorthand).is_none_or(|record| record.nonmixed)
    }

    // =======================================================================
    // Priority compat
    // =======================================================================

    /// Keep a browser-hack value for `property`, replacing an earlier one.
    pub fn record_compat(&mut self, property: &str, raw: &str) {
        let value = UnknownValue {
            raw: raw.to_string(),
            priority_compat: true,
        };
        if let Some(entry) = self
            .compat
            .iter_mut()
            .find(|entry| entry.property == property)
        {
            entry.value = value;
        } else {
            self.compat.push(CompatEntry {
                property: property.to_string(),
                value,
            });
        }
    }

    /// Forget the compat value of `property`.
    pub fn remove_compat(&mut self, property: &str) {
        self.compat.retain(|entry| entry.property != property);
    }

    /// Compat values in the order they were first recorded.
    #[must_use]
    pub fn compat_entries(&self) -> &[CompatEntry] {
        &self.compat
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn ledger_with_margin() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.record(
            "margin",
            "1px 2px",
            "1px 2px",
            false,
            smallvec![
                "margin-top".to_string(),
                "margin-right".to_string(),
                "margin-bottom".to_string(),
                "margin-left".to_string(),
            ],
            true,
        );
        ledger
    }

    const MARGIN: [&str; 4] = ["margin-top", "margin-right", "margin-bottom", "margin-left"];

    #[test]
    fn test_forget_longhand_breaks_substitution() {
        let mut ledger = ledger_with_margin();
        assert!(ledger.is_substitutable("margin", &MARGIN));
        ledger.forget_longhand("margin-left");
        assert!(!ledger.is_substitutable("margin", &MARGIN));
        assert_eq!(ledger.get("margin").map(|r| r.value.owned.len()), Some(3));
    }

    #[test]
    fn test_record_dropped_when_nothing_owned() {
        let mut ledger = ledger_with_margin();
        for longhand in MARGIN {
            ledger.remove_ownership("margin", longhand);
        }
        assert!(ledger.get("margin").is_none());
        assert!(!ledger.drop("margin"));
    }

    #[test]
    fn test_compat_replaces_in_place() {
        let mut ledger = Ledger::new();
        ledger.record_compat("color", "red\\9");
        ledger.record_compat("width", "1px");
        ledger.record_compat("color", "blue\\9");
        let properties: Vec<_> = ledger
            .compat_entries()
            .iter()
            .map(|entry| (entry.property.as_str(), entry.value.raw.as_str()))
            .collect();
        assert_eq!(properties, [("color", "blue\\9"), ("width", "1px")]);
    }
}
