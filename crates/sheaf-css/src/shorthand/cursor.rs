//! Forward-only cursor over a lexed value.

use crate::lexical::LexicalUnit;

/// Walk position over a shorthand's lexical units.
///
/// The cursor only moves forward. Grammar alternatives are tried by
/// peeking, and a unit is consumed once a rule commits to it.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    units: &'a [LexicalUnit],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Start at the first unit.
    #[must_use]
    pub const fn new(units: &'a [LexicalUnit]) -> Self {
        Self { units, position: 0 }
    }

    /// The next unit, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a LexicalUnit> {
        self.units.get(self.position)
    }

    /// The unit `offset` places after the next one.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<&'a LexicalUnit> {
        self.units.get(self.position + offset)
    }

    /// Consume and return the next unit.
    pub fn advance(&mut self) -> Option<&'a LexicalUnit> {
        let unit = self.units.get(self.position)?;
        self.position += 1;
        Some(unit)
    }

    /// Consume the next unit if `accept` says yes.
    pub fn advance_if(&mut self, accept: impl FnOnce(&LexicalUnit) -> bool) -> Option<&'a LexicalUnit> {
        match self.peek() {
            Some(unit) if accept(unit) => self.advance(),
            _ => None,
        }
    }

    /// Consume the identifier `keyword` if it is next.
    pub fn advance_ident(&mut self, keyword: &str) -> bool {
        self.advance_if(|unit| unit.is_ident(keyword)).is_some()
    }

    /// Consume a `/` if it is next.
    pub fn advance_slash(&mut self) -> bool {
        self.advance_if(|unit| *unit == LexicalUnit::Slash).is_some()
    }

    /// Whether every unit has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.position >= self.units.len()
    }

    /// Units not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &'a [LexicalUnit] {
        self.units.get(self.position..).unwrap_or_default()
    }
}

/// Split units at top-level commas.
#[must_use]
pub fn split_layers(units: &[LexicalUnit]) -> Vec<&[LexicalUnit]> {
    units.split(|unit| *unit == LexicalUnit::Comma).collect()
}

/// Split units at top-level slashes.
#[must_use]
pub fn split_slashes(units: &[LexicalUnit]) -> Vec<&[LexicalUnit]> {
    units.split(|unit| *unit == LexicalUnit::Slash).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::lex_value;

    #[test]
    fn test_cursor_peek_and_advance() {
        let units = lex_value("1px solid / red").unwrap();
        let mut cursor = Cursor::new(&units);
        assert_eq!(cursor.peek(), Some(&LexicalUnit::Dimension { value: 1.0, unit: "px".to_string() }));
        assert!(cursor.advance().is_some());
        assert!(!cursor.advance_ident("dotted"));
        assert!(cursor.advance_ident("SOLID"));
        assert!(cursor.advance_slash());
        assert_eq!(cursor.remaining().len(), 1);
        assert!(cursor.advance().is_some());
        assert!(cursor.is_exhausted());
        assert!(cursor.advance().is_none());
    }

    #[test]
    fn test_split_layers() {
        let units = lex_value("a 1s, b").unwrap();
        let layers = split_layers(&units);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].len(), 2);
    }
}
