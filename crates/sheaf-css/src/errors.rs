//! Shorthand errors and the error-sink seam.
//!
//! Decomposition failures are reported to the declaration's [`ErrorSink`]
//! and returned to the caller. Builders never report: declining to build a
//! shorthand is an expected outcome, not an error.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use sheaf_common::warning::warn_once;
use thiserror::Error;

use crate::lexical::LexicalUnit;

/// Why a shorthand value could not be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
    /// A token fits none of the remaining grammar alternatives.
    #[error("{shorthand}: unexpected '{token}'")]
    GrammarMismatch {
        /// Shorthand being decomposed.
        shorthand: String,
        /// Text of the offending token (empty at end of input).
        token: String,
    },
    /// Too many or too few values.
    #[error("{shorthand}: wrong number of values ({count})")]
    WrongValueCount {
        /// Shorthand being decomposed.
        shorthand: String,
        /// Number of values found.
        count: usize,
    },
    /// A CSS-wide keyword combined with other values.
    #[error("{shorthand}: '{keyword}' must be the only value")]
    IllegalKeywordMix {
        /// Shorthand being decomposed.
        shorthand: String,
        /// The keyword.
        keyword: String,
    },
    /// A comma list where the grammar has none, or layers that do not line up.
    #[error("{shorthand}: {detail}")]
    UnsupportedListShape {
        /// Shorthand being decomposed.
        shorthand: String,
        /// What was wrong with the list.
        detail: String,
    },
    /// The value contains an unresolved `var()`.
    #[error("{shorthand}: value depends on an unresolved var()")]
    PendingSubstitution {
        /// Shorthand being decomposed.
        shorthand: String,
    },
}

impl ShorthandError {
    /// Name of the shorthand the error is about.
    #[must_use]
    pub fn shorthand(&self) -> &str {
        match self {
            Self::GrammarMismatch { shorthand, .. }
            | Self::WrongValueCount { shorthand, .. }
            | Self::IllegalKeywordMix { shorthand, .. }
            | Self::UnsupportedListShape { shorthand, .. }
            | Self::PendingSubstitution { shorthand } => shorthand,
        }
    }

    pub(crate) fn mismatch(shorthand: &str, token: Option<&LexicalUnit>) -> Self {
        Self::GrammarMismatch {
            shorthand: shorthand.to_string(),
            token: token.map(ToString::to_string).unwrap_or_default(),
        }
    }

    pub(crate) fn count(shorthand: &str, count: usize) -> Self {
        Self::WrongValueCount {
            shorthand: shorthand.to_string(),
            count,
        }
    }

    pub(crate) fn keyword_mix(shorthand: &str, keyword: &str) -> Self {
        Self::IllegalKeywordMix {
            shorthand: shorthand.to_string(),
            keyword: keyword.to_string(),
        }
    }

    pub(crate) fn list_shape(shorthand: &str, detail: impl Into<String>) -> Self {
        Self::UnsupportedListShape {
            shorthand: shorthand.to_string(),
            detail: detail.into(),
        }
    }
}

/// Receiver of decomposition errors.
pub trait ErrorSink {
    /// A shorthand value was rejected.
    fn report_shorthand_error(&mut self, shorthand: &str, message: &str);

    /// A shorthand had the wrong number of values.
    fn report_wrong_value_count(&mut self, shorthand: &str, count: usize);

    /// Dispatch an error to the matching report method.
    fn report(&mut self, error: &ShorthandError) {
        match error {
            ShorthandError::WrongValueCount { shorthand, count } => {
                self.report_wrong_value_count(shorthand, *count);
            }
            other => self.report_shorthand_error(other.shorthand(), &other.to_string()),
        }
    }
}

/// Default sink: de-duplicated warnings through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report_shorthand_error(&mut self, _shorthand: &str, message: &str) {
        let _ = warn_once("shorthand", message);
    }

    fn report_wrong_value_count(&mut self, shorthand: &str, count: usize) {
        let _ = warn_once(
            "shorthand",
            &format!("{shorthand}: wrong number of values ({count})"),
        );
    }
}

/// One report received by a [`CollectingErrorSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Report {
    /// From [`ErrorSink::report_shorthand_error`].
    Shorthand {
        /// Shorthand name.
        shorthand: String,
        /// Message.
        message: String,
    },
    /// From [`ErrorSink::report_wrong_value_count`].
    WrongValueCount {
        /// Shorthand name.
        shorthand: String,
        /// Number of values found.
        count: usize,
    },
}

/// Sink that keeps every report. Clones share the same report list, so a
/// caller can keep one clone and hand the other to a declaration.
#[derive(Debug, Default, Clone)]
pub struct CollectingErrorSink {
    reports: Rc<RefCell<Vec<Report>>>,
}

impl CollectingErrorSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }
}

impl ErrorSink for CollectingErrorSink {
    fn report_shorthand_error(&mut self, shorthand: &str, message: &str) {
        self.reports.borrow_mut().push(Report::Shorthand {
            shorthand: shorthand.to_string(),
            message: message.to_string(),
        });
    }

    fn report_wrong_value_count(&mut self, shorthand: &str, count: usize) {
        self.reports.borrow_mut().push(Report::WrongValueCount {
            shorthand: shorthand.to_string(),
            count,
        });
    }
}
