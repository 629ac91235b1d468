//! De-duplicated warnings for rejected or unsupported CSS input.
//!
//! A stylesheet often repeats the same mistake many times (the same bad
//! shorthand in every rule). Each distinct message is logged once per
//! process until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning once per unique `(component, message)` pair.
///
/// The warning is logged under the target `sheaf::<component>`, so
/// `RUST_LOG=sheaf::shorthand=off` silences one component without touching
/// the others.
///
/// Returns `true` when the warning was emitted, `false` when it was a repeat.
///
/// # Example
/// ```
/// use sheaf_common::warning::warn_once;
///
/// let _ = warn_once("shorthand", "unexpected token 'foo' in margin");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: &format!("sheaf::{component}"), "{message}");
    }
    should_log
}

/// Clear all recorded warnings (call when starting on a new style sheet)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings emitted since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    use log::{LevelFilter, Log, Metadata, Record};

    struct CapturingLogger;

    static CAPTURED: Mutex<Vec<(String, String)>> = Mutex::new(Vec::new());

    impl Log for CapturingLogger {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            CAPTURED
                .lock()
                .unwrap()
                .push((record.target().to_string(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger;

    #[test]
    fn test_warning_is_logged_once_under_component_target() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);

        assert!(warn_once("target-check", "bad value 'x'"));
        assert!(!warn_once("target-check", "bad value 'x'"));

        let captured: Vec<_> = CAPTURED
            .lock()
            .unwrap()
            .iter()
            .filter(|(target, _)| target == "sheaf::target-check")
            .cloned()
            .collect();
        assert_eq!(
            captured,
            vec![("sheaf::target-check".to_string(), "bad value 'x'".to_string())]
        );
    }
}
