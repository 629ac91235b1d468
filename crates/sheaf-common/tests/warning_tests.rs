//! Tests for the de-duplicated warning sink.
//!
//! The warning set is process-global, so everything lives in one test.

use sheaf_common::warning::{clear_warnings, warn_once, warning_count};

#[test]
fn test_warn_once_deduplicates_until_cleared() {
    clear_warnings();
    assert!(warn_once("test", "first message"));
    assert!(!warn_once("test", "first message"));
    assert!(warn_once("other", "first message"));
    assert_eq!(warning_count(), 2);

    clear_warnings();
    assert_eq!(warning_count(), 0);
    assert!(warn_once("test", "first message"));
}
