//! Common utilities for the sheaf crates.
//!
//! This crate provides shared infrastructure used by the CSS engine and the CLI:
//! - **Warning System** - de-duplicated diagnostics routed through the `log` facade

pub mod warning;
