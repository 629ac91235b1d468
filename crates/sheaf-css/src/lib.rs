//! Shorthand-aware CSS style declarations.
//!
//! # Scope
//!
//! This crate implements:
//! - **Value lexer** ([CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/))
//!   - Declaration values as flat [`LexicalUnit`] slices
//!   - Declaration-list reading with `!important` and browser-hack markers
//!
//! - **Value model** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Keywords, typed values, space and comma lists
//!   - Pending-substitution and verbatim markers
//!
//! - **Shorthand database** ([CSS Cascading Level 4 § 2.2](https://www.w3.org/TR/css-cascade-4/#shorthand))
//!   - Longhands, reset-only longhands, initial values and accepted kinds
//!   - Serialization priority order
//!
//! - **Shorthand engine**
//!   - Decomposers for every shorthand family
//!   - Builders that rebuild the shortest shorthand text or decline
//!
//! - **Style declarations** ([CSSOM § 6.6](https://drafts.csswg.org/cssom/#css-declaration-blocks))
//!   - Ownership ledger and priority-compat values
//!   - `var()` substitution of pending values
//!
//! # Not Yet Implemented
//!
//! - Full grammar validation of longhand values
//! - Selectors, rules and the cascade

/// Shorthand and longhand tables.
pub mod database;
/// Style declaration blocks.
pub mod declaration;
/// Shorthand errors and error sinks.
pub mod errors;
/// Value lexer and declaration-list reader.
pub mod lexical;
/// Shorthand decomposition and recomposition.
pub mod shorthand;
/// `var()` substitution per [CSS Variables Level 1](https://www.w3.org/TR/css-variables-1/).
pub mod substitute;
/// CSS value model.
pub mod value;

// Re-exports for convenience
pub use database::{ShorthandDatabase, ShorthandInfo};
pub use declaration::{DeclarationError, DeclarationSink, Ledger, StyleDeclaration};
pub use errors::{CollectingErrorSink, ErrorSink, LogErrorSink, Report, ShorthandError};
pub use lexical::{LexError, LexicalUnit, lex_value, parse_declaration_list};
pub use shorthand::{
    Declared, Expansion, LonghandSource, RecomposeOptions, ShorthandKind, decompose, recompose,
};
pub use value::{CssWideKeyword, Separator, StyleValue, TypedValue, create_value};
