//! Lexical layer: value lexer, lexical units, and the declaration-list reader.
//!
//! [§ 2 Description of CSS's Syntax](https://www.w3.org/TR/css-syntax-3/#syntax-description)
//!
//! The shorthand engine never looks at raw text. A declaration value is
//! lexed once into a flat slice of [`LexicalUnit`]s and every decomposer
//! walks that slice with a [`Cursor`](crate::shorthand::cursor::Cursor).

mod lexer;
mod reader;
mod unit;

pub use lexer::{LexError, ValueLexer, lex_value};
pub use reader::{RawDeclaration, parse_declaration_list, split_priority};
pub use unit::{LexicalUnit, format_number, units_to_text};
