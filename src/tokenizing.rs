//! Tokenizer
//!
//! This module converts raw text into an ordered sequence of named tokens.
//!
//! Structure:
//!     A [Tokenizer] holds a list of [TokenDefinition]s, each pairing a token
//! name with a regex pattern. Matching is always anchored at the current
//! position; the tokenizer advances one maximal lexical unit at a time and
//! skips a configurable cutset of blank characters (spaces and tabs by
//! default) between units.
//!
//! Definition precedence:
//!     When several definitions could match at the same position, the one
//! whose *declared pattern string* is longer wins, not the one producing the
//! longer match. This is a compatibility-bearing tie-break: reorderings that
//! look equivalent under maximal-munch lexing are observable here. The
//! ordering is fixed once when the tokenizer is built; ties keep declaration
//! order.

pub mod definition;
pub mod token;
pub mod tokenizer;

pub use definition::TokenDefinition;
pub use token::Token;
pub use tokenizer::{TokenizeError, Tokenizer};
