//! # redex
//!
//! A small generic grammar toolkit: a regex-driven tokenizer plus a bottom-up,
//! priority-ordered rule-reduction engine that folds a token stream into a
//! single semantic value through user-supplied grammar rules.
//!
//! ## Pipeline
//!
//! 1. **Tokenizing**: raw text is split into named tokens by anchored regex
//!    definitions ([tokenizing])
//! 2. **Reduction**: the token stream is repeatedly rewritten by the
//!    highest-priority applicable rule until one root token remains ([parsing])
//!
//! The [grammars] module hosts two complete grammars built on the engine: an
//! arithmetic expression evaluator and a protobuf-debug-text to JSON converter.

pub mod grammars;
pub mod parsing;
pub mod tokenizing;

pub use parsing::{GrammarRule, ParseError, ParseOptions, Parser, ParserToken};
pub use tokenizing::{Token, TokenDefinition, TokenizeError, Tokenizer};
