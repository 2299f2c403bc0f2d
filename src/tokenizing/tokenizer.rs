//! The tokenizer: ordered definitions plus the scanning loop.

use crate::tokenizing::definition::TokenDefinition;
use crate::tokenizing::token::Token;
use std::fmt;

/// Errors produced while building definitions or scanning input.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizeError {
    /// A definition's regex pattern failed to compile.
    InvalidPattern { pattern: String, message: String },
    /// No definition matched at the current position; carries the unmatched
    /// remainder for diagnostics.
    NoMatch { remainder: String },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::InvalidPattern { pattern, message } => {
                write!(f, "invalid token pattern {:?}: {}", pattern, message)
            }
            TokenizeError::NoMatch { remainder } => {
                write!(f, "no token definition matched at: {:?}", remainder)
            }
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Converts raw text into an ordered token sequence.
///
/// Definitions are ordered once, when the tokenizer is built: by character
/// length of the declared pattern string, descending, ties keeping declaration
/// order. The length of the *pattern text* decides precedence even when a
/// shorter-pattern definition would consume more characters of a particular
/// input; see the module documentation.
///
/// A built tokenizer is immutable apart from the whitespace knobs, and
/// [tokenize](Tokenizer::tokenize) takes `&self`, so one instance can be
/// shared freely between threads.
pub struct Tokenizer {
    definitions: Vec<TokenDefinition>,
    ignore_spaces: bool,
    ignore_tabs: bool,
}

impl Tokenizer {
    /// Build a tokenizer from a list of definitions.
    ///
    /// Declaration order carries no meaning of its own; it only breaks ties
    /// between definitions whose pattern strings have the same length.
    pub fn new(mut definitions: Vec<TokenDefinition>) -> Self {
        definitions.sort_by(|left, right| {
            right.pattern().len().cmp(&left.pattern().len())
        });
        Self {
            definitions,
            ignore_spaces: true,
            ignore_tabs: true,
        }
    }

    /// Whether spaces are skipped between tokens (default true).
    pub fn set_ignore_spaces(&mut self, value: bool) {
        self.ignore_spaces = value;
    }

    /// Whether tabs are skipped between tokens (default true).
    pub fn set_ignore_tabs(&mut self, value: bool) {
        self.ignore_tabs = value;
    }

    /// The definitions in precedence order.
    pub fn definitions(&self) -> &[TokenDefinition] {
        &self.definitions
    }

    /// Find the token at the start of `remaining`.
    ///
    /// Scans definitions in precedence order; the first one producing a
    /// non-empty anchored match wins.
    pub fn find(&self, remaining: &str) -> Result<Token, TokenizeError> {
        for definition in &self.definitions {
            if let Some(value) = definition.find(remaining) {
                return Ok(Token::new(definition.name(), value));
            }
        }
        Err(TokenizeError::NoMatch {
            remainder: remaining.to_string(),
        })
    }

    /// Tokenize the whole input, or return the first error encountered.
    ///
    /// Between tokens the configured cutset (spaces and/or tabs) is trimmed;
    /// input that trims away completely ends the scan. Newlines and every
    /// other character class are ordinary input unless a definition claims
    /// them.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();
        let mut rest = input;
        loop {
            rest = rest.trim_start_matches(|c: char| {
                (self.ignore_spaces && c == ' ') || (self.ignore_tabs && c == '\t')
            });
            if rest.is_empty() {
                break;
            }
            let token = self.find(rest)?;
            rest = &rest[token.value().len()..];
            tokens.push(token);
        }
        Ok(tokens)
    }
}
