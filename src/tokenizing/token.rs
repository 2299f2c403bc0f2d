//! Lexical tokens produced by the tokenizer.

use serde::Serialize;
use std::fmt;
use std::num::ParseIntError;

/// A lexical token: a category name plus the raw matched substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    name: String,
    value: String,
}

impl Token {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The category name of the definition that produced this token.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw matched substring.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parse the raw value as an integer.
    pub fn value_int(&self) -> Result<i64, ParseIntError> {
        self.value.parse()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_int() {
        assert_eq!(Token::new("NUMBER", "42").value_int().unwrap(), 42);
        assert!(Token::new("WORD", "forty-two").value_int().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::new("NUMBER", "42").to_string(), "NUMBER(\"42\")");
    }
}
