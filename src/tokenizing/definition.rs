//! Named lexical patterns used by the tokenizer.

use crate::tokenizing::tokenizer::TokenizeError;
use regex::Regex;
use std::fmt;

/// A named lexical pattern.
///
/// The pattern is compiled anchored (`^(?:pattern)`) so it can only ever match
/// at the start of the remaining input. The declared pattern text, without the
/// anchor, is what the tokenizer sorts definitions by.
#[derive(Debug, Clone)]
pub struct TokenDefinition {
    name: String,
    pattern: String,
    regex: Regex,
}

impl TokenDefinition {
    /// Create a definition from a token name and a regex pattern.
    ///
    /// Fails with [TokenizeError::InvalidPattern] if the pattern does not
    /// compile. The pattern is wrapped in a non-capturing group before
    /// anchoring so alternations stay anchored as a unit.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<Self, TokenizeError> {
        let name = name.into();
        let pattern = pattern.into();
        let regex =
            Regex::new(&format!("^(?:{})", pattern)).map_err(|error| {
                TokenizeError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: error.to_string(),
                }
            })?;
        Ok(Self {
            name,
            pattern,
            regex,
        })
    }

    /// The token name this definition produces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared pattern text, without the anchor.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match anchored at the start of `text`, returning the matched substring.
    ///
    /// Empty matches do not count: a definition that matches zero characters
    /// is treated as not matching at all.
    pub(crate) fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .find(text)
            .map(|found| found.as_str())
            .filter(|value| !value.is_empty())
    }
}

impl fmt::Display for TokenDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: {}}}", self.name, self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_anchored() {
        let definition = TokenDefinition::new("NUMBER", "[0-9]+").unwrap();
        assert_eq!(definition.find("10ab"), Some("10"));
        assert_eq!(definition.find("ab10"), None);
    }

    #[test]
    fn test_alternation_is_anchored_as_a_unit() {
        // A bare "^" prefix would leave the second branch unanchored.
        let definition = TokenDefinition::new("AB", "a|b").unwrap();
        assert_eq!(definition.find("xb"), None);
        assert_eq!(definition.find("b"), Some("b"));
    }

    #[test]
    fn test_empty_match_is_no_match() {
        let definition = TokenDefinition::new("STARS", "x*").unwrap();
        assert_eq!(definition.find("yyy"), None);
        assert_eq!(definition.find("xxy"), Some("xx"));
    }

    #[test]
    fn test_invalid_pattern() {
        // Unmatched parenthesis
        let result = TokenDefinition::new("BAD", "(a");
        assert!(matches!(
            result,
            Err(TokenizeError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_display() {
        let definition = TokenDefinition::new("NUMBER", "[0-9]+").unwrap();
        assert_eq!(definition.to_string(), "{NUMBER: [0-9]+}");
    }
}
