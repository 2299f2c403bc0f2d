//! Protobuf debug text to JSON conversion.
//!
//! Recognizes the text form protobuf messages print for debugging: bare and
//! quoted scalars, `key: value` pairs, and nested `<...>` blocks:
//!
//! ```text
//! name: "service" config: <port: 8080 host: localhost>
//! ```
//!
//! ```text
//! VALUE          -> WORD | QUOTE WORD QUOTE | QUOTE QUOTE
//!                 | OBJECT_OPEN_BRACKET KEY_VALUE_LIST OBJECT_CLOSE_BRACKET
//! KEY_VALUE      -> VALUE COLON VALUE
//! KEY_VALUE_LIST -> KEY_VALUE | KEY_VALUE_LIST KEY_VALUE
//! ```
//!
//! A repeated key merges its values into a list: the first duplicate promotes
//! the scalar to a two-element list, further duplicates append. The merge
//! lives entirely in the `KEY_VALUE_LIST` reducer; the engine knows nothing
//! about it.
//!
//! Scalars stay JSON strings; bare numerics are not converted. Quoted
//! scalars hold a single word.

use crate::parsing::{GrammarRule, ParseError, ParseOptions, Parser, ParserToken};
use crate::tokenizing::{TokenDefinition, TokenizeError, Tokenizer};
use serde_json::{Map, Value};
use std::fmt;

/// Errors produced by [Converter::to_json].
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    Tokenize(TokenizeError),
    Parse(ParseError<Value>),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Tokenize(error) => {
                write!(f, "failed to tokenize message text: {}", error)
            }
            ConvertError::Parse(error) => {
                write!(f, "failed to parse message text: {}", error)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<TokenizeError> for ConvertError {
    fn from(error: TokenizeError) -> Self {
        ConvertError::Tokenize(error)
    }
}

impl From<ParseError<Value>> for ConvertError {
    fn from(error: ParseError<Value>) -> Self {
        ConvertError::Parse(error)
    }
}

/// Merge `additions` into `target`, promoting repeated keys to arrays.
fn merge_pairs(target: &mut Map<String, Value>, additions: &Map<String, Value>) {
    for (key, value) in additions {
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), value.clone());
            }
            Some(Value::Array(items)) => items.push(value.clone()),
            Some(existing) => {
                *existing = Value::Array(vec![existing.take(), value.clone()]);
            }
        }
    }
}

fn key_of(token: &ParserToken<Value>) -> String {
    token.value().as_str().unwrap_or_default().to_string()
}

/// Converts protobuf debug text into a [serde_json::Value].
pub struct Converter {
    tokenizer: Tokenizer,
    parser: Parser<Value>,
}

impl Converter {
    pub fn new() -> Self {
        let tokenizer = Tokenizer::new(
            [
                ("WORD", r"[a-zA-Z_0-9][a-zA-Z0-9_\-]*"),
                ("QUOTE", "\\\""),
                ("OBJECT_OPEN_BRACKET", r"\<"),
                ("OBJECT_CLOSE_BRACKET", r"\>"),
                ("COLON", r"\:"),
                ("NEWLINE", r"\r?\n"),
            ]
            .into_iter()
            .map(|(name, pattern)| {
                TokenDefinition::new(name, pattern)
                    .expect("prototext token pattern must compile")
            })
            .collect(),
        );

        let mut parser = Parser::new(Vec::new());

        parser.add_rule(GrammarRule::new(
            "VALUE",
            "WORD",
            |tokens: &[ParserToken<Value>]| tokens[0].value().clone(),
        ));
        parser.add_rule(GrammarRule::new(
            "VALUE",
            "QUOTE QUOTE",
            |_: &[ParserToken<Value>]| Value::String(String::new()),
        ));
        parser.add_rule(GrammarRule::new(
            "VALUE",
            "QUOTE VALUE QUOTE",
            |tokens: &[ParserToken<Value>]| tokens[1].value().clone(),
        ));
        parser.add_rule(GrammarRule::new(
            "VALUE",
            "OBJECT_OPEN_BRACKET KEY_VALUE_LIST OBJECT_CLOSE_BRACKET",
            |tokens: &[ParserToken<Value>]| tokens[1].value().clone(),
        ));
        parser.add_rule(GrammarRule::new(
            "KEY_VALUE",
            "VALUE COLON VALUE",
            |tokens: &[ParserToken<Value>]| {
                let mut pair = Map::new();
                pair.insert(key_of(&tokens[0]), tokens[2].value().clone());
                Value::Object(pair)
            },
        ));
        parser.add_rule(GrammarRule::new(
            "KEY_VALUE_LIST",
            "KEY_VALUE",
            |tokens: &[ParserToken<Value>]| tokens[0].value().clone(),
        ));
        parser.add_rule(GrammarRule::new(
            "KEY_VALUE_LIST",
            "KEY_VALUE_LIST KEY_VALUE",
            |tokens: &[ParserToken<Value>]| {
                let mut merged = match tokens[0].value() {
                    Value::Object(pairs) => pairs.clone(),
                    _ => Map::new(),
                };
                if let Value::Object(additions) = tokens[1].value() {
                    merge_pairs(&mut merged, additions);
                }
                Value::Object(merged)
            },
        ));

        Self { tokenizer, parser }
    }

    /// Convert `input` into a JSON value.
    ///
    /// Newline tokens are dropped between tokenizing and parsing, so the
    /// grammar itself stays line-agnostic.
    pub fn to_json(&self, input: &str) -> Result<Value, ConvertError> {
        let tokens = self.tokenizer.tokenize(input)?;
        let leaves = tokens
            .into_iter()
            .filter(|token| token.name() != "NEWLINE")
            .map(|token| {
                let value = Value::String(token.value().to_string());
                ParserToken::new(token.name(), value)
            })
            .collect();
        let root = self.parser.parse(ParseOptions::default(), leaves)?;
        Ok(root.into_value())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_pair() {
        let converter = Converter::new();
        assert_eq!(
            converter.to_json("name: value").unwrap(),
            json!({"name": "value"})
        );
    }

    #[test]
    fn test_quoted_and_empty_scalars() {
        let converter = Converter::new();
        assert_eq!(
            converter.to_json(r#"name: "value" empty: """#).unwrap(),
            json!({"name": "value", "empty": ""})
        );
    }

    #[test]
    fn test_nested_block() {
        let converter = Converter::new();
        assert_eq!(
            converter.to_json("config: <port: 8080>").unwrap(),
            json!({"config": {"port": "8080"}})
        );
    }

    #[test]
    fn test_repeated_key_promotes_to_list() {
        let converter = Converter::new();
        assert_eq!(
            converter.to_json("item: a item: b").unwrap(),
            json!({"item": ["a", "b"]})
        );
    }

    #[test]
    fn test_further_duplicates_append() {
        let converter = Converter::new();
        assert_eq!(
            converter.to_json("item: a item: b item: c").unwrap(),
            json!({"item": ["a", "b", "c"]})
        );
    }

    #[test]
    fn test_multiline_input() {
        let converter = Converter::new();
        let input = "name: first\nother: second\n";
        assert_eq!(
            converter.to_json(input).unwrap(),
            json!({"name": "first", "other": "second"})
        );
    }
}
