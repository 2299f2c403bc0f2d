//! Arithmetic expression grammar.
//!
//! Evaluates expressions over integers with `$(name)` reference dereference,
//! parenthesization, and binary combination:
//!
//! ```text
//! EXPR -> REF_START OPEN_BRACKET REF CLOSE_BRACKET
//! EXPR -> EXPR OPERATOR EXPR
//! EXPR -> OPEN_BRACKET EXPR CLOSE_BRACKET
//! EXPR -> NUMBER
//! ```
//!
//! Binary combination is strictly left-to-right: the engine reduces the
//! leftmost applicable window first and knows no operator precedence, so
//! `2 + 3 * 4` is `(2 + 3) * 4`. Use parentheses to group.

use crate::parsing::{GrammarRule, ParseError, ParseOptions, Parser, ParserToken};
use crate::tokenizing::{TokenDefinition, TokenizeError, Tokenizer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Errors produced by [Evaluator::evaluate].
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    Tokenize(TokenizeError),
    Parse(ParseError<ExprValue>),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Tokenize(error) => {
                write!(f, "failed to tokenize expression: {}", error)
            }
            EvalError::Parse(error) => {
                write!(f, "failed to parse expression: {}", error)
            }
        }
    }
}

impl std::error::Error for EvalError {}

impl From<TokenizeError> for EvalError {
    fn from(error: TokenizeError) -> Self {
        EvalError::Tokenize(error)
    }
}

impl From<ParseError<ExprValue>> for EvalError {
    fn from(error: ParseError<ExprValue>) -> Self {
        EvalError::Parse(error)
    }
}

/// Semantic value threaded through expression reductions.
///
/// Leaves carry the raw lexeme; every `EXPR` reduction carries the folded
/// number. Both fields travel together so reducers can read whichever side
/// the matched child represents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExprValue {
    number: i64,
    lexeme: String,
}

impl ExprValue {
    fn leaf(lexeme: &str) -> Self {
        Self {
            number: 0,
            lexeme: lexeme.to_string(),
        }
    }

    fn number(value: i64) -> Self {
        Self {
            number: value,
            lexeme: String::new(),
        }
    }
}

fn apply(operator: &str, left: i64, right: i64) -> i64 {
    match operator {
        "+" => left + right,
        "-" => left - right,
        "*" => left * right,
        // Division by zero folds to 0, like an unknown operator.
        "/" => left.checked_div(right).unwrap_or(0),
        _ => 0,
    }
}

/// Evaluates arithmetic expressions against a fixed reference table.
///
/// The table is captured by the dereference rule's reducer at construction
/// and is immutable thereafter; unknown references evaluate to 0.
pub struct Evaluator {
    tokenizer: Tokenizer,
    parser: Parser<ExprValue>,
}

impl Evaluator {
    pub fn new(references: HashMap<String, i64>) -> Self {
        let tokenizer = Tokenizer::new(
            [
                ("REF_START", r"\$"),
                ("OPEN_BRACKET", r"\("),
                ("CLOSE_BRACKET", r"\)"),
                ("REF", "[a-zA-Z_][a-zA-Z0-9_]*"),
                ("OPERATOR", r"[\+\-\*\/]"),
                ("NUMBER", "[0-9]+"),
            ]
            .into_iter()
            .map(|(name, pattern)| {
                TokenDefinition::new(name, pattern)
                    .expect("expression token pattern must compile")
            })
            .collect(),
        );

        let references = Arc::new(references);
        let mut parser = Parser::new(Vec::new());

        parser.add_rule(GrammarRule::new(
            "EXPR",
            "REF_START OPEN_BRACKET REF CLOSE_BRACKET",
            move |tokens: &[ParserToken<ExprValue>]| {
                let name = tokens[2].value().lexeme.as_str();
                ExprValue::number(references.get(name).copied().unwrap_or(0))
            },
        ));
        parser.add_rule(GrammarRule::new(
            "EXPR",
            "EXPR OPERATOR EXPR",
            |tokens: &[ParserToken<ExprValue>]| {
                ExprValue::number(apply(
                    &tokens[1].value().lexeme,
                    tokens[0].value().number,
                    tokens[2].value().number,
                ))
            },
        ));
        parser.add_rule(GrammarRule::new(
            "EXPR",
            "OPEN_BRACKET EXPR CLOSE_BRACKET",
            |tokens: &[ParserToken<ExprValue>]| tokens[1].value().clone(),
        ));
        parser.add_rule(GrammarRule::new(
            "EXPR",
            "NUMBER",
            |tokens: &[ParserToken<ExprValue>]| {
                ExprValue::number(
                    tokens[0].value().lexeme.parse().unwrap_or_default(),
                )
            },
        ));

        Self { tokenizer, parser }
    }

    /// Tokenize and fold `expression` down to a single number.
    pub fn evaluate(&self, expression: &str) -> Result<i64, EvalError> {
        self.evaluate_with(ParseOptions::default(), expression)
    }

    /// Like [evaluate](Evaluator::evaluate), with explicit parse options
    /// (e.g. a trace sink).
    pub fn evaluate_with(
        &self,
        options: ParseOptions<'_>,
        expression: &str,
    ) -> Result<i64, EvalError> {
        let tokens = self.tokenizer.tokenize(expression)?;
        let leaves = tokens
            .iter()
            .map(|token| ParserToken::new(token.name(), ExprValue::leaf(token.value())))
            .collect();
        let root = self.parser.parse(options, leaves)?;
        Ok(root.value().number)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_arithmetic() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("10 * 5").unwrap(), 50);
        assert_eq!(evaluator.evaluate("7").unwrap(), 7);
    }

    #[test]
    fn test_left_to_right_combination() {
        let evaluator = Evaluator::default();
        // No precedence: (2 + 3) * 4
        assert_eq!(evaluator.evaluate("2 + 3 * 4").unwrap(), 20);
    }

    #[test]
    fn test_parentheses_group() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("2 + (3 * 4)").unwrap(), 14);
    }

    #[test]
    fn test_reference_dereference() {
        let evaluator =
            Evaluator::new(HashMap::from([("ref1".to_string(), 10)]));
        assert_eq!(evaluator.evaluate("$(ref1) + 1").unwrap(), 11);
    }

    #[test]
    fn test_unknown_reference_is_zero() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("$(missing) + 1").unwrap(), 1);
    }

    #[test]
    fn test_division_by_zero_folds_to_zero() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("10 / 0").unwrap(), 0);
    }

    #[test]
    fn test_tokenize_error_carries_remainder() {
        let evaluator = Evaluator::default();
        let error = evaluator.evaluate("10 ^ 2").unwrap_err();
        assert_eq!(
            error,
            EvalError::Tokenize(TokenizeError::NoMatch {
                remainder: "^ 2".to_string()
            })
        );
    }
}
