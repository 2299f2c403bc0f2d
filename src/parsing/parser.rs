//! The reduction engine.

use crate::parsing::rule::GrammarRule;
use crate::parsing::token::ParserToken;
use std::fmt;

/// Errors produced by [Parser::parse].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError<T> {
    /// `parse` was called with zero tokens.
    EmptyInput,
    /// A full left-to-right sweep produced no reduction; carries the
    /// remaining buffer for diagnostics.
    Stuck { remaining: Vec<ParserToken<T>> },
}

impl<T> fmt::Display for ParseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "no tokens to parse"),
            ParseError::Stuck { remaining } => {
                write!(
                    f,
                    "no grammar rule applies to remaining tokens: {}",
                    format_tokens(remaining)
                )
            }
        }
    }
}

impl<T: fmt::Debug> std::error::Error for ParseError<T> {}

/// Per-call parse options.
///
/// The only option is an optional trace sink. When present, every rule
/// considered, every match or skip decision, and every buffer snapshot is
/// reported to it. The sink is read-only instrumentation: it never influences
/// the parse outcome, and when absent no trace text is formatted at all.
#[derive(Default)]
pub struct ParseOptions<'a> {
    pub trace: Option<&'a mut dyn FnMut(&str)>,
}

impl<'a> ParseOptions<'a> {
    pub fn with_trace(sink: &'a mut dyn FnMut(&str)) -> Self {
        Self { trace: Some(sink) }
    }

    fn emit(&mut self, line: impl FnOnce() -> String) {
        if let Some(sink) = self.trace.as_mut() {
            sink(&line());
        }
    }
}

/// Holds a rule set and rewrites token buffers by reduction until a single
/// root token remains.
///
/// Rules are kept in priority order (symbol count descending, stable, so
/// equal-length rules keep registration order) at construction and after
/// every [add_rule](Parser::add_rule). [parse](Parser::parse) never reorders
/// and takes `&self`: a built parser may be shared between threads, and rules
/// added between calls are re-prioritized before the next call can observe
/// the set.
pub struct Parser<T> {
    rules: Vec<GrammarRule<T>>,
}

impl<T> Parser<T> {
    pub fn new(rules: Vec<GrammarRule<T>>) -> Self {
        let mut parser = Self { rules: Vec::new() };
        for rule in rules {
            parser.add_rule(rule);
        }
        parser
    }

    /// Register a rule, restoring priority order.
    pub fn add_rule(&mut self, rule: GrammarRule<T>) {
        self.rules.push(rule);
        self.rules
            .sort_by(|left, right| right.symbols().len().cmp(&left.symbols().len()));
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[GrammarRule<T>] {
        &self.rules
    }

    /// Fold `tokens` into a single root token.
    ///
    /// A single-token input is already a valid parse result and is returned
    /// unchanged without evaluating any rule; terminal tokens are therefore
    /// stable fixed points. Otherwise the buffer is rewritten by the
    /// reduction loop described in the [module documentation](crate::parsing)
    /// until one token remains, or until a full sweep finds no applicable
    /// rule ([ParseError::Stuck]).
    ///
    /// Reducers run inline; a panicking reducer propagates out of this call
    /// with no engine-level recovery.
    pub fn parse(
        &self,
        mut options: ParseOptions<'_>,
        tokens: Vec<ParserToken<T>>,
    ) -> Result<ParserToken<T>, ParseError<T>> {
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let mut buffer = tokens;
        if buffer.len() == 1 {
            return Ok(buffer.remove(0));
        }

        options.emit(|| format!("rules: {}", format_rules(&self.rules)));

        let mut offset = 0;
        // Stays true across the iteration that brings the buffer down to one
        // token, allowing a final collapsing pass over the root.
        let mut matched = false;

        while buffer.len() > 1 || matched {
            options.emit(|| {
                format!(
                    "pass tokens: [{}] offset: {}",
                    format_tokens(&buffer),
                    offset
                )
            });
            if offset == buffer.len() {
                return Err(ParseError::Stuck { remaining: buffer });
            }
            matched = false;
            for rule in &self.rules {
                options.emit(|| format!("try rule: {}", rule));
                let width = rule.symbols().len();
                if offset + width > buffer.len() {
                    options.emit(|| {
                        format!(
                            "skip rule: window [{}..{}] exceeds buffer length {}",
                            offset,
                            offset + width,
                            buffer.len()
                        )
                    });
                    continue;
                }
                let window = &buffer[offset..offset + width];
                if rule.matches(window) {
                    options.emit(|| {
                        format!("reduce [{}] by {}", format_tokens(window), rule)
                    });
                    let value = rule.reduce(window);
                    let replacement = ParserToken::new(rule.name(), value);
                    buffer.splice(offset..offset + width, std::iter::once(replacement));
                    offset = 0;
                    matched = true;
                    break;
                }
            }
            if !matched {
                offset += 1;
            }
        }

        options.emit(|| format!("result token: {}", format_tokens(&buffer)));
        Ok(buffer.remove(0))
    }
}

fn format_tokens<T>(tokens: &[ParserToken<T>]) -> String {
    tokens
        .iter()
        .map(|token| token.name().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_rules<T>(rules: &[GrammarRule<T>]) -> String {
    rules
        .iter()
        .map(|rule| rule.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_grammar() -> Parser<i64> {
        Parser::new(vec![
            GrammarRule::new("EXPR", "NUMBER", |tokens| *tokens[0].value()),
            GrammarRule::new("EXPR", "EXPR OPERATOR EXPR", |tokens| {
                tokens[0].value() + tokens[2].value()
            }),
        ])
    }

    #[test]
    fn test_sum_round_trip() {
        let parser = sum_grammar();
        let result = parser
            .parse(
                ParseOptions::default(),
                vec![
                    ParserToken::new("NUMBER", 5),
                    ParserToken::new("OPERATOR", 0),
                    ParserToken::new("NUMBER", 5),
                ],
            )
            .unwrap();
        assert_eq!(result.name(), "EXPR");
        assert_eq!(*result.value(), 10);
    }

    #[test]
    fn test_empty_input() {
        let parser = sum_grammar();
        let error = parser.parse(ParseOptions::default(), vec![]).unwrap_err();
        assert_eq!(error, ParseError::EmptyInput);
    }

    #[test]
    fn test_single_token_is_returned_unchanged() {
        let parser = sum_grammar();
        let result = parser
            .parse(ParseOptions::default(), vec![ParserToken::new("OPERATOR", 7)])
            .unwrap();
        assert_eq!(result, ParserToken::new("OPERATOR", 7));
    }

    #[test]
    fn test_stuck_reports_remaining_buffer() {
        let parser = sum_grammar();
        let error = parser
            .parse(
                ParseOptions::default(),
                vec![
                    ParserToken::new("NUMBER", 5),
                    ParserToken::new("OPERATOR", 0),
                ],
            )
            .unwrap_err();
        match error {
            ParseError::Stuck { remaining } => {
                let names: Vec<&str> =
                    remaining.iter().map(|t| t.name()).collect();
                // NUMBER still reduces to EXPR before the sweep runs dry.
                assert_eq!(names, vec!["EXPR", "OPERATOR"]);
            }
            other => panic!("expected stuck state, got {:?}", other),
        }
    }

    #[test]
    fn test_rules_kept_in_priority_order() {
        let parser = sum_grammar();
        let patterns: Vec<&str> =
            parser.rules().iter().map(|r| r.pattern()).collect();
        assert_eq!(patterns, vec!["EXPR OPERATOR EXPR", "NUMBER"]);
    }

    #[test]
    fn test_unary_collapse_after_final_reduction() {
        // The extra pass allowed by the matched flag lets a unary rule fold
        // the root one more time.
        let parser = Parser::new(vec![
            GrammarRule::new("PAIR", "A A", |_| 2),
            GrammarRule::new("ROOT", "PAIR", |_| 1),
        ]);
        let result = parser
            .parse(
                ParseOptions::default(),
                vec![ParserToken::new("A", 0), ParserToken::new("A", 0)],
            )
            .unwrap();
        assert_eq!(result.name(), "ROOT");
    }
}
