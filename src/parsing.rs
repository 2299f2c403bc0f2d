//! Rule-reduction parser
//!
//! This module folds an ordered buffer of [ParserToken]s into a single root
//! token by repeatedly applying user-supplied [GrammarRule]s.
//!
//! Reduction discipline:
//! 1. Rules are tried longest-first (symbol count descending, ties keeping
//!    registration order)
//! 2. At each scan offset the highest-priority applicable rule reduces its
//!    window to one new token; the scan then restarts from the left, because
//!    a reduction can enable a match that starts earlier than the reduction
//!    point
//! 3. If no rule applies at an offset, the offset advances by one (shift)
//! 4. A full sweep with no reduction is a stuck state: parse failure
//!
//! There is no backtracking and no ambiguity resolution beyond this priority:
//! a committed reduction is never undone, and grammars that are ambiguous
//! under the priority policy silently resolve to whichever rule sorts first.
//! Designing grammars so that greedy reduction terminates and never gets
//! stuck on valid input is the grammar author's responsibility.

pub mod parser;
pub mod rule;
pub mod token;

pub use parser::{ParseError, ParseOptions, Parser};
pub use rule::GrammarRule;
pub use token::ParserToken;
