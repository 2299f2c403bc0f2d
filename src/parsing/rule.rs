//! Grammar rules: one production plus its semantic action.

use crate::parsing::token::ParserToken;
use std::fmt;

/// The semantic action of a rule: folds the matched child tokens into the
/// value of the replacement token.
///
/// Reducers must be pure functions of their inputs plus immutable captured
/// context; `Send + Sync` so a built parser can be shared between threads.
pub type Reducer<T> = Box<dyn Fn(&[ParserToken<T>]) -> T + Send + Sync>;

/// A named production: a sequence of symbol names plus a reducer.
///
/// Symbols are terminal token names or other rule names; there is no
/// distinction at this level: a name is a name.
pub struct GrammarRule<T> {
    name: String,
    pattern: String,
    symbols: Vec<String>,
    reducer: Reducer<T>,
}

impl<T> GrammarRule<T> {
    /// Create a rule from a name, a whitespace-delimited symbol pattern, and
    /// a reducer.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `pattern` is empty (or if `pattern` contains no
    /// symbols). Only malformed grammar-authoring code can trigger this,
    /// never runtime input, so it is a fail-fast precondition rather than a
    /// recoverable error.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        reducer: impl Fn(&[ParserToken<T>]) -> T + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let pattern = pattern.into();
        if name.is_empty() {
            panic!("grammar rule with empty name");
        }
        let symbols: Vec<String> =
            pattern.split_whitespace().map(str::to_string).collect();
        if symbols.is_empty() {
            panic!("grammar rule {:?} with empty pattern", name);
        }
        Self {
            name,
            pattern,
            symbols,
            reducer: Box::new(reducer),
        }
    }

    /// The name of the token a reduction by this rule produces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared symbol pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The symbol sequence this rule matches.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// True iff `window` has exactly as many tokens as this rule has symbols
    /// and every token name equals the corresponding symbol,
    /// position-for-position. Exact names only: no wildcards, no optionals.
    pub fn matches(&self, window: &[ParserToken<T>]) -> bool {
        window.len() == self.symbols.len()
            && self
                .symbols
                .iter()
                .zip(window)
                .all(|(symbol, token)| symbol == token.name())
    }

    /// Fold the matched children into the replacement token's value.
    pub fn reduce(&self, window: &[ParserToken<T>]) -> T {
        (self.reducer)(window)
    }
}

impl<T> fmt::Display for GrammarRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} -> {}}}", self.name, self.pattern)
    }
}

impl<T> fmt::Debug for GrammarRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish()
    }
}
