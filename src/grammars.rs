//! Complete grammars built on the engine.
//!
//! These modules are consumers of the tokenizer and the reduction parser,
//! not part of the engine itself. They double as reference material for
//! writing new grammars: [expression] shows multi-length rule priority and
//! reducers with captured context, [prototext] shows recursive structure and
//! semantic merging done entirely in reducers.

pub mod expression;
pub mod prototext;
