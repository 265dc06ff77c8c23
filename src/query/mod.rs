//! Boolean query pipeline: lex → shunting-yard → postfix evaluation.

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::evaluate;
pub use lexer::{tokenize, Token};
pub use parser::to_postfix;

use std::collections::HashSet;

/// The distinct term tokens in a query, operators and parentheses excluded.
/// Used by the ranker, which only cares about each term once.
pub fn query_terms(tokens: &[Token]) -> HashSet<String> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Term(term) => Some(term.clone()),
            _ => None,
        })
        .collect()
}
