//! Tokenizes a Boolean query string into terms, operators, and parentheses.

/// A single token in a Boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
    LParen,
    RParen,
}

/// Split a query on whitespace, first padding parentheses with spaces so
/// they split off as their own tokens even when jammed against a term.
///
/// `AND` and `OR` (exact uppercase) become operator tokens; everything else
/// is lowercased into a term token. A term containing characters outside
/// `a`-`z` is accepted here and will simply never match in the trie.
pub fn tokenize(query: &str) -> Vec<Token> {
    let padded = query.replace('(', " ( ").replace(')', " ) ");

    padded
        .split_whitespace()
        .map(|word| match word {
            "(" => Token::LParen,
            ")" => Token::RParen,
            "AND" => Token::And,
            "OR" => Token::Or,
            other => Token::Term(other.to_lowercase()),
        })
        .collect()
}
