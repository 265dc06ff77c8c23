//! Evaluates a postfix Boolean token stream into a set of matching document ids.

use super::lexer::Token;
use crate::error::{IndexError, Result};
use crate::trie::{DocId, Trie};
use std::collections::HashSet;

/// Evaluate a postfix stream against `trie`'s posting lists.
///
/// An empty postfix stream evaluates to the empty set (no documents match);
/// this is the defined "malformed but not a search-level error" case the
/// parser hands back for unmatched parentheses. Any other operand/operator
/// arity mismatch is reported as [`IndexError::MalformedQuery`].
pub fn evaluate(postfix: &[Token], trie: &Trie) -> Result<HashSet<DocId>> {
    if postfix.is_empty() {
        return Ok(HashSet::new());
    }

    let mut stack: Vec<HashSet<DocId>> = Vec::new();

    for token in postfix {
        match token {
            Token::Term(term) => {
                let docs: HashSet<DocId> = trie.lookup(term).iter().map(|p| p.doc_id).collect();
                stack.push(docs);
            }
            Token::And => {
                let (lhs, rhs) = pop_pair(&mut stack, "AND")?;
                stack.push(lhs.intersection(&rhs).copied().collect());
            }
            Token::Or => {
                let (lhs, rhs) = pop_pair(&mut stack, "OR")?;
                stack.push(lhs.union(&rhs).copied().collect());
            }
            Token::LParen | Token::RParen => {
                return Err(IndexError::MalformedQuery(
                    "parenthesis token leaked into postfix stream".to_string(),
                ));
            }
        }
    }

    if stack.len() != 1 {
        return Err(IndexError::MalformedQuery(format!(
            "expected exactly one result set, got {}",
            stack.len()
        )));
    }

    Ok(stack.pop().unwrap())
}

fn pop_pair(
    stack: &mut Vec<HashSet<DocId>>,
    op: &str,
) -> Result<(HashSet<DocId>, HashSet<DocId>)> {
    let rhs = stack
        .pop()
        .ok_or_else(|| IndexError::MalformedQuery(format!("{op} missing right operand")))?;
    let lhs = stack
        .pop()
        .ok_or_else(|| IndexError::MalformedQuery(format!("{op} missing left operand")))?;
    Ok((lhs, rhs))
}
