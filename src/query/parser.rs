//! Shunting-yard: infix token stream to postfix, with the fixed AND/OR
//! precedence table.

use super::lexer::Token;

fn precedence(token: &Token) -> u8 {
    match token {
        Token::And => 2,
        Token::Or => 1,
        _ => 0,
    }
}

/// Convert an infix token stream to postfix.
///
/// Unmatched parentheses (either direction) discard the whole result: the
/// query is treated as malformed at the lexical level and the caller gets
/// an empty postfix stream, which the evaluator in turn resolves to an
/// empty result set rather than an error.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::new();
    let mut op_stack: Vec<Token> = Vec::new();
    let mut unmatched = false;

    for token in tokens {
        match token {
            Token::Term(_) => output.push(token.clone()),
            Token::LParen => op_stack.push(Token::LParen),
            Token::RParen => {
                let mut closed = false;
                while let Some(top) = op_stack.pop() {
                    if top == Token::LParen {
                        closed = true;
                        break;
                    }
                    output.push(top);
                }
                if !closed {
                    unmatched = true;
                }
            }
            Token::And | Token::Or => {
                while let Some(top) = op_stack.last() {
                    if *top == Token::LParen || precedence(top) < precedence(token) {
                        break;
                    }
                    output.push(op_stack.pop().unwrap());
                }
                op_stack.push(token.clone());
            }
        }
    }

    while let Some(top) = op_stack.pop() {
        if top == Token::LParen {
            unmatched = true;
        } else {
            output.push(top);
        }
    }

    if unmatched {
        Vec::new()
    } else {
        output
    }
}
