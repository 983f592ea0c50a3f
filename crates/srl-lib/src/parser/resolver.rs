//! Rewrites the token tree in place, resolving phrases to methods.
//!
//! Commas count as whitespace. A text segment either starts with a known
//! phrase (which is replaced by its descriptor, any leftover re-inserted
//! right after) or is split at its first whitespace run; the head stays
//! put as a parameter candidate and the tail re-enters the scan. The pass
//! never fails: single words that match nothing are left for the executor
//! to judge, since in parameter position they are perfectly legal.

use crate::parser::phrases::method_match;
use crate::parser::tokenizer::Token;

pub fn resolve(mut tokens: Vec<Token>) -> Vec<Token> {
    let mut i = 0;
    while i < tokens.len() {
        let placeholder = Token::Text(String::new());
        match std::mem::replace(&mut tokens[i], placeholder) {
            Token::Text(text) => {
                let segment = text.replace(',', " ");
                let segment = segment.trim();
                if segment.is_empty() {
                    tokens.remove(i);
                    continue;
                }

                if let Some((method, matched)) = method_match(segment) {
                    let leftover = segment[matched..].trim();
                    tokens[i] = Token::Method(method);
                    if !leftover.is_empty() {
                        tokens.insert(i + 1, Token::Text(leftover.to_owned()));
                    }
                } else if let Some(at) = segment.find(char::is_whitespace) {
                    let head = &segment[..at];
                    let tail = segment[at..].trim_start();
                    tokens[i] = Token::Text(head.to_owned());
                    tokens.insert(i + 1, Token::Text(tail.to_owned()));
                } else {
                    tokens[i] = Token::Text(segment.to_owned());
                }
            }
            Token::Group(inner) => {
                tokens[i] = Token::Group(resolve(inner));
            }
            other => {
                tokens[i] = other;
            }
        }
        i += 1;
    }
    tokens
}
