//! Splits raw query text into a token tree.
//!
//! One scan resolves the first top-level parenthesis pair, collects quoted
//! string spans, and honors one-shot backslash escapes. The pair body and
//! the remainder are tokenized recursively; quoted strings become
//! [`Token::Literal`] and are never reinterpreted by later passes.

use crate::SyntaxError;
use crate::parser::method::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain query text, not yet resolved into phrases.
    Text(String),
    /// Quoted string content, backslash escapes removed.
    Literal(String),
    /// A parenthesized sub-query.
    Group(Vec<Token>),
    /// A resolved phrase (produced by the resolver, never the tokenizer).
    Method(Method),
}

/// A quoted string found during scanning. `close` is the byte index of the
/// closing quote, absent while the string is still open.
#[derive(Debug, Clone, Copy)]
struct QuotedSpan {
    quote: usize,
    content: usize,
    close: Option<usize>,
}

/// Result of one scan: the first top-level pair and every string span
/// encountered up to (and inside) it.
#[derive(Debug)]
struct Scan {
    open: Option<usize>,
    close: Option<usize>,
    spans: Vec<QuotedSpan>,
}

pub fn tokenize(query: &str) -> Result<Vec<Token>, SyntaxError> {
    let outline = scan(query)?;

    // One enclosing pair is transparent, but only when the leading `(`
    // really closes at the very end: `(foo) (bar)` must keep both groups.
    if outline.open == Some(0) && outline.close == Some(query.len() - 1) {
        let inner = &query[1..query.len() - 1];
        let outline = scan(inner)?;
        return assemble(inner, outline);
    }

    assemble(query, outline)
}

fn scan(query: &str) -> Result<Scan, SyntaxError> {
    let mut depth = 0usize;
    let mut open = None;
    let mut close = None;
    let mut in_string: Option<char> = None;
    let mut backslash = false;
    let mut spans: Vec<QuotedSpan> = Vec::new();

    // The previous two characters, for the quote-escape rule: a quote ends
    // the string unless preceded by exactly one backslash.
    let mut prev: Option<char> = None;
    let mut prev2: Option<char> = None;

    for (i, c) in query.char_indices() {
        if let Some(quote) = in_string {
            if c == quote && (prev != Some('\\') || prev2 == Some('\\')) {
                in_string = None;
                if let Some(span) = spans.last_mut() {
                    span.close = Some(i);
                }
            }
            prev2 = prev;
            prev = Some(c);
            continue;
        }

        prev2 = prev;
        prev = Some(c);

        if backslash {
            backslash = false;
            continue;
        }

        match c {
            '\\' => backslash = true,
            '"' | '\'' => {
                in_string = Some(c);
                spans.push(QuotedSpan {
                    quote: i,
                    content: i + c.len_utf8(),
                    close: None,
                });
            }
            '(' => {
                depth += 1;
                if open.is_none() {
                    open = Some(i);
                }
            }
            ')' => {
                if depth == 0 {
                    return Err(SyntaxError::UnbalancedParentheses);
                }
                depth -= 1;
                if depth == 0 {
                    // Matching pair found. Later pairs are handled when the
                    // remainder is tokenized.
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    if close.is_none() && depth != 0 {
        return Err(SyntaxError::UnbalancedParentheses);
    }

    Ok(Scan { open, close, spans })
}

fn assemble(query: &str, scan: Scan) -> Result<Vec<Token>, SyntaxError> {
    let (open, close) = match (scan.open, scan.close) {
        (Some(open), Some(close)) => (open, close),
        _ => (query.len(), query.len()),
    };

    let mut result = split_literals(&query[..open], &scan.spans)?;

    if open != close {
        result.push(Token::Group(tokenize(&query[open + 1..close])?));
        result.extend(tokenize(&query[close + 1..])?);
    }

    Ok(result)
}

/// Splits the plain prefix into trimmed text segments and literal tokens at
/// the recorded string spans. Empty segments are dropped.
fn split_literals(prefix: &str, spans: &[QuotedSpan]) -> Result<Vec<Token>, SyntaxError> {
    let mut result = Vec::new();
    let mut cursor = 0;

    for span in spans {
        let close = span.close.ok_or(SyntaxError::UnterminatedString)?;
        if span.quote >= prefix.len() {
            // Inside the parenthesis pair; the body recursion rescans it.
            continue;
        }

        let text = prefix[cursor..span.quote].trim();
        if !text.is_empty() {
            result.push(Token::Text(text.to_owned()));
        }
        result.push(Token::Literal(unescape(&prefix[span.content..close])));
        cursor = close + 1;
    }

    let tail = prefix[cursor..].trim();
    if !tail.is_empty() {
        result.push(Token::Text(tail.to_owned()));
    }

    Ok(result)
}

/// Removes one level of backslash escaping.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
