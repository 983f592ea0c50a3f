//! Executes a resolved token sequence against a builder.
//!
//! Each method token collects the non-method tokens following it as raw
//! parameters. After normalization the operation is dispatched onto the
//! builder. A failing call gets exactly one chance at recovery: if the
//! last raw parameter is a group, the call is retried without it and the
//! group is appended afterward as a plain non-capturing group. Sub-query
//! parameters that no operation consumed are appended the same way.

use crate::builder::{Builder, Conditions};
use crate::parser::method::{Method, Param, normalize_parameters};
use crate::parser::phrases::Op;
use crate::parser::tokenizer::Token;
use crate::{Error, Result, SyntaxError};

/// Drives `builder` through the resolved sequence.
pub fn build_query(tokens: Vec<Token>, builder: &mut Builder) -> Result<()> {
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::Group(group) => {
                let sub = sub_query(group)?;
                builder.and(&sub)?;
            }
            Token::Method(method) => {
                let mut raw = Vec::new();
                while iter.peek().is_some_and(|t| !matches!(t, Token::Method(_))) {
                    if let Some(param) = iter.next() {
                        raw.push(param);
                    }
                }
                apply(builder, &method, raw)?;
            }
            Token::Text(text) | Token::Literal(text) => {
                return Err(SyntaxError::UnexpectedStatement(text).into());
            }
        }
    }

    Ok(())
}

/// Builds a nested sequence into a non-capturing sub-builder.
fn sub_query(tokens: Vec<Token>) -> Result<Builder> {
    let mut sub = Builder::non_capturing();
    build_query(tokens, &mut sub)?;
    Ok(sub)
}

/// One method call, including the single trailing-group recovery.
fn apply(builder: &mut Builder, method: &Method, raw: Vec<Token>) -> Result<()> {
    let trailing_group = matches!(raw.last(), Some(Token::Group(_)));

    match normalize_parameters(method, raw.clone()) {
        Ok(params) => match invoke(builder, method, params) {
            Ok(()) => Ok(()),
            Err(_) if trailing_group && raw.len() > 1 => {
                let (rest, group) = split_trailing_group(raw);
                let params = normalize_parameters(method, rest)?;
                invoke(builder, method, params)?;
                fold_group(builder, group)
            }
            Err(err) => Err(err),
        },
        Err(err) => {
            if !trailing_group {
                return Err(err.into());
            }
            let (rest, group) = split_trailing_group(raw);
            // With the group as the only parameter the call is retried
            // bare; otherwise the remainder is normalized again.
            if rest.is_empty() {
                invoke(builder, method, Vec::new())?;
            } else {
                let params = normalize_parameters(method, rest)?;
                invoke(builder, method, params)?;
            }
            fold_group(builder, group)
        }
    }
}

fn split_trailing_group(mut raw: Vec<Token>) -> (Vec<Token>, Vec<Token>) {
    match raw.pop() {
        Some(Token::Group(group)) => (raw, group),
        Some(other) => {
            raw.push(other);
            (raw, Vec::new())
        }
        None => (raw, Vec::new()),
    }
}

/// Appends a group that no operation consumed.
fn fold_group(builder: &mut Builder, group: Vec<Token>) -> Result<()> {
    let sub = sub_query(group)?;
    builder.and(&sub)?;
    Ok(())
}

/// Dispatches the operation, then appends any sub-query parameter it did
/// not consume. Errors from builder calls are translated at this boundary.
fn invoke(builder: &mut Builder, method: &Method, params: Vec<Param>) -> Result<()> {
    let mut slots: Vec<Option<Param>> = params.into_iter().map(Some).collect();

    dispatch(builder, method, &mut slots).map_err(|e| translate(e, method))?;

    for slot in slots {
        if let Some(Param::SubQuery(tokens)) = slot {
            builder
                .group(Conditions::with(move |b| build_query(tokens, b)))
                .map(|_| ())
                .map_err(|e| translate(e, method))?;
        }
    }

    Ok(())
}

/// Sequencing failures keep their message; builder and engine failures
/// crossing this boundary collapse into the sub-query refusal. Extra
/// string parameters an operation does not use are ignored.
fn translate(err: Error, method: &Method) -> Error {
    match err {
        Error::Sequence(seq) => SyntaxError::Sequence(seq.to_string()).into(),
        Error::Syntax(syntax) => Error::Syntax(syntax),
        Error::Builder(_) | Error::Engine(_) => {
            SyntaxError::SubQueryNotAllowed(method.origin.to_owned()).into()
        }
    }
}

fn dispatch(builder: &mut Builder, method: &Method, slots: &mut [Option<Param>]) -> Result<()> {
    match method.op {
        Op::AnyCharacter => {
            builder.any_character()?;
        }
        Op::Backslash => {
            builder.backslash()?;
        }
        Op::NoCharacter => {
            builder.no_character()?;
        }
        Op::MultiLine => {
            builder.multi_line();
        }
        Op::CaseInsensitive => {
            builder.case_insensitive();
        }
        Op::StartsWith => {
            builder.starts_with()?;
        }
        Op::MustEnd => {
            builder.must_end()?;
        }
        Op::OnceOrMore => {
            builder.once_or_more()?;
        }
        Op::NeverOrMore => {
            builder.never_or_more()?;
        }
        Op::NewLine => {
            builder.new_line()?;
        }
        Op::Whitespace => {
            builder.whitespace()?;
        }
        Op::NoWhitespace => {
            builder.no_whitespace()?;
        }
        Op::Any => {
            builder.any()?;
        }
        Op::Tab => {
            builder.tab()?;
        }
        Op::VerticalTab => {
            builder.vertical_tab()?;
        }
        Op::Digit => {
            builder.digit()?;
        }
        Op::NoDigit => {
            builder.no_digit()?;
        }
        Op::Letter => {
            builder.letter()?;
        }
        Op::UppercaseLetter => {
            builder.uppercase_letter()?;
        }
        Op::Once => {
            builder.once()?;
        }
        Op::Twice => {
            builder.twice()?;
        }
        Op::Word => {
            builder.word()?;
        }
        Op::NonWord => {
            builder.non_word()?;
        }
        Op::CarriageReturn => {
            builder.carriage_return()?;
        }
        Op::Literally => {
            let text = take_str(slots, 0, method)?;
            builder.literally(&text)?;
        }
        Op::OneOf => {
            let chars = take_str(slots, 0, method)?;
            builder.one_of(&chars)?;
        }
        Op::NoneOf => {
            let chars = take_str(slots, 0, method)?;
            builder.none_of(&chars)?;
        }
        Op::AnyOf => {
            let conditions = take_conditions(slots, 0, method)?;
            builder.any_of(conditions)?;
        }
        Op::IfFollowedBy => {
            let conditions = take_conditions(slots, 0, method)?;
            builder.if_followed_by(conditions)?;
        }
        Op::IfNotFollowedBy => {
            let conditions = take_conditions(slots, 0, method)?;
            builder.if_not_followed_by(conditions)?;
        }
        Op::Optional => match take_maybe(slots, 0) {
            None => {
                builder.optional()?;
            }
            Some(param) => {
                builder.optionally(conditions_from(param))?;
            }
        },
        Op::Until => {
            let conditions = take_conditions(slots, 0, method)?;
            builder.until(conditions)?;
        }
        Op::Raw => {
            let pattern = take_str(slots, 0, method)?;
            builder.raw(&pattern)?;
        }
        Op::Capture => {
            let conditions = take_conditions(slots, 0, method)?;
            match take_name(slots, 1) {
                Some(name) => {
                    builder.capture_as(conditions, &name)?;
                }
                None => {
                    builder.capture(conditions)?;
                }
            }
        }
        Op::DigitFrom => {
            let min = take_number(slots, 0, method)?;
            let max = take_number(slots, 1, method)?;
            builder.digit_from(min, max)?;
        }
        Op::LetterFrom => {
            let min = take_char(slots, 0, method)?;
            let max = take_char(slots, 1, method)?;
            builder.letter_from(min, max)?;
        }
        Op::UppercaseLetterFrom => {
            let min = take_char(slots, 0, method)?;
            let max = take_char(slots, 1, method)?;
            builder.uppercase_letter_from(min, max)?;
        }
        Op::Exactly => {
            let count = take_number(slots, 0, method)?;
            builder.exactly(count)?;
        }
        Op::AtLeast => {
            let min = take_number(slots, 0, method)?;
            builder.at_least(min)?;
        }
        Op::Between => {
            let min = take_number(slots, 0, method)?;
            let max = take_number(slots, 1, method)?;
            builder.between(min, max)?;
        }
    }

    Ok(())
}

fn take_maybe(slots: &mut [Option<Param>], idx: usize) -> Option<Param> {
    slots.get_mut(idx).and_then(Option::take)
}

fn take_str(slots: &mut [Option<Param>], idx: usize, method: &Method) -> Result<String> {
    match take_maybe(slots, idx) {
        Some(Param::Str(text)) => Ok(text),
        Some(Param::SubQuery(_)) => {
            Err(SyntaxError::SubQueryNotAllowed(method.origin.to_owned()).into())
        }
        None => Err(SyntaxError::InvalidParameter(method.origin.to_owned()).into()),
    }
}

fn take_number(slots: &mut [Option<Param>], idx: usize, method: &Method) -> Result<u32> {
    let text = take_str(slots, idx, method)?;
    text.parse()
        .map_err(|_| SyntaxError::InvalidParameter(method.origin.to_owned()).into())
}

fn take_char(slots: &mut [Option<Param>], idx: usize, method: &Method) -> Result<char> {
    let text = take_str(slots, idx, method)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SyntaxError::InvalidParameter(method.origin.to_owned()).into()),
    }
}

fn take_conditions(
    slots: &mut [Option<Param>],
    idx: usize,
    method: &Method,
) -> Result<Conditions> {
    match take_maybe(slots, idx) {
        Some(param) => Ok(conditions_from(param)),
        None => Err(SyntaxError::InvalidParameter(method.origin.to_owned()).into()),
    }
}

fn conditions_from(param: Param) -> Conditions {
    match param {
        Param::Str(text) => Conditions::from(text),
        Param::SubQuery(tokens) => Conditions::with(move |b| build_query(tokens, b)),
    }
}

/// A capture name, only taken when it is plain text.
fn take_name(slots: &mut [Option<Param>], idx: usize) -> Option<String> {
    match slots.get(idx) {
        Some(Some(Param::Str(_))) => match take_maybe(slots, idx) {
            Some(Param::Str(name)) => Some(name),
            _ => None,
        },
        _ => None,
    }
}
