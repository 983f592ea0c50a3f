//! The phrase table and keyword resolution.
//!
//! Matching is anchored at the start of a segment, case-insensitive, and
//! tolerant of any whitespace run between phrase words. The match must end
//! at a word boundary so `once` never claims the head of `oncex`. Of all
//! phrases that match, the one with the most words wins; `any character
//! once or more` resolves to `any character`, not `any`.

use crate::parser::method::{Method, Policy};

/// Canonical builder operation behind a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    AnyCharacter,
    Backslash,
    NoCharacter,
    MultiLine,
    CaseInsensitive,
    StartsWith,
    MustEnd,
    OnceOrMore,
    NeverOrMore,
    NewLine,
    Whitespace,
    NoWhitespace,
    Any,
    Tab,
    VerticalTab,
    Digit,
    NoDigit,
    Letter,
    UppercaseLetter,
    Once,
    Twice,
    Word,
    NonWord,
    CarriageReturn,
    Literally,
    AnyOf,
    NoneOf,
    IfFollowedBy,
    IfNotFollowedBy,
    Optional,
    Until,
    Raw,
    OneOf,
    DigitFrom,
    LetterFrom,
    UppercaseLetterFrom,
    Exactly,
    AtLeast,
    Between,
    Capture,
}

/// Phrase text, operation, parameter policy. Aliases map to the same op.
const PHRASES: &[(&str, Op, Policy)] = &[
    ("any character", Op::AnyCharacter, Policy::None),
    ("backslash", Op::Backslash, Policy::None),
    ("no character", Op::NoCharacter, Policy::None),
    ("multi line", Op::MultiLine, Policy::None),
    ("case insensitive", Op::CaseInsensitive, Policy::None),
    ("starts with", Op::StartsWith, Policy::None),
    ("start with", Op::StartsWith, Policy::None),
    ("begin with", Op::StartsWith, Policy::None),
    ("begins with", Op::StartsWith, Policy::None),
    ("must end", Op::MustEnd, Policy::None),
    ("once or more", Op::OnceOrMore, Policy::None),
    ("never or more", Op::NeverOrMore, Policy::None),
    ("new line", Op::NewLine, Policy::None),
    ("whitespace", Op::Whitespace, Policy::None),
    ("no whitespace", Op::NoWhitespace, Policy::None),
    ("anything", Op::Any, Policy::None),
    ("tab", Op::Tab, Policy::None),
    ("vertical tab", Op::VerticalTab, Policy::None),
    ("digit", Op::Digit, Policy::None),
    ("no digit", Op::NoDigit, Policy::None),
    ("nondigit", Op::NoDigit, Policy::None),
    ("number", Op::Digit, Policy::None),
    ("letter", Op::Letter, Policy::None),
    ("uppercase", Op::UppercaseLetter, Policy::None),
    ("once", Op::Once, Policy::None),
    ("twice", Op::Twice, Policy::None),
    ("word", Op::Word, Policy::None),
    ("no word", Op::NonWord, Policy::None),
    ("nonword", Op::NonWord, Policy::None),
    ("carriage return", Op::CarriageReturn, Policy::None),
    ("carriagereturn", Op::CarriageReturn, Policy::None),
    ("literally", Op::Literally, Policy::Bare),
    ("either of", Op::AnyOf, Policy::Bare),
    ("any of", Op::AnyOf, Policy::Bare),
    ("none of", Op::NoneOf, Policy::Bare),
    ("if followed by", Op::IfFollowedBy, Policy::Bare),
    ("if not followed by", Op::IfNotFollowedBy, Policy::Bare),
    ("optional", Op::Optional, Policy::Bare),
    ("until", Op::Until, Policy::Bare),
    ("raw", Op::Raw, Policy::Bare),
    ("one of", Op::OneOf, Policy::Bare),
    ("digit from", Op::DigitFrom, Policy::To),
    ("number from", Op::DigitFrom, Policy::To),
    ("letter from", Op::LetterFrom, Policy::To),
    ("uppercase letter from", Op::UppercaseLetterFrom, Policy::To),
    ("exactly", Op::Exactly, Policy::Times),
    ("at least", Op::AtLeast, Policy::Times),
    ("between", Op::Between, Policy::Spanning),
    ("capture", Op::Capture, Policy::Naming),
];

/// Resolves the phrase a segment starts with. Returns the method and the
/// byte length the phrase consumed, or `None` if no phrase matches.
pub fn method_match(segment: &str) -> Option<(Method, usize)> {
    let mut best: Option<(Method, usize)> = None;
    let mut best_words = 0;

    for &(phrase, op, policy) in PHRASES {
        let words = phrase.split(' ').count();
        if words <= best_words {
            continue;
        }
        if let Some(len) = phrase_prefix_len(segment, phrase) {
            best = Some((
                Method {
                    origin: phrase,
                    op,
                    policy,
                },
                len,
            ));
            best_words = words;
        }
    }

    best
}

/// Byte length of `phrase` matched at the start of `segment`, if the
/// phrase words appear in order, case-insensitively, separated by any
/// whitespace, and followed by whitespace or end of input.
fn phrase_prefix_len(segment: &str, phrase: &str) -> Option<usize> {
    let mut rest = segment;
    let mut consumed = 0;

    for (idx, word) in phrase.split(' ').enumerate() {
        if idx > 0 {
            let trimmed = rest.trim_start();
            let gap = rest.len() - trimmed.len();
            if gap == 0 {
                return None;
            }
            consumed += gap;
            rest = trimmed;
        }

        let head = rest.get(..word.len())?;
        if !head.eq_ignore_ascii_case(word) {
            return None;
        }
        consumed += word.len();
        rest = &rest[word.len()..];
    }

    match rest.chars().next() {
        None => Some(consumed),
        Some(c) if c.is_whitespace() => Some(consumed),
        Some(_) => None,
    }
}
