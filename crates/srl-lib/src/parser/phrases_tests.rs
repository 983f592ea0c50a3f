use crate::parser::phrases::{Op, method_match};

fn op_and_len(segment: &str) -> Option<(Op, usize)> {
    method_match(segment).map(|(method, len)| (method.op, len))
}

#[test]
fn single_word_phrases() {
    assert_eq!(op_and_len("digit"), Some((Op::Digit, 5)));
    assert_eq!(op_and_len("literally \"foo\""), Some((Op::Literally, 9)));
    assert_eq!(op_and_len("twice"), Some((Op::Twice, 5)));
}

#[test]
fn longest_phrase_wins() {
    // "any character" over "anything", "once or more" over "once".
    assert_eq!(op_and_len("any character"), Some((Op::AnyCharacter, 13)));
    assert_eq!(op_and_len("once or more"), Some((Op::OnceOrMore, 12)));
    assert_eq!(op_and_len("once more"), Some((Op::Once, 4)));
    assert_eq!(
        op_and_len("uppercase letter from a to z"),
        Some((Op::UppercaseLetterFrom, 21))
    );
    assert_eq!(op_and_len("uppercase"), Some((Op::UppercaseLetter, 9)));
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(op_and_len("aNy Character"), Some((Op::AnyCharacter, 13)));
    assert_eq!(op_and_len("LITERALLY"), Some((Op::Literally, 9)));
}

#[test]
fn phrase_words_allow_whitespace_runs() {
    assert_eq!(op_and_len("starts   with"), Some((Op::StartsWith, 13)));
    assert_eq!(op_and_len("if  not  followed  by x"), Some((Op::IfNotFollowedBy, 21)));
}

#[test]
fn match_requires_word_boundary() {
    assert_eq!(op_and_len("oncex"), None);
    assert_eq!(op_and_len("digits"), None);
    assert_eq!(op_and_len("wordy"), None);
}

#[test]
fn aliases() {
    assert_eq!(op_and_len("begin with"), Some((Op::StartsWith, 10)));
    assert_eq!(op_and_len("either of (a, b)"), Some((Op::AnyOf, 9)));
    assert_eq!(op_and_len("number from 0 to 9"), Some((Op::DigitFrom, 11)));
    assert_eq!(op_and_len("number"), Some((Op::Digit, 6)));
    assert_eq!(op_and_len("nondigit"), Some((Op::NoDigit, 8)));
    assert_eq!(op_and_len("no word"), Some((Op::NonWord, 7)));
}

#[test]
fn unknown_segments() {
    assert_eq!(op_and_len("foobar"), None);
    assert_eq!(op_and_len("5 times"), None);
    assert_eq!(op_and_len(""), None);
}
