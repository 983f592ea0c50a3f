use crate::builder::Builder;
use crate::parser::exec::build_query;
use crate::parser::resolver::resolve;
use crate::parser::tokenizer::tokenize;
use crate::{Error, Result, SyntaxError};

fn run(query: &str) -> Result<Builder> {
    let tokens = resolve(tokenize(query)?);
    let mut builder = Builder::new();
    build_query(tokens, &mut builder)?;
    Ok(builder)
}

fn pattern(query: &str) -> String {
    run(query).unwrap().raw_pattern()
}

#[test]
fn parameterless_methods() {
    insta::assert_snapshot!(pattern("digit, letter, must end"), @r"[0-9][a-z]$");
    insta::assert_snapshot!(pattern("begin with any character once or more"), @r"^\w+");
}

#[test]
fn string_parameters() {
    insta::assert_snapshot!(pattern("literally \"colo\", optional \"u\", literally \"r\""), @r"(?:colo)(?:(?:u))?(?:r)");
}

#[test]
fn numeric_parameters() {
    insta::assert_snapshot!(pattern("digit from 0 to 8 once or more"), @r"[0-8]+");
    insta::assert_snapshot!(pattern("letter from a to f exactly 2 times"), @r"[a-f]{2}");
    insta::assert_snapshot!(pattern("digit between 3 and 5 times"), @r"[0-9]{3,5}");
}

#[test]
fn sub_query_parameters() {
    insta::assert_snapshot!(
        pattern("capture (digit from 0 to 8 once or more) if followed by \"foo\""),
        @r"([0-8]+)(?=(?:foo))"
    );
    insta::assert_snapshot!(
        pattern("any of (digit, letter, one of \"._%+-\")"),
        @r"(?:[0-9]|[a-z]|[\._%\+\-])"
    );
}

#[test]
fn standalone_groups_are_appended() {
    insta::assert_snapshot!(pattern("(literally \"foo\") twice"), @r"(?:(?:foo)){2}");
}

#[test]
fn trailing_group_recovery() {
    // "begin with" takes no parameters, so the group is split off, the
    // method retried bare, and the group appended afterwards.
    insta::assert_snapshot!(
        pattern("begin with (literally \"foo\", literally \"bar\") twice must end"),
        @r"^(?:(?:foo)(?:bar)){2}$"
    );

    // Here the group pushes "exactly" over its single-parameter limit.
    insta::assert_snapshot!(
        pattern("digit exactly 2 times (literally \"a\")"),
        @r"[0-9]{2}(?:(?:a))"
    );
}

#[test]
fn capture_names() {
    let mut builder = run("capture (letter once or more) as initials, digit").unwrap();
    let record = builder.first_match("ab1").unwrap().unwrap();
    assert_eq!(record.named.get("initials").map(String::as_str), Some("ab"));
}

#[test]
fn unexpected_statement() {
    assert_eq!(
        run("foo").unwrap_err(),
        Error::Syntax(SyntaxError::UnexpectedStatement("foo".to_owned()))
    );
}

#[test]
fn missing_parameter() {
    assert_eq!(
        run("digit from 0").unwrap_err(),
        Error::Syntax(SyntaxError::InvalidParameter("digit from".to_owned()))
    );
}

#[test]
fn sub_query_where_text_is_required() {
    assert_eq!(
        run("literally (digit)").unwrap_err(),
        Error::Syntax(SyntaxError::SubQueryNotAllowed("literally".to_owned()))
    );
}

#[test]
fn sequence_error_is_surfaced_as_syntax() {
    let err = run("optional").unwrap_err();
    assert!(matches!(err, Error::Syntax(SyntaxError::Sequence(_))));
}

#[test]
fn extra_string_parameters_are_ignored() {
    insta::assert_snapshot!(
        pattern("literally \"color:\", whitespace, capture (letter once or more), literally \".\", all"),
        @r"(?:color:)\s([a-z]+)(?:\.)"
    );
}
