use indoc::indoc;

use crate::interpreter::Interpreter;
use crate::{Result, srl};

#[test]
fn phrases_compose_into_patterns() -> Result<()> {
    let mut regex = srl("aNy Character ONCE or more literAlly \"fO/o\"")?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"\w+(?:fO\/o)");
    assert!(regex.is_match("xxxfO/o")?);

    let mut regex = srl(indoc! {r#"
        begin with literally "http", optional "s", literally "://", optional "www.",
        anything once or more, literally ".com", must end
    "#})?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"^(?:http)(?:(?:s))?(?::\/\/)(?:(?:www\.))?.+(?:\.com)$");
    assert!(regex.is_match("http://www.ebay.com")?);
    assert!(regex.is_match("https://google.com")?);
    assert!(!regex.is_match("htt://google.com")?);
    assert!(!regex.is_match("http://.com")?);

    let mut regex = srl("begin with capture (digit from 0 to 8 once or more) if followed by \"foo\"")?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"^([0-8]+)(?=(?:foo))");
    assert!(regex.is_match("142foo")?);
    assert!(!regex.is_match("149foo")?);
    assert!(!regex.is_match("14bar")?);
    assert_eq!(regex.first_match("142foo")?.unwrap().groups, vec!["142"]);

    let mut regex = srl("literally \"colo\", optional \"u\", literally \"r\"")?;
    assert!(regex.is_match("color")?);
    assert!(regex.is_match("colour")?);

    let mut regex = srl("starts with number from 0 to 5 between 3 and 5 times, must end")?;
    assert!(regex.is_match("015")?);
    assert!(regex.is_match("44444")?);
    assert!(!regex.is_match("444444")?);
    assert!(!regex.is_match("1")?);
    assert!(!regex.is_match("563")?);

    let mut regex = srl("starts with digit exactly 2 times, letter at least 3 time")?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"^[0-9]{2}[a-z]{3,}");
    assert!(regex.is_match("12abc")?);
    assert!(regex.is_match("12abcd")?);
    assert!(!regex.is_match("123abc")?);
    assert!(!regex.is_match("1a")?);
    assert!(!regex.is_match("")?);
    Ok(())
}

#[test]
fn email() -> Result<()> {
    let mut regex = srl(indoc! {r#"
        begin with any of (digit, letter, one of "._%+-") once or more,
        literally "@", either of (digit, letter, one of ".-") once or more, literally ".",
        letter at least 2, must end, case insensitive
    "#})?;

    assert!(regex.is_match("sample@example.com")?);
    assert!(regex.is_match("super-He4vy.add+ress@top-Le.ve1.domains")?);
    assert!(!regex.is_match("sample.example.com")?);
    assert!(!regex.is_match("missing@tld")?);
    assert!(!regex.is_match("hav ing@spac.es")?);
    assert!(!regex.is_match("no@pe.123")?);
    assert!(!regex.is_match("invalid@email.com123")?);
    Ok(())
}

#[test]
fn capture_group_across_all_matches() -> Result<()> {
    let mut regex =
        srl("literally \"color:\", whitespace, capture (letter once or more), literally \".\", all")?;

    let target = "Favorite color: green. Another color: yellow.";
    let found: Vec<String> = regex
        .all_matches(target)?
        .into_iter()
        .map(|record| record.groups[0].clone())
        .collect();

    assert_eq!(found, vec!["green", "yellow"]);
    Ok(())
}

#[test]
fn named_capture_without_a_match() -> Result<()> {
    let mut regex = srl("capture (literally \"TEST\") as test")?;
    assert_eq!(regex.first_match("WORD NOT HERE")?, None);
    Ok(())
}

#[test]
fn parenthesized_sub_queries() -> Result<()> {
    let mut regex = srl("begin with (literally \"foo\", literally \"bar\") twice must end")?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"^(?:(?:foo)(?:bar)){2}$");
    assert!(regex.is_match("foobarfoobar")?);
    assert!(!regex.is_match("foobar")?);

    let mut regex =
        srl("begin with literally \"bar\", (literally \"foo\", literally \"bar\") twice must end")?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"^(?:bar)(?:(?:foo)(?:bar)){2}$");
    assert!(regex.is_match("barfoobarfoobar")?);

    let mut regex = srl("(literally \"foo\") twice")?;
    insta::assert_snapshot!(regex.raw_pattern(), @r"(?:(?:foo)){2}");
    assert!(regex.is_match("foofoo")?);
    assert!(!regex.is_match("foo")?);
    Ok(())
}

#[test]
fn numeric_quantifiers_with_optional_groups() -> Result<()> {
    let mut query = srl("digit, exactly 5 times, (letter, twice) optional")?;
    assert!(query.is_match("12345")?);
    assert!(query.is_match("12345aa")?);

    let mut query =
        srl("begin with, digit, exactly 5 times, ( literally '-', digit, exactly 4 times ), optional, must end")?;
    assert!(query.is_match("12345-1234")?);
    Ok(())
}

#[test]
fn phone_number_phrase() -> Result<()> {
    let mut regex = srl(
        "starts with, literally \"+\", digit between 1 and 3, literally \" \", \
         digit between 3 and 4, literally \"-\", digit once or more, must end",
    )?;
    assert!(regex.is_match("+49 123-45")?);
    assert!(!regex.is_match("+49 123 45")?);
    Ok(())
}

#[test]
fn query_normalization() -> Result<()> {
    let interpreter = Interpreter::new("  literally \"a\";  ")?;
    assert_eq!(interpreter.raw_query(), "literally \"a\"");

    // Only one trailing semicolon is stripped.
    let interpreter = Interpreter::new("literally \"a\";;")?;
    assert_eq!(interpreter.raw_query(), "literally \"a\";");
    Ok(())
}
