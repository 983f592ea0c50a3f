//! The fluent expression builder.
//!
//! A builder is a list of pattern fragments plus a group template (prefix,
//! suffix, join string), a modifier string, a capture-name table and the
//! current grammar state. Group operations run against a fresh builder
//! configured with the right template, then splice its rendered pattern in
//! as a single fragment. Compilation is lazy and cached; any structural
//! mutation drops the cache.

mod state;


use std::fmt;

use crate::expression::{Expression, MatchRecord};
use crate::{BuilderError, Result, SequenceError};

pub use state::State;
use state::{AFTER_ANY, AFTER_CONTENT, AFTER_QUANTIFIABLE, AT_BEGIN};

/// Characters that must be escaped inside a pattern fragment.
const NON_LITERAL: &str = "[\\^$.|?*+()/";

/// Tail characters after which laziness applies.
const QUANTIFIER_TAILS: &str = "+*}?";

/// Group template wrapped around the joined fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wrap {
    prefix: &'static str,
    suffix: &'static str,
}

impl Wrap {
    const NONE: Wrap = Wrap { prefix: "", suffix: "" };
    const NON_CAPTURE: Wrap = Wrap { prefix: "(?:", suffix: ")" };
    const CAPTURE: Wrap = Wrap { prefix: "(", suffix: ")" };
    const LOOKAHEAD: Wrap = Wrap { prefix: "(?=", suffix: ")" };
    const NEGATIVE_LOOKAHEAD: Wrap = Wrap { prefix: "(?!", suffix: ")" };
    const OPTIONAL: Wrap = Wrap { prefix: "(?:", suffix: ")?" };
}

/// What a group operation accepts: literal text, a prebuilt pattern
/// (spliced raw), or a deferred closure receiving the scoped builder.
pub enum Conditions {
    Literal(String),
    Pattern(String),
    Deferred(Box<dyn FnOnce(&mut Builder) -> Result<()>>),
}

impl Conditions {
    /// Defers building to a closure invoked with the scoped builder.
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(&mut Builder) -> Result<()> + 'static,
    {
        Conditions::Deferred(Box::new(f))
    }
}

impl From<&str> for Conditions {
    fn from(text: &str) -> Self {
        Conditions::Literal(text.to_owned())
    }
}

impl From<String> for Conditions {
    fn from(text: String) -> Self {
        Conditions::Literal(text)
    }
}

impl From<&Builder> for Conditions {
    fn from(builder: &Builder) -> Self {
        Conditions::Pattern(builder.raw_pattern())
    }
}

impl From<Builder> for Conditions {
    fn from(builder: Builder) -> Self {
        Conditions::Pattern(builder.raw_pattern())
    }
}

impl fmt::Debug for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conditions::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Conditions::Pattern(s) => f.debug_tuple("Pattern").field(s).finish(),
            Conditions::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[derive(Debug)]
pub struct Builder {
    fragments: Vec<String>,
    modifiers: String,
    last_state: State,
    group: Wrap,
    join: &'static str,
    capture_names: Vec<Option<String>>,
    compiled: Option<Expression>,
}

impl Builder {
    pub fn new() -> Self {
        Self::scoped(Wrap::NONE, "")
    }

    /// A builder whose rendered pattern is wrapped non-capturing, used for
    /// sub-queries and group folding.
    pub(crate) fn non_capturing() -> Self {
        Self::scoped(Wrap::NON_CAPTURE, "")
    }

    fn scoped(group: Wrap, join: &'static str) -> Self {
        Self {
            fragments: Vec::new(),
            modifiers: "g".to_owned(),
            last_state: State::Begin,
            group,
            join,
            capture_names: Vec::new(),
            compiled: None,
        }
    }

    /*
     * Characters
     */

    /// Matches this text exactly, with metacharacters escaped.
    pub fn literally(&mut self, chars: &str) -> Result<&mut Self> {
        self.ensure("literally", AFTER_ANY, State::Character)?;
        let escaped = escape(chars);
        self.push(format!("(?:{escaped})"));
        Ok(self)
    }

    /// Matches any single one of the given characters.
    pub fn one_of(&mut self, chars: &str) -> Result<&mut Self> {
        self.ensure("one_of", AFTER_ANY, State::Character)?;
        let set = character_set(chars);
        self.push(format!("[{set}]"));
        Ok(self)
    }

    /// Matches any single character that is not one of the given characters.
    pub fn none_of(&mut self, chars: &str) -> Result<&mut Self> {
        self.ensure("none_of", AFTER_ANY, State::Character)?;
        let set = character_set(chars);
        self.push(format!("[^{set}]"));
        Ok(self)
    }

    pub fn digit(&mut self) -> Result<&mut Self> {
        self.digit_from(0, 9)
    }

    /// Matches a digit in the given inclusive span.
    pub fn digit_from(&mut self, min: u32, max: u32) -> Result<&mut Self> {
        self.ensure("digit", AFTER_ANY, State::Character)?;
        self.push(format!("[{min}-{max}]"));
        Ok(self)
    }

    pub fn no_digit(&mut self) -> Result<&mut Self> {
        self.ensure("no_digit", AFTER_ANY, State::Character)?;
        self.push("[^0-9]".to_owned());
        Ok(self)
    }

    pub fn letter(&mut self) -> Result<&mut Self> {
        self.letter_from('a', 'z')
    }

    /// Matches a lowercase letter in the given inclusive span.
    pub fn letter_from(&mut self, min: char, max: char) -> Result<&mut Self> {
        self.ensure("letter", AFTER_ANY, State::Character)?;
        self.push(format!("[{min}-{max}]"));
        Ok(self)
    }

    pub fn uppercase_letter(&mut self) -> Result<&mut Self> {
        self.uppercase_letter_from('A', 'Z')
    }

    /// Matches an uppercase letter in the given inclusive span.
    pub fn uppercase_letter_from(&mut self, min: char, max: char) -> Result<&mut Self> {
        self.ensure("uppercase_letter", AFTER_ANY, State::Character)?;
        self.push(format!("[{min}-{max}]"));
        Ok(self)
    }

    pub fn any(&mut self) -> Result<&mut Self> {
        self.token("any", ".", AFTER_ANY, State::Character)
    }

    pub fn backslash(&mut self) -> Result<&mut Self> {
        self.token("backslash", "\\\\", AFTER_ANY, State::Character)
    }

    pub fn tab(&mut self) -> Result<&mut Self> {
        self.token("tab", "\\t", AFTER_ANY, State::Character)
    }

    pub fn vertical_tab(&mut self) -> Result<&mut Self> {
        self.token("vertical_tab", "\\v", AFTER_ANY, State::Character)
    }

    pub fn new_line(&mut self) -> Result<&mut Self> {
        self.token("new_line", "\\n", AFTER_ANY, State::Character)
    }

    pub fn carriage_return(&mut self) -> Result<&mut Self> {
        self.token("carriage_return", "\\r", AFTER_ANY, State::Character)
    }

    pub fn whitespace(&mut self) -> Result<&mut Self> {
        self.token("whitespace", "\\s", AFTER_ANY, State::Character)
    }

    pub fn no_whitespace(&mut self) -> Result<&mut Self> {
        self.token("no_whitespace", "\\S", AFTER_ANY, State::Character)
    }

    /// Matches any word character (`\w`).
    pub fn any_character(&mut self) -> Result<&mut Self> {
        self.token("any_character", "\\w", AFTER_ANY, State::Character)
    }

    /// Matches any non-word character (`\W`).
    pub fn no_character(&mut self) -> Result<&mut Self> {
        self.token("no_character", "\\W", AFTER_ANY, State::Character)
    }

    /// Word boundary. Only valid at the start of an expression.
    pub fn word(&mut self) -> Result<&mut Self> {
        self.token("word", "\\b", AT_BEGIN, State::Character)
    }

    /// Non-word boundary. Only valid at the start of an expression.
    pub fn non_word(&mut self) -> Result<&mut Self> {
        self.token("non_word", "\\B", AT_BEGIN, State::Character)
    }

    /*
     * Anchors
     */

    pub fn starts_with(&mut self) -> Result<&mut Self> {
        self.token("starts_with", "^", AT_BEGIN, State::Anchor)
    }

    pub fn must_end(&mut self) -> Result<&mut Self> {
        self.token("must_end", "$", AFTER_CONTENT, State::Anchor)
    }

    /*
     * Groups
     */

    /// Matches any one of the given conditions (alternation).
    pub fn any_of(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("any_of", AFTER_ANY, State::Group)?;
        self.splice(Wrap::NON_CAPTURE, "|", conditions.into())
    }

    /// Matches all of the given conditions in a non-capturing group.
    pub fn group(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("group", AFTER_ANY, State::Group)?;
        self.splice(Wrap::NON_CAPTURE, "", conditions.into())
    }

    /// Appends the given conditions without any wrapping.
    pub fn and(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("and", AFTER_ANY, State::Group)?;
        self.splice(Wrap::NONE, "", conditions.into())
    }

    /// Positive lookahead on the given conditions.
    pub fn if_followed_by(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("if_followed_by", AFTER_ANY, State::Group)?;
        self.splice(Wrap::LOOKAHEAD, "", conditions.into())
    }

    /// Negative lookahead on the given conditions.
    pub fn if_not_followed_by(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("if_not_followed_by", AFTER_ANY, State::Group)?;
        self.splice(Wrap::NEGATIVE_LOOKAHEAD, "", conditions.into())
    }

    /// Unnamed capture group of the given conditions.
    pub fn capture(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("capture", AFTER_ANY, State::Group)?;
        self.capture_names.push(None);
        self.splice(Wrap::CAPTURE, "", conditions.into())
    }

    /// Named capture group of the given conditions.
    pub fn capture_as(
        &mut self,
        conditions: impl Into<Conditions>,
        name: &str,
    ) -> Result<&mut Self> {
        self.ensure("capture", AFTER_ANY, State::Group)?;
        self.capture_names.push(Some(name.to_owned()));
        self.splice(Wrap::CAPTURE, "", conditions.into())
    }

    /*
     * Quantifiers
     */

    /// Makes the previous condition optional.
    pub fn optional(&mut self) -> Result<&mut Self> {
        self.token("optional", "?", AFTER_QUANTIFIABLE, State::Quantifier)
    }

    /// Matches the given conditions zero or one time.
    pub fn optionally(&mut self, conditions: impl Into<Conditions>) -> Result<&mut Self> {
        self.ensure("optional", AFTER_QUANTIFIABLE, State::Quantifier)?;
        self.splice(Wrap::OPTIONAL, "", conditions.into())
    }

    pub fn once_or_more(&mut self) -> Result<&mut Self> {
        self.token("once_or_more", "+", AFTER_QUANTIFIABLE, State::Quantifier)
    }

    pub fn never_or_more(&mut self) -> Result<&mut Self> {
        self.token("never_or_more", "*", AFTER_QUANTIFIABLE, State::Quantifier)
    }

    pub fn between(&mut self, min: u32, max: u32) -> Result<&mut Self> {
        self.ensure("between", AFTER_QUANTIFIABLE, State::Quantifier)?;
        self.push(format!("{{{min},{max}}}"));
        Ok(self)
    }

    pub fn at_least(&mut self, min: u32) -> Result<&mut Self> {
        self.ensure("at_least", AFTER_QUANTIFIABLE, State::Quantifier)?;
        self.push(format!("{{{min},}}"));
        Ok(self)
    }

    pub fn exactly(&mut self, count: u32) -> Result<&mut Self> {
        self.ensure("exactly", AFTER_QUANTIFIABLE, State::Quantifier)?;
        self.push(format!("{{{count}}}"));
        Ok(self)
    }

    pub fn once(&mut self) -> Result<&mut Self> {
        self.exactly(1)
    }

    pub fn twice(&mut self) -> Result<&mut Self> {
        self.exactly(2)
    }

    /// Makes the previous quantifier lazy. When the pattern currently ends
    /// with a group whose content ends in a quantifier, the laziness is
    /// applied inside that group.
    pub fn lazy(&mut self) -> Result<&mut Self> {
        let raw = self.raw_pattern();
        let was_group = self.last_state == State::Group;
        self.last_state = State::Quantifier;

        let mut tail = raw.chars().rev();
        let last = tail.next();
        let before = tail.next();
        match (last, before) {
            (Some(c), _) if QUANTIFIER_TAILS.contains(c) => {
                self.push("?".to_owned());
                Ok(self)
            }
            (Some(')'), Some(b)) if QUANTIFIER_TAILS.contains(b) => {
                match self.fragments.pop() {
                    Some(mut fragment) if was_group => {
                        // reopen the group and make its inner quantifier lazy
                        fragment.pop();
                        fragment.push_str("?)");
                        self.push(fragment);
                    }
                    Some(fragment) => {
                        self.fragments.push(fragment);
                        self.push("?".to_owned());
                    }
                    None => self.push("?".to_owned()),
                }
                Ok(self)
            }
            _ => Err(SequenceError::LazyNotApplicable.into()),
        }
    }

    /// Matches lazily up to the given condition.
    pub fn until(&mut self, to_condition: impl Into<Conditions>) -> Result<&mut Self> {
        self.lazy()?;
        self.ensure("until", AFTER_ANY, State::Group)?;
        self.splice(Wrap::NONE, "", to_condition.into())
    }

    /*
     * Raw patterns
     */

    /// Appends an already-written pattern fragment. The fragment must leave
    /// the whole expression compilable, otherwise it is reverted.
    pub fn raw(&mut self, pattern: &str) -> Result<&mut Self> {
        let previous = self.last_state;
        self.last_state = State::Unknown;
        self.push(pattern.to_owned());

        if self.try_compile().is_err() {
            self.fragments.pop();
            self.compiled = None;
            self.last_state = previous;
            return Err(BuilderError::RawRejected.into());
        }

        Ok(self)
    }

    /// Appends the pattern of an already-compiled regex.
    pub fn raw_regex(&mut self, regex: &fancy_regex::Regex) -> Result<&mut Self> {
        let source = regex.as_str().to_owned();
        self.raw(&source)
    }

    /*
     * Modifiers
     */

    pub fn case_insensitive(&mut self) -> &mut Self {
        self.add_unique_modifier('i')
    }

    pub fn multi_line(&mut self) -> &mut Self {
        self.add_unique_modifier('m')
    }

    pub fn remove_modifier(&mut self, flag: char) -> &mut Self {
        self.modifiers.retain(|c| c != flag);
        self.compiled = None;
        self
    }

    pub fn modifiers(&self) -> &str {
        &self.modifiers
    }

    /*
     * Compilation and matching
     */

    /// The pattern text as built so far, with the group template applied.
    pub fn raw_pattern(&self) -> String {
        format!(
            "{}{}{}",
            self.group.prefix,
            self.fragments.join(self.join),
            self.group.suffix
        )
    }

    /// Compiles the expression, reusing the cached result when nothing
    /// changed since the last compile.
    pub fn compile(&mut self) -> Result<&Expression> {
        let expr = match self.compiled.take() {
            Some(expr) => expr,
            None => Expression::compile(
                &self.raw_pattern(),
                &self.modifiers,
                self.capture_names.clone(),
            )?,
        };
        Ok(self.compiled.insert(expr))
    }

    pub fn is_match(&mut self, text: &str) -> Result<bool> {
        self.compile()?.is_match(text)
    }

    pub fn first_match(&mut self, text: &str) -> Result<Option<MatchRecord>> {
        self.compile()?.first_match(text)
    }

    pub fn all_matches(&mut self, text: &str) -> Result<Vec<MatchRecord>> {
        self.compile()?.all_matches(text)
    }

    /*
     * Internals
     */

    fn token(
        &mut self,
        op: &'static str,
        fragment: &str,
        allowed: &'static [State],
        next: State,
    ) -> Result<&mut Self> {
        self.ensure(op, allowed, next)?;
        self.push(fragment.to_owned());
        Ok(self)
    }

    /// Rejects the call if the current state does not permit it, and
    /// transitions to `next` otherwise. `Unknown` permits everything.
    fn ensure(&mut self, op: &'static str, allowed: &'static [State], next: State) -> Result<()> {
        if self.last_state == State::Unknown || allowed.contains(&self.last_state) {
            self.last_state = next;
            return Ok(());
        }
        Err(SequenceError::NotAllowed {
            op,
            context: self.last_state.context(),
        }
        .into())
    }

    /// Builds the conditions inside a fresh builder carrying `wrap`/`join`
    /// and appends its rendered pattern as one fragment. Capture names
    /// declared inside keep their group order.
    fn splice(&mut self, wrap: Wrap, join: &'static str, conditions: Conditions) -> Result<&mut Self> {
        let mut scoped = Builder::scoped(wrap, join);
        match conditions {
            Conditions::Literal(text) => {
                scoped.literally(&text)?;
            }
            Conditions::Pattern(pattern) => {
                scoped.raw(&pattern)?;
            }
            Conditions::Deferred(build) => {
                build(&mut scoped)?;
            }
        }
        self.capture_names.append(&mut scoped.capture_names);
        self.push(scoped.raw_pattern());
        Ok(self)
    }

    fn push(&mut self, fragment: String) {
        self.compiled = None;
        self.fragments.push(fragment);
    }

    fn add_unique_modifier(&mut self, modifier: char) -> &mut Self {
        self.compiled = None;
        if !self.modifiers.contains(modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    fn try_compile(&mut self) -> Result<()> {
        self.compile().map(|_| ())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Builder {
    fn clone(&self) -> Self {
        Self {
            fragments: self.fragments.clone(),
            modifiers: self.modifiers.clone(),
            last_state: self.last_state,
            group: self.group,
            join: self.join,
            capture_names: self.capture_names.clone(),
            compiled: None,
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if NON_LITERAL.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escaped characters for use inside a `[…]` set, where `-` and `]` need
/// escaping as well.
fn character_set(chars: &str) -> String {
    escape(chars).replace('-', "\\-").replace(']', "\\]")
}
