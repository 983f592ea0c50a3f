//! Grammar states for the fluent builder.
//!
//! Every operation declares which states it may follow and which state it
//! leaves the builder in. `Unknown` is what `raw()` leaves behind: anything
//! may follow it, since the fragment's shape is opaque.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Begin,
    Character,
    Group,
    Quantifier,
    Anchor,
    Unknown,
}

impl State {
    /// Position description used in sequencing failures.
    pub(crate) fn context(self) -> &'static str {
        match self {
            State::Begin => "at the beginning",
            State::Character => "after a literal character",
            State::Group => "after a group",
            State::Quantifier => "after a quantifier",
            State::Anchor => "after an anchor",
            State::Unknown => "here",
        }
    }
}

/// Any position at all.
pub(crate) const AFTER_ANY: &[State] = &[
    State::Begin,
    State::Character,
    State::Group,
    State::Quantifier,
    State::Anchor,
];

/// Only at the very start of the expression.
pub(crate) const AT_BEGIN: &[State] = &[State::Begin];

/// After something a quantifier can repeat.
pub(crate) const AFTER_QUANTIFIABLE: &[State] = &[State::Character, State::Group];

/// After anything that produces matchable content.
pub(crate) const AFTER_CONTENT: &[State] = &[State::Character, State::Quantifier, State::Group];
