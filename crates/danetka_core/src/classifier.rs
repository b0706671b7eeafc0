//! Classification of free-text host replies.
//!
//! Model output formatting is not controllable, so replies are normalized
//! (trimmed, lower-cased, punctuation stripped) and matched against an ordered
//! table of trigger phrases. The first matching phrase decides the outcome.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, instrument};

/// Classified meaning of one host reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The host answered yes.
    Yes,
    /// The host answered no.
    No,
    /// The player guessed the solution.
    Win,
    /// The host gave the solution away.
    RevealSolution,
    /// The question could not be answered with yes or no.
    Invalid,
}

impl Outcome {
    /// Returns `true` if this outcome ends the round.
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Win | Outcome::RevealSolution)
    }
}

/// Trigger phrases in priority order.
///
/// A reply may contain several phrases ("the solution is ... yes"), so order
/// is the tie-break: reveal beats win, win beats yes, yes beats no.
pub const TRIGGERS: &[(&str, Outcome)] = &[
    ("the solution is", Outcome::RevealSolution),
    ("you won", Outcome::Win),
    ("yes", Outcome::Yes),
    ("no", Outcome::No),
];

/// Line prefix marking hint metadata in a host reply.
pub const HINT_MARKER: &str = "hint:";

/// Normalizes a reply for matching: trim, lower-case, drop punctuation.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Classifies a raw host reply. Total: unmatched text is [`Outcome::Invalid`].
#[instrument(skip(raw), fields(len = raw.len()))]
pub fn classify(raw: &str) -> Outcome {
    let normalized = normalize(raw);
    let outcome = TRIGGERS
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
        .map_or(Outcome::Invalid, |(_, outcome)| *outcome);
    debug!(%outcome, "Classified host reply");
    outcome
}

/// Extracts hint text from a host reply.
///
/// A hint is the remainder of the first line that starts with `hint:`
/// (case-insensitive). Blank hints are ignored.
pub fn extract_hint(raw: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let line = line.trim();
        let prefix = line.get(..HINT_MARKER.len())?;
        if !prefix.eq_ignore_ascii_case(HINT_MARKER) {
            return None;
        }
        let hint = line[HINT_MARKER.len()..].trim();
        (!hint.is_empty()).then(|| hint.to_string())
    })
}
