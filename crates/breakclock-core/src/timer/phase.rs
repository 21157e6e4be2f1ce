use serde::{Deserialize, Serialize};

/// Shortest configurable phase length, in minutes.
pub const MIN_LENGTH_MIN: u32 = 1;
/// Longest configurable phase length, in minutes.
pub const MAX_LENGTH_MIN: u32 = 60;
pub const DEFAULT_BREAK_MIN: u32 = 5;
pub const DEFAULT_SESSION_MIN: u32 = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Session,
    Break,
}

impl Phase {
    /// The phase that follows this one. Phases strictly alternate.
    pub fn next(self) -> Self {
        match self {
            Phase::Session => Phase::Break,
            Phase::Break => Phase::Session,
        }
    }

    /// Display label shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Session => "Session",
            Phase::Break => "Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which configured length an adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthTarget {
    Break,
    Session,
}

/// Apply `delta` to `current` minutes, returning the new length only if it
/// stays within `[MIN_LENGTH_MIN, MAX_LENGTH_MIN]`.
///
/// Out-of-range results are rejected rather than saturated.
pub fn adjusted_length(current: u32, delta: i32) -> Option<u32> {
    let next = i64::from(current) + i64::from(delta);
    if (i64::from(MIN_LENGTH_MIN)..=i64::from(MAX_LENGTH_MIN)).contains(&next) {
        u32::try_from(next).ok()
    } else {
        None
    }
}

/// Phase length in seconds.
pub fn length_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}
