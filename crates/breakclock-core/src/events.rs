use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{LengthTarget, Phase};

/// Every accepted intent and every tick produces an Event.
/// Rejected intents (out-of-range or locked adjustments) produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    LengthAdjusted {
        target: LengthTarget,
        minutes: u32,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second elapsed without a phase change.
    Ticked {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown was consumed; the alert fired and the next phase began.
    PhaseSwitched {
        from: Phase,
        to: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
}

/// Everything the presentation layer needs to render the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub break_length: u32,
    pub session_length: u32,
    pub time_left_secs: u32,
    /// `time_left_secs` as `MM:SS`.
    pub time_left: String,
    pub phase: Phase,
    /// "Session" or "Break".
    pub label: String,
    pub is_running: bool,
    /// Label for the start/stop control: "Pause" while running, else "Start".
    pub control_label: String,
}
