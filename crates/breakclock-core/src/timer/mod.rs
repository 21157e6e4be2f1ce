mod engine;
mod format;
mod phase;

pub use engine::{RunState, TickKey, TimerEngine};
pub use format::format_mm_ss;
pub use phase::{
    adjusted_length, length_secs, LengthTarget, Phase, DEFAULT_BREAK_MIN, DEFAULT_SESSION_MIN,
    MAX_LENGTH_MIN, MIN_LENGTH_MIN,
};
