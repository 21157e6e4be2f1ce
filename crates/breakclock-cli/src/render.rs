use breakclock_core::Snapshot;

pub const TITLE: &str = "25 + 5 Clock";

pub const HELP: &str =
    "commands: start|pause (s), reset (r), break+ break- session+ session-, status, quit (q)";

/// One-line view of the clock.
pub fn status_line(snap: &Snapshot) -> String {
    format!(
        "{:<7} {}  [{}]  break {}m  session {}m",
        snap.label,
        snap.time_left,
        if snap.is_running { "running" } else { "idle" },
        snap.break_length,
        snap.session_length,
    )
}

/// Printed when the phase label changes.
pub fn phase_banner(snap: &Snapshot) -> String {
    format!("── {} ──", snap.label)
}
