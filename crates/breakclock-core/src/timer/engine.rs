//! Timer engine implementation.
//!
//! The timer engine is a discrete state machine. It does not read the wall
//! clock and does not spawn anything - the [`TickScheduler`] (or a test)
//! calls `tick()` once per elapsed second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --toggle--> Running --toggle/reset--> Idle
//! Running --tick--> Running            (phase flips when the countdown is consumed)
//! ```
//!
//! ## Usage
//!
//! ```
//! use breakclock_core::{SilentAlert, TimerEngine};
//!
//! let mut engine = TimerEngine::new(SilentAlert);
//! engine.toggle_running();
//! engine.tick();
//! assert_eq!(engine.formatted_time_left(), "24:59");
//! ```
//!
//! [`TickScheduler`]: crate::scheduler::TickScheduler

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::format::format_mm_ss;
use super::phase::{
    adjusted_length, length_secs, LengthTarget, Phase, DEFAULT_BREAK_MIN, DEFAULT_SESSION_MIN,
};
use crate::alert::Alert;
use crate::events::{Event, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

/// The fields a pending tick depends on.
///
/// Whenever this changes the scheduler drops its pending tick and arms a
/// fresh one, so a tick never acts on a superseded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickKey {
    pub running: bool,
    pub time_left_secs: u32,
    pub phase: Phase,
    pub break_length: u32,
    pub session_length: u32,
}

/// Core timer engine.
///
/// Owns the whole timer state plus the alert handle that is played on
/// every phase switch.
pub struct TimerEngine<A> {
    break_length: u32,
    session_length: u32,
    /// Seconds remaining in the current phase.
    time_left_secs: u32,
    phase: Phase,
    running: bool,
    alert: A,
}

impl<A: Alert> TimerEngine<A> {
    /// Create an idle engine at the default 25/5 lengths, Session first.
    pub fn new(alert: A) -> Self {
        Self {
            break_length: DEFAULT_BREAK_MIN,
            session_length: DEFAULT_SESSION_MIN,
            time_left_secs: length_secs(DEFAULT_SESSION_MIN),
            phase: Phase::Session,
            running: false,
            alert,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn break_length(&self) -> u32 {
        self.break_length
    }

    pub fn session_length(&self) -> u32 {
        self.session_length
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run_state(&self) -> RunState {
        if self.running {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Configured length of `phase`, in minutes.
    pub fn length_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Session => self.session_length,
            Phase::Break => self.break_length,
        }
    }

    pub fn formatted_time_left(&self) -> String {
        format_mm_ss(self.time_left_secs)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = length_secs(self.length_of(self.phase));
        if total == 0 {
            return 0.0;
        }
        (1.0 - f64::from(self.time_left_secs) / f64::from(total)).clamp(0.0, 1.0)
    }

    pub fn tick_key(&self) -> TickKey {
        TickKey {
            running: self.running,
            time_left_secs: self.time_left_secs,
            phase: self.phase,
            break_length: self.break_length,
            session_length: self.session_length,
        }
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    /// Presentation view of the current state.
    pub fn view(&self) -> Snapshot {
        Snapshot {
            break_length: self.break_length,
            session_length: self.session_length,
            time_left_secs: self.time_left_secs,
            time_left: self.formatted_time_left(),
            phase: self.phase,
            label: self.phase.label().to_string(),
            is_running: self.running,
            control_label: if self.running { "Pause" } else { "Start" }.to_string(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.view(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the break length by `delta` minutes.
    ///
    /// Ignored while running, and ignored when the result would leave
    /// `1..=60`. Never touches the countdown.
    pub fn adjust_break_length(&mut self, delta: i32) -> Option<Event> {
        if self.running {
            return None;
        }
        let minutes = adjusted_length(self.break_length, delta)?;
        self.break_length = minutes;
        debug!(minutes, "break length adjusted");
        Some(Event::LengthAdjusted {
            target: LengthTarget::Break,
            minutes,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Change the session length by `delta` minutes.
    ///
    /// Same guards as [`adjust_break_length`](Self::adjust_break_length).
    /// An accepted change also restarts the countdown at the new session
    /// length, whichever phase is current.
    pub fn adjust_session_length(&mut self, delta: i32) -> Option<Event> {
        if self.running {
            return None;
        }
        let minutes = adjusted_length(self.session_length, delta)?;
        self.session_length = minutes;
        self.time_left_secs = length_secs(minutes);
        debug!(minutes, phase = %self.phase, "session length adjusted");
        Some(Event::LengthAdjusted {
            target: LengthTarget::Session,
            minutes,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Start or pause. Remaining time is kept as-is in both directions.
    pub fn toggle_running(&mut self) -> Option<Event> {
        self.running = !self.running;
        debug!(running = self.running, time_left = self.time_left_secs, "toggled");
        let at = Utc::now();
        Some(if self.running {
            Event::TimerStarted {
                phase: self.phase,
                time_left_secs: self.time_left_secs,
                at,
            }
        } else {
            Event::TimerPaused {
                phase: self.phase,
                time_left_secs: self.time_left_secs,
                at,
            }
        })
    }

    /// Stop, restore defaults, and silence any alert in progress.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.phase = Phase::Session;
        self.break_length = DEFAULT_BREAK_MIN;
        self.session_length = DEFAULT_SESSION_MIN;
        self.time_left_secs = length_secs(DEFAULT_SESSION_MIN);
        self.alert.pause();
        self.alert.seek_to_start();
        debug!("timer reset");
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance one second. Returns `None` when idle.
    ///
    /// When this tick consumes the countdown the alert plays and the next
    /// phase starts at its full length in the same call, so the remaining
    /// time never goes negative.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            trace!(time_left = self.time_left_secs, "tick");
            return Some(Event::Ticked {
                phase: self.phase,
                time_left_secs: self.time_left_secs,
                at: Utc::now(),
            });
        }
        Some(self.switch_phase())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn switch_phase(&mut self) -> Event {
        if let Err(err) = self.alert.play() {
            warn!(error = %err, "alert playback failed");
        }
        let from = self.phase;
        self.phase = from.next();
        self.time_left_secs = length_secs(self.length_of(self.phase));
        info!(%from, to = %self.phase, time_left = self.time_left_secs, "phase switched");
        Event::PhaseSwitched {
            from,
            to: self.phase,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        }
    }
}

impl<A: Alert + Default> Default for TimerEngine<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<A> std::fmt::Debug for TimerEngine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("break_length", &self.break_length)
            .field("session_length", &self.session_length)
            .field("time_left_secs", &self.time_left_secs)
            .field("phase", &self.phase)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlertError;

    #[derive(Debug, Default)]
    struct CountingAlert {
        plays: usize,
        pauses: usize,
        rewinds: usize,
        fail: bool,
    }

    impl Alert for CountingAlert {
        fn play(&mut self) -> Result<(), AlertError> {
            self.plays += 1;
            if self.fail {
                Err(AlertError::Unavailable)
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn seek_to_start(&mut self) {
            self.rewinds += 1;
        }
    }

    fn engine() -> TimerEngine<CountingAlert> {
        TimerEngine::new(CountingAlert::default())
    }

    #[test]
    fn starts_idle_at_defaults() {
        let engine = engine();
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.phase(), Phase::Session);
        assert_eq!(engine.break_length(), 5);
        assert_eq!(engine.session_length(), 25);
        assert_eq!(engine.time_left_secs(), 1500);
    }

    #[test]
    fn tick_is_ignored_while_idle() {
        let mut engine = engine();
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left_secs(), 1500);
    }

    #[test]
    fn tick_decrements_by_one() {
        let mut engine = engine();
        engine.toggle_running();
        assert!(matches!(
            engine.tick(),
            Some(Event::Ticked {
                time_left_secs: 1499,
                ..
            })
        ));
        assert_eq!(engine.formatted_time_left(), "24:59");
    }

    #[test]
    fn break_adjust_leaves_countdown_alone() {
        let mut engine = engine();
        assert!(engine.adjust_break_length(1).is_some());
        assert_eq!(engine.break_length(), 6);
        assert_eq!(engine.time_left_secs(), 1500);
    }

    #[test]
    fn session_adjust_during_break_overwrites_countdown() {
        let mut engine = engine();
        engine.adjust_session_length(-24);
        engine.toggle_running();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.phase(), Phase::Break);
        engine.toggle_running();

        engine.adjust_session_length(1);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.time_left_secs(), 120);
    }

    #[test]
    fn adjustments_locked_while_running() {
        let mut engine = engine();
        engine.toggle_running();
        assert!(engine.adjust_break_length(1).is_none());
        assert!(engine.adjust_session_length(-1).is_none());
        assert_eq!(engine.break_length(), 5);
        assert_eq!(engine.session_length(), 25);
        assert_eq!(engine.time_left_secs(), 1500);
    }

    #[test]
    fn reset_silences_alert() {
        let mut engine = engine();
        engine.toggle_running();
        engine.reset();
        assert_eq!(engine.alert().pauses, 1);
        assert_eq!(engine.alert().rewinds, 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn failed_alert_still_switches_phase() {
        let mut engine = TimerEngine::new(CountingAlert {
            fail: true,
            ..CountingAlert::default()
        });
        engine.adjust_session_length(-24);
        engine.toggle_running();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.alert().plays, 1);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.time_left_secs(), 300);
    }

    #[test]
    fn view_reflects_running_control_label() {
        let mut engine = engine();
        assert_eq!(engine.view().control_label, "Start");
        engine.toggle_running();
        let view = engine.view();
        assert_eq!(view.control_label, "Pause");
        assert_eq!(view.label, "Session");
        assert_eq!(view.time_left, "25:00");
    }

    #[test]
    fn phase_progress_tracks_elapsed_fraction() {
        let mut engine = engine();
        assert_eq!(engine.phase_progress(), 0.0);
        engine.toggle_running();
        for _ in 0..750 {
            engine.tick();
        }
        assert!((engine.phase_progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let engine = engine();
        match engine.snapshot() {
            Event::StateSnapshot { snapshot, .. } => {
                assert_eq!(snapshot.time_left_secs, 1500);
                assert_eq!(snapshot.phase, Phase::Session);
                assert!(!snapshot.is_running);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn tick_key_changes_on_every_tick() {
        let mut engine = engine();
        engine.toggle_running();
        let before = engine.tick_key();
        engine.tick();
        assert_ne!(before, engine.tick_key());
    }
}
