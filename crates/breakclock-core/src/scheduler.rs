//! One-shot tick scheduling.
//!
//! The scheduler holds at most one pending deadline. It is re-armed from
//! scratch each time the engine's [`TickKey`] changes and is left disarmed
//! while the timer is idle, so a paused or reset timer has no residual work
//! queued.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::trace;

use crate::timer::TickKey;

/// Default delay between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    deadline: Option<Instant>,
    armed_for: Option<TickKey>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
            armed_for: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Bring the pending tick in line with `key`.
    ///
    /// If `key` differs from the state the current deadline was armed for,
    /// the old deadline is dropped and, when running, a new one is armed one
    /// period after `now`. Returns `true` if anything changed.
    pub fn sync(&mut self, key: TickKey, now: Instant) -> bool {
        if self.armed_for == Some(key) {
            return false;
        }
        self.armed_for = Some(key);
        self.deadline = key.running.then(|| now + self.period);
        trace!(armed = self.deadline.is_some(), "tick rescheduled");
        true
    }

    /// Consume the pending deadline. Returns `false` if nothing was armed.
    ///
    /// The next `sync` always re-arms after a fire, even if the key happens
    /// to be unchanged.
    pub fn fire(&mut self) -> bool {
        self.armed_for = None;
        self.deadline.take().is_some()
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.armed_for = None;
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

/// Resolve at `deadline`, or never when there is none.
pub async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    fn key(running: bool, time_left_secs: u32) -> TickKey {
        TickKey {
            running,
            time_left_secs,
            phase: Phase::Session,
            break_length: 5,
            session_length: 25,
        }
    }

    #[test]
    fn idle_key_never_arms() {
        let mut scheduler = TickScheduler::default();
        scheduler.sync(key(false, 1500), Instant::now());
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn running_key_arms_one_period_out() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();
        assert!(scheduler.sync(key(true, 1500), now));
        assert_eq!(scheduler.deadline(), Some(now + TICK_PERIOD));
    }

    #[test]
    fn unchanged_key_keeps_deadline() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();
        scheduler.sync(key(true, 1500), now);
        assert!(!scheduler.sync(key(true, 1500), now + Duration::from_millis(400)));
        assert_eq!(scheduler.deadline(), Some(now + TICK_PERIOD));
    }

    #[test]
    fn changed_key_rearms() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();
        scheduler.sync(key(true, 1500), now);
        let later = now + Duration::from_millis(400);
        assert!(scheduler.sync(key(true, 1499), later));
        assert_eq!(scheduler.deadline(), Some(later + TICK_PERIOD));
    }

    #[test]
    fn pausing_disarms() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();
        scheduler.sync(key(true, 1500), now);
        scheduler.sync(key(false, 1500), now);
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn fire_consumes_deadline_and_forces_rearm() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();
        scheduler.sync(key(true, 1500), now);
        assert!(scheduler.fire());
        assert!(!scheduler.fire());
        assert!(scheduler.sync(key(true, 1500), now));
        assert!(scheduler.is_armed());
    }

    #[test]
    fn cancel_clears_everything() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(10));
        scheduler.sync(key(true, 3), Instant::now());
        scheduler.cancel();
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.period(), Duration::from_millis(10));
    }
}
