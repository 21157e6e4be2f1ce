//! Clock service: the single task that owns a [`TimerEngine`].
//!
//! Front ends hold a cloneable [`ClockHandle`]. Intents travel to the service
//! over an mpsc channel; state flows back through a `watch` channel (latest
//! [`Snapshot`]) and a `broadcast` channel (every [`Event`]).
//!
//! The service loop waits on either the next command or the scheduler's
//! deadline. Commands win ties, so a pause or reset that arrives together
//! with a due tick cancels that tick.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::alert::Alert;
use crate::error::{CoreError, Result};
use crate::events::{Event, Snapshot};
use crate::scheduler::{wait_for, TickScheduler};
use crate::storage::Config;
use crate::timer::TimerEngine;

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

/// Intents accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AdjustBreakLength(i32),
    AdjustSessionLength(i32),
    ToggleRunning,
    Reset,
    Shutdown,
}

/// Cloneable front-end handle to a running clock service.
#[derive(Debug, Clone)]
pub struct ClockHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    events: broadcast::Sender<Event>,
}

impl ClockHandle {
    pub async fn adjust_break_length(&self, delta: i32) -> Result<()> {
        self.send(Command::AdjustBreakLength(delta)).await
    }

    pub async fn adjust_session_length(&self, delta: i32) -> Result<()> {
        self.send(Command::AdjustSessionLength(delta)).await
    }

    pub async fn toggle_running(&self) -> Result<()> {
        self.send(Command::ToggleRunning).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(Command::Reset).await
    }

    /// Ask the service to stop. The service task then returns its engine.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    pub async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CoreError::ServiceStopped)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}

/// The service half. Usually started through [`spawn`].
pub struct ClockService<A> {
    engine: TimerEngine<A>,
    scheduler: TickScheduler,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Snapshot>,
    events: broadcast::Sender<Event>,
}

impl<A: Alert> ClockService<A> {
    pub fn new(engine: TimerEngine<A>, period: Duration) -> (Self, ClockHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.view());
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let handle = ClockHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            events: event_tx.clone(),
        };
        let service = Self {
            engine,
            scheduler: TickScheduler::new(period),
            commands: command_rx,
            snapshots: snapshot_tx,
            events: event_tx,
        };
        (service, handle)
    }

    /// Drive the clock until shutdown or until every handle is dropped.
    /// Returns the engine in its final state.
    pub async fn run(mut self) -> TimerEngine<A> {
        self.scheduler.sync(self.engine.tick_key(), Instant::now());
        loop {
            let deadline = self.scheduler.deadline();
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => {
                        let event = self.apply(command);
                        self.publish(event);
                    }
                },
                _ = wait_for(deadline) => {
                    self.scheduler.fire();
                    let event = self.engine.tick();
                    self.publish(event);
                }
            }
        }
        self.scheduler.cancel();
        debug!("clock service stopped");
        self.engine
    }

    fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::AdjustBreakLength(delta) => self.engine.adjust_break_length(delta),
            Command::AdjustSessionLength(delta) => self.engine.adjust_session_length(delta),
            Command::ToggleRunning => self.engine.toggle_running(),
            Command::Reset => self.engine.reset(),
            Command::Shutdown => None,
        }
    }

    fn publish(&mut self, event: Option<Event>) {
        let Some(event) = event else {
            return;
        };
        // No subscribers is fine.
        let _ = self.events.send(event);
        self.snapshots.send_replace(self.engine.view());
        self.scheduler.sync(self.engine.tick_key(), Instant::now());
    }
}

/// Spawn a clock service on the current tokio runtime.
pub fn spawn<A>(engine: TimerEngine<A>, period: Duration) -> (ClockHandle, JoinHandle<TimerEngine<A>>)
where
    A: Alert + Send + 'static,
{
    let (service, handle) = ClockService::new(engine, period);
    (handle, tokio::spawn(service.run()))
}

/// Spawn a clock service ticking at the configured `clock.tick_ms`.
///
/// # Errors
///
/// Returns [`CoreError::Config`] if `config` does not validate.
pub fn spawn_configured<A>(
    engine: TimerEngine<A>,
    config: &Config,
) -> Result<(ClockHandle, JoinHandle<TimerEngine<A>>)>
where
    A: Alert + Send + 'static,
{
    config.validate()?;
    Ok(spawn(engine, config.tick_period()))
}
