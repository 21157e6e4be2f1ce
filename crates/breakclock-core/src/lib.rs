//! # Breakclock Core Library
//!
//! This library provides the core logic for Breakclock, a "25 + 5" session
//! and break countdown. The CLI is a thin presentation layer over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A discrete state machine over phase, remaining
//!   seconds, running flag and the two configured lengths. The caller
//!   invokes `tick()` once per elapsed second.
//! - **Tick Scheduler**: Holds at most one pending one-second deadline,
//!   re-armed whenever the state a tick depends on changes.
//! - **Clock Service**: A tokio task owning the engine and scheduler,
//!   driven by message passing.
//! - **Alert**: Capability injected into the engine and played on every
//!   phase switch.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TickScheduler`]: One-shot tick arming and cancellation
//! - [`ClockHandle`]: Front-end handle to a running clock service
//! - [`Config`]: Application configuration management

pub mod alert;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod service;
pub mod storage;
pub mod timer;

pub use alert::{Alert, SilentAlert, TerminalBell};
pub use error::{AlertError, ConfigError, CoreError};
pub use events::{Event, Snapshot};
pub use scheduler::{TickScheduler, TICK_PERIOD};
pub use service::{spawn, spawn_configured, ClockHandle, ClockService, Command};
pub use storage::Config;
pub use timer::{
    format_mm_ss, LengthTarget, Phase, RunState, TickKey, TimerEngine, DEFAULT_BREAK_MIN,
    DEFAULT_SESSION_MIN, MAX_LENGTH_MIN, MIN_LENGTH_MIN,
};
