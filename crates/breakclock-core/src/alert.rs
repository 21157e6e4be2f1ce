//! Alert capability played on every phase switch.
//!
//! The timer never owns an audio backend directly. It is handed something
//! implementing [`Alert`] and only ever calls `play`, `pause` and
//! `seek_to_start` on it, so the state machine can be driven in tests with
//! a counting stub.

use std::io::Write;

use crate::error::AlertError;

/// A single playable alert handle.
pub trait Alert {
    /// Start playback. Failure is reported but never retried.
    fn play(&mut self) -> Result<(), AlertError>;

    /// Stop playback if any is in progress.
    fn pause(&mut self);

    /// Rewind to the beginning of the asset.
    fn seek_to_start(&mut self);
}

impl<A: Alert + ?Sized> Alert for Box<A> {
    fn play(&mut self) -> Result<(), AlertError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn seek_to_start(&mut self) {
        (**self).seek_to_start()
    }
}

/// Alert that does nothing. Used when alerts are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlert;

impl Alert for SilentAlert {
    fn play(&mut self) -> Result<(), AlertError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek_to_start(&mut self) {}
}

/// Rings the terminal bell (ASCII BEL) on the wrapped writer.
///
/// A bell is instantaneous, so `pause` and `seek_to_start` only clear the
/// in-progress flag.
#[derive(Debug)]
pub struct TerminalBell<W: Write = std::io::Stdout> {
    out: W,
    ringing: bool,
}

impl TerminalBell {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            ringing: false,
        }
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Alert for TerminalBell<W> {
    fn play(&mut self) -> Result<(), AlertError> {
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        self.ringing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.ringing = false;
    }

    fn seek_to_start(&mut self) {
        self.ringing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_writes_bel_character() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play().unwrap();
        assert!(bell.is_ringing());
        assert_eq!(bell.into_inner(), b"\x07".to_vec());
    }

    #[test]
    fn pause_and_rewind_silence_the_bell() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play().unwrap();
        bell.pause();
        bell.seek_to_start();
        assert!(!bell.is_ringing());
    }

    #[test]
    fn boxed_alert_delegates() {
        let mut alert: Box<dyn Alert> = Box::new(SilentAlert);
        assert!(alert.play().is_ok());
        alert.pause();
        alert.seek_to_start();
    }
}
