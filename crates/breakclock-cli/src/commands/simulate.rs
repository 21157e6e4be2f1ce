use breakclock_core::{
    Event, SilentAlert, Snapshot, TimerEngine, DEFAULT_BREAK_MIN, DEFAULT_SESSION_MIN,
};
use clap::Args;
use serde::Serialize;

use crate::render;

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of one-second ticks to run
    #[arg(long, default_value_t = 1500)]
    ticks: u32,
    /// Session length in minutes (1-60)
    #[arg(long)]
    session: Option<u32>,
    /// Break length in minutes (1-60)
    #[arg(long = "break")]
    break_length: Option<u32>,
    /// Start the timer before ticking (without it, ticks have no effect)
    #[arg(long)]
    toggle_first: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    ticks: u32,
    phase_switches: u32,
    snapshot: Snapshot,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = simulate(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::status_line(&report.snapshot));
        println!("phase switches: {}", report.phase_switches);
    }
    Ok(())
}

fn simulate(args: &SimulateArgs) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new(SilentAlert);

    if let Some(minutes) = args.session {
        let delta = i64::from(minutes) - i64::from(DEFAULT_SESSION_MIN);
        engine
            .adjust_session_length(i32::try_from(delta)?)
            .ok_or_else(|| format!("session length {minutes} is outside 1-60"))?;
    }
    if let Some(minutes) = args.break_length {
        let delta = i64::from(minutes) - i64::from(DEFAULT_BREAK_MIN);
        engine
            .adjust_break_length(i32::try_from(delta)?)
            .ok_or_else(|| format!("break length {minutes} is outside 1-60"))?;
    }
    if args.toggle_first {
        engine.toggle_running();
    }

    let mut phase_switches = 0;
    for _ in 0..args.ticks {
        if let Some(Event::PhaseSwitched { .. }) = engine.tick() {
            phase_switches += 1;
        }
    }

    Ok(SimulationReport {
        ticks: args.ticks,
        phase_switches,
        snapshot: engine.view(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakclock_core::Phase;

    fn args(ticks: u32) -> SimulateArgs {
        SimulateArgs {
            ticks,
            session: None,
            break_length: None,
            toggle_first: true,
            json: false,
        }
    }

    #[test]
    fn default_run_ends_in_break() {
        let report = simulate(&args(1500)).unwrap();
        assert_eq!(report.phase_switches, 1);
        assert_eq!(report.snapshot.phase, Phase::Break);
        assert_eq!(report.snapshot.time_left_secs, 300);
    }

    #[test]
    fn custom_lengths_apply() {
        let report = simulate(&SimulateArgs {
            session: Some(1),
            break_length: Some(2),
            ..args(60 + 120)
        })
        .unwrap();
        assert_eq!(report.phase_switches, 2);
        assert_eq!(report.snapshot.phase, Phase::Session);
        assert_eq!(report.snapshot.time_left_secs, 60);
    }

    #[test]
    fn out_of_range_length_is_an_error() {
        let result = simulate(&SimulateArgs {
            session: Some(61),
            ..args(1)
        });
        assert!(result.is_err());
    }

    #[test]
    fn idle_run_does_not_tick() {
        let report = simulate(&SimulateArgs {
            toggle_first: false,
            ..args(100)
        })
        .unwrap();
        assert_eq!(report.snapshot.time_left_secs, 1500);
        assert!(!report.snapshot.is_running);
    }
}
