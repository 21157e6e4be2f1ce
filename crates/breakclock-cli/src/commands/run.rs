use breakclock_core::{
    spawn_configured, Alert, Command, Config, SilentAlert, TerminalBell, TimerEngine,
};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

#[derive(Args)]
pub struct RunArgs {
    /// Do not ring the terminal bell on phase switches
    #[arg(long)]
    mute: bool,
    /// Milliseconds per tick (overrides clock.tick_ms)
    #[arg(long)]
    tick_ms: Option<u64>,
}

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Send(Command),
    Status,
    Quit,
}

impl Intent {
    fn parse(input: &str) -> Option<Self> {
        let intent = match input.trim().to_ascii_lowercase().as_str() {
            "start" | "pause" | "toggle" | "s" => Intent::Send(Command::ToggleRunning),
            "reset" | "r" => Intent::Send(Command::Reset),
            "break+" | "b+" => Intent::Send(Command::AdjustBreakLength(1)),
            "break-" | "b-" => Intent::Send(Command::AdjustBreakLength(-1)),
            "session+" | "s+" => Intent::Send(Command::AdjustSessionLength(1)),
            "session-" | "s-" => Intent::Send(Command::AdjustSessionLength(-1)),
            "status" | "?" => Intent::Status,
            "quit" | "q" | "exit" => Intent::Quit,
            _ => return None,
        };
        Some(intent)
    }
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if let Some(ms) = args.tick_ms {
        config.clock.tick_ms = ms;
    }
    let alert: Box<dyn Alert + Send> = if args.mute || !config.alert.enabled {
        Box::new(SilentAlert)
    } else {
        Box::new(TerminalBell::stdout())
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(TimerEngine::new(alert), &config))
}

async fn drive(
    engine: TimerEngine<Box<dyn Alert + Send>>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, task) = spawn_configured(engine, config)?;
    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut last_phase = {
        let snap = snapshots.borrow_and_update();
        println!("{}", render::TITLE);
        println!("{}", render::HELP);
        println!("{}", render::status_line(&snap));
        snap.phase
    };

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Intent::parse(&line) {
                    Some(Intent::Quit) => break,
                    Some(Intent::Status) => println!("{}", render::status_line(&handle.snapshot())),
                    Some(Intent::Send(command)) => handle.send(command).await?,
                    None if line.trim().is_empty() => {}
                    None => eprintln!("unknown command: {}", line.trim()),
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = snapshots.borrow_and_update().clone();
                if snap.phase != last_phase {
                    println!("{}", render::phase_banner(&snap));
                    last_phase = snap.phase;
                }
                println!("{}", render::status_line(&snap));
            }
        }
    }

    // Commands still queued are applied before the shutdown is seen.
    handle.shutdown().await?;
    let engine = task.await?;
    tracing::debug!(?engine, "clock stopped");
    println!("{}", render::status_line(&engine.view()));
    Ok(())
}
