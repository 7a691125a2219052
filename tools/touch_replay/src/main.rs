use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use touch_gestures::trace::parse_trace;
use touch_replay::{
    logging::ReplayLog,
    replay::{check_expected, parse_expected, replay},
    scenario::Scenario,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "touch_replay")]
#[command(about = "Replay a recorded touch trace through the gesture dispatcher")]
struct Cli {
    /// CSV trace of `touch_trace,...` lines.
    trace: PathBuf,
    /// TOML scenario with the tablet geometry and gestures.
    #[arg(long)]
    scenario: PathBuf,
    /// File of `<gesture>,<label>` lines the replay must produce.
    #[arg(long)]
    expect: Option<PathBuf>,
    #[arg(long = "log-json")]
    log_json: Option<PathBuf>,
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut log = ReplayLog::from_args(cli.log_json.clone())?;
    let scenario = Scenario::load(&cli.scenario)?;
    let text = fs::read_to_string(&cli.trace)
        .with_context(|| format!("failed to read trace {}", cli.trace.display()))?;
    let samples = parse_trace(&text).with_context(|| format!("in {}", cli.trace.display()))?;
    info!(
        samples = samples.len(),
        gestures = scenario.gestures.len(),
        tablet = %scenario.tablet.name,
        "replaying trace"
    );

    let events = replay(&scenario, &samples)?;

    println!("event,ms,gesture,label");
    for event in &events {
        println!("event,{},{},{}", event.ms, event.gesture, event.label);
        if let Some(log) = &mut log {
            log.record(event)?;
        }
    }

    let outcome = match &cli.expect {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let expected =
                parse_expected(&text).with_context(|| format!("in {}", path.display()))?;
            let outcome = check_expected(&events, &expected);
            if let Some(log) = &mut log {
                let detail = outcome.as_ref().err().map(ToString::to_string);
                log.check(expected.len(), detail.as_deref())?;
            }
            if outcome.is_ok() {
                println!("matched {} expected events", expected.len());
            }
            outcome
        }
        None => Ok(()),
    };

    if let Some(log) = log {
        log.finish()?;
    }
    outcome
}
