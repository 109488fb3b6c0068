mod report;
mod scenario;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use ledgrid_config::{DemoKind, RunProfile};
use ledgrid_core::metrics::TickMetrics;
use ledgrid_core::snapshot::BoardSnapshot;
use ledgrid_core::{setup, ClockMode, RunLimits, Runner, SimBoard};

pub const EXIT_ASSERT_FAIL: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Guard against scripts and runs that would effectively never finish.
pub const MAX_ALLOWED_TICKS: u64 = 5_000_000;

#[derive(Parser, Debug)]
#[command(name = "ledgrid", author, version, about = "LedGrid Simulator", long_about = None)]
struct Cli {
    /// Demo program to run: blink, passthrough or trail
    #[arg(short, long, default_value = "trail")]
    demo: String,

    /// Path to a run profile (YAML) with board layout and demo parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of ticks to execute in run mode
    #[arg(long, default_value = "120")]
    max_ticks: u64,

    /// Print every frame to stdout as a 16x16 text grid (paces in real time)
    #[arg(short, long)]
    render: bool,

    /// Write a JSON board snapshot when the run finishes
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Enable tick-level execution tracing
    #[arg(short, long)]
    trace: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a scenario script and evaluate its assertions
    Test(TestArgs),
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the scenario script (YAML)
    #[arg(long)]
    pub script: PathBuf,

    /// Directory to write result.json and junit.xml into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write a JUnit XML report to this path
    #[arg(long)]
    pub junit: Option<PathBuf>,

    /// Suppress per-tick frame output
    #[arg(long)]
    pub quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    match &cli.command {
        Some(Commands::Test(args)) => {
            let code = scenario::run_test(args);
            std::process::exit(code);
        }
        None => run_interactive(&cli),
    }
}

fn demo_kind(name: &str) -> Option<DemoKind> {
    match name {
        "blink" => Some(DemoKind::Blink),
        "passthrough" => Some(DemoKind::Passthrough),
        "trail" => Some(DemoKind::Trail),
        _ => None,
    }
}

fn run_interactive(cli: &Cli) -> anyhow::Result<()> {
    info!("Starting LedGrid Simulator");

    let profile = match &cli.config {
        Some(path) => {
            info!("Loading run profile: {:?}", path);
            RunProfile::from_file(path)?
        }
        None => {
            info!("Using default board configuration");
            RunProfile::default()
        }
    };

    let kind = demo_kind(&cli.demo).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown demo '{}'; expected blink, passthrough or trail",
            cli.demo
        )
    })?;

    if cli.max_ticks > MAX_ALLOWED_TICKS {
        anyhow::bail!(
            "--max-ticks {} exceeds the allowed maximum of {}",
            cli.max_ticks,
            MAX_ALLOWED_TICKS
        );
    }

    // Only pace the board in real time when someone is watching.
    let clock = if cli.render {
        ClockMode::RealTime
    } else {
        ClockMode::Virtual
    };

    let board = SimBoard::with_layout(profile.board, clock);
    let demo = setup::build_demo(kind, &profile.params);

    let metrics = Arc::new(TickMetrics::new());
    let mut runner = Runner::new(board, demo);
    runner.observers.push(metrics.clone());

    info!(
        "Running demo '{}' for up to {} ticks...",
        cli.demo, cli.max_ticks
    );
    let render = cli.render;
    let outcome = runner.run(RunLimits::ticks(cli.max_ticks), &[], |tick, board| {
        if render {
            println!("tick {}", tick);
            print!("{}", board.frame());
        }
    });

    info!(
        "Run finished: {:?} after {} ticks ({:.0} ticks/s)",
        outcome.stop_reason,
        outcome.ticks,
        metrics.get_tps()
    );

    if let Some(path) = &cli.snapshot {
        let snapshot = BoardSnapshot::capture(&runner.board, outcome.ticks);
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {:?}", path))?;
        info!("Snapshot written to {:?}", path);
    }

    Ok(())
}
