//! PoHD Simulator CLI
//!
//! Runs the ten-scenario sensitivity analysis, a single full-horizon
//! session, or a short beta test run.

use clap::{Parser, ValueEnum};
use pohd_core::SimError;
use pohd_sim::{
    builtin_configs, ScenarioConfig, ScenarioResult, ScenarioRunner, SensitivityExport, SimConfig,
    SimExport, Simulation,
};
use thiserror::Error;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Days stepped by the beta test mode.
const BETA_TEST_DAYS: u64 = 30;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every scenario through the full horizon
    Sensitivity,

    /// Run one session through the full horizon (or --days)
    Run,

    /// Initialize and step 30 days
    Beta,
}

/// PoHD economic simulation
#[derive(Parser, Debug)]
#[command(name = "pohd-sim")]
#[command(about = "Simulate HCS, Community Wealth and GDP from 2026 to 2040", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of simulated users
    #[arg(short, long, default_value = "1000")]
    users: usize,

    /// What to run
    #[arg(short, long, value_enum, default_value = "sensitivity")]
    mode: Mode,

    /// Days to step in run mode (default: full horizon)
    #[arg(short, long)]
    days: Option<u64>,

    /// Worker threads for the sensitivity batch
    #[arg(short, long)]
    threads: Option<usize>,

    /// Run scenarios one after another
    #[arg(long)]
    sequential: bool,

    /// JSON file with a list of scenario configurations
    #[arg(long)]
    scenarios: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,

    /// Export results to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    if let Err(e) = run(&args) {
        error!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    } else {
        args.seed
    };

    if !args.json {
        info!("PoHD Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    match args.mode {
        Mode::Sensitivity => run_sensitivity(args, seed),
        Mode::Run => run_session(args, seed, args.days),
        Mode::Beta => run_session(args, seed, Some(BETA_TEST_DAYS)),
    }
}

fn run_sensitivity(args: &Args, seed: u64) -> Result<(), CliError> {
    let configs: Vec<ScenarioConfig> = match &args.scenarios {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => builtin_configs(),
    };

    let mut runner = ScenarioRunner::new(seed, args.users);
    if let Some(threads) = args.threads {
        runner = runner.with_threads(threads);
    }
    if args.sequential {
        runner = runner.sequential();
    }

    let results = runner.run_scenarios(&configs)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_summary(&results);
    }

    if let Some(path) = &args.export {
        SensitivityExport::new(seed, args.users, results).write_to_file(path)?;
        info!("Exported sensitivity results to {}", path);
    }
    Ok(())
}

fn run_session(args: &Args, seed: u64, days: Option<u64>) -> Result<(), CliError> {
    let config = SimConfig::default().with_seed(seed).with_user_count(args.users);
    let mut sim = Simulation::new(config)?;
    sim.initialize()?;

    match days {
        Some(days) => {
            sim.run_days(days)?;
        }
        None => sim.run_to_completion()?,
    }

    let state = sim.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        info!("");
        info!(
            "Day {} ({}) | users={} | HCS={:.4} | VDF={:.0}h | CW={:.2}M | GDP={:.2} | eligible={:.1}%{}",
            state.current_day,
            state.current_year,
            state.user_count,
            state.average_hcs,
            state.total_vdf,
            state.total_cw / 1_000_000.0,
            state.gdp_index,
            state.eligible_ratio * 100.0,
            if state.burn_applied { " | burn applied" } else { "" }
        );
    }

    if let Some(path) = &args.export {
        let export = SimExport::from_simulation(&sim);
        export.write_to_file(path)?;
        info!("Exported {} days to {}", export.days.len(), path);
    }
    Ok(())
}

fn print_summary(results: &[ScenarioResult]) {
    info!("");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        "{:<16} {:>5} {:>5} {:>5} {:>6} {:>7} {:>9} {:>8} {:>8}",
        "scenario", "α", "β", "γ", "burn", "HCS", "CW (M)", "GDP", "CAGR"
    );
    for r in results {
        info!(
            "{:<16} {:>5.2} {:>5.2} {:>5.2} {:>5.1}% {:>7.4} {:>9.2} {:>8.2} {:>+7.2}%",
            r.scenario_name,
            r.alpha,
            r.beta,
            r.gamma,
            r.burn_multiplier * 100.0,
            r.final_hcs,
            r.final_cw / 1_000_000.0,
            r.final_gdp_index,
            r.cagr_2035_2040 * 100.0
        );
    }
    info!("✅ {} scenarios complete", results.len());
}
