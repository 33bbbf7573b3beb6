//! CLI for the pararoute geodesic task route optimizer.
//!
//! Reads a task JSON document (§3.1 of the design), runs one of the core's
//! operations, and prints a human-readable report. All argument parsing,
//! file loading, and formatting lives here; the core crate never touches
//! a filesystem or a terminal.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pararoute_core::ingest::{RawTask, RawTurnpointKind};
use pararoute_core::{adapt, centre_distance, cumulative, optimize, sss_entry, OptimizationConfig};

#[derive(Parser)]
#[command(name = "pararoute")]
#[command(about = "Geodesic task route optimizer for paragliding competition tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the shortest valid route through a task's turnpoints
    Optimize {
        /// Path to the task JSON file
        task: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print a per-turnpoint cumulative distance table
    Cumulative {
        /// Path to the task JSON file
        task: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the optimal SSS crossing point for a task
    Sss {
        /// Path to the task JSON file
        task: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Perimeter search resolution in degrees, per turnpoint
    #[arg(long, default_value_t = OptimizationConfig::default().angle_step_deg)]
    angle_step: u32,
    /// Number of DP stage candidates retained after pruning
    #[arg(long, default_value_t = OptimizationConfig::default().beam_width)]
    beam_width: usize,
    /// Number of look-ahead refinement passes
    #[arg(long, default_value_t = OptimizationConfig::default().iterations)]
    iterations: u32,
}

impl From<ConfigArgs> for OptimizationConfig {
    fn from(args: ConfigArgs) -> Self {
        OptimizationConfig {
            angle_step_deg: args.angle_step,
            beam_width: args.beam_width,
            iterations: args.iterations,
        }
    }
}

fn load_task(path: &PathBuf) -> Result<RawTask> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading task file {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing task file {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { task, config } => run_optimize(&task, config.into()),
        Commands::Cumulative { task, config } => run_cumulative(&task, config.into()),
        Commands::Sss { task, config } => run_sss(&task, config.into()),
    }
}

fn run_optimize(task_path: &PathBuf, config: OptimizationConfig) -> Result<()> {
    let raw_task = load_task(task_path)?;
    let adapted = adapt(&raw_task).context("adapting task into turnpoints")?;
    let turnpoints: Vec<_> = adapted.iter().map(|a| a.turnpoint).collect();

    let centre = centre_distance(&turnpoints);

    let start = Instant::now();
    let result = optimize(&turnpoints, &config).context("optimizing route")?;
    let elapsed = start.elapsed();

    println!("Centre-route distance:    {:.1} m", centre);
    println!("Optimized route distance: {:.1} m", result.distance_m);
    println!(
        "Savings:                  {:.1} m ({:.2}%)",
        centre - result.distance_m,
        if centre > 0.0 {
            100.0 * (centre - result.distance_m) / centre
        } else {
            0.0
        }
    );
    println!("Computed in {:.3}s", elapsed.as_secs_f64());
    println!("\nRoute:");
    for (i, p) in result.route.iter().enumerate() {
        println!("  {:>3}: {:>11.6}, {:>11.6}", i, p.lat, p.lon);
    }

    Ok(())
}

fn run_cumulative(task_path: &PathBuf, config: OptimizationConfig) -> Result<()> {
    let raw_task = load_task(task_path)?;
    let adapted = adapt(&raw_task).context("adapting task into turnpoints")?;
    let turnpoints: Vec<_> = adapted.iter().map(|a| a.turnpoint).collect();

    let rows = cumulative(&turnpoints, &config).context("computing cumulative distances")?;

    println!("{:>3}  {:<8}  {:>14}  {:>16}", "idx", "role", "centre (km)", "optimized (km)");
    for (i, (row, a)) in rows.iter().zip(adapted.iter()).enumerate() {
        println!(
            "{:>3}  {:<8}  {:>14.3}  {:>16.3}",
            i,
            role_label(a.source_kind),
            row.centre_km,
            row.optimized_km
        );
    }

    Ok(())
}

fn run_sss(task_path: &PathBuf, config: OptimizationConfig) -> Result<()> {
    let raw_task = load_task(task_path)?;
    let adapted = adapt(&raw_task).context("adapting task into turnpoints")?;
    let turnpoints: Vec<_> = adapted.iter().map(|a| a.turnpoint).collect();

    let sss_index = adapted
        .iter()
        .position(|a| a.source_kind == RawTurnpointKind::Sss)
        .context("task has no turnpoint tagged SSS")?;
    anyhow::ensure!(
        sss_index + 1 < turnpoints.len(),
        "SSS turnpoint has no successor to reference"
    );

    let result = optimize(&turnpoints, &config).context("optimizing route")?;
    let takeoff_centre = turnpoints[0].centre;
    let first_touch_after_sss = result.route[sss_index + 1];

    let entry = sss_entry(
        takeoff_centre,
        &turnpoints[sss_index],
        first_touch_after_sss,
        config.angle_step_deg,
    );

    println!("SSS turnpoint index:  {}", sss_index);
    println!("Optimal SSS entry:    {:.6}, {:.6}", entry.lat, entry.lon);

    Ok(())
}

fn role_label(kind: RawTurnpointKind) -> &'static str {
    match kind {
        RawTurnpointKind::Takeoff => "TAKEOFF",
        RawTurnpointKind::Sss => "SSS",
        RawTurnpointKind::Ess => "ESS",
        RawTurnpointKind::None => "-",
    }
}
