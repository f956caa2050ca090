//! qalg Demo Suite
//!
//! Command-line demonstrations of the two algorithms the workspace ships:
//!
//! - **Deutsch-Jozsa**: decide constant vs. balanced for a linear oracle
//!   f(x) = a·x ⊕ b in a single query, recovering `a` in the balanced case
//! - **Grover's Search**: amplify a marked basis state in an unstructured
//!   search space
//!
//! Both binaries share the flags in [`CommonArgs`] and the YAML/environment
//! configuration in [`config`].

pub mod config;

use std::path::PathBuf;

use anyhow::Context;
use console::style;
use qalg_sim::{ExecutionResult, SimConfig};
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;

/// Flags shared by every demo binary.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Number of measurement shots
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Sampler seed for reproducible counts
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print each circuit as JSON before running it
    #[arg(long)]
    pub emit_json: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Fully resolved settings for one demo invocation.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Shots per sampled run, always at least 1.
    pub shots: u32,
    /// Sampler seed; `None` draws a fresh one per run.
    pub seed: Option<u64>,
    /// Simulator settings after file and environment overrides.
    pub simulator: SimConfig,
}

impl CommonArgs {
    /// Merge defaults, the config file, the environment and the flags.
    pub fn resolve(&self, default_shots: u32) -> anyhow::Result<RunSettings> {
        let config = DemoConfig::load(self.config.as_deref())
            .context("failed to load demo configuration")?;

        let shots = self.shots.or(config.shots).unwrap_or(default_shots);
        if shots == 0 {
            anyhow::bail!("--shots must be at least 1");
        }

        let settings = RunSettings {
            shots,
            seed: self.seed.or(config.seed),
            simulator: config.simulator,
        };
        tracing::debug!(?settings, "resolved run settings");
        Ok(settings)
    }
}

/// Install the tracing subscriber on stderr.
///
/// Without `-v` the filter comes from `RUST_LOG`, falling back to `info`.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print sampled counts as a bar chart, most frequent first.
pub fn print_counts(result: &ExecutionResult) {
    println!(
        "\n{} Results ({} shots, seed {}):",
        style("✓").green().bold(),
        result.shots,
        result.seed
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

/// Print a circuit's size: qubits, gate total, depth and a per-gate breakdown.
pub fn print_circuit_stats(circuit: &qalg_ir::Circuit) {
    print_result("Circuit qubits", circuit.num_qubits());
    print_result("Gates", circuit.num_ops());
    print_result("Circuit depth", circuit.depth());

    let mut counts: Vec<(String, usize)> = circuit.gate_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let breakdown: Vec<String> = counts
        .iter()
        .map(|(name, count)| format!("{name}×{count}"))
        .collect();
    print_result("Gate breakdown", breakdown.join(" "));
}

/// Print a circuit as pretty JSON.
pub fn print_circuit_json(circuit: &qalg_ir::Circuit) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(circuit).context("failed to serialize circuit")?;
    println!("{json}");
    Ok(())
}
