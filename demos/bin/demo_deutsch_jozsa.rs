//! Deutsch-Jozsa Demo
//!
//! Runs the linear oracle f(x) = a·x ⊕ b through the statevector simulator.
//! By default a constant oracle (a = 0…0, b = 1) and a balanced oracle are run
//! back to back; `--constant-bit` without `--secret` runs only the constant
//! case and `--secret` runs only the given oracle.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::Parser;

use qalg_algo::{OracleClass, classify, deutsch_jozsa_circuit, recovered_secret};
use qalg_demos::{
    CommonArgs, RunSettings, init_tracing, print_circuit_json, print_circuit_stats, print_counts,
    print_header, print_result, print_section, print_success, print_warning,
};
use qalg_sim::Simulator;

const DEFAULT_SHOTS: u32 = 1024;

#[derive(Parser, Debug)]
#[command(name = "demo-deutsch-jozsa")]
#[command(about = "Decide constant vs. balanced for a linear oracle in one query")]
struct Args {
    /// Number of input qubits (an ancilla is added)
    #[arg(short = 'n', long, default_value = "5")]
    qubits: u32,

    /// Linear coefficients a, most significant qubit first
    #[arg(long)]
    secret: Option<String>,

    /// Constant term b (0 or 1)
    #[arg(long)]
    constant_bit: Option<u8>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.common.verbose);
    let settings = args.common.resolve(DEFAULT_SHOTS)?;

    print_header("Deutsch-Jozsa Algorithm Demo");

    print_section("Problem Setup");
    print_result("Input qubits", args.qubits);
    print_result("Oracle", "f(x) = a·x ⊕ b");
    print_result("Shots", settings.shots);

    let cases = match (&args.secret, args.constant_bit) {
        (Some(secret), b) => vec![(secret.clone(), b.unwrap_or(0))],
        (None, Some(b)) => vec![("0".repeat(args.qubits as usize), b)],
        (None, None) => vec![
            ("0".repeat(args.qubits as usize), 1),
            (default_secret(args.qubits), 0),
        ],
    };

    let simulator = Simulator::new(settings.simulator.clone())?;
    for (secret, b) in &cases {
        run_case(&simulator, &settings, args.qubits, secret, *b, args.common.emit_json)?;
    }

    println!();
    print_success("Deutsch-Jozsa demo complete!");
    Ok(())
}

fn run_case(
    simulator: &Simulator,
    settings: &RunSettings,
    n: u32,
    secret: &str,
    b: u8,
    emit_json: bool,
) -> anyhow::Result<()> {
    print_section(&format!("Oracle a = {secret}, b = {b}"));

    let circuit = deutsch_jozsa_circuit(n, secret, b)
        .with_context(|| format!("cannot build oracle for a = '{secret}', b = {b}"))?;
    print_circuit_stats(&circuit);

    if emit_json {
        print_circuit_json(&circuit)?;
    }

    let result = simulator.execute(&circuit, settings.shots, settings.seed)?;
    print_counts(&result);

    let class = classify(result.counts.iter())?;
    println!();
    print_result("Oracle class", class);
    match (class, recovered_secret(result.counts.iter())) {
        (OracleClass::Balanced, Some(found)) if found == secret => {
            print_result("Recovered a", &found);
        }
        (OracleClass::Balanced, found) => {
            print_warning(&format!(
                "expected a = {secret}, measured {}",
                found.as_deref().unwrap_or("nothing")
            ));
        }
        (OracleClass::Constant, _) if secret.bytes().any(|c| c != b'0') => {
            print_warning("non-zero a classified as constant");
        }
        (OracleClass::Constant, _) => {}
    }
    Ok(())
}

/// The balanced oracle of the reference five-qubit run, or alternating bits.
fn default_secret(n: u32) -> String {
    if n == 5 {
        return "10110".to_string();
    }
    (0..n).map(|i| if i % 2 == 0 { '1' } else { '0' }).collect()
}
