//! Command-line front end: reads a single DIMACS CNF file, solves it, and
//! prints the result in the crate's own `RESULT:`/`ASSIGNMENT:` format.
use std::{fs, process::ExitCode};

use clap::Parser;
use satcore::{SolveOptions, SolveResult, Solver};

#[derive(Parser)]
#[command(name = "solver", about = "CDCL SAT solver for DIMACS CNF input")]
struct Args {
    /// Path to a DIMACS CNF file.
    input: String,

    /// Disable the two-watched-literal BCP engine in favor of the naive
    /// rescan-the-whole-clause-list fallback.
    #[arg(long)]
    no_watched: bool,

    /// Give up and report `RESULT:UNKNOWN` after this many conflicts.
    #[arg(long)]
    conflict_limit: Option<u64>,

    /// Enable debug-level tracing output on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = match fs::read_to_string(&args.input) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", args.input);
            return ExitCode::from(2);
        }
    };

    let mut solver = match Solver::from_dimacs(&input) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let options = SolveOptions {
        use_watched: !args.no_watched,
        conflict_limit: args.conflict_limit.unwrap_or(u64::MAX),
    };

    match solver.solve(options) {
        SolveResult::Sat(model) => {
            println!("RESULT:SAT");
            print_assignment(&model);
            ExitCode::SUCCESS
        }
        SolveResult::Unsat => {
            println!("RESULT:UNSAT");
            ExitCode::SUCCESS
        }
        SolveResult::Unknown => {
            println!("RESULT:UNKNOWN");
            ExitCode::from(3)
        }
    }
}

fn print_assignment(model: &satcore::Model) {
    let assignment: Vec<String> = model
        .as_vec()
        .iter()
        .map(|&lit| {
            let var = lit.unsigned_abs();
            let value = if lit > 0 { 1 } else { 0 };
            format!("{var}={value}")
        })
        .collect();
    println!("ASSIGNMENT:{}", assignment.join(" "));
}
