//! Batch driver: solves every DIMACS CNF file reachable from a list of file
//! or directory arguments and writes one result line per file.
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::Parser;
use satcore::{SolveOptions, SolveResult, Solver};

#[derive(Parser)]
#[command(name = "solver-batch", about = "Solve a batch of DIMACS CNF files")]
struct Args {
    /// Files to solve, or directories to scan one level deep for `*.cnf` files.
    #[arg(required = true)]
    paths: Vec<String>,

    #[arg(long)]
    no_watched: bool,

    #[arg(long)]
    conflict_limit: Option<u64>,

    /// File the result lines are appended to.
    #[arg(long, default_value = "batch_results.txt")]
    output: String,
}

/// A file to solve, paired with the label it's reported under.
struct Job {
    label: String,
    path: PathBuf,
}

/// Resolves one command-line argument into the jobs it names: the file
/// itself, or every `*.cnf` file one level under a directory (mirroring the
/// original's one-level `glob.glob` scan, not a recursive walk).
fn jobs_for_arg(arg: &str) -> Vec<Job> {
    let path = Path::new(arg);

    if path.is_dir() {
        let mut jobs = Vec::new();
        let Ok(entries) = fs::read_dir(path) else {
            eprintln!("warning: could not read directory {arg}");
            return jobs;
        };

        let dir_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| arg.to_string());

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "cnf"))
            .collect();
        paths.sort();

        for file_path in paths {
            let file_name = file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            jobs.push(Job {
                label: format!("{dir_name}/{file_name}"),
                path: file_path,
            });
        }

        jobs
    } else {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| arg.to_string());
        vec![Job {
            label,
            path: path.to_path_buf(),
        }]
    }
}

fn run_job(job: &Job, options: SolveOptions) -> String {
    let start = Instant::now();

    let input = match fs::read_to_string(&job.path) {
        Ok(input) => input,
        Err(err) => return format!("{}: RESULT:UNKNOWN (read error: {err})", job.label),
    };

    let mut solver = match Solver::from_dimacs(&input) {
        Ok(solver) => solver,
        Err(err) => return format!("{}: RESULT:UNKNOWN (parse error: {err})", job.label),
    };

    let result = solver.solve(options);
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        SolveResult::Sat(model) => {
            let assignment: Vec<String> = model
                .as_vec()
                .iter()
                .map(|&lit| {
                    let var = lit.unsigned_abs();
                    let value = if lit > 0 { 1 } else { 0 };
                    format!("{var}={value}")
                })
                .collect();
            format!(
                "{}: RESULT:SAT ASSIGNMENT:{} Time: {elapsed:.3}s",
                job.label,
                assignment.join(" ")
            )
        }
        SolveResult::Unsat => format!("{}: RESULT:UNSAT Time: {elapsed:.3}s", job.label),
        SolveResult::Unknown => format!("{}: RESULT:UNKNOWN Time: {elapsed:.3}s", job.label),
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let options = SolveOptions {
        use_watched: !args.no_watched,
        conflict_limit: args.conflict_limit.unwrap_or(u64::MAX),
    };

    let jobs: Vec<Job> = args.paths.iter().flat_map(|p| jobs_for_arg(p)).collect();

    let mut output = fs::File::create(&args.output)
        .unwrap_or_else(|err| panic!("could not create {}: {err}", args.output));

    let mut count = 0;
    for job in &jobs {
        let line = run_job(job, options);
        writeln!(output, "{line}").expect("writing batch result");
        count += 1;
    }

    println!("solved {count} instance(s), results written to {}", args.output);
}
