//! A CDCL (Conflict-Driven Clause Learning) SAT solver for CNF formulas:
//! an assignment trail, two-watched-literal Boolean constraint propagation,
//! First-UIP conflict analysis, and non-chronological backtracking.
//!
//! The [`Solver`] builder API is the primary surface — construct with the
//! declared variable count, add clauses, then call [`Solver::solve`]. The
//! free function [`solve`] is a convenience wrapper for one-shot use (the
//! CLI and batch binaries use it), and [`dimacs::Dimacs`] parses DIMACS CNF
//! text into the `(num_vars, clauses)` pair both expect.

pub mod dimacs;
mod solver;
mod util;

use dimacs::DimacsError;

pub use solver::{
    error::ClauseError, Lit, Model, SolveOptions, SolveResult, Solver, Stats, Var,
};

/// Errors that can occur while building a solver from a DIMACS document:
/// either the document itself is malformed, or one of its clauses is
/// (zero literal, duplicate literal, complementary literals).
#[derive(Debug, thiserror::Error)]
pub enum SolverBuildError {
    #[error(transparent)]
    Dimacs(#[from] DimacsError),
    #[error(transparent)]
    Clause(#[from] ClauseError),
}

impl Solver {
    /// Parses `input` as DIMACS CNF text and builds a solver pre-loaded
    /// with its clauses (§6.1 delivering parsed clauses to the core).
    pub fn from_dimacs(input: &str) -> Result<Solver, SolverBuildError> {
        let parsed = dimacs::Dimacs::parse(input)?;

        let mut solver = Solver::new(parsed.num_vars as usize);
        for clause in &parsed.clauses {
            solver.add_clause(clause)?;
        }

        Ok(solver)
    }
}

/// One-shot convenience wrapper around the builder API (§6.2):
/// `solve(clauses, num_vars, options) -> SolveResult`. Panics if a clause is
/// malformed (zero literal, duplicate literal, complementary literals) —
/// callers that need to surface that as a recoverable error should build
/// the solver themselves via `Solver::new`/`Solver::add_clause`.
pub fn solve(clauses: &[Vec<i32>], num_vars: usize, options: SolveOptions) -> SolveResult {
    let mut solver = Solver::new(num_vars);
    for clause in clauses {
        solver
            .add_clause(clause)
            .unwrap_or_else(|e| panic!("malformed clause {clause:?}: {e}"));
    }

    solver.solve(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagate_then_sat() {
        let mut solver = Solver::new(3);
        solver.add_clause(&[-1, 2, 3]).unwrap();
        solver.add_clause(&[-1, -2]).unwrap();
        solver.add_clause(&[1]).unwrap();

        let result = solver.solve(SolveOptions::default());
        assert!(result.is_sat());
    }
}
