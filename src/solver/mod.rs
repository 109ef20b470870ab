mod analyze;
mod assignment;
mod clause;
mod data;
pub mod error;
mod log;
mod propagate;
mod trail;
mod watch;

use analyze::{AnalyzeResult, AnalyzeState};
use clause::{ClauseDB, ClauseFlags};
use data::LitVec;
pub use data::{Lit, Var};
use propagate::PropagationResult;
use tracing::debug;
use trail::{Trail, TrailReason};
use watch::Watch;

pub use error::ClauseError;

/// Mirrors the `options` record of the core `solve` entry point (§6.2).
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    pub use_watched: bool,
    pub conflict_limit: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            use_watched: true,
            conflict_limit: u64::MAX,
        }
    }
}

#[derive(Debug, Default)]
pub struct Stats {
    pub conflicts: u64,
    pub decisions: u64,
}

#[derive(Default)]
pub struct Solver {
    clause_db: ClauseDB,

    watches: LitVec<Vec<Watch>>,

    trail: Trail,

    /// Position on the trail up to which BCP has already drained the
    /// propagation queue (§4.3's "propagated-up-to cursor").
    unpropagated_lit_pos: usize,

    /// Set once an empty clause or contradictory unit clauses are added;
    /// `solve` can answer UNSAT without entering the search loop.
    trivially_unsat: bool,

    stats: Stats,

    /// Scratch state for conflict analysis, reset on each conflict.
    analyze_state: AnalyzeState,

    /// Whether BCP uses the watched-literal engine or the naive fallback
    /// scanner (§4.9); set from `SolveOptions` at the start of `solve`.
    use_watched: bool,
}

/// A satisfying assignment: an ordered signed-literal vector covering every
/// variable `1..=num_vars` (§6.2), extracted once from the trail so it can
/// outlive the solver that produced it.
#[derive(Debug, Clone)]
pub struct Model {
    assignment: Vec<i32>,
}

impl Model {
    /// Truth value of literal `l` under this model.
    pub fn lit(&self, l: i32) -> bool {
        let entry = self.assignment[l.unsigned_abs() as usize - 1];
        (entry > 0) == (l > 0)
    }

    /// The model as a signed-literal vector, positive meaning true.
    pub fn as_vec(&self) -> &[i32] {
        &self.assignment
    }
}

/// Outcome of `Solver::solve` (§6.2, §7).
#[derive(Debug)]
pub enum SolveResult {
    Sat(Model),
    Unsat,
    /// The conflict budget was exhausted before a verdict was reached.
    Unknown,
}

impl SolveResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveResult::Unsat)
    }

    pub fn unwrap_sat(self) -> Model {
        match self {
            SolveResult::Sat(model) => model,
            SolveResult::Unsat => panic!("SolveResult is Unsat, not Sat"),
            SolveResult::Unknown => panic!("SolveResult is Unknown, not Sat"),
        }
    }
}

impl Solver {
    /// Pre-sizes the trail and watcher index for `num_vars` variables
    /// (`1..=num_vars`), so a declared-but-unused variable still gets a slot
    /// in the model (§6.2: `num_vars` is supplied independently of the
    /// clause list).
    pub fn new(num_vars: usize) -> Self {
        Self {
            clause_db: ClauseDB::new(),
            watches: LitVec::with_num_vars(num_vars, Vec::new()),
            trail: Trail::with_num_vars(num_vars),
            unpropagated_lit_pos: 0,
            trivially_unsat: false,
            stats: Stats::default(),
            analyze_state: AnalyzeState::default(),
            use_watched: true,
        }
    }

    /// Adds a clause (§4.1). Fails if `lits` contains a zero literal, a
    /// duplicate literal, or complementary literals. A clause of size 0
    /// marks the formula trivially unsat; a clause of size 1 is asserted
    /// directly at level 0 rather than stored and watched.
    pub fn add_clause(&mut self, lits: &[i32]) -> Result<(), ClauseError> {
        let cls = clause::validate_lits(lits)?;

        let max_lit = cls.iter().copied().max_by_key(|l| l.var().get());
        if let Some(max_lit) = max_lit {
            self.trail.expand(max_lit.var());
            self.watches.expand(-Lit::from(max_lit.var()), Vec::new());
        }

        match cls.len() {
            0 => {
                debug!("empty clause added, formula is trivially unsat");
                self.trivially_unsat = true;
            }
            1 => {
                if self.trail.is_lit_unsatisfied(cls[0]) {
                    debug!("contradictory unit clauses, formula is trivially unsat");
                    self.trivially_unsat = true;
                } else if self.trail.is_lit_unassigned(cls[0]) {
                    self.trail.assign_lit(cls[0], TrailReason::Axiom);
                }
            }
            _ => {
                let cls_idx = self.clause_db.insert_clause(&cls, ClauseFlags::ORIGINAL);
                for &lit in &cls[0..2] {
                    self.watches[lit].push(Watch { clause: cls_idx });
                }
            }
        }

        Ok(())
    }

    fn all_vars_assigned(&self) -> bool {
        self.trail.assignment_complete()
    }

    fn extract_model(&self) -> Model {
        let assignment = (1..=self.trail.total_vars())
            .map(|i| {
                let i = i as i32;
                if self.trail.is_lit_satisfied(Lit::new(i)) {
                    i
                } else {
                    -i
                }
            })
            .collect();
        Model { assignment }
    }

    /// §4.5's branching heuristic: lowest-index unassigned variable,
    /// positive polarity. Deterministic, heuristic-free.
    fn decide(&mut self) -> Option<Var> {
        self.trail.find_unassigned_variable()
    }

    /// Installs a freshly learnt clause, backjumps, and asserts its
    /// asserting literal (§4.4 steps 6-7, §4.5's conflict branch). `clause`
    /// must already be arranged with the asserting literal at index 0 and
    /// (if any) a backjump-level literal at index 1.
    fn apply_learnt_clause(&mut self, clause: Vec<Lit>, backjump_level: u32) {
        self.trail.backtrack_to(backjump_level);
        self.unpropagated_lit_pos = self.trail.assigned_vars();

        let asserting = clause[0];
        debug_assert!(self.trail.is_lit_unassigned(asserting));

        if clause.len() == 1 {
            debug_assert_eq!(backjump_level, 0);
            self.trail.assign_lit(asserting, TrailReason::Axiom);
            return;
        }

        let cls_idx = self.clause_db.insert_clause(&clause, ClauseFlags::LEARNT);
        for &lit in &clause[0..2] {
            self.watches[lit].push(Watch { clause: cls_idx });
        }

        self.trail
            .assign_lit(asserting, TrailReason::Propagated { cls: cls_idx });
    }

    /// Runs the search driver (§4.5) to completion: alternates BCP, conflict
    /// analysis, and decisions until the formula is proven SAT/UNSAT or the
    /// conflict budget in `options` is exhausted.
    pub fn solve(&mut self, options: SolveOptions) -> SolveResult {
        self.use_watched = options.use_watched;

        if self.trivially_unsat {
            return SolveResult::Unsat;
        }

        let mut conflict_count: u64 = 0;

        loop {
            self.log_state();

            match self.propagate() {
                PropagationResult::Contradiction(conflicting_clause) => {
                    match self.analyze_contradiction(conflicting_clause) {
                        AnalyzeResult::Unsat => {
                            debug!("problem is unsat");
                            return SolveResult::Unsat;
                        }
                        AnalyzeResult::Learnt {
                            clause,
                            backjump_level,
                        } => {
                            conflict_count += 1;
                            self.stats.conflicts += 1;

                            if conflict_count > options.conflict_limit {
                                debug!("conflict budget exhausted");
                                return SolveResult::Unknown;
                            }

                            self.apply_learnt_clause(clause, backjump_level);
                        }
                    }
                }
                PropagationResult::Done => {
                    if self.all_vars_assigned() {
                        let model = self.extract_model();
                        debug!("satisfying assignment found: {:?}", model.as_vec());
                        debug_assert!(
                            self.check_assignment(),
                            "generated assignment doesn't satisfy the input formula"
                        );
                        return SolveResult::Sat(model);
                    }

                    match self.decide() {
                        Some(var) => {
                            debug!("new decision variable {var}");
                            self.stats.decisions += 1;
                            self.trail.assign_lit(var.into(), TrailReason::Decision);
                        }
                        None => unreachable!(
                            "no unassigned variable found, but the formula isn't fully assigned"
                        ),
                    }
                }
            }
        }
    }

    /// Verifies that the current (complete) assignment satisfies every
    /// clause in the store, originals and learnt alike.
    fn check_assignment(&self) -> bool {
        self.clause_db
            .iter()
            .all(|clause| self.trail.is_clause_satisfied(clause))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
