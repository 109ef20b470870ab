/// First-UIP conflict analysis: walks the implication graph backward from a
/// conflicting clause, resolving on each trail entry at the current decision
/// level until exactly one remains, and computes the level to backjump to.
use tracing::debug;

use super::{
    clause::ClauseIdx,
    data::VarVec,
    trail::{Trail, TrailReason},
    Lit, Solver,
};

#[derive(Debug)]
pub(crate) enum AnalyzeResult {
    /// The conflict persisted at decision level 0: the formula is unsatisfiable.
    Unsat,

    /// A new clause was derived. The caller inserts it into the clause
    /// database, registers its watchers, backtracks to `backjump_level`, and
    /// enqueues its asserting literal.
    Learnt {
        clause: Vec<Lit>,
        backjump_level: u32,
    },
}

/// Scratch state reused across conflicts to avoid reallocating per analysis.
#[derive(Default)]
pub(crate) struct AnalyzeState {
    /// Tracks which variables have already been folded into the resolvent,
    /// regardless of polarity: a clause never contains a variable twice.
    seen: VarVec<bool>,

    /// New learnt clause, under construction.
    new_clause: Vec<Lit>,

    /// Seen literals at the conflict level whose reason clause hasn't been
    /// resolved on yet.
    open: u32,
}

impl AnalyzeState {
    fn reset(&mut self, num_vars: usize) {
        self.seen.reset_for(num_vars, false);
        self.new_clause.clear();
        self.open = 0;
    }

    fn has_seen_lit(&self, lit: Lit) -> bool {
        self.seen[lit.var()]
    }

    /// Folds `reason`'s literals into the resolvent, skipping `skip` — the
    /// literal whose antecedent `reason` is, which cancels against its own
    /// occurrence in `reason`.
    fn analyze_reason(&mut self, skip: Option<Lit>, reason: &[Lit], trail: &Trail) {
        for &lit in reason {
            if skip == Some(lit) {
                continue;
            }
            self.analyze_literal(lit, trail);
        }
    }

    fn analyze_literal(&mut self, lit: Lit, trail: &Trail) {
        if self.has_seen_lit(lit) {
            return;
        }

        let lit_level = trail
            .get_decision_level(lit)
            .expect("conflict-graph literals are always assigned");
        let current_level = trail.current_decision_level();

        debug_assert!(trail.is_lit_unsatisfied(lit));
        debug_assert!(lit_level <= current_level);

        if lit_level < current_level {
            // Below the conflict level: survives into the learnt clause
            // as-is, it is never resolved further.
            self.new_clause.push(lit);
        } else {
            self.open += 1;
        }

        self.seen[lit.var()] = true;
    }
}

impl Solver {
    /// Runs First-UIP analysis against the clause that just produced a
    /// conflict, returning either `Unsat` or a learnt clause plus the level
    /// to backjump to.
    pub(crate) fn analyze_contradiction(&mut self, clause: ClauseIdx) -> AnalyzeResult {
        debug!("analyzing contradiction. trail = {}", self.trail.fmt_trail());

        let current_level = self.trail.current_decision_level();

        if current_level == 0 {
            return AnalyzeResult::Unsat;
        }

        let conflict_clause = self.clause_db.get(clause);
        debug_assert!(conflict_clause
            .iter()
            .all(|&lit| self.trail.is_lit_unsatisfied(lit)));

        self.analyze_state.reset(self.trail.total_vars());

        let mut trail_pos = self.trail.assigned_vars();
        let mut reason: Vec<Lit> = conflict_clause.to_vec();
        let mut maybe_uip: Option<Lit> = None;

        let uip = loop {
            self.analyze_state
                .analyze_reason(maybe_uip, &reason, &self.trail);

            let (uip_candidate, uip_reason) = loop {
                debug_assert!(
                    trail_pos > 0,
                    "ran off the start of the trail without finding the UIP"
                );
                trail_pos -= 1;
                let trail_elem = *self
                    .trail
                    .get(trail_pos)
                    .expect("trail_pos stays within the trail");
                let lit = trail_elem.lit;

                if !self.analyze_state.has_seen_lit(lit) {
                    continue;
                }
                if self.trail.get_decision_level(lit) == Some(current_level) {
                    break (lit, trail_elem.reason);
                }
            };

            maybe_uip = Some(uip_candidate);

            if self.analyze_state.open == 1 {
                break uip_candidate;
            }
            self.analyze_state.open -= 1;

            reason = match uip_reason {
                TrailReason::Propagated { cls } => self.clause_db.get(cls).to_vec(),
                TrailReason::Decision | TrailReason::Axiom => unreachable!(
                    "every trail entry above level 0 other than a level's decision has an antecedent"
                ),
            };

            debug!(
                "resolving on {uip_candidate} (open = {})",
                self.analyze_state.open
            );
        };

        let asserting = -uip;
        let mut rest = std::mem::take(&mut self.analyze_state.new_clause);

        debug_assert!(rest
            .iter()
            .all(|&lit| self.trail.get_decision_level(lit).unwrap() < current_level));

        let backjump_level = rest
            .iter()
            .map(|&lit| {
                self.trail
                    .get_decision_level(lit)
                    .expect("learnt clause literals are assigned")
            })
            .max()
            .unwrap_or(0);

        // Arrange the clause so its two watches are immediately correct
        // after backjump: the asserting literal at index 0 (unassigned,
        // about to be forced), and a literal at the backjump level at
        // index 1 (still assigned and false, making the clause unit).
        let mut clause = Vec::with_capacity(rest.len() + 1);
        clause.push(asserting);
        if !rest.is_empty() {
            let second_idx = rest
                .iter()
                .position(|&lit| self.trail.get_decision_level(lit) == Some(backjump_level))
                .unwrap_or(0);
            clause.push(rest.swap_remove(second_idx));
            clause.append(&mut rest);
        }

        debug!("learnt clause {clause:?}, backjump to level {backjump_level}");

        AnalyzeResult::Learnt {
            clause,
            backjump_level,
        }
    }
}
