use super::{
    assignment::Assignment,
    clause::{Clause, ClauseIdx},
    Lit, Var,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrailReason {
    /// Literal was decided.
    Decision,

    /// Literal was propagated during unit propagation (see [`super::propagate`]).
    Propagated { cls: ClauseIdx },

    /// Axiomatic literal: generated from a unit clause supplied by the caller.
    Axiom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrailElement {
    pub(crate) lit: Lit,
    pub(crate) reason: TrailReason,
}

#[derive(Default)]
pub(crate) struct Trail {
    trail: Vec<TrailElement>,
    decision_positions: Vec<usize>,
    assignment: Assignment,
}

impl Trail {
    pub fn with_num_vars(num_vars: usize) -> Self {
        Self {
            trail: Vec::new(),
            decision_positions: Vec::new(),
            assignment: Assignment::with_num_vars(num_vars),
        }
    }

    pub fn assigned_vars(&self) -> usize {
        self.trail.len()
    }

    pub fn total_vars(&self) -> usize {
        self.assignment.len()
    }

    pub fn get(&self, idx: usize) -> Option<&TrailElement> {
        self.trail.get(idx)
    }

    pub fn get_lit_assignment(&self, lit: Lit) -> Option<bool> {
        self.assignment.get(lit)
    }

    /// The level of the most recently taken decision (0 if none yet).
    pub fn current_decision_level(&self) -> u32 {
        self.decision_positions.len() as u32
    }

    pub fn get_decision_level(&self, lit: Lit) -> Option<u32> {
        self.assignment.level(lit)
    }

    /// Expands internal assignment for new max variable.
    pub(crate) fn expand(&mut self, var: Var) {
        self.assignment.expand(var)
    }

    pub fn assignment_complete(&self) -> bool {
        self.trail.len() == self.assignment.len()
    }

    pub fn is_lit_assigned(&self, lit: Lit) -> bool {
        self.assignment.is_lit_assigned(lit)
    }

    pub fn is_lit_unassigned(&self, lit: Lit) -> bool {
        self.assignment.is_lit_unassigned(lit)
    }

    pub fn are_lits_all_unassigned(&self, lits: &[Lit]) -> bool {
        lits.iter().all(|&lit| self.is_lit_unassigned(lit))
    }

    pub fn is_lit_satisfied(&self, lit: Lit) -> bool {
        self.assignment.is_lit_satisified(lit)
    }

    pub fn is_lit_unsatisfied(&self, lit: Lit) -> bool {
        self.assignment.is_lit_unsatisfied(lit)
    }

    /// For now this is just a bad but simple procedure to find next decision candidate
    pub fn find_unassigned_variable(&self) -> Option<Var> {
        self.assignment.find_unassigned_variable()
    }

    pub fn assign_lit(&mut self, lit: Lit, reason: TrailReason) {
        debug_assert!(self.is_lit_unassigned(lit));

        let level = if reason == TrailReason::Decision {
            self.decision_positions.push(self.trail.len());
            self.decision_positions.len() as u32
        } else {
            self.current_decision_level()
        };

        self.trail.push(TrailElement { lit, reason });
        self.assignment.assign_lit(lit, level);
    }

    /// Pops every trail entry whose level exceeds `lvl`, restoring each
    /// popped variable to unassigned. Entries at level <= `lvl` are kept.
    /// Idempotent when called twice in a row with the same level.
    pub fn backtrack_to(&mut self, lvl: u32) {
        while let Some(top) = self.trail.last() {
            let top_level = self
                .assignment
                .level(top.lit)
                .expect("trail entries are always assigned");

            if top_level <= lvl {
                break;
            }

            let TrailElement { lit, .. } = self.trail.pop().unwrap();
            if self.decision_positions.last() == Some(&self.trail.len()) {
                self.decision_positions.pop();
            }
            self.assignment.unassign_lit(lit);
        }
    }

    pub fn trail(&self) -> &[TrailElement] {
        &self.trail
    }

    pub fn is_clause_satisfied(&self, clause: Clause) -> bool {
        clause.iter().copied().any(|lit| self.is_lit_satisfied(lit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_bump_level_propagations_share_it() {
        let mut trail = Trail::with_num_vars(3);
        trail.assign_lit(Lit::new(1), TrailReason::Decision);
        assert_eq!(trail.current_decision_level(), 1);
        assert_eq!(trail.get_decision_level(Lit::new(1)), Some(1));

        trail.assign_lit(Lit::new(2), TrailReason::Axiom);
        assert_eq!(trail.get_decision_level(Lit::new(2)), Some(1));
    }

    #[test]
    fn backtrack_to_is_idempotent_and_restores_unassigned() {
        let mut trail = Trail::with_num_vars(2);
        trail.assign_lit(Lit::new(1), TrailReason::Decision);
        trail.assign_lit(Lit::new(2), TrailReason::Decision);
        assert_eq!(trail.current_decision_level(), 2);

        trail.backtrack_to(1);
        assert_eq!(trail.current_decision_level(), 1);
        assert!(trail.is_lit_unassigned(Lit::new(2)));
        assert!(trail.is_lit_assigned(Lit::new(1)));

        trail.backtrack_to(1);
        assert_eq!(trail.current_decision_level(), 1);
    }

    #[test]
    fn backtrack_to_zero_clears_everything_above_root() {
        let mut trail = Trail::with_num_vars(2);
        trail.assign_lit(Lit::new(1), TrailReason::Axiom);
        trail.assign_lit(Lit::new(2), TrailReason::Decision);

        trail.backtrack_to(0);
        assert_eq!(trail.current_decision_level(), 0);
        assert!(trail.is_lit_assigned(Lit::new(1)));
        assert!(trail.is_lit_unassigned(Lit::new(2)));
    }
}
