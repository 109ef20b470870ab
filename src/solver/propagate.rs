/// Implementation of unit propagation: the two-watched-literal engine, and a
/// naive whole-database fallback scanner used when watched literals are
/// disabled (§4.3).
use tracing::trace;

use super::{clause::ClauseIdx, trail::TrailReason, watch::Watch, Solver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagationResult {
    Contradiction(ClauseIdx),
    Done,
}

impl Solver {
    pub(crate) fn propagate(&mut self) -> PropagationResult {
        if self.use_watched {
            self.propagate_watched()
        } else {
            self.propagate_naive()
        }
    }

    fn propagate_watched(&mut self) -> PropagationResult {
        let mut trail_pos = self.unpropagated_lit_pos;

        while let Some(&trail_elem) = self.trail.get(trail_pos) {
            let lit = trail_elem.lit;
            debug_assert!(self.trail.is_lit_satisfied(lit));

            let mut contradiction_found = None;

            let (lit_watch, mut remaining_watches) = self.watches.remaining(-lit);
            lit_watch.retain(|watch| {
                // We stop propagating if a contradiction was found.
                // In this case we just want `retain` to keep the rest of the elements.
                if contradiction_found.is_some() {
                    return true;
                }

                // Which watched clause do we need to search for a new literal in.
                let cls_idx = watch.clause;
                let cls = self.clause_db.get_mut(cls_idx);

                let lit_idx = if cls[0] == -lit {
                    0
                } else {
                    debug_assert!(cls[1] == -lit);
                    1
                };

                // search for new unassigned or satisfied literal.
                for (candidate_idx, candidate) in cls.iter_mut().enumerate().skip(2) {
                    if !self.trail.is_lit_unsatisfied(*candidate) {
                        // In order to watch the new literal, we push a new watch.
                        remaining_watches[*candidate].push(Watch { clause: cls_idx });

                        // And move the new literal to the front, swapping with the old watched literal.
                        cls.swap(lit_idx, candidate_idx);

                        // Returning false for the surrounding `retain` call removes the old watch.
                        return false;
                    }
                }

                // No suitable replacement found: all other literals are unsatisfied.
                let new_unit_lit_idx = (lit_idx + 1) & 1; // the other of the two watched indices.
                let new_unit_lit = cls[new_unit_lit_idx];

                if self.trail.is_lit_unassigned(new_unit_lit) {
                    trace!("propagating {new_unit_lit} via clause {cls_idx:?}");
                    self.trail
                        .assign_lit(new_unit_lit, TrailReason::Propagated { cls: cls_idx });
                    // Keep the newly assigned literal at the front of the clause.
                    cls.swap(0, new_unit_lit_idx);
                    true
                } else {
                    debug_assert!(self.trail.is_lit_unsatisfied(new_unit_lit));
                    contradiction_found = Some(cls_idx);
                    true
                }
            });

            if let Some(conflicting_clause) = contradiction_found {
                return PropagationResult::Contradiction(conflicting_clause);
            }

            trail_pos += 1;
        }

        self.unpropagated_lit_pos = trail_pos;
        debug_assert!(self.unpropagated_lit_pos == self.trail.assigned_vars());
        PropagationResult::Done
    }

    /// Naive fixpoint used when watched literals are disabled: rescans every
    /// clause after each assignment rather than walking a watcher list.
    /// Exists only for debugging/teaching parity (§4.3).
    fn propagate_naive(&mut self) -> PropagationResult {
        loop {
            let mut progressed = false;

            for (cls_idx, cls) in self.clause_db.iter_indexed() {
                let mut unassigned_lit = None;
                let mut unassigned_count = 0u32;
                let mut satisfied = false;

                for &lit in cls {
                    if self.trail.is_lit_satisfied(lit) {
                        satisfied = true;
                        break;
                    } else if self.trail.is_lit_unassigned(lit) {
                        unassigned_count += 1;
                        unassigned_lit = Some(lit);
                    }
                }

                if satisfied {
                    continue;
                }

                if unassigned_count == 0 {
                    return PropagationResult::Contradiction(cls_idx);
                }

                if unassigned_count == 1 {
                    let lit = unassigned_lit.expect("unassigned_count == 1");
                    trace!("propagating {lit} via naive scan of clause {cls_idx:?}");
                    self.trail
                        .assign_lit(lit, TrailReason::Propagated { cls: cls_idx });
                    progressed = true;
                }
            }

            if !progressed {
                return PropagationResult::Done;
            }
        }
    }
}
