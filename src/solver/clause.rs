/// Clauses are stored continuously in memory.
/// Each clause of size >= 2 has two watched literals, tracked by the caller
/// (the watcher index, not this module) rather than inside `ClauseIdx`.
/// A variable can only appear once in a clause.
use std::{num::NonZeroU32, ops::Range};

use bitflags::bitflags;

use super::{error::ClauseError, Lit};

pub type Clause<'db> = &'db [Lit];
pub type ClauseMut<'db> = &'db mut [Lit];

bitflags! {
    /// Which partition of the store a clause belongs to (§3: "original" vs
    /// "learnt"). Both partitions are searched identically during BCP; the
    /// flag only matters to callers that care about the distinction (e.g.
    /// `check_assignment`, which only needs to verify originals).
    #[derive(Default)]
    pub struct ClauseFlags: u8 {
        const ORIGINAL = 0b01;
        const LEARNT   = 0b10;
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ClauseIdx {
    start: u32,
    size: NonZeroU32,
}

struct ClauseMeta {
    range: Range<u32>,
    flags: ClauseFlags,
}

#[derive(Default)]
pub struct ClauseDB {
    clause_data: Vec<Lit>,
    clause_meta: Vec<ClauseMeta>,
}

/// Validates `lits` (§4.1: no duplicate literal, no complementary pair, no
/// zero sentinel) and converts to `Lit`s. Shared by `ClauseDB::add_clause`
/// and `Solver::add_clause`, the latter of which needs the validated
/// literals before deciding whether the clause is a unit/empty special case
/// rather than something to actually store.
pub fn validate_lits(lits: &[i32]) -> Result<Vec<Lit>, ClauseError> {
    let mut seen_pos = std::collections::HashSet::new();
    let mut seen_neg = std::collections::HashSet::new();
    for &raw in lits {
        if raw == 0 {
            return Err(ClauseError::ZeroLiteral);
        }
        if raw > 0 {
            if !seen_pos.insert(raw) {
                return Err(ClauseError::DuplicateLiteral(raw));
            }
            if seen_neg.contains(&raw) {
                return Err(ClauseError::ComplementaryLiterals(raw));
            }
        } else {
            let var = -raw;
            if !seen_neg.insert(var) {
                return Err(ClauseError::DuplicateLiteral(raw));
            }
            if seen_pos.contains(&var) {
                return Err(ClauseError::ComplementaryLiterals(var));
            }
        }
    }

    Ok(lits.iter().map(|&l| Lit::new(l)).collect())
}

impl ClauseDB {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `lits`, converts to `Lit`s, and appends the clause. Does
    /// not choose or register watchers; that is the caller's job once it
    /// knows where to register them in the watcher index.
    pub fn add_clause(&mut self, lits: &[i32], flags: ClauseFlags) -> Result<ClauseIdx, ClauseError> {
        let converted = validate_lits(lits)?;
        Ok(self.insert_clause(&converted, flags))
    }

    /// Appends an already-validated clause. Used for learnt clauses, whose
    /// literals are a resolution result and need not be re-validated.
    pub fn insert_clause(&mut self, cls: Clause, flags: ClauseFlags) -> ClauseIdx {
        let start = self.clause_data.len();

        self.clause_data.extend(cls);

        let end = self.clause_data.len();
        let size = end - start;

        debug_assert!(<usize as TryInto<u32>>::try_into(start).is_ok());
        let start = start as u32;
        debug_assert!(<usize as TryInto<u32>>::try_into(end).is_ok());
        let end = end as u32;
        debug_assert!(<usize as TryInto<u32>>::try_into(size).is_ok());

        self.clause_meta.push(ClauseMeta {
            range: start..end,
            flags,
        });

        ClauseIdx {
            start,
            size: NonZeroU32::new(size as u32).expect("insertion of empty clause"),
        }
    }

    pub fn get(&self, r: ClauseIdx) -> Clause {
        debug_assert!(self.is_valid_clause_idx(r));

        let start = r.start as usize;
        let end = (r.start + r.size.get()) as usize;

        &self.clause_data[start..end]
    }

    pub fn get_mut(&mut self, r: ClauseIdx) -> ClauseMut {
        debug_assert!(self.is_valid_clause_idx(r));

        let start = r.start as usize;
        let end = (r.start + r.size.get()) as usize;

        &mut self.clause_data[start..end]
    }

    pub fn flags(&self, r: ClauseIdx) -> ClauseFlags {
        let e = self.meta_index(r).expect("invalid clause index");
        self.clause_meta[e].flags
    }

    fn meta_index(&self, r: ClauseIdx) -> Option<usize> {
        self.clause_meta
            .binary_search_by_key(&r.start, |meta| meta.range.start)
            .ok()
    }

    fn is_valid_clause_idx(&self, r: ClauseIdx) -> bool {
        match self.meta_index(r) {
            Some(e) => {
                let range = self.clause_meta[e].range.clone();
                range.start == r.start && range.end == r.start + r.size.get()
            }
            None => false,
        }
    }

    /// Iterates every clause in the store (originals and learnt alike),
    /// used by the fallback scanner and by `check_assignment`.
    pub fn iter(&self) -> impl Iterator<Item = Clause<'_>> {
        struct ClauseIter<'db> {
            metas: std::slice::Iter<'db, ClauseMeta>,
            clauses: &'db [Lit],
        }

        impl<'db> Iterator for ClauseIter<'db> {
            type Item = Clause<'db>;

            fn next(&mut self) -> Option<Self::Item> {
                let meta = self.metas.next()?;
                Some(&self.clauses[meta.range.start as usize..meta.range.end as usize])
            }
        }

        ClauseIter {
            metas: self.clause_meta.iter(),
            clauses: &self.clause_data,
        }
    }

    /// Iterates every clause alongside its identifier, so callers (the
    /// fallback scanner) can cite it as an antecedent or conflict clause.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (ClauseIdx, Clause<'_>)> {
        self.clause_meta.iter().map(move |meta| {
            let idx = ClauseIdx {
                start: meta.range.start,
                size: NonZeroU32::new(meta.range.end - meta.range.start)
                    .expect("clauses are never empty"),
            };
            (
                idx,
                &self.clause_data[meta.range.start as usize..meta.range.end as usize],
            )
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_literal() {
        let mut db = ClauseDB::new();
        assert_eq!(
            db.add_clause(&[1, 0, -2], ClauseFlags::ORIGINAL),
            Err(ClauseError::ZeroLiteral)
        );
    }

    #[test]
    fn rejects_duplicate_literal() {
        let mut db = ClauseDB::new();
        assert_eq!(
            db.add_clause(&[1, 2, 1], ClauseFlags::ORIGINAL),
            Err(ClauseError::DuplicateLiteral(1))
        );
    }

    #[test]
    fn rejects_complementary_literals() {
        let mut db = ClauseDB::new();
        assert_eq!(
            db.add_clause(&[1, -2, 2], ClauseFlags::ORIGINAL),
            Err(ClauseError::ComplementaryLiterals(2))
        );
    }

    #[test]
    fn stores_and_retrieves_clause() {
        let mut db = ClauseDB::new();
        let idx = db.add_clause(&[1, -2, 3], ClauseFlags::ORIGINAL).unwrap();
        let cls = db.get(idx);
        assert_eq!(cls, &[Lit::new(1), Lit::new(-2), Lit::new(3)]);
        assert_eq!(db.flags(idx), ClauseFlags::ORIGINAL);
    }

    #[test]
    fn iter_visits_every_clause_in_order() {
        let mut db = ClauseDB::new();
        db.add_clause(&[1, 2], ClauseFlags::ORIGINAL).unwrap();
        db.add_clause(&[-1, -2], ClauseFlags::LEARNT).unwrap();
        let lens: Vec<_> = db.iter().map(|cls| cls.len()).collect();
        assert_eq!(lens, vec![2, 2]);
    }
}
