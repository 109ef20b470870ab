use super::Var;

/// Wrapper over Vec which is indexed by [`Var`]
#[derive(Debug, PartialEq, Eq, Default, Clone, Hash)]
pub struct VarVec<T>(Vec<T>);

impl<T> VarVec<T> {
    pub fn new() -> Self {
        VarVec(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        VarVec(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        // Index 0 is never a valid `Var`; the first slot is an unused sentinel.
        // `saturating_sub` keeps an untouched (never-`expand`ed) vec reporting 0
        // variables instead of underflowing.
        self.0.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter_with_var(&self) -> impl Iterator<Item = (Var, &T)> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(var, val)| (Var::new(var as i32), val))
    }
}

impl<T: Clone> VarVec<T> {
    /// Resize so that `v` is valid index.
    pub fn expand(&mut self, v: Var, val: T) {
        let len = v.get() as usize + 1;
        if len >= self.0.len() {
            self.0.resize(len, val)
        }
    }

    /// Pre-size for `num_vars` variables (`1..=num_vars`), so every declared
    /// variable is tracked even if it never appears in a clause.
    pub fn with_num_vars(num_vars: usize, val: T) -> Self {
        let mut vec = VarVec(Vec::new());
        if num_vars > 0 {
            vec.expand(Var::new(num_vars as i32), val);
        }
        vec
    }

    /// Clears and re-sizes to exactly `num_vars` variables, all set to
    /// `val`. Used to reset per-conflict scratch state (conflict analysis's
    /// "seen" set) without reallocating a fresh `Vec` each time.
    pub fn reset_for(&mut self, num_vars: usize, val: T) {
        self.0.clear();
        self.0.resize(num_vars + 1, val);
    }
}

impl<T> IntoIterator for VarVec<T> {
    type Item = T;

    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a VarVec<T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut VarVec<T> {
    type Item = &'a mut T;

    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl<T> std::ops::Index<Var> for VarVec<T> {
    type Output = T;

    fn index(&self, index: Var) -> &Self::Output {
        let index = index.get() as usize;
        &self.0[index]
    }
}

impl<T> std::ops::IndexMut<Var> for VarVec<T> {
    fn index_mut(&mut self, index: Var) -> &mut Self::Output {
        let index = index.get() as usize;
        &mut self.0[index]
    }
}
