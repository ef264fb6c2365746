//! Hierarchical-name assembler (C5), §4.5 "Hierarchical-name assembler".
//!
//! `a`, `a.b`, `a[3].b`, ... are reduced bottom-up as the driver consumes
//! `.`-separated segments. Per §9's re-design note, this is kept as a plain
//! value type threaded by the driver through its own call stack, not a heap
//! object mutated through a shared pointer as the original `PuHierName` was.

use crate::ast::PtNameBranch;

/// Accumulates name-branches while a hierarchical reference is being
/// parsed. `push` promotes the current tail into a branch and starts a new
/// tail; `finish` yields the accumulated branch array (arena-allocated) and
/// final tail for PT-node construction, consuming the builder.
#[derive(Debug, Clone)]
pub struct HierNameBuilder {
    branches: Vec<(String, Option<i32>)>,
    tail: String,
    last_index: Option<i32>,
}

impl HierNameBuilder {
    /// Starts a builder with `name` as the (so-far unindexed) tail.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            branches: Vec::new(),
            tail: name.into(),
            last_index: None,
        }
    }

    /// Attaches a constant array index to the current tail segment, e.g.
    /// promoting `mid` to `mid[3]` before the next `.` arrives.
    pub fn index_tail(&mut self, index: i32) {
        self.last_index = Some(index);
    }

    /// Promotes the current tail (plus any pending index set by
    /// `index_tail`) into a branch, then starts a new tail.
    pub fn push(&mut self, next_tail: impl Into<String>) {
        let old_tail = std::mem::replace(&mut self.tail, next_tail.into());
        let idx = self.last_index.take();
        self.branches.push((old_tail, idx));
    }

    pub fn is_hierarchical(&self) -> bool {
        !self.branches.is_empty()
    }

    /// Consumes the builder, allocating the branch array into `arena` and
    /// returning `(branches, tail)` ready for `PtFactory::new_primary`-style
    /// constructors.
    pub fn finish<'a>(self, arena: &'a crate::arena::Arena) -> (&'a [PtNameBranch<'a>], &'a str) {
        let tail = arena.alloc_str(&self.tail);
        let branches: Vec<PtNameBranch<'a>> = self
            .branches
            .into_iter()
            .map(|(name, idx)| PtNameBranch::new(arena.alloc_str(&name), idx))
            .collect();
        (arena.alloc_slice(branches), tail)
    }
}

impl Default for HierNameBuilder {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    #[test]
    fn simple_name_has_no_branches() {
        let arena = Arena::new();
        let b = HierNameBuilder::new("leaf");
        let (branches, tail) = b.finish(&arena);
        assert!(branches.is_empty());
        assert_eq!(tail, "leaf");
    }

    #[test]
    fn hierarchical_name_accumulates_branches_in_order() {
        let arena = Arena::new();
        let mut b = HierNameBuilder::new("top");
        b.push("mid");
        b.index_tail(3);
        b.push("leaf");
        assert!(b.is_hierarchical());
        let (branches, tail) = b.finish(&arena);
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].name(), "top");
        assert_eq!(branches[0].index(), None);
        assert_eq!(branches[1].name(), "mid");
        assert_eq!(branches[1].index(), Some(3));
        assert_eq!(tail, "leaf");
    }
}
