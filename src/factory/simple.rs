//! The "simple" (`spt`) factory implementation, §4.3.
//!
//! Mirrors [`super::compact::CompactFactory`] exactly; kept as a distinct
//! type (rather than a type alias) because the spec calls out two
//! implementations sharing one construction contract, and downstream code
//! (an elaborator, say) may reasonably want to match on which one produced
//! a given tree for diagnostic purposes.

use super::{FactoryStats, PtFactory};
use crate::arena::Arena;
use std::cell::RefCell;

pub struct SimpleFactory<'a> {
    arena: &'a Arena,
    stats: RefCell<FactoryStats>,
}

impl<'a> SimpleFactory<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            stats: RefCell::new(FactoryStats::default()),
        }
    }

    pub fn stats_snapshot(&self) -> FactoryStats {
        *self.stats.borrow()
    }
}

impl<'a> PtFactory<'a> for SimpleFactory<'a> {
    fn arena(&self) -> &'a Arena {
        self.arena
    }

    fn stats(&self) -> &RefCell<FactoryStats> {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;
    use crate::region::FileRegion;

    #[test]
    fn compact_and_simple_build_equivalent_trees() {
        let arena_a = Arena::new();
        let arena_b = Arena::new();
        let cpt = super::super::compact::CompactFactory::new(&arena_a);
        let spt = SimpleFactory::new(&arena_b);
        let region = FileRegion::at(Position::new());

        let a = cpt.new_const_int(region, "7", None, false);
        let b = spt.new_const_int(region, "7", None, false);
        assert_eq!(a.const_str(), b.const_str());
        assert_eq!(a.const_type(), b.const_type());
    }
}
