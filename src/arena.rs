//! Arena & Array Builder (C1).
//!
//! All PT nodes are owned by a single bump-pointer arena whose lifetime
//! equals the owning [`crate::manager::PtManager`]'s. Objects are never
//! individually freed: the whole arena is dropped at once.
//!
//! A second, short-lived [`TempArena`] backs the driver's in-progress
//! working lists (see `assembly.rs`). It is bulk-reset between top-level
//! declarations rather than tracking individual frees, mirroring the
//! "short-lived fragment allocator" the specification calls for.

use bumpalo::Bump;

/// Bump-pointer allocator for immutable, arena-owned PT nodes.
pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Allocates `value` into the arena and returns a reference valid for
    /// the arena's lifetime.
    pub fn alloc<T>(&self, value: T) -> &T {
        self.bump.alloc(value)
    }

    /// Copies an ordered sequence of items into a contiguous, arena-owned
    /// slice and returns a `&[T]` handle with indexed access.
    pub fn alloc_slice<T, I>(&self, iter: I) -> &[T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    /// Interns a string into the arena, returning a `&str` with the
    /// arena's lifetime. Used by the PT manager's `save_string`.
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

/// Short-lived allocator for the driver's working lists (IO items,
/// declaration items, port refs, UDP rows, ...). Reset in bulk between
/// top-level declarations; does not track individual frees because the
/// ordinary `Vec`s built against it are dropped by Rust's normal ownership
/// rules as soon as a grammar reduction materializes them into the arena.
pub struct TempArena {
    bump: Bump,
}

impl TempArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Bulk-resets the temporary allocator. Invalidates all previous
    /// allocations from this arena; callers must have already migrated
    /// anything they need into the main [`Arena`].
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    pub fn alloc<T>(&self, value: T) -> &T {
        self.bump.alloc(value)
    }
}

impl Default for TempArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies an ordered sequence of references into a contiguous, arena-owned
/// array and returns an indexed-access handle. This is the named "Array
/// Builder" the specification calls for, layered over [`Arena::alloc_slice`]
/// for call sites that build from a `Vec` of already-constructed children.
pub struct ArrayBuilder;

impl ArrayBuilder {
    pub fn build<'a, T>(arena: &'a Arena, items: Vec<T>) -> &'a [T] {
        arena.alloc_slice(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_returns_stable_reference() {
        let arena = Arena::new();
        let a = arena.alloc(42u32);
        let b = arena.alloc(7u32);
        assert_eq!(*a, 42);
        assert_eq!(*b, 7);
    }

    #[test]
    fn array_builder_preserves_order() {
        let arena = Arena::new();
        let slice = ArrayBuilder::build(&arena, vec![1, 2, 3]);
        assert_eq!(slice, &[1, 2, 3]);
    }

    #[test]
    fn temp_arena_reset_allows_reuse() {
        let mut temp = TempArena::new();
        {
            let _x = temp.alloc(1u32);
        }
        temp.reset();
        let y = temp.alloc(2u32);
        assert_eq!(*y, 2);
    }
}
