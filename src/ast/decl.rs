//! Declarations (PtDeclHead / PtDeclItem) and IO declarations (PtIOHead /
//! PtIOItem), §3.2 "Declaration" and "IO declaration".
//!
//! A declaration is a *header* (the shared type/attribute information) plus
//! an *item list* (the individual names). §4.4's "end-of-header flush"
//! mutation backfills `items` onto the most recently appended header once
//! the parser has gathered every name on the declaration's line.

use super::expr::PtExpr;
use super::misc::{PtDelay, PtRange, PtStrength};
use crate::region::FileRegion;
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclHeadType {
    Parameter,
    Localparam,
    Specparam,
    Event,
    Genvar,
    Variable(VarType),
    Reg,
    Net(NetType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    None,
    Integer,
    Real,
    Realtime,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetType {
    Wire,
    Tri,
    Tri0,
    Tri1,
    Triand,
    Trior,
    Trireg,
    Wand,
    Wor,
    Supply0,
    Supply1,
    Uwire,
}

/// One name in a declaration's item list: a name, optional initializer
/// expression, and optional array-of-ranges for a multi-dimensional
/// (memory) declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtDeclItem<'a> {
    region: FileRegion,
    name: &'a str,
    init: Option<&'a PtExpr<'a>>,
    dims: &'a [PtRange<'a>],
}

impl<'a> PtDeclItem<'a> {
    pub fn new(region: FileRegion, name: &'a str, init: Option<&'a PtExpr<'a>>, dims: &'a [PtRange<'a>]) -> Self {
        Self { region, name, init, dims }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn init(&self) -> Option<&'a PtExpr<'a>> {
        self.init
    }

    pub fn dims(&self) -> &'a [PtRange<'a>] {
        self.dims
    }

    pub fn is_memory(&self) -> bool {
        !self.dims.is_empty()
    }
}

/// A declaration header. `items` is set exactly once via [`Self::set_items`]
/// (the documented "back-fill" mutation, §3.3/§9): the header is built
/// first with an empty item list, then the driver calls `set_items` once it
/// has collected the full comma-separated name list on the header's line.
///
/// Not `Copy`: `items` is a `Cell`, and `Cell<T>` is never `Copy` regardless
/// of `T` (copying it would silently duplicate, not share, the back-fill
/// cell, defeating the "set exactly once, seen by every holder" contract
/// §3.4 requires).
#[derive(Debug, Clone, PartialEq)]
pub struct PtDeclHead<'a> {
    region: FileRegion,
    head_type: DeclHeadType,
    is_signed: bool,
    range: Option<PtRange<'a>>,
    strength: Option<PtStrength>,
    delay: Option<PtDelay<'a>>,
    items: Cell<&'a [PtDeclItem<'a>]>,
}

impl<'a> PtDeclHead<'a> {
    pub fn new(
        region: FileRegion,
        head_type: DeclHeadType,
        is_signed: bool,
        range: Option<PtRange<'a>>,
        strength: Option<PtStrength>,
        delay: Option<PtDelay<'a>>,
    ) -> Self {
        Self {
            region,
            head_type,
            is_signed,
            range,
            strength,
            delay,
            items: Cell::new(&[]),
        }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn head_type(&self) -> DeclHeadType {
        self.head_type
    }

    pub fn is_signed(&self) -> bool {
        self.is_signed
    }

    pub fn range(&self) -> Option<PtRange<'a>> {
        self.range
    }

    pub fn strength(&self) -> Option<PtStrength> {
        self.strength
    }

    pub fn delay(&self) -> Option<PtDelay<'a>> {
        self.delay
    }

    pub fn items(&self) -> &'a [PtDeclItem<'a>] {
        self.items.get()
    }

    /// Back-fills this header's item list. §3.4 requires this happens
    /// exactly once, between the header's creation and the end of the
    /// enclosing declaration; callers (the driver, in `flush_*`) are
    /// responsible for the "exactly once" part, this just performs the set.
    pub fn set_items(&self, items: &'a [PtDeclItem<'a>]) {
        self.items.set(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;

    #[test]
    fn decl_head_item_list_starts_empty_and_is_backfilled_once() {
        let region = FileRegion::at(Position::new());
        let head = PtDeclHead::new(region, DeclHeadType::Reg, false, None, None, None);
        assert!(head.items().is_empty());
        let items = [PtDeclItem::new(region, "a", None, &[]), PtDeclItem::new(region, "b", None, &[])];
        head.set_items(&items);
        assert_eq!(head.items().len(), 2);
        assert_eq!(head.items()[1].name(), "b");
    }
}
