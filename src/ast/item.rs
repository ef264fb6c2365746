//! Module-level items (PtItem), §3.2 "Item".
//!
//! Everything a module body can contain that isn't a plain declaration or
//! IO header: continuous assigns, behavioral blocks, tasks/functions, gate
//! and module instances, `generate` constructs, and `specify` timing items.

use super::decl::PtDeclHead;
use super::expr::PtExpr;
use super::io::PtIOHead;
use super::misc::{PtAttrInst, PtConnection, PtDelay, PtNameBranch, PtPathDecl, PtStrength};
use super::stmt::PtStmt;
use crate::region::FileRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionReturnType {
    Untyped,
    Sized,
    Integer,
    Real,
    Realtime,
    Time,
}

/// One `defparam target = value` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtDefparamAssign<'a> {
    region: FileRegion,
    lhs: &'a PtExpr<'a>,
    rhs: &'a PtExpr<'a>,
}

impl<'a> PtDefparamAssign<'a> {
    pub fn new(region: FileRegion, lhs: &'a PtExpr<'a>, rhs: &'a PtExpr<'a>) -> Self {
        Self { region, lhs, rhs }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn lhs(&self) -> &'a PtExpr<'a> {
        self.lhs
    }

    pub fn rhs(&self) -> &'a PtExpr<'a> {
        self.rhs
    }
}

/// One `lhs = rhs` pair inside a continuous-assign group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtContAssign<'a> {
    region: FileRegion,
    lhs: &'a PtExpr<'a>,
    rhs: &'a PtExpr<'a>,
}

impl<'a> PtContAssign<'a> {
    pub fn new(region: FileRegion, lhs: &'a PtExpr<'a>, rhs: &'a PtExpr<'a>) -> Self {
        Self { region, lhs, rhs }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn lhs(&self) -> &'a PtExpr<'a> {
        self.lhs
    }

    pub fn rhs(&self) -> &'a PtExpr<'a> {
        self.rhs
    }
}

/// A gate or module/UDP instantiation: one named instance within an
/// instance group sharing a common def-name (`and u1(...), u2(...);`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtInstance<'a> {
    region: FileRegion,
    name: Option<&'a str>,
    range: Option<&'a super::misc::PtRange<'a>>,
    connections: &'a [PtConnection<'a>],
}

impl<'a> PtInstance<'a> {
    pub fn new(region: FileRegion, name: Option<&'a str>, range: Option<&'a super::misc::PtRange<'a>>, connections: &'a [PtConnection<'a>]) -> Self {
        Self { region, name, range, connections }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    pub fn range(&self) -> Option<&'a super::misc::PtRange<'a>> {
        self.range
    }

    pub fn connections(&self) -> &'a [PtConnection<'a>] {
        self.connections
    }
}

/// One table-entry row of a generate-case item list (also reused for
/// if/else branch bodies, which are single items rather than arrays).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtGenCaseItem<'a> {
    region: FileRegion,
    labels: &'a [&'a PtExpr<'a>],
    body: &'a [&'a PtItem<'a>],
}

impl<'a> PtGenCaseItem<'a> {
    pub fn new(region: FileRegion, labels: &'a [&'a PtExpr<'a>], body: &'a [&'a PtItem<'a>]) -> Self {
        Self { region, labels, body }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn labels(&self) -> &'a [&'a PtExpr<'a>] {
        self.labels
    }

    pub fn body(&self) -> &'a [&'a PtItem<'a>] {
        self.body
    }

    pub fn is_default(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PtItem<'a> {
    Defparam {
        region: FileRegion,
        assigns: &'a [PtDefparamAssign<'a>],
    },
    ContAssign {
        region: FileRegion,
        strength: Option<PtStrength>,
        delay: Option<PtDelay<'a>>,
        assigns: &'a [PtContAssign<'a>],
    },
    Initial {
        region: FileRegion,
        body: &'a PtStmt<'a>,
    },
    Always {
        region: FileRegion,
        body: &'a PtStmt<'a>,
    },
    Task {
        region: FileRegion,
        name: &'a str,
        is_automatic: bool,
        io_list: &'a [&'a PtIOHead<'a>],
        decl_list: &'a [&'a PtDeclHead<'a>],
        body: &'a PtStmt<'a>,
    },
    Function {
        region: FileRegion,
        name: &'a str,
        is_automatic: bool,
        return_type: FunctionReturnType,
        return_range: Option<&'a super::misc::PtRange<'a>>,
        io_list: &'a [&'a PtIOHead<'a>],
        decl_list: &'a [&'a PtDeclHead<'a>],
        body: &'a PtStmt<'a>,
    },
    GateInstance {
        region: FileRegion,
        gate_type: &'a str,
        strength: Option<PtStrength>,
        delay: Option<PtDelay<'a>>,
        instances: &'a [PtInstance<'a>],
    },
    ModuleInstance {
        region: FileRegion,
        namebranch: &'a [PtNameBranch<'a>],
        def_name: &'a str,
        param_overrides: &'a [PtConnection<'a>],
        instances: &'a [PtInstance<'a>],
    },
    GenerateBlock {
        region: FileRegion,
        name: Option<&'a str>,
        items: &'a [&'a PtItem<'a>],
    },
    GenerateIf {
        region: FileRegion,
        expr: &'a PtExpr<'a>,
        then_items: &'a [&'a PtItem<'a>],
        else_items: &'a [&'a PtItem<'a>],
    },
    GenerateCase {
        region: FileRegion,
        expr: &'a PtExpr<'a>,
        items: &'a [PtGenCaseItem<'a>],
    },
    GenerateFor {
        region: FileRegion,
        init_stmt: &'a PtStmt<'a>,
        expr: &'a PtExpr<'a>,
        next_stmt: &'a PtStmt<'a>,
        block_name: Option<&'a str>,
        items: &'a [&'a PtItem<'a>],
    },
    SpecifyPath {
        region: FileRegion,
        decl: PtPathDecl<'a>,
    },
    SpecifyItem {
        region: FileRegion,
        text: &'a str,
    },
}

impl<'a> PtItem<'a> {
    pub fn file_region(&self) -> FileRegion {
        match self {
            Self::Defparam { region, .. }
            | Self::ContAssign { region, .. }
            | Self::Initial { region, .. }
            | Self::Always { region, .. }
            | Self::Task { region, .. }
            | Self::Function { region, .. }
            | Self::GateInstance { region, .. }
            | Self::ModuleInstance { region, .. }
            | Self::GenerateBlock { region, .. }
            | Self::GenerateIf { region, .. }
            | Self::GenerateCase { region, .. }
            | Self::GenerateFor { region, .. }
            | Self::SpecifyPath { region, .. }
            | Self::SpecifyItem { region, .. } => *region,
        }
    }

    pub fn is_generate(&self) -> bool {
        matches!(
            self,
            Self::GenerateBlock { .. } | Self::GenerateIf { .. } | Self::GenerateCase { .. } | Self::GenerateFor { .. }
        )
    }
}

/// An attribute instance attached to a previously built node, keyed by the
/// node's region (nodes are immutable post-construction, so attribute
/// attachment is done by lookup rather than a mutable field — see
/// `PtManager::reg_attrinst`, §4.7).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtAttrBinding<'a> {
    target: FileRegion,
    attr: PtAttrInst<'a>,
}

impl<'a> PtAttrBinding<'a> {
    pub fn new(target: FileRegion, attr: PtAttrInst<'a>) -> Self {
        Self { target, attr }
    }

    pub fn target(&self) -> FileRegion {
        self.target
    }

    pub fn attr(&self) -> &PtAttrInst<'a> {
        &self.attr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;

    #[test]
    fn generate_case_item_default_has_empty_labels() {
        let region = FileRegion::at(Position::new());
        let item = PtGenCaseItem::new(region, &[], &[]);
        assert!(item.is_default());
    }
}
