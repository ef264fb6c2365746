//! Statements (PtStmt), §3.2 "Statement".
//!
//! As with [`super::expr::PtExpr`], every accessor is total: a statement
//! variant that does not carry a given field returns the documented neutral
//! value rather than panicking.

use super::decl::PtDeclHead;
use super::expr::PtExpr;
use super::misc::{PtControl, PtNameBranch};
use crate::region::FileRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtType {
    Disable,
    Enable,
    SysEnable,
    DelayControl,
    EventControl,
    Wait,
    BlockingAssign,
    NonBlockingAssign,
    EventTrigger,
    Null,
    If,
    IfElse,
    Case,
    Casex,
    Casez,
    Forever,
    Repeat,
    While,
    For,
    PcAssign,
    Deassign,
    Force,
    Release,
    ParBlock,
    NamedParBlock,
    SeqBlock,
    NamedSeqBlock,
}

/// One arm of a `case`/`casex`/`casez` statement. An empty `labels` slice is
/// the `default` arm; §4.5 requires at most one per case statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtCaseItem<'a> {
    region: FileRegion,
    labels: &'a [&'a PtExpr<'a>],
    body: &'a PtStmt<'a>,
}

impl<'a> PtCaseItem<'a> {
    pub fn new(region: FileRegion, labels: &'a [&'a PtExpr<'a>], body: &'a PtStmt<'a>) -> Self {
        Self { region, labels, body }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn labels(&self) -> &'a [&'a PtExpr<'a>] {
        self.labels
    }

    pub fn body(&self) -> &'a PtStmt<'a> {
        self.body
    }

    pub fn is_default(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PtStmt<'a> {
    Disable {
        region: FileRegion,
        namebranch: &'a [PtNameBranch<'a>],
        name: &'a str,
    },
    Enable {
        region: FileRegion,
        is_system: bool,
        namebranch: &'a [PtNameBranch<'a>],
        name: &'a str,
        args: &'a [&'a PtExpr<'a>],
    },
    DelayControl {
        region: FileRegion,
        control: PtControl<'a>,
        body: Option<&'a PtStmt<'a>>,
    },
    EventControl {
        region: FileRegion,
        control: PtControl<'a>,
        body: Option<&'a PtStmt<'a>>,
    },
    Wait {
        region: FileRegion,
        expr: &'a PtExpr<'a>,
        body: Option<&'a PtStmt<'a>>,
    },
    BlockingAssign {
        region: FileRegion,
        lhs: &'a PtExpr<'a>,
        rhs: &'a PtExpr<'a>,
        control: Option<PtControl<'a>>,
    },
    NonBlockingAssign {
        region: FileRegion,
        lhs: &'a PtExpr<'a>,
        rhs: &'a PtExpr<'a>,
        control: Option<PtControl<'a>>,
    },
    EventTrigger {
        region: FileRegion,
        namebranch: &'a [PtNameBranch<'a>],
        name: &'a str,
    },
    Null {
        region: FileRegion,
    },
    If {
        region: FileRegion,
        expr: &'a PtExpr<'a>,
        body: &'a PtStmt<'a>,
        else_body: Option<&'a PtStmt<'a>>,
    },
    Case {
        region: FileRegion,
        stmt_type: StmtType,
        expr: &'a PtExpr<'a>,
        items: &'a [PtCaseItem<'a>],
    },
    Forever {
        region: FileRegion,
        body: &'a PtStmt<'a>,
    },
    Repeat {
        region: FileRegion,
        expr: &'a PtExpr<'a>,
        body: &'a PtStmt<'a>,
    },
    While {
        region: FileRegion,
        expr: &'a PtExpr<'a>,
        body: &'a PtStmt<'a>,
    },
    For {
        region: FileRegion,
        init_stmt: &'a PtStmt<'a>,
        expr: &'a PtExpr<'a>,
        next_stmt: &'a PtStmt<'a>,
        body: &'a PtStmt<'a>,
    },
    PcAssign {
        region: FileRegion,
        lhs: &'a PtExpr<'a>,
        rhs: &'a PtExpr<'a>,
    },
    Deassign {
        region: FileRegion,
        lhs: &'a PtExpr<'a>,
    },
    Force {
        region: FileRegion,
        lhs: &'a PtExpr<'a>,
        rhs: &'a PtExpr<'a>,
    },
    Release {
        region: FileRegion,
        lhs: &'a PtExpr<'a>,
    },
    Block {
        region: FileRegion,
        stmt_type: StmtType,
        name: Option<&'a str>,
        decls: &'a [PtDeclHead<'a>],
        stmts: &'a [&'a PtStmt<'a>],
    },
}

impl<'a> PtStmt<'a> {
    pub fn file_region(&self) -> FileRegion {
        match self {
            Self::Disable { region, .. }
            | Self::Enable { region, .. }
            | Self::DelayControl { region, .. }
            | Self::EventControl { region, .. }
            | Self::Wait { region, .. }
            | Self::BlockingAssign { region, .. }
            | Self::NonBlockingAssign { region, .. }
            | Self::EventTrigger { region, .. }
            | Self::Null { region }
            | Self::If { region, .. }
            | Self::Case { region, .. }
            | Self::Forever { region, .. }
            | Self::Repeat { region, .. }
            | Self::While { region, .. }
            | Self::For { region, .. }
            | Self::PcAssign { region, .. }
            | Self::Deassign { region, .. }
            | Self::Force { region, .. }
            | Self::Release { region, .. }
            | Self::Block { region, .. } => *region,
        }
    }

    pub fn stmt_type(&self) -> StmtType {
        match self {
            Self::Disable { .. } => StmtType::Disable,
            Self::Enable { is_system, .. } => {
                if *is_system {
                    StmtType::SysEnable
                } else {
                    StmtType::Enable
                }
            }
            Self::DelayControl { .. } => StmtType::DelayControl,
            Self::EventControl { .. } => StmtType::EventControl,
            Self::Wait { .. } => StmtType::Wait,
            Self::BlockingAssign { .. } => StmtType::BlockingAssign,
            Self::NonBlockingAssign { .. } => StmtType::NonBlockingAssign,
            Self::EventTrigger { .. } => StmtType::EventTrigger,
            Self::Null { .. } => StmtType::Null,
            Self::If { else_body, .. } => {
                if else_body.is_some() {
                    StmtType::IfElse
                } else {
                    StmtType::If
                }
            }
            Self::Case { stmt_type, .. } => *stmt_type,
            Self::Forever { .. } => StmtType::Forever,
            Self::Repeat { .. } => StmtType::Repeat,
            Self::While { .. } => StmtType::While,
            Self::For { .. } => StmtType::For,
            Self::PcAssign { .. } => StmtType::PcAssign,
            Self::Deassign { .. } => StmtType::Deassign,
            Self::Force { .. } => StmtType::Force,
            Self::Release { .. } => StmtType::Release,
            Self::Block { stmt_type, .. } => *stmt_type,
        }
    }

    /// A short, human-readable name for the statement kind, used in
    /// diagnostics (e.g. the function-body-restriction error naming "delay
    /// control statement").
    pub fn stmt_name(&self) -> &'static str {
        match self {
            Self::Disable { .. } => "disable statement",
            Self::Enable { is_system: true, .. } => "system task enable",
            Self::Enable { .. } => "task enable",
            Self::DelayControl { .. } => "delay control statement",
            Self::EventControl { .. } => "event control statement",
            Self::Wait { .. } => "wait statement",
            Self::BlockingAssign { .. } => "blocking assignment",
            Self::NonBlockingAssign { .. } => "nonblocking assignment",
            Self::EventTrigger { .. } => "event trigger",
            Self::Null { .. } => "null statement",
            Self::If { .. } => "if statement",
            Self::Case { stmt_type: StmtType::Casex, .. } => "casex statement",
            Self::Case { stmt_type: StmtType::Casez, .. } => "casez statement",
            Self::Case { .. } => "case statement",
            Self::Forever { .. } => "forever statement",
            Self::Repeat { .. } => "repeat statement",
            Self::While { .. } => "while statement",
            Self::For { .. } => "for statement",
            Self::PcAssign { .. } => "procedural continuous assign",
            Self::Deassign { .. } => "deassign statement",
            Self::Force { .. } => "force statement",
            Self::Release { .. } => "release statement",
            Self::Block { stmt_type: StmtType::ParBlock | StmtType::NamedParBlock, .. } => "parallel block",
            Self::Block { .. } => "sequential block",
        }
    }

    pub fn namebranch_num(&self) -> usize {
        self.namebranch_slice().len()
    }

    fn namebranch_slice(&self) -> &'a [PtNameBranch<'a>] {
        match self {
            Self::Disable { namebranch, .. }
            | Self::Enable { namebranch, .. }
            | Self::EventTrigger { namebranch, .. } => namebranch,
            _ => &[],
        }
    }

    pub fn namebranch(&self, i: usize) -> Option<PtNameBranch<'a>> {
        self.namebranch_slice().get(i).copied()
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Disable { name, .. } | Self::Enable { name, .. } | Self::EventTrigger { name, .. } => name,
            Self::Block { name: Some(n), .. } => n,
            _ => "",
        }
    }

    pub fn arg_num(&self) -> usize {
        self.arg_slice().len()
    }

    fn arg_slice(&self) -> &'a [&'a PtExpr<'a>] {
        match self {
            Self::Enable { args, .. } => args,
            _ => &[],
        }
    }

    pub fn arg(&self, i: usize) -> Option<&'a PtExpr<'a>> {
        self.arg_slice().get(i).copied()
    }

    pub fn control(&self) -> Option<&PtControl<'a>> {
        match self {
            Self::DelayControl { control, .. } | Self::EventControl { control, .. } => Some(control),
            Self::BlockingAssign { control, .. } | Self::NonBlockingAssign { control, .. } => control.as_ref(),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&'a PtStmt<'a>> {
        match self {
            Self::DelayControl { body, .. } | Self::EventControl { body, .. } | Self::Wait { body, .. } => *body,
            Self::If { body, .. } | Self::Forever { body, .. } | Self::Repeat { body, .. } | Self::While { body, .. } | Self::For { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    pub fn expr(&self) -> Option<&'a PtExpr<'a>> {
        match self {
            Self::Wait { expr, .. } | Self::If { expr, .. } | Self::Case { expr, .. } | Self::Repeat { expr, .. } | Self::While { expr, .. } | Self::For { expr, .. } => {
                Some(expr)
            }
            _ => None,
        }
    }

    pub fn lhs(&self) -> Option<&'a PtExpr<'a>> {
        match self {
            Self::BlockingAssign { lhs, .. }
            | Self::NonBlockingAssign { lhs, .. }
            | Self::PcAssign { lhs, .. }
            | Self::Deassign { lhs, .. }
            | Self::Force { lhs, .. }
            | Self::Release { lhs, .. } => Some(lhs),
            _ => None,
        }
    }

    pub fn rhs(&self) -> Option<&'a PtExpr<'a>> {
        match self {
            Self::BlockingAssign { rhs, .. } | Self::NonBlockingAssign { rhs, .. } | Self::PcAssign { rhs, .. } | Self::Force { rhs, .. } => Some(rhs),
            _ => None,
        }
    }

    /// Alias for the common case of treating an assign's lhs as "the
    /// primary being written"; present because the specification names a
    /// distinct `primary` accessor separate from `lhs` for some statement
    /// kinds (e.g. disable's target is not an lhs in the assign sense).
    pub fn primary(&self) -> Option<&'a PtExpr<'a>> {
        self.lhs()
    }

    pub fn else_body(&self) -> Option<&'a PtStmt<'a>> {
        match self {
            Self::If { else_body, .. } => *else_body,
            _ => None,
        }
    }

    pub fn caseitem_num(&self) -> usize {
        match self {
            Self::Case { items, .. } => items.len(),
            _ => 0,
        }
    }

    pub fn caseitem(&self, i: usize) -> Option<PtCaseItem<'a>> {
        match self {
            Self::Case { items, .. } => items.get(i).copied(),
            _ => None,
        }
    }

    pub fn init_stmt(&self) -> Option<&'a PtStmt<'a>> {
        match self {
            Self::For { init_stmt, .. } => Some(init_stmt),
            _ => None,
        }
    }

    pub fn next_stmt(&self) -> Option<&'a PtStmt<'a>> {
        match self {
            Self::For { next_stmt, .. } => Some(next_stmt),
            _ => None,
        }
    }

    pub fn decl_head_num(&self) -> usize {
        match self {
            Self::Block { decls, .. } => decls.len(),
            _ => 0,
        }
    }

    pub fn decl_head(&self, i: usize) -> Option<&'a PtDeclHead<'a>> {
        match self {
            Self::Block { decls, .. } => decls.get(i),
            _ => None,
        }
    }

    pub fn child_stmt_num(&self) -> usize {
        match self {
            Self::Block { stmts, .. } => stmts.len(),
            _ => 0,
        }
    }

    pub fn child_stmt(&self, i: usize) -> Option<&'a PtStmt<'a>> {
        match self {
            Self::Block { stmts, .. } => stmts.get(i).copied(),
            _ => None,
        }
    }

    /// §4.5 function-body check: whether this statement kind is admissible
    /// inside a function body, not recursing into children (the validator
    /// walks the tree and calls this at every node).
    pub fn is_function_body_legal(&self) -> bool {
        matches!(
            self,
            Self::Disable { .. }
                | Self::Enable { is_system: true, .. }
                | Self::Null { .. }
                | Self::BlockingAssign { control: None, .. }
                | Self::If { .. }
                | Self::Case { .. }
                | Self::Forever { .. }
                | Self::Repeat { .. }
                | Self::While { .. }
                | Self::For { .. }
                | Self::Block {
                    stmt_type: StmtType::SeqBlock | StmtType::NamedSeqBlock,
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;

    fn region() -> FileRegion {
        FileRegion::at(Position::new())
    }

    #[test]
    fn default_case_item_has_empty_labels() {
        let body = PtStmt::Null { region: region() };
        let item = PtCaseItem::new(region(), &[], &body);
        assert!(item.is_default());
    }

    #[test]
    fn delay_controlled_blocking_assign_is_illegal_in_function_body() {
        let lhs = crate::ast::expr::PtExpr::Primary {
            region: region(),
            namebranch: &[],
            tail_name: "f",
            index: &[],
            range_mode: crate::ast::expr::RangeMode::None,
            left_range: None,
            right_range: None,
            is_const_index: false,
        };
        let delay = PtControl::Delay(crate::ast::misc::PtDelay::new(region(), &[]));
        let stmt = PtStmt::BlockingAssign {
            region: region(),
            lhs: &lhs,
            rhs: &lhs,
            control: Some(delay),
        };
        assert!(!stmt.is_function_body_legal());
    }

    #[test]
    fn plain_blocking_assign_is_legal_in_function_body() {
        let lhs = crate::ast::expr::PtExpr::Primary {
            region: region(),
            namebranch: &[],
            tail_name: "f",
            index: &[],
            range_mode: crate::ast::expr::RangeMode::None,
            left_range: None,
            right_range: None,
            is_const_index: false,
        };
        let stmt = PtStmt::BlockingAssign {
            region: region(),
            lhs: &lhs,
            rhs: &lhs,
            control: None,
        };
        assert!(stmt.is_function_body_legal());
    }
}
