//! PT Factory (C3), §4.3.
//!
//! A trait exposing construction entry points, one per syntactic
//! production, grouped by family (expressions, primaries, statements,
//! declarations, IO, items, containers, misc). Every method allocates into
//! the arena and returns an immutable, fully-constructed node — "factory
//! methods never fail" (§4.3): precondition violations are `debug_assert!`
//! failures, not `Result` errors.
//!
//! The factory has two concrete implementations, [`compact::CompactFactory`]
//! ("cpt") and [`simple::SimpleFactory`] ("spt"). Per this crate's collapse
//! of the original's deep class hierarchies into single tagged `enum`
//! variants (§9), both implementations build the identical node shapes;
//! they differ only in which [`FactoryStats`] bucket they attribute
//! allocations to, standing in for the original's memory-density
//! distinction between narrow per-combination C++ classes and one generic
//! layout per family. A real further optimization pass could have
//! `CompactFactory` choose a smaller representation for common cases (e.g.
//! a simple, unindexed primary); this crate does not bother, since `PtExpr`
//! is already as small as the tagged-union redesign allows.

pub mod compact;
pub mod decompile;
pub mod simple;

use crate::arena::Arena;
use crate::ast::container::{DefaultNetType, DelayMode, PtPort, PtUdp, PtUdpEntry, UdpPrimType};
use crate::ast::decl::{DeclHeadType, PtDeclHead, PtDeclItem};
use crate::ast::expr::{ConstType, OperatorKind, PtExpr, RangeMode};
use crate::ast::io::{IoAuxType, IoDirection, PtIOHead, PtIOItem};
use crate::ast::item::{FunctionReturnType, PtContAssign, PtDefparamAssign, PtGenCaseItem, PtInstance, PtItem};
use crate::ast::misc::{PtAttrInst, PtAttrSpec, PtConnection, PtControl, PtDelay, PtNameBranch, PtPathDecl, PtPathDelay, PtRange, PtStrength, StrengthValue};
use crate::ast::stmt::{PtCaseItem, PtStmt, StmtType};
use crate::ast::PtModule;
use crate::region::FileRegion;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Expr,
    Stmt,
    Decl,
    Io,
    Item,
    Container,
    Misc,
}

/// Per-category construction counters, incremented on every factory call
/// for profiling (§4.3 "side effects"). Emitted via `log::trace!` under the
/// `trace-factory` target rather than exposed as a metrics endpoint — this
/// crate has no wire surface of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct FactoryStats {
    pub expr: u64,
    pub stmt: u64,
    pub decl: u64,
    pub io: u64,
    pub item: u64,
    pub container: u64,
    pub misc: u64,
}

impl FactoryStats {
    pub fn bump(&mut self, cat: StatCategory) {
        let counter = match cat {
            StatCategory::Expr => &mut self.expr,
            StatCategory::Stmt => &mut self.stmt,
            StatCategory::Decl => &mut self.decl,
            StatCategory::Io => &mut self.io,
            StatCategory::Item => &mut self.item,
            StatCategory::Container => &mut self.container,
            StatCategory::Misc => &mut self.misc,
        };
        *counter += 1;
        log::trace!(target: "trace-factory", "factory construction: {:?} (total {})", cat, *counter);
    }

    pub fn total(&self) -> u64 {
        self.expr + self.stmt + self.decl + self.io + self.item + self.container + self.misc
    }
}

/// The construction interface the driver calls into. Implemented by
/// [`compact::CompactFactory`] and [`simple::SimpleFactory`]; the driver is
/// generic over `F: PtFactory<'a>` so it is agnostic to which is handed to
/// it (§4.3).
pub trait PtFactory<'a> {
    fn arena(&self) -> &'a Arena;
    fn stats(&self) -> &RefCell<FactoryStats>;

    fn bump(&self, cat: StatCategory) {
        self.stats().borrow_mut().bump(cat);
    }

    // ---- expressions -----------------------------------------------

    fn new_operator(&self, region: FileRegion, kind: OperatorKind, operands: Vec<&'a PtExpr<'a>>) -> &'a PtExpr<'a> {
        debug_assert!(
            match kind.operand_count() {
                crate::ast::expr::OperandArity::Fixed(n) => operands.len() == n,
                crate::ast::expr::OperandArity::Variadic => !operands.is_empty(),
            },
            "operand count must match operator arity"
        );
        self.bump(StatCategory::Expr);
        self.arena().alloc(PtExpr::Operator {
            region,
            kind,
            operands: self.arena().alloc_slice(operands),
        })
    }

    fn new_const_int(&self, region: FileRegion, text: &str, size: Option<u32>, is_signed: bool) -> &'a PtExpr<'a> {
        self.bump(StatCategory::Expr);
        let const_type = if size.is_some() { ConstType::IntSized } else { ConstType::IntUnsized };
        self.arena().alloc(PtExpr::Constant {
            region,
            const_type,
            size,
            is_signed,
            text: self.arena().alloc_str(text),
        })
    }

    fn new_const_real(&self, region: FileRegion, text: &str) -> &'a PtExpr<'a> {
        self.bump(StatCategory::Expr);
        self.arena().alloc(PtExpr::Constant {
            region,
            const_type: ConstType::Real,
            size: None,
            is_signed: false,
            text: self.arena().alloc_str(text),
        })
    }

    fn new_const_string(&self, region: FileRegion, text: &str) -> &'a PtExpr<'a> {
        self.bump(StatCategory::Expr);
        self.arena().alloc(PtExpr::Constant {
            region,
            const_type: ConstType::String,
            size: None,
            is_signed: false,
            text: self.arena().alloc_str(text),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn new_primary(
        &self,
        region: FileRegion,
        namebranch: Vec<PtNameBranch<'a>>,
        tail_name: &'a str,
        index: Vec<&'a PtExpr<'a>>,
        range_mode: RangeMode,
        left_range: Option<&'a PtExpr<'a>>,
        right_range: Option<&'a PtExpr<'a>>,
        is_const_index: bool,
    ) -> &'a PtExpr<'a> {
        debug_assert!(
            range_mode == RangeMode::None || (left_range.is_some() && right_range.is_some()),
            "left and right must be non-null for ranged primary"
        );
        self.bump(StatCategory::Expr);
        self.arena().alloc(PtExpr::Primary {
            region,
            namebranch: self.arena().alloc_slice(namebranch),
            tail_name,
            index: self.arena().alloc_slice(index),
            range_mode,
            left_range,
            right_range,
            is_const_index,
        })
    }

    fn new_func_call(&self, region: FileRegion, is_system: bool, namebranch: Vec<PtNameBranch<'a>>, tail_name: &'a str, args: Vec<&'a PtExpr<'a>>) -> &'a PtExpr<'a> {
        self.bump(StatCategory::Expr);
        self.arena().alloc(PtExpr::FuncCall {
            region,
            is_system,
            namebranch: self.arena().alloc_slice(namebranch),
            tail_name,
            args: self.arena().alloc_slice(args),
        })
    }

    // ---- statements --------------------------------------------------

    fn new_stmt_disable(&self, region: FileRegion, namebranch: Vec<PtNameBranch<'a>>, name: &'a str) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Disable {
            region,
            namebranch: self.arena().alloc_slice(namebranch),
            name,
        })
    }

    fn new_stmt_enable(&self, region: FileRegion, is_system: bool, namebranch: Vec<PtNameBranch<'a>>, name: &'a str, args: Vec<&'a PtExpr<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Enable {
            region,
            is_system,
            namebranch: self.arena().alloc_slice(namebranch),
            name,
            args: self.arena().alloc_slice(args),
        })
    }

    fn new_stmt_delay_control(&self, region: FileRegion, control: PtControl<'a>, body: Option<&'a PtStmt<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::DelayControl { region, control, body })
    }

    fn new_stmt_event_control(&self, region: FileRegion, control: PtControl<'a>, body: Option<&'a PtStmt<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::EventControl { region, control, body })
    }

    fn new_stmt_wait(&self, region: FileRegion, expr: &'a PtExpr<'a>, body: Option<&'a PtStmt<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Wait { region, expr, body })
    }

    fn new_stmt_blocking_assign(&self, region: FileRegion, lhs: &'a PtExpr<'a>, rhs: &'a PtExpr<'a>, control: Option<PtControl<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::BlockingAssign { region, lhs, rhs, control })
    }

    fn new_stmt_nonblocking_assign(&self, region: FileRegion, lhs: &'a PtExpr<'a>, rhs: &'a PtExpr<'a>, control: Option<PtControl<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::NonBlockingAssign { region, lhs, rhs, control })
    }

    fn new_stmt_event_trigger(&self, region: FileRegion, namebranch: Vec<PtNameBranch<'a>>, name: &'a str) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::EventTrigger {
            region,
            namebranch: self.arena().alloc_slice(namebranch),
            name,
        })
    }

    fn new_stmt_null(&self, region: FileRegion) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Null { region })
    }

    fn new_stmt_if(&self, region: FileRegion, expr: &'a PtExpr<'a>, body: &'a PtStmt<'a>, else_body: Option<&'a PtStmt<'a>>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::If { region, expr, body, else_body })
    }

    fn new_caseitem(&self, region: FileRegion, labels: Vec<&'a PtExpr<'a>>, body: &'a PtStmt<'a>) -> PtCaseItem<'a> {
        PtCaseItem::new(region, self.arena().alloc_slice(labels), body)
    }

    fn new_stmt_case(&self, region: FileRegion, stmt_type: StmtType, expr: &'a PtExpr<'a>, items: Vec<PtCaseItem<'a>>) -> &'a PtStmt<'a> {
        debug_assert!(matches!(stmt_type, StmtType::Case | StmtType::Casex | StmtType::Casez));
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Case {
            region,
            stmt_type,
            expr,
            items: self.arena().alloc_slice(items),
        })
    }

    fn new_stmt_forever(&self, region: FileRegion, body: &'a PtStmt<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Forever { region, body })
    }

    fn new_stmt_repeat(&self, region: FileRegion, expr: &'a PtExpr<'a>, body: &'a PtStmt<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Repeat { region, expr, body })
    }

    fn new_stmt_while(&self, region: FileRegion, expr: &'a PtExpr<'a>, body: &'a PtStmt<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::While { region, expr, body })
    }

    fn new_stmt_for(&self, region: FileRegion, init_stmt: &'a PtStmt<'a>, expr: &'a PtExpr<'a>, next_stmt: &'a PtStmt<'a>, body: &'a PtStmt<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::For {
            region,
            init_stmt,
            expr,
            next_stmt,
            body,
        })
    }

    fn new_stmt_pc_assign(&self, region: FileRegion, lhs: &'a PtExpr<'a>, rhs: &'a PtExpr<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::PcAssign { region, lhs, rhs })
    }

    fn new_stmt_deassign(&self, region: FileRegion, lhs: &'a PtExpr<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Deassign { region, lhs })
    }

    fn new_stmt_force(&self, region: FileRegion, lhs: &'a PtExpr<'a>, rhs: &'a PtExpr<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Force { region, lhs, rhs })
    }

    fn new_stmt_release(&self, region: FileRegion, lhs: &'a PtExpr<'a>) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Release { region, lhs })
    }

    fn new_stmt_block(
        &self,
        region: FileRegion,
        stmt_type: StmtType,
        name: Option<&'a str>,
        decls: Vec<PtDeclHead<'a>>,
        stmts: Vec<&'a PtStmt<'a>>,
    ) -> &'a PtStmt<'a> {
        self.bump(StatCategory::Stmt);
        self.arena().alloc(PtStmt::Block {
            region,
            stmt_type,
            name,
            decls: self.arena().alloc_slice(decls),
            stmts: self.arena().alloc_slice(stmts),
        })
    }

    // ---- declarations & IO --------------------------------------------

    fn new_range(&self, region: FileRegion, msb: &'a PtExpr<'a>, lsb: &'a PtExpr<'a>) -> PtRange<'a> {
        self.bump(StatCategory::Misc);
        PtRange::new(region, msb, lsb)
    }

    fn new_delay(&self, region: FileRegion, values: Vec<&'a PtExpr<'a>>) -> PtDelay<'a> {
        self.bump(StatCategory::Misc);
        PtDelay::new(region, self.arena().alloc_slice(values))
    }

    fn new_strength(&self, region: FileRegion, value0: Option<StrengthValue>, value1: Option<StrengthValue>) -> PtStrength {
        self.bump(StatCategory::Misc);
        PtStrength::new(region, value0, value1)
    }

    fn new_decl_head(
        &self,
        region: FileRegion,
        head_type: DeclHeadType,
        is_signed: bool,
        range: Option<PtRange<'a>>,
        strength: Option<PtStrength>,
        delay: Option<PtDelay<'a>>,
    ) -> &'a PtDeclHead<'a> {
        self.bump(StatCategory::Decl);
        self.arena().alloc(PtDeclHead::new(region, head_type, is_signed, range, strength, delay))
    }

    fn new_decl_item(&self, region: FileRegion, name: &'a str, init: Option<&'a PtExpr<'a>>, dims: Vec<PtRange<'a>>) -> PtDeclItem<'a> {
        self.bump(StatCategory::Decl);
        PtDeclItem::new(region, name, init, self.arena().alloc_slice(dims))
    }

    fn new_io_head(&self, region: FileRegion, direction: IoDirection, aux_type: IoAuxType, is_signed: bool, range: Option<PtRange<'a>>) -> &'a PtIOHead<'a> {
        self.bump(StatCategory::Io);
        self.arena().alloc(PtIOHead::new(region, direction, aux_type, is_signed, range))
    }

    fn new_io_item(&self, region: FileRegion, name: &'a str, init: Option<&'a PtExpr<'a>>) -> PtIOItem<'a> {
        self.bump(StatCategory::Io);
        PtIOItem::new(region, name, init)
    }

    // ---- items ---------------------------------------------------------

    fn new_item_defparam(&self, region: FileRegion, assigns: Vec<PtDefparamAssign<'a>>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::Defparam {
            region,
            assigns: self.arena().alloc_slice(assigns),
        })
    }

    fn new_item_cont_assign(&self, region: FileRegion, strength: Option<PtStrength>, delay: Option<PtDelay<'a>>, assigns: Vec<PtContAssign<'a>>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::ContAssign {
            region,
            strength,
            delay,
            assigns: self.arena().alloc_slice(assigns),
        })
    }

    fn new_item_initial(&self, region: FileRegion, body: &'a PtStmt<'a>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::Initial { region, body })
    }

    fn new_item_always(&self, region: FileRegion, body: &'a PtStmt<'a>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::Always { region, body })
    }

    #[allow(clippy::too_many_arguments)]
    fn new_item_task(
        &self,
        region: FileRegion,
        name: &'a str,
        is_automatic: bool,
        io_list: Vec<&'a PtIOHead<'a>>,
        decl_list: Vec<&'a PtDeclHead<'a>>,
        body: &'a PtStmt<'a>,
    ) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::Task {
            region,
            name,
            is_automatic,
            io_list: self.arena().alloc_slice(io_list),
            decl_list: self.arena().alloc_slice(decl_list),
            body,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn new_item_function(
        &self,
        region: FileRegion,
        name: &'a str,
        is_automatic: bool,
        return_type: FunctionReturnType,
        return_range: Option<&'a PtRange<'a>>,
        io_list: Vec<&'a PtIOHead<'a>>,
        decl_list: Vec<&'a PtDeclHead<'a>>,
        body: &'a PtStmt<'a>,
    ) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::Function {
            region,
            name,
            is_automatic,
            return_type,
            return_range,
            io_list: self.arena().alloc_slice(io_list),
            decl_list: self.arena().alloc_slice(decl_list),
            body,
        })
    }

    fn new_connection_ordered(&self, region: FileRegion, expr: Option<&'a PtExpr<'a>>) -> PtConnection<'a> {
        PtConnection::new_ordered(region, expr)
    }

    fn new_connection_named(&self, region: FileRegion, name: &'a str, expr: Option<&'a PtExpr<'a>>) -> PtConnection<'a> {
        PtConnection::new_named(region, name, expr)
    }

    fn new_instance(&self, region: FileRegion, name: Option<&'a str>, range: Option<&'a PtRange<'a>>, connections: Vec<PtConnection<'a>>) -> PtInstance<'a> {
        PtInstance::new(region, name, range, self.arena().alloc_slice(connections))
    }

    fn new_item_gate_instance(&self, region: FileRegion, gate_type: &'a str, strength: Option<PtStrength>, delay: Option<PtDelay<'a>>, instances: Vec<PtInstance<'a>>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::GateInstance {
            region,
            gate_type,
            strength,
            delay,
            instances: self.arena().alloc_slice(instances),
        })
    }

    fn new_item_module_instance(
        &self,
        region: FileRegion,
        namebranch: Vec<PtNameBranch<'a>>,
        def_name: &'a str,
        param_overrides: Vec<PtConnection<'a>>,
        instances: Vec<PtInstance<'a>>,
    ) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::ModuleInstance {
            region,
            namebranch: self.arena().alloc_slice(namebranch),
            def_name,
            param_overrides: self.arena().alloc_slice(param_overrides),
            instances: self.arena().alloc_slice(instances),
        })
    }

    fn new_item_generate_block(&self, region: FileRegion, name: Option<&'a str>, items: Vec<&'a PtItem<'a>>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::GenerateBlock {
            region,
            name,
            items: self.arena().alloc_slice(items),
        })
    }

    fn new_item_generate_if(&self, region: FileRegion, expr: &'a PtExpr<'a>, then_items: Vec<&'a PtItem<'a>>, else_items: Vec<&'a PtItem<'a>>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::GenerateIf {
            region,
            expr,
            then_items: self.arena().alloc_slice(then_items),
            else_items: self.arena().alloc_slice(else_items),
        })
    }

    fn new_gencase_item(&self, region: FileRegion, labels: Vec<&'a PtExpr<'a>>, body: Vec<&'a PtItem<'a>>) -> PtGenCaseItem<'a> {
        PtGenCaseItem::new(region, self.arena().alloc_slice(labels), self.arena().alloc_slice(body))
    }

    fn new_item_generate_case(&self, region: FileRegion, expr: &'a PtExpr<'a>, items: Vec<PtGenCaseItem<'a>>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::GenerateCase {
            region,
            expr,
            items: self.arena().alloc_slice(items),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn new_item_generate_for(
        &self,
        region: FileRegion,
        init_stmt: &'a PtStmt<'a>,
        expr: &'a PtExpr<'a>,
        next_stmt: &'a PtStmt<'a>,
        block_name: Option<&'a str>,
        items: Vec<&'a PtItem<'a>>,
    ) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::GenerateFor {
            region,
            init_stmt,
            expr,
            next_stmt,
            block_name,
            items: self.arena().alloc_slice(items),
        })
    }

    fn new_path_delay(&self, region: FileRegion, values: Vec<&'a PtExpr<'a>>) -> PtPathDelay<'a> {
        PtPathDelay::new(region, self.arena().alloc_slice(values))
    }

    fn new_path_decl(
        &self,
        region: FileRegion,
        edge: crate::ast::misc::PathEdge,
        inputs: Vec<&'a str>,
        outputs: Vec<&'a str>,
        is_full_connection: bool,
        delay: PtPathDelay<'a>,
    ) -> PtPathDecl<'a> {
        PtPathDecl::new(region, edge, self.arena().alloc_slice(inputs), self.arena().alloc_slice(outputs), is_full_connection, delay)
    }

    fn new_item_specify_path(&self, region: FileRegion, decl: PtPathDecl<'a>) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::SpecifyPath { region, decl })
    }

    fn new_item_specify_item(&self, region: FileRegion, text: &'a str) -> &'a PtItem<'a> {
        self.bump(StatCategory::Item);
        self.arena().alloc(PtItem::SpecifyItem { region, text })
    }

    // ---- containers ------------------------------------------------------

    fn new_port(&self, region: FileRegion, external_name: &'a str, reference: Option<&'a PtExpr<'a>>, concat_refs: Vec<&'a PtExpr<'a>>) -> PtPort<'a> {
        self.bump(StatCategory::Container);
        PtPort::new(region, external_name, reference, self.arena().alloc_slice(concat_refs))
    }

    fn new_attr_spec(&self, region: FileRegion, name: &'a str, value: Option<&'a PtExpr<'a>>) -> PtAttrSpec<'a> {
        PtAttrSpec::new(region, name, value)
    }

    fn new_attr_inst(&self, region: FileRegion, specs: Vec<PtAttrSpec<'a>>) -> PtAttrInst<'a> {
        PtAttrInst::new(region, self.arena().alloc_slice(specs))
    }

    #[allow(clippy::too_many_arguments)]
    fn new_module(
        &self,
        region: FileRegion,
        name: &'a str,
        is_macromodule: bool,
        is_protected: bool,
        is_cell_define: bool,
        time_unit: Option<&'a str>,
        time_precision: Option<&'a str>,
        default_net_type: DefaultNetType,
        delay_mode: DelayMode,
        explicit_port_names: bool,
        config_name: Option<&'a str>,
        library_name: Option<&'a str>,
        cell_name: Option<&'a str>,
        param_port_list: Vec<&'a PtDeclHead<'a>>,
        port_list: Vec<PtPort<'a>>,
        io_head_list: Vec<&'a PtIOHead<'a>>,
        decl_list: Vec<&'a PtDeclHead<'a>>,
        item_list: Vec<&'a PtItem<'a>>,
    ) -> &'a PtModule<'a> {
        self.bump(StatCategory::Container);
        self.arena().alloc(PtModule::new(
            region,
            name,
            is_macromodule,
            is_protected,
            is_cell_define,
            time_unit,
            time_precision,
            default_net_type,
            delay_mode,
            explicit_port_names,
            config_name,
            library_name,
            cell_name,
            self.arena().alloc_slice(param_port_list),
            self.arena().alloc_slice(port_list),
            self.arena().alloc_slice(io_head_list),
            self.arena().alloc_slice(decl_list),
            self.arena().alloc_slice(item_list),
        ))
    }

    fn new_udp_entry(&self, region: FileRegion, inputs: Vec<crate::ast::container::UdpSymbol<'a>>, current_state: Option<crate::ast::container::UdpSymbol<'a>>, output: crate::ast::container::UdpSymbol<'a>) -> PtUdpEntry<'a> {
        PtUdpEntry::new(region, self.arena().alloc_slice(inputs), current_state, output)
    }

    fn new_udp(
        &self,
        region: FileRegion,
        name: &'a str,
        prim_type: UdpPrimType,
        port_list: Vec<&'a str>,
        io_list: Vec<&'a PtIOHead<'a>>,
        init_value: Option<&'a PtExpr<'a>>,
        table: Vec<PtUdpEntry<'a>>,
    ) -> &'a PtUdp<'a> {
        self.bump(StatCategory::Container);
        self.arena().alloc(PtUdp::new(
            region,
            name,
            prim_type,
            self.arena().alloc_slice(port_list),
            self.arena().alloc_slice(io_list),
            init_value,
            self.arena().alloc_slice(table),
        ))
    }
}
