//! Parser Assembly State (C4), §4.4.
//!
//! The driver's working memory while it walks one module, UDP, task, or
//! function body: a pile of in-progress `Vec`s that get materialized into
//! arena slices and attached to a PT node once the enclosing production
//! reduces. Everything here is plain owned data (`Vec`, not arena-backed) —
//! it is thrown away, or rather rebuilt fresh on scope entry, well before
//! the arena sees it.

use crate::ast::decl::PtDeclHead;
use crate::ast::expr::PtExpr;
use crate::ast::io::PtIOHead;
use crate::ast::item::{PtContAssign, PtDefparamAssign, PtInstance};
use crate::ast::misc::PtConnection;
use crate::ast::{PtItem, PtPort};

/// Which of the two IO/declaration-header lists `add_io_head`/
/// `add_decl_head` currently target. Switches when a task/function body is
/// entered or exited (§4.4's "current-header indirection").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderScope {
    Module,
    TaskFunction,
}

/// One level of the scope stack: the declaration-header and item lists
/// belonging to a generate block, named sequential block, generate-if
/// branch, generate-case item, task, or function, saved off while a nested
/// construct builds its own fresh lists.
#[derive(Debug, Default)]
struct ScopeFrame<'a> {
    decl_heads: Vec<&'a PtDeclHead<'a>>,
    items: Vec<&'a PtItem<'a>>,
}

/// The parser's working lists, per §4.4. One `AssemblyState` is created per
/// top-level design unit (module or UDP) and reset by the driver between
/// units.
#[derive(Default)]
pub struct AssemblyState<'a> {
    port_list: Vec<PtPort<'a>>,
    port_ref_list: Vec<&'a PtExpr<'a>>,
    param_port_heads: Vec<&'a PtDeclHead<'a>>,

    io_heads_module: Vec<&'a PtIOHead<'a>>,
    io_heads_taskfunc: Vec<&'a PtIOHead<'a>>,
    header_scope: Option<HeaderScope>,

    decl_heads: Vec<&'a PtDeclHead<'a>>,
    item_list: Vec<&'a PtItem<'a>>,

    io_item_list: Vec<crate::ast::io::PtIOItem<'a>>,
    decl_item_list: Vec<crate::ast::decl::PtDeclItem<'a>>,

    udp_entries: Vec<crate::ast::container::PtUdpEntry<'a>>,
    udp_values: Vec<crate::ast::container::UdpSymbol<'a>>,

    defparam_list: Vec<PtDefparamAssign<'a>>,
    cont_assign_list: Vec<PtContAssign<'a>>,
    instance_list: Vec<PtInstance<'a>>,
    connection_list: Vec<PtConnection<'a>>,

    scope_stack: Vec<ScopeFrame<'a>>,
}

impl<'a> AssemblyState<'a> {
    pub fn new() -> Self {
        Self {
            header_scope: Some(HeaderScope::Module),
            ..Default::default()
        }
    }

    // ---- port list -----------------------------------------------------

    pub fn add_port(&mut self, port: PtPort<'a>) {
        self.port_list.push(port);
    }

    pub fn take_port_list(&mut self) -> Vec<PtPort<'a>> {
        std::mem::take(&mut self.port_list)
    }

    pub fn add_port_ref(&mut self, expr: &'a PtExpr<'a>) {
        self.port_ref_list.push(expr);
    }

    pub fn take_port_refs(&mut self) -> Vec<&'a PtExpr<'a>> {
        std::mem::take(&mut self.port_ref_list)
    }

    // ---- parameter-port header list -------------------------------------

    pub fn add_param_port_head(&mut self, head: &'a PtDeclHead<'a>) {
        self.param_port_heads.push(head);
    }

    pub fn take_param_port_heads(&mut self) -> Vec<&'a PtDeclHead<'a>> {
        std::mem::take(&mut self.param_port_heads)
    }

    // ---- current-header indirection ------------------------------------

    pub fn enter_task_function_headers(&mut self) {
        self.header_scope = Some(HeaderScope::TaskFunction);
    }

    pub fn exit_task_function_headers(&mut self) {
        self.header_scope = Some(HeaderScope::Module);
    }

    pub fn add_io_head(&mut self, head: &'a PtIOHead<'a>) {
        match self.header_scope {
            Some(HeaderScope::TaskFunction) => self.io_heads_taskfunc.push(head),
            _ => self.io_heads_module.push(head),
        }
    }

    pub fn add_decl_head(&mut self, head: &'a PtDeclHead<'a>) {
        self.decl_heads.push(head);
    }

    pub fn take_module_io_heads(&mut self) -> Vec<&'a PtIOHead<'a>> {
        std::mem::take(&mut self.io_heads_module)
    }

    /// Materializes and clears the task/function-scope IO-header list,
    /// called when a task or function body finishes reducing.
    pub fn take_taskfunc_io_heads(&mut self) -> Vec<&'a PtIOHead<'a>> {
        std::mem::take(&mut self.io_heads_taskfunc)
    }

    pub fn take_decl_heads(&mut self) -> Vec<&'a PtDeclHead<'a>> {
        std::mem::take(&mut self.decl_heads)
    }

    // ---- item list -------------------------------------------------------

    pub fn add_item(&mut self, item: &'a PtItem<'a>) {
        self.item_list.push(item);
    }

    pub fn take_items(&mut self) -> Vec<&'a PtItem<'a>> {
        std::mem::take(&mut self.item_list)
    }

    // ---- end-of-header flush ---------------------------------------------

    pub fn add_io_item(&mut self, item: crate::ast::io::PtIOItem<'a>) {
        self.io_item_list.push(item);
    }

    pub fn add_decl_item(&mut self, item: crate::ast::decl::PtDeclItem<'a>) {
        self.decl_item_list.push(item);
    }

    /// Installs the accumulated IO-item list onto the last IO header
    /// appended (whichever of the two lists is currently active) and
    /// clears it. Exists because IO items are parsed on the same source
    /// line as their header, in a separate production (§4.4).
    pub fn flush_io(&mut self, arena: &'a crate::arena::Arena) {
        let items = std::mem::take(&mut self.io_item_list);
        if items.is_empty() {
            return;
        }
        let slice = arena.alloc_slice(items);
        let last = match self.header_scope {
            Some(HeaderScope::TaskFunction) => self.io_heads_taskfunc.last(),
            _ => self.io_heads_module.last(),
        };
        if let Some(head) = last {
            head.set_items(slice);
        }
    }

    /// Installs the accumulated declaration-item list onto the last
    /// declaration header appended and clears it. Used both for plain
    /// declarations and for the parameter-port header list.
    pub fn flush_paramport(&mut self, arena: &'a crate::arena::Arena) {
        let items = std::mem::take(&mut self.decl_item_list);
        if items.is_empty() {
            return;
        }
        let slice = arena.alloc_slice(items);
        if let Some(head) = self.decl_heads.last().or_else(|| self.param_port_heads.last()) {
            head.set_items(slice);
        }
    }

    // ---- UDP accumulators --------------------------------------------------

    pub fn add_udp_value(&mut self, v: crate::ast::container::UdpSymbol<'a>) {
        self.udp_values.push(v);
    }

    pub fn take_udp_row(&mut self) -> Vec<crate::ast::container::UdpSymbol<'a>> {
        std::mem::take(&mut self.udp_values)
    }

    pub fn add_udp_entry(&mut self, entry: crate::ast::container::PtUdpEntry<'a>) {
        self.udp_entries.push(entry);
    }

    pub fn take_udp_entries(&mut self) -> Vec<crate::ast::container::PtUdpEntry<'a>> {
        std::mem::take(&mut self.udp_entries)
    }

    // ---- defparam / cont-assign / instance --------------------------------

    pub fn add_defparam(&mut self, a: PtDefparamAssign<'a>) {
        self.defparam_list.push(a);
    }

    pub fn take_defparams(&mut self) -> Vec<PtDefparamAssign<'a>> {
        std::mem::take(&mut self.defparam_list)
    }

    pub fn add_cont_assign(&mut self, a: PtContAssign<'a>) {
        self.cont_assign_list.push(a);
    }

    pub fn take_cont_assigns(&mut self) -> Vec<PtContAssign<'a>> {
        std::mem::take(&mut self.cont_assign_list)
    }

    pub fn add_instance(&mut self, i: PtInstance<'a>) {
        self.instance_list.push(i);
    }

    pub fn take_instances(&mut self) -> Vec<PtInstance<'a>> {
        std::mem::take(&mut self.instance_list)
    }

    pub fn add_connection(&mut self, c: PtConnection<'a>) {
        self.connection_list.push(c);
    }

    pub fn take_connections(&mut self) -> Vec<PtConnection<'a>> {
        std::mem::take(&mut self.connection_list)
    }

    // ---- scope stack -------------------------------------------------------

    /// Enters a nested scope (generate block, named sequential block,
    /// generate-if branch, generate-case item, task, function): saves the
    /// current declaration-header and item lists, starts fresh ones.
    pub fn push_scope(&mut self) {
        let frame = ScopeFrame {
            decl_heads: std::mem::take(&mut self.decl_heads),
            items: std::mem::take(&mut self.item_list),
        };
        self.scope_stack.push(frame);
    }

    /// Exits a nested scope: returns the fresh lists built since the
    /// matching `push_scope` (for the caller to materialize and attach to
    /// the construct being closed), then restores the saved lists.
    pub fn pop_scope(&mut self) -> (Vec<&'a PtDeclHead<'a>>, Vec<&'a PtItem<'a>>) {
        let inner_decls = std::mem::take(&mut self.decl_heads);
        let inner_items = std::mem::take(&mut self.item_list);
        if let Some(frame) = self.scope_stack.pop() {
            self.decl_heads = frame.decl_heads;
            self.item_list = frame.items;
        }
        (inner_decls, inner_items)
    }

    pub fn scope_depth(&self) -> usize {
        self.scope_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::ast::decl::DeclHeadType;
    use crate::lexer::Position;
    use crate::region::FileRegion;

    fn region() -> FileRegion {
        FileRegion::at(Position::new())
    }

    #[test]
    fn scope_push_pop_isolates_item_lists() {
        let arena = Arena::new();
        let mut state = AssemblyState::new();
        let outer_item = arena.alloc(PtItem::Initial {
            region: region(),
            body: arena.alloc(crate::ast::stmt::PtStmt::Null { region: region() }),
        });
        state.add_item(outer_item);

        state.push_scope();
        assert!(state.take_items().is_empty());
        let inner_item = arena.alloc(PtItem::Initial {
            region: region(),
            body: arena.alloc(crate::ast::stmt::PtStmt::Null { region: region() }),
        });
        state.add_item(inner_item);
        let (_, inner_items) = state.pop_scope();
        assert_eq!(inner_items.len(), 1);

        assert_eq!(state.take_items().len(), 1);
    }

    #[test]
    fn flush_io_backfills_last_header_only() {
        let arena = Arena::new();
        let mut state = AssemblyState::new();
        let head = arena.alloc(PtIOHead::new(region(), crate::ast::io::IoDirection::Input, crate::ast::io::IoAuxType::None, false, None));
        state.add_io_head(head);
        state.add_io_item(crate::ast::io::PtIOItem::new(region(), "a", None));
        state.add_io_item(crate::ast::io::PtIOItem::new(region(), "b", None));
        state.flush_io(&arena);
        assert_eq!(head.items().len(), 2);
    }

    #[test]
    fn current_header_indirection_switches_on_task_function_entry() {
        let arena = Arena::new();
        let mut state = AssemblyState::new();
        let module_head = arena.alloc(PtIOHead::new(region(), crate::ast::io::IoDirection::Input, crate::ast::io::IoAuxType::None, false, None));
        state.add_io_head(module_head);
        assert_eq!(state.take_module_io_heads().len(), 1);

        state.enter_task_function_headers();
        let task_head = arena.alloc(PtIOHead::new(region(), crate::ast::io::IoDirection::Output, crate::ast::io::IoAuxType::None, false, None));
        state.add_io_head(task_head);
        assert_eq!(state.take_taskfunc_io_heads().len(), 1);
        state.exit_task_function_headers();
    }

    #[test]
    fn flush_paramport_prefers_decl_heads_over_param_port_heads() {
        let arena = Arena::new();
        let mut state = AssemblyState::new();
        let head = arena.alloc(PtDeclHead::new(region(), DeclHeadType::Parameter, false, None, None, None));
        state.add_decl_head(head);
        state.add_decl_item(crate::ast::decl::PtDeclItem::new(region(), "WIDTH", None, &[]));
        state.flush_paramport(&arena);
        assert_eq!(head.items().len(), 1);
    }
}
