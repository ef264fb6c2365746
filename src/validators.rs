//! Semantic Validators & Hierarchical-Name Assembler (C5), §4.5.
//!
//! These run after a construct's PT node is fully built (never mid-parse,
//! since every node is immutable once constructed) and report through the
//! same [`crate::manager::MsgMgr`] sink the driver uses for syntax errors.
//! None of them mutate the tree; a failed check is a diagnostic, not a
//! rejected parse.

use crate::ast::container::{PtModule, PtUdp, UdpPrimType};
use crate::ast::expr::PtExpr;
use crate::ast::item::PtItem;
use crate::ast::stmt::PtStmt;
use crate::manager::{Category, MsgMgr, Severity};
use crate::region::FileRegion;

fn primary_name(expr: &PtExpr) -> Option<&str> {
    match expr {
        PtExpr::Primary { tail_name, .. } => Some(tail_name),
        _ => None,
    }
}

/// Walks a function body, reporting every statement [`PtStmt::is_function_body_legal`]
/// rejects. Recurses into every statement kind that can itself contain
/// statements, since the leaf check only looks at one node at a time.
pub fn check_function_body(body: &PtStmt, sink: &mut dyn MsgMgr) {
    walk_function_body(body, sink);
}

fn walk_function_body(stmt: &PtStmt, sink: &mut dyn MsgMgr) {
    if !stmt.is_function_body_legal() {
        sink.put_msg(
            Severity::Error,
            Category::Pars,
            stmt.file_region(),
            format!("{} is not permitted inside a function body", stmt.stmt_name()),
        );
        return;
    }
    match stmt {
        PtStmt::If { body, else_body, .. } => {
            walk_function_body(body, sink);
            if let Some(e) = else_body {
                walk_function_body(e, sink);
            }
        }
        PtStmt::Case { items, .. } => {
            for item in *items {
                walk_function_body(item.body(), sink);
            }
        }
        PtStmt::Forever { body, .. } | PtStmt::Repeat { body, .. } | PtStmt::While { body, .. } | PtStmt::For { body, .. } => {
            walk_function_body(body, sink);
        }
        PtStmt::Block { stmts, .. } => {
            for s in *stmts {
                walk_function_body(s, sink);
            }
        }
        _ => {}
    }
}

/// §4.5: a case/casex/casez statement may have at most one `default` arm.
pub fn check_case_default_uniqueness(stmt: &PtStmt, sink: &mut dyn MsgMgr) {
    if let PtStmt::Case { items, .. } = stmt {
        let defaults = items.iter().filter(|i| i.is_default()).count();
        if defaults > 1 {
            sink.put_msg(
                Severity::Error,
                Category::Pars,
                stmt.file_region(),
                format!("case statement has {} default arms, at most one is permitted", defaults),
            );
        }
    }
}

/// §4.5: a generate-for's loop variable must be the same identifier on
/// both sides — the init assignment's lhs and the increment's lhs.
pub fn check_for_loop_variable_identity(region: FileRegion, init_stmt: &PtStmt, next_stmt: &PtStmt, sink: &mut dyn MsgMgr) {
    let init_name = init_stmt.lhs().and_then(primary_name);
    let next_name = next_stmt.lhs().and_then(primary_name);
    match (init_name, next_name) {
        (Some(a), Some(b)) if a != b => {
            sink.put_msg(
                Severity::Error,
                Category::Pars,
                region,
                format!("generate-for loop variable mismatch: initialized `{}`, incremented `{}`", a, b),
            );
        }
        (None, _) | (_, None) => {
            sink.put_msg(Severity::Error, Category::Pars, region, "generate-for init/increment must assign a plain name".to_string());
        }
        _ => {}
    }
}

/// §4.5: every external port name on a module declaration appears at most
/// once, and the union of a module's IO-item names contains no duplicates.
pub fn check_port_list_duplication(module: &PtModule, sink: &mut dyn MsgMgr) {
    if !module.has_unique_port_names() {
        sink.put_msg(
            Severity::Error,
            Category::Pars,
            module.region(),
            format!("module `{}` declares a duplicate port name", module.name()),
        );
    }
    let mut seen = std::collections::HashSet::new();
    for i in 0..module.iohead_num() {
        let Some(head) = module.iohead(i) else { continue };
        for item in head.items() {
            if !seen.insert(item.name()) {
                sink.put_msg(
                    Severity::Error,
                    Category::Pars,
                    item.region(),
                    format!("duplicate IO declaration for `{}`", item.name()),
                );
            }
        }
    }
}

/// §4.5: Verilog-1995 UDP port-list and declaration-form checks.
///
/// - Exactly one output.
/// - The output is the first port.
/// - Every port appears exactly once across the IO-header list.
/// - At most one `reg` declaration, and only for the output.
/// - An initial value is only legal on a sequential UDP, and only targets
///   the `reg`-declared output.
pub fn check_udp_1995_form(udp: &PtUdp, sink: &mut dyn MsgMgr) {
    use crate::ast::io::IoDirection;

    let outputs: Vec<&str> = udp
        .io_list()
        .iter()
        .flat_map(|h| h.items().iter().map(move |item| (h.direction(), item.name())))
        .filter(|(dir, _)| *dir == IoDirection::Output)
        .map(|(_, name)| name)
        .collect();

    if outputs.len() != 1 {
        sink.put_msg(
            Severity::Error,
            Category::Pars,
            udp.region(),
            format!("primitive `{}` must declare exactly one output, found {}", udp.name(), outputs.len()),
        );
    }

    if let (Some(first_port), Some(output_name)) = (udp.port_list().first(), outputs.first()) {
        if *first_port != *output_name {
            sink.put_msg(
                Severity::Error,
                Category::Pars,
                udp.region(),
                format!("primitive `{}`'s output `{}` must be the first port", udp.name(), output_name),
            );
        }
    }

    let declared: std::collections::HashSet<&str> = udp.io_list().iter().flat_map(|h| h.items().iter().map(|item| item.name())).collect();
    for port in udp.port_list() {
        if !declared.contains(port) {
            sink.put_msg(Severity::Error, Category::Pars, udp.region(), format!("primitive port `{}` has no IO declaration", port));
        }
    }

    let reg_outputs: Vec<&str> = udp
        .io_list()
        .iter()
        .filter(|h| matches!(h.aux_type(), crate::ast::io::IoAuxType::Reg))
        .flat_map(|h| h.items().iter().map(|item| item.name()))
        .collect();
    if reg_outputs.len() > 1 {
        sink.put_msg(Severity::Error, Category::Pars, udp.region(), "primitive declares more than one `reg`".to_string());
    }
    if let Some(reg_name) = reg_outputs.first() {
        if !outputs.contains(reg_name) {
            sink.put_msg(Severity::Error, Category::Pars, udp.region(), format!("`reg` declaration on `{}` is not the output", reg_name));
        }
    }

    if let Some(init) = udp.init_value() {
        if udp.prim_type() != UdpPrimType::Sequential {
            sink.put_msg(Severity::Error, Category::Pars, udp.region(), "initial value is only permitted on a sequential primitive".to_string());
        }
        if let Some(target) = primary_name(init) {
            if reg_outputs.first() != Some(&target) {
                sink.put_msg(
                    Severity::Error,
                    Category::Pars,
                    udp.region(),
                    format!("initial value targets `{}`, expected the `reg`-declared output", target),
                );
            }
        }
    }
}

/// Recursively validates every item in a module: function bodies, case
/// defaults, and generate-for loop variables, walking into nested generate
/// constructs. UDP form and port-list checks are whole-container checks,
/// invoked separately by the caller once per design unit.
pub fn check_module(module: &PtModule, sink: &mut dyn MsgMgr) {
    check_port_list_duplication(module, sink);
    for i in 0..module.item_num() {
        if let Some(item) = module.item(i) {
            check_item(item, sink);
        }
    }
}

fn check_item(item: &PtItem, sink: &mut dyn MsgMgr) {
    match item {
        PtItem::Function { body, .. } => check_function_body(body, sink),
        PtItem::Initial { body, .. } | PtItem::Always { body, .. } | PtItem::Task { body, .. } => {
            walk_statement_checks(body, sink);
        }
        PtItem::GenerateBlock { items, .. } => {
            for i in *items {
                check_item(i, sink);
            }
        }
        PtItem::GenerateIf { then_items, else_items, .. } => {
            for i in *then_items {
                check_item(i, sink);
            }
            for i in *else_items {
                check_item(i, sink);
            }
        }
        PtItem::GenerateCase { items, .. } => {
            for case_item in *items {
                for i in case_item.body() {
                    check_item(i, sink);
                }
            }
        }
        PtItem::GenerateFor {
            region,
            init_stmt,
            next_stmt,
            items,
            ..
        } => {
            check_for_loop_variable_identity(*region, init_stmt, next_stmt, sink);
            for i in *items {
                check_item(i, sink);
            }
        }
        _ => {}
    }
}

fn walk_statement_checks(stmt: &PtStmt, sink: &mut dyn MsgMgr) {
    check_case_default_uniqueness(stmt, sink);
    match stmt {
        PtStmt::If { body, else_body, .. } => {
            walk_statement_checks(body, sink);
            if let Some(e) = else_body {
                walk_statement_checks(e, sink);
            }
        }
        PtStmt::Case { items, .. } => {
            for item in *items {
                walk_statement_checks(item.body(), sink);
            }
        }
        PtStmt::Forever { body, .. } | PtStmt::Repeat { body, .. } | PtStmt::While { body, .. } | PtStmt::For { body, .. } => {
            walk_statement_checks(body, sink);
        }
        PtStmt::Block { stmts, .. } => {
            for s in *stmts {
                walk_statement_checks(s, sink);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::container::{DefaultNetType, DelayMode, PtPort};
    use crate::ast::io::{IoAuxType, IoDirection, PtIOHead, PtIOItem};
    use crate::lexer::Position;
    use crate::manager::VecMsgMgr;

    fn region() -> FileRegion {
        FileRegion::at(Position::new())
    }

    fn primary(name: &'static str) -> PtExpr<'static> {
        PtExpr::Primary {
            region: region(),
            namebranch: &[],
            tail_name: name,
            index: &[],
            range_mode: crate::ast::expr::RangeMode::None,
            left_range: None,
            right_range: None,
            is_const_index: false,
        }
    }

    #[test]
    fn flags_delay_control_in_function_body() {
        let one = primary("1");
        let values: &[&PtExpr] = &[&one];
        let control = crate::ast::misc::PtControl::Delay(crate::ast::misc::PtDelay::new(region(), values));
        let stmt = PtStmt::DelayControl {
            region: region(),
            control,
            body: None,
        };
        let mut sink = VecMsgMgr::new();
        check_function_body(&stmt, &mut sink);
        assert_eq!(sink.diagnostics().len(), 1);
        assert!(sink.diagnostics()[0].text.contains("delay control statement"));
    }

    #[test]
    fn flags_duplicate_case_default() {
        let body = PtStmt::Null { region: region() };
        let items: &[crate::ast::stmt::PtCaseItem] = &[
            crate::ast::stmt::PtCaseItem::new(region(), &[], &body),
            crate::ast::stmt::PtCaseItem::new(region(), &[], &body),
        ];
        let stmt = PtStmt::Case {
            region: region(),
            stmt_type: crate::ast::stmt::StmtType::Case,
            expr: &primary("sel"),
            items,
        };
        let mut sink = VecMsgMgr::new();
        check_case_default_uniqueness(&stmt, &mut sink);
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn flags_mismatched_for_loop_variable() {
        let i_expr = primary("i");
        let j_expr = primary("j");
        let one = primary("1");
        let init = PtStmt::BlockingAssign {
            region: region(),
            lhs: &i_expr,
            rhs: &one,
            control: None,
        };
        let next = PtStmt::BlockingAssign {
            region: region(),
            lhs: &j_expr,
            rhs: &one,
            control: None,
        };
        let mut sink = VecMsgMgr::new();
        check_for_loop_variable_identity(region(), &init, &next, &mut sink);
        assert_eq!(sink.diagnostics().len(), 1);
        assert!(sink.diagnostics()[0].text.contains("mismatch"));
    }

    #[test]
    fn accepts_matching_for_loop_variable() {
        let i_expr = primary("i");
        let one = primary("1");
        let init = PtStmt::BlockingAssign {
            region: region(),
            lhs: &i_expr,
            rhs: &one,
            control: None,
        };
        let next = PtStmt::BlockingAssign {
            region: region(),
            lhs: &i_expr,
            rhs: &one,
            control: None,
        };
        let mut sink = VecMsgMgr::new();
        check_for_loop_variable_identity(region(), &init, &next, &mut sink);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn flags_duplicate_module_port_names() {
        let ports = [PtPort::new(region(), "a", None, &[]), PtPort::new(region(), "a", None, &[])];
        let module = PtModule::new(
            region(),
            "m",
            false,
            false,
            false,
            None,
            None,
            DefaultNetType::Wire,
            DelayMode::None,
            true,
            None,
            None,
            None,
            &[],
            &ports,
            &[],
            &[],
            &[],
        );
        let mut sink = VecMsgMgr::new();
        check_port_list_duplication(&module, &mut sink);
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn udp_1995_form_accepts_well_formed_combinational_primitive() {
        let out_item = [PtIOItem::new(region(), "q", None)];
        let in_item = [PtIOItem::new(region(), "a", None)];
        let out_head = PtIOHead::new(region(), IoDirection::Output, IoAuxType::None, false, None);
        out_head.set_items(&out_item);
        let in_head = PtIOHead::new(region(), IoDirection::Input, IoAuxType::None, false, None);
        in_head.set_items(&in_item);
        let io_list: &[&PtIOHead] = &[&out_head, &in_head];
        let port_list: &[&str] = &["q", "a"];
        let udp = PtUdp::new(region(), "buf1", UdpPrimType::Combinational, port_list, io_list, None, &[]);
        let mut sink = VecMsgMgr::new();
        check_udp_1995_form(&udp, &mut sink);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn udp_1995_form_flags_output_not_first() {
        let out_item = [PtIOItem::new(region(), "q", None)];
        let in_item = [PtIOItem::new(region(), "a", None)];
        let out_head = PtIOHead::new(region(), IoDirection::Output, IoAuxType::None, false, None);
        out_head.set_items(&out_item);
        let in_head = PtIOHead::new(region(), IoDirection::Input, IoAuxType::None, false, None);
        in_head.set_items(&in_item);
        let io_list: &[&PtIOHead] = &[&out_head, &in_head];
        let port_list: &[&str] = &["a", "q"];
        let udp = PtUdp::new(region(), "buf1", UdpPrimType::Combinational, port_list, io_list, None, &[]);
        let mut sink = VecMsgMgr::new();
        check_udp_1995_form(&udp, &mut sink);
        assert!(sink.diagnostics().iter().any(|d| d.text.contains("first port")));
    }
}
