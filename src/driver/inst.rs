//! Instantiations, §3.3 "Module item"/§4.6: gate primitives, module/UDP
//! instances, `defparam`, and continuous `assign` — every module-item form
//! built from a leading identifier or gate-type keyword rather than one of
//! the keywords `decl.rs`/`stmt.rs`/`generate.rs` already claim.

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::item::{PtDefparamAssign, PtInstance};
use crate::ast::misc::PtConnection;
use crate::factory::PtFactory;
use crate::manager::MsgMgr;
use crate::token::{Keyword, Lexeme, Operator};

pub fn starts_gate_instance(ts: &TokenStream) -> bool {
    matches!(ts.peek(), Lexeme::Keyword(kw) if kw.is_gate_type())
}

/// `defparam hier_name = expr {, hier_name = expr};`
pub fn parse_defparam<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    ts.expect_keyword(Keyword::Defparam, sink);
    let mut assigns = Vec::new();
    loop {
        let item_start = ts.position();
        let (namebranch, name) = super::stmt::parse_hier_name(ts, factory);
        let lhs = factory.new_primary(ts.region_since(item_start), namebranch, name, Vec::new(), crate::ast::expr::RangeMode::None, None, None, false);
        ts.expect_operator(Operator::BlockAssign, sink);
        let rhs = super::expr::parse_expr(ts, factory, sink);
        assigns.push(PtDefparamAssign::new(ts.region_since(item_start), lhs, rhs));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    ts.expect_operator(Operator::Terminator, sink);
    state.add_item(factory.new_item_defparam(ts.region_since(start), assigns));
}

/// `assign [strength] [delay] lhs = rhs {, lhs = rhs};`
pub fn parse_cont_assign<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    ts.expect_keyword(Keyword::Assign, sink);
    let strength = super::misc::parse_strength(ts, factory, sink);
    let delay = super::misc::parse_delay(ts, factory, sink);
    let mut assigns = Vec::new();
    loop {
        let item_start = ts.position();
        let lhs = super::expr::parse_primary_expr(ts, factory, sink);
        ts.expect_operator(Operator::BlockAssign, sink);
        let rhs = super::expr::parse_expr(ts, factory, sink);
        assigns.push(PtDefparamAssign::new(ts.region_since(item_start), lhs, rhs));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    ts.expect_operator(Operator::Terminator, sink);
    state.add_item(factory.new_item_cont_assign(ts.region_since(start), strength, delay, cont_assigns_from_defparams(assigns)));
}

/// [`PtDefparamAssign`] and [`crate::ast::item::PtContAssign`] share the
/// same `(region, lhs, rhs)` shape; `assign` reuses the defparam builder
/// above for its list, then relabels each entry here before handing the
/// `Vec` to the factory (which expects the `ContAssign`-specific type).
fn cont_assigns_from_defparams<'a>(assigns: Vec<PtDefparamAssign<'a>>) -> Vec<crate::ast::item::PtContAssign<'a>> {
    assigns.into_iter().map(|a| crate::ast::item::PtContAssign::new(a.region(), a.lhs(), a.rhs())).collect()
}

/// Gate-primitive instantiation: `gate_type [strength] [delay]
/// gate_instance {, gate_instance};`, where each `gate_instance` is
/// `[name [range]] (expr {, expr})`.
pub fn parse_gate_instance<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    let gate_type = match ts.peek().as_keyword().copied() {
        Some(kw) if kw.is_gate_type() => {
            ts.advance();
            factory.arena().alloc_str(&kw.to_string())
        }
        _ => {
            sink.put_msg(crate::manager::Severity::Error, crate::manager::Category::Pars, ts.region_here(), "expected a gate-type keyword".to_string());
            ts.recover_to_boundary();
            return;
        }
    };
    let strength = super::misc::parse_strength(ts, factory, sink);
    let delay = super::misc::parse_delay(ts, factory, sink);
    let instances = parse_instance_list(ts, factory, sink);
    ts.expect_operator(Operator::Terminator, sink);
    state.add_item(factory.new_item_gate_instance(ts.region_since(start), gate_type, strength, delay, instances));
}

/// Module/UDP instantiation: `def_name [#(param_overrides)] instance
/// {, instance};`.
pub fn parse_module_instance<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &crate::manager::PtManager<'a>) {
    let start = ts.position();
    let def_name = ts.take_identifier().unwrap_or_default();
    let def_name = factory.arena().alloc_str(&def_name);
    manager.reg_defname(def_name);

    let param_overrides = if ts.eat_operator(Operator::Pound) {
        ts.expect_operator(Operator::ParenL, sink);
        let mut overrides = Vec::new();
        if !ts.check_operator(Operator::ParenR) {
            loop {
                overrides.push(parse_connection(ts, factory, sink));
                if !ts.eat_operator(Operator::Comma) {
                    break;
                }
            }
        }
        ts.expect_operator(Operator::ParenR, sink);
        overrides
    } else {
        Vec::new()
    };

    let instances = parse_instance_list(ts, factory, sink);
    ts.expect_operator(Operator::Terminator, sink);
    state.add_item(factory.new_item_module_instance(ts.region_since(start), Vec::new(), def_name, param_overrides, instances));
}

fn parse_instance_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Vec<PtInstance<'a>> {
    let mut instances = Vec::new();
    loop {
        instances.push(parse_single_instance(ts, factory, sink));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    instances
}

/// `[name [range]] (connection {, connection})`. The instance name is
/// optional only for gate primitives; module/UDP instances that omit it
/// are accepted too and simply carry `name: None`, left for a caller
/// outside this crate to flag if it cares.
fn parse_single_instance<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> PtInstance<'a> {
    let start = ts.position();
    let name = ts.take_identifier().map(|s| factory.arena().alloc_str(&s));
    let range = super::misc::parse_range(ts, factory, sink).map(|r| factory.arena().alloc(r));
    ts.expect_operator(Operator::ParenL, sink);
    let mut connections = Vec::new();
    if !ts.check_operator(Operator::ParenR) {
        loop {
            connections.push(parse_connection(ts, factory, sink));
            if !ts.eat_operator(Operator::Comma) {
                break;
            }
        }
    }
    ts.expect_operator(Operator::ParenR, sink);
    factory.new_instance(ts.region_since(start), name, range, connections)
}

/// `.name(expr)` / `.name()` (named) or a bare `expr` (ordered). An empty
/// slot between commas (`(a, , c)`) is an ordered connection with no expr.
fn parse_connection<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> PtConnection<'a> {
    let start = ts.position();
    if ts.eat_operator(Operator::Dot) {
        let name = ts.take_identifier().unwrap_or_default();
        let name = factory.arena().alloc_str(&name);
        ts.expect_operator(Operator::ParenL, sink);
        let expr = if ts.check_operator(Operator::ParenR) { None } else { Some(super::expr::parse_expr(ts, factory, sink)) };
        ts.expect_operator(Operator::ParenR, sink);
        return factory.new_connection_named(ts.region_since(start), name, expr);
    }
    if ts.check_operator(Operator::Comma) || ts.check_operator(Operator::ParenR) {
        return factory.new_connection_ordered(ts.region_since(start), None);
    }
    let expr = super::expr::parse_expr(ts, factory, sink);
    factory.new_connection_ordered(ts.region_since(start), Some(expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::factory::compact::CompactFactory;
    use crate::manager::{PtManager, VecMsgMgr};
    use crate::token::VerilogTokenizer;

    fn parse<'a>(factory: &CompactFactory<'a>, src: &str) -> (TokenStream, VecMsgMgr) {
        let tokens = VerilogTokenizer::from_source_code(src).into_tokens();
        let _ = factory;
        (TokenStream::new(tokens), VecMsgMgr::new())
    }

    #[test]
    fn parses_gate_instance_with_no_name() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let (mut ts, mut sink) = parse(&factory, "and (y, a, b);");
        let mut state = AssemblyState::new();
        parse_gate_instance(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let items = state.take_items();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn parses_module_instance_with_param_override_and_named_ports() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let (mut ts, mut sink) = parse(&factory, "counter #(.WIDTH(8)) u0 (.clk(clk), .q(q));");
        let mut state = AssemblyState::new();
        let manager = PtManager::new(&arena);
        parse_module_instance(&mut ts, &factory, &mut state, &mut sink, &manager);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(state.take_items().len(), 1);
        assert_eq!(manager.defnames(), vec!["counter".to_string()]);
    }

    #[test]
    fn parses_defparam_assignment() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let (mut ts, mut sink) = parse(&factory, "defparam u0.WIDTH = 8;");
        let mut state = AssemblyState::new();
        parse_defparam(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(state.take_items().len(), 1);
    }

    #[test]
    fn parses_continuous_assign() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let (mut ts, mut sink) = parse(&factory, "assign y = a & b;");
        let mut state = AssemblyState::new();
        parse_cont_assign(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(state.take_items().len(), 1);
    }
}
