//! Module port list, §3.2 "Port"/§4.6. Both dialects the grammar allows —
//! the 1995-style list of bare port expressions plus a trailing block of
//! `input`/`output`/`inout` declarations, and the 2001-style list with the
//! direction inlined on each port — are handled here and report back to
//! [`AssemblyState`] the same way, so `module.rs` doesn't need to care which
//! one a given source file used.

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::expr::{PtExpr, RangeMode};
use crate::ast::io::{IoAuxType, IoDirection};
use crate::factory::PtFactory;
use crate::manager::MsgMgr;
use crate::token::{Keyword, Operator};

/// Parses `(port {, port})` or `(io_port {, io_port})`, including the
/// enclosing parens, and registers every port/IO head+item it finds.
/// Returns `true` when the ANSI (2001-style, direction-on-port) form was
/// used, for [`crate::ast::container::PtModule::explicit_port_names`].
pub fn parse_port_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) -> bool {
    if !ts.eat_operator(Operator::ParenL) {
        return false;
    }
    if ts.eat_operator(Operator::ParenR) {
        return false;
    }

    let ansi = starts_io(ts);
    if ansi {
        parse_ansi_port_list(ts, factory, state, sink);
    } else {
        parse_non_ansi_port_list(ts, factory, state, sink);
    }
    ts.expect_operator(Operator::ParenR, sink);
    ansi
}

fn starts_io(ts: &TokenStream) -> bool {
    ts.check_keyword(Keyword::Input) || ts.check_keyword(Keyword::Output) || ts.check_keyword(Keyword::Inout)
}

fn parse_non_ansi_port_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    loop {
        state.add_port(parse_non_ansi_port(ts, factory, sink));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
}

fn parse_non_ansi_port<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> crate::ast::container::PtPort<'a> {
    let start = ts.position();

    if ts.eat_operator(Operator::Dot) {
        let name = ts.take_identifier().unwrap_or_default();
        let name = factory.arena().alloc_str(&name);
        ts.expect_operator(Operator::ParenL, sink);
        let (reference, concat_refs) = if ts.check_operator(Operator::ParenR) { (None, Vec::new()) } else { parse_port_expression(ts, factory, sink) };
        ts.expect_operator(Operator::ParenR, sink);
        return factory.new_port(ts.region_since(start), name, reference, concat_refs);
    }

    if ts.check_operator(Operator::Comma) || ts.check_operator(Operator::ParenR) {
        return factory.new_port(ts.region_since(start), "", None, Vec::new());
    }

    let (reference, concat_refs) = parse_port_expression(ts, factory, sink);
    let external_name = factory.arena().alloc_str(reference.map(PtExpr::tail_name).unwrap_or(""));
    factory.new_port(ts.region_since(start), external_name, reference, concat_refs)
}

/// `port_reference` or `{port_reference {, port_reference}}`.
fn parse_port_expression<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> (Option<&'a PtExpr<'a>>, Vec<&'a PtExpr<'a>>) {
    if ts.eat_operator(Operator::ConcatL) {
        let mut refs = vec![super::expr::parse_primary_expr(ts, factory, sink)];
        while ts.eat_operator(Operator::Comma) {
            refs.push(super::expr::parse_primary_expr(ts, factory, sink));
        }
        ts.expect_operator(Operator::ConcatR, sink);
        (None, refs)
    } else {
        (Some(super::expr::parse_primary_expr(ts, factory, sink)), Vec::new())
    }
}

fn parse_ansi_port_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let mut head: Option<&'a crate::ast::io::PtIOHead<'a>> = None;

    loop {
        let start = ts.position();
        let _attrs = super::misc::parse_attr_insts(ts, factory, sink);

        if starts_io(ts) {
            let direction = if ts.eat_keyword(Keyword::Input) {
                IoDirection::Input
            } else if ts.eat_keyword(Keyword::Output) {
                IoDirection::Output
            } else {
                ts.expect_keyword(Keyword::Inout, sink);
                IoDirection::Inout
            };
            let aux_type = if ts.eat_keyword(Keyword::Reg) {
                IoAuxType::Reg
            } else if let Some(nt) = super::decl::take_net_type(ts) {
                IoAuxType::Net(nt)
            } else if ts.eat_keyword(Keyword::Integer) {
                IoAuxType::Var(crate::ast::decl::VarType::Integer)
            } else if ts.eat_keyword(Keyword::Real) {
                IoAuxType::Var(crate::ast::decl::VarType::Real)
            } else {
                IoAuxType::None
            };
            let is_signed = ts.eat_keyword(Keyword::Signed);
            let range = super::misc::parse_range(ts, factory, sink);
            if head.take().is_some() {
                state.flush_io(factory.arena());
            }
            head = Some(factory.new_io_head(ts.region_since(start), direction, aux_type, is_signed, range));
            state.add_io_head(head.unwrap());
        } else if head.is_none() {
            sink.put_msg(
                crate::manager::Severity::Error,
                crate::manager::Category::Pars,
                ts.region_here(),
                format!("expected a port direction, found `{}`", ts.peek()),
            );
            ts.recover_to_boundary();
            return;
        }

        let item_start = ts.position();
        let name = ts.take_identifier().unwrap_or_default();
        let name = factory.arena().alloc_str(&name);
        let _ = super::misc::parse_range(ts, factory, sink);
        let init = if ts.eat_operator(Operator::BlockAssign) { Some(super::expr::parse_expr(ts, factory, sink)) } else { None };
        state.add_io_item(factory.new_io_item(ts.region_since(item_start), name, init));

        let reference = factory.new_primary(ts.region_since(item_start), Vec::new(), name, Vec::new(), RangeMode::None, None, None, false);
        state.add_port(factory.new_port(ts.region_since(item_start), name, Some(reference), Vec::new()));

        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }

    if head.is_some() {
        state.flush_io(factory.arena());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::factory::compact::CompactFactory;
    use crate::manager::VecMsgMgr;
    use crate::token::VerilogTokenizer;

    #[test]
    fn parses_non_ansi_simple_port_list() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("(a, b, c)").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let ansi = parse_port_list(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert!(!ansi);
        let ports = state.take_port_list();
        assert_eq!(ports.len(), 3);
        assert_eq!(ports[0].external_name(), "a");
        assert_eq!(ports[2].external_name(), "c");
    }

    #[test]
    fn parses_non_ansi_named_and_concatenated_ports() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("(.clk(clk), .bus({hi, lo}))").into_tokens();
        let mut ts = TokenStream::new(tokens);
        parse_port_list(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let ports = state.take_port_list();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].external_name(), "clk");
        assert!(!ports[0].is_concat());
        assert_eq!(ports[1].external_name(), "bus");
        assert!(ports[1].is_concat());
        assert_eq!(ports[1].concat_refs().len(), 2);
    }

    #[test]
    fn parses_ansi_port_list_with_inherited_direction() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("(input a, b, output reg c)").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let ansi = parse_port_list(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert!(ansi);
        let ports = state.take_port_list();
        assert_eq!(ports.len(), 3);
        let heads = state.take_module_io_heads();
        assert_eq!(heads.len(), 2);
        assert_eq!(heads[0].items().len(), 2);
        assert_eq!(heads[1].items().len(), 1);
        assert_eq!(heads[1].aux_type(), IoAuxType::Reg);
    }
}
