//! Declarations and IO declarations, §3.2 "Declaration"/"IO declaration",
//! §4.6. Each production parses a shared header, registers it with
//! [`AssemblyState`], then walks the comma-separated name list and flushes
//! it back onto that header (the "end-of-header flush" described in
//! `assembly.rs`).

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::decl::{DeclHeadType, NetType, VarType};
use crate::ast::io::{IoAuxType, IoDirection};
use crate::factory::PtFactory;
use crate::manager::{Category, MsgMgr, Severity};
use crate::token::{Keyword, Lexeme, Operator};

pub fn starts_declaration(ts: &TokenStream) -> bool {
    match ts.peek() {
        Lexeme::Keyword(kw) => {
            matches!(
                kw,
                Keyword::Parameter | Keyword::Localparam | Keyword::Specparam | Keyword::Genvar | Keyword::Event | Keyword::Integer | Keyword::Real | Keyword::Realtime | Keyword::Time | Keyword::Reg
            ) || kw.is_net_type()
        }
        _ => false,
    }
}

pub fn starts_io(ts: &TokenStream) -> bool {
    matches!(ts.peek(), Lexeme::Keyword(Keyword::Input) | Lexeme::Keyword(Keyword::Output) | Lexeme::Keyword(Keyword::Inout))
}

/// Dispatches to whichever of [`parse_declaration`]/[`parse_io_declaration`]
/// applies, for callers (module/task/function bodies) that accept either.
pub fn parse_any_declaration<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    if starts_io(ts) {
        parse_io_declaration(ts, factory, state, sink);
    } else {
        parse_declaration(ts, factory, state, sink);
    }
}

pub(super) fn take_net_type(ts: &mut TokenStream) -> Option<NetType> {
    let nt = match ts.peek() {
        Lexeme::Keyword(Keyword::Wire) => NetType::Wire,
        Lexeme::Keyword(Keyword::Tri) => NetType::Tri,
        Lexeme::Keyword(Keyword::Tri0) => NetType::Tri0,
        Lexeme::Keyword(Keyword::Tri1) => NetType::Tri1,
        Lexeme::Keyword(Keyword::Triand) => NetType::Triand,
        Lexeme::Keyword(Keyword::Trior) => NetType::Trior,
        Lexeme::Keyword(Keyword::Trireg) => NetType::Trireg,
        Lexeme::Keyword(Keyword::Wand) => NetType::Wand,
        Lexeme::Keyword(Keyword::Wor) => NetType::Wor,
        Lexeme::Keyword(Keyword::Supply0) => NetType::Supply0,
        Lexeme::Keyword(Keyword::Supply1) => NetType::Supply1,
        Lexeme::Keyword(Keyword::Uwire) => NetType::Uwire,
        _ => return None,
    };
    ts.advance();
    Some(nt)
}

/// `parameter`/`localparam`/`specparam`/`genvar`/`event`/`integer`/`real`/
/// `realtime`/`time`/`reg`/net-type declaration, including its trailing
/// comma-separated name (and, for memories, dimension) list.
pub fn parse_declaration<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    let _attrs = super::misc::parse_attr_insts(ts, factory, sink);

    let head_type = if ts.eat_keyword(Keyword::Parameter) {
        DeclHeadType::Parameter
    } else if ts.eat_keyword(Keyword::Localparam) {
        DeclHeadType::Localparam
    } else if ts.eat_keyword(Keyword::Specparam) {
        DeclHeadType::Specparam
    } else if ts.eat_keyword(Keyword::Genvar) {
        DeclHeadType::Genvar
    } else if ts.eat_keyword(Keyword::Event) {
        DeclHeadType::Event
    } else if ts.eat_keyword(Keyword::Integer) {
        DeclHeadType::Variable(VarType::Integer)
    } else if ts.eat_keyword(Keyword::Real) {
        DeclHeadType::Variable(VarType::Real)
    } else if ts.eat_keyword(Keyword::Realtime) {
        DeclHeadType::Variable(VarType::Realtime)
    } else if ts.eat_keyword(Keyword::Time) {
        DeclHeadType::Variable(VarType::Time)
    } else if ts.eat_keyword(Keyword::Reg) {
        DeclHeadType::Reg
    } else if let Some(nt) = take_net_type(ts) {
        DeclHeadType::Net(nt)
    } else {
        sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected a declaration keyword, found `{}`", ts.peek()));
        ts.recover_to_boundary();
        return;
    };

    let strength = super::misc::parse_strength(ts, factory, sink);
    let is_signed = ts.eat_keyword(Keyword::Signed);
    let range = super::misc::parse_range(ts, factory, sink);
    let delay = super::misc::parse_delay(ts, factory, sink);
    let head = factory.new_decl_head(ts.region_since(start), head_type, is_signed, range, strength, delay);
    state.add_decl_head(head);

    loop {
        let item_start = ts.position();
        let name = ts.take_identifier().unwrap_or_default();
        let name = factory.arena().alloc_str(&name);
        let mut dims = Vec::new();
        while ts.check_operator(Operator::BrackL) {
            match super::misc::parse_range(ts, factory, sink) {
                Some(r) => dims.push(r),
                None => break,
            }
        }
        let init = if ts.eat_operator(Operator::BlockAssign) {
            Some(super::expr::parse_expr(ts, factory, sink))
        } else {
            None
        };
        state.add_decl_item(factory.new_decl_item(ts.region_since(item_start), name, init, dims));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    ts.expect_operator(Operator::Terminator, sink);
    state.flush_paramport(factory.arena());
}

/// `input`/`output`/`inout` declaration, with its optional `reg`/net-type/
/// variable-type aux type, and its trailing name list.
pub fn parse_io_declaration<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    let _attrs = super::misc::parse_attr_insts(ts, factory, sink);

    let direction = if ts.eat_keyword(Keyword::Input) {
        IoDirection::Input
    } else if ts.eat_keyword(Keyword::Output) {
        IoDirection::Output
    } else if ts.eat_keyword(Keyword::Inout) {
        IoDirection::Inout
    } else {
        sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected `input`, `output`, or `inout`, found `{}`", ts.peek()));
        ts.recover_to_boundary();
        return;
    };

    let aux_type = if ts.eat_keyword(Keyword::Reg) {
        IoAuxType::Reg
    } else if let Some(nt) = take_net_type(ts) {
        IoAuxType::Net(nt)
    } else if ts.eat_keyword(Keyword::Integer) {
        IoAuxType::Var(VarType::Integer)
    } else if ts.eat_keyword(Keyword::Real) {
        IoAuxType::Var(VarType::Real)
    } else if ts.eat_keyword(Keyword::Realtime) {
        IoAuxType::Var(VarType::Realtime)
    } else if ts.eat_keyword(Keyword::Time) {
        IoAuxType::Var(VarType::Time)
    } else {
        IoAuxType::None
    };
    let is_signed = ts.eat_keyword(Keyword::Signed);
    let range = super::misc::parse_range(ts, factory, sink);
    let head = factory.new_io_head(ts.region_since(start), direction, aux_type, is_signed, range);
    state.add_io_head(head);

    loop {
        let item_start = ts.position();
        let name = ts.take_identifier().unwrap_or_default();
        let name = factory.arena().alloc_str(&name);
        let init = if ts.eat_operator(Operator::BlockAssign) {
            Some(super::expr::parse_expr(ts, factory, sink))
        } else {
            None
        };
        state.add_io_item(factory.new_io_item(ts.region_since(item_start), name, init));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    ts.expect_operator(Operator::Terminator, sink);
    state.flush_io(factory.arena());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::factory::compact::CompactFactory;
    use crate::manager::VecMsgMgr;
    use crate::token::VerilogTokenizer;

    #[test]
    fn parses_reg_declaration_with_range_and_multiple_names() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("reg [7:0] a, b;").into_tokens();
        let mut ts = TokenStream::new(tokens);
        parse_declaration(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let heads = state.take_decl_heads();
        assert_eq!(heads.len(), 1);
        assert_eq!(heads[0].head_type(), DeclHeadType::Reg);
        assert_eq!(heads[0].items().len(), 2);
        assert_eq!(heads[0].items()[1].name(), "b");
    }

    #[test]
    fn parses_input_declaration() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("input a;").into_tokens();
        let mut ts = TokenStream::new(tokens);
        parse_io_declaration(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let heads = state.take_module_io_heads();
        assert_eq!(heads.len(), 1);
        assert_eq!(heads[0].direction(), IoDirection::Input);
        assert_eq!(heads[0].items().len(), 1);
    }
}
