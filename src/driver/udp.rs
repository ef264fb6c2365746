//! `primitive ... endprimitive` (user-defined primitive), §3.2 "Udp
//! container"/§4.6. Its own grammar, separate from `module.rs`: a bare
//! port-name list (no net/register declarations among the ports
//! themselves), IO declarations restricted to `input`/`output` (no
//! `inout`), an optional `initial` statement seeding the output's state,
//! and a `table ... endtable` of UDP symbol rows.

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::container::{UdpPrimType, UdpSymbol};
use crate::factory::PtFactory;
use crate::manager::{MsgMgr, PtManager};
use crate::token::{Keyword, Operator};

pub fn parse_udp_definition<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, manager: &mut PtManager<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    ts.expect_keyword(Keyword::Primitive, sink);
    let name = ts.take_identifier().unwrap_or_default();
    let name = factory.arena().alloc_str(&name);

    ts.expect_operator(Operator::ParenL, sink);
    let mut port_list = Vec::new();
    if !ts.check_operator(Operator::ParenR) {
        loop {
            let p = ts.take_identifier().unwrap_or_default();
            port_list.push(factory.arena().alloc_str(&p));
            if !ts.eat_operator(Operator::Comma) {
                break;
            }
        }
    }
    ts.expect_operator(Operator::ParenR, sink);
    ts.expect_operator(Operator::Terminator, sink);

    let mut state = AssemblyState::new();
    // §3.2's UDP output declaration lets `reg` ride on the `output` line
    // itself (`output reg q;`, captured as the io head's aux_type below) or
    // stand on its own (`output q;\nreg q;`), the legacy IEEE 1364-1995
    // form. Loop over both until neither applies.
    let mut reg_names: Vec<String> = Vec::new();
    loop {
        if super::decl::starts_io(ts) {
            super::decl::parse_io_declaration(ts, factory, &mut state, sink);
        } else if ts.eat_keyword(Keyword::Reg) {
            loop {
                reg_names.push(ts.take_identifier().unwrap_or_default());
                if !ts.eat_operator(Operator::Comma) {
                    break;
                }
            }
            ts.expect_operator(Operator::Terminator, sink);
        } else {
            break;
        }
    }
    let io_list = state.take_module_io_heads();

    let init_value = if ts.eat_keyword(Keyword::Initial) {
        let _lhs = super::expr::parse_primary_expr(ts, factory, sink);
        ts.expect_operator(Operator::BlockAssign, sink);
        let rhs = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        Some(rhs)
    } else {
        None
    };

    ts.expect_keyword(Keyword::Table, sink);
    while !ts.check_keyword(Keyword::Endtable) && !ts.is_eof() {
        parse_table_row(ts, factory, &mut state, sink);
    }
    ts.expect_keyword(Keyword::Endtable, sink);
    ts.expect_keyword(Keyword::Endprimitive, sink);

    let table = state.take_udp_entries();
    // §3.4/§8 scenario 4: a primitive is sequential iff its output carries
    // a `reg` IO declaration or an `initial` value is present — not
    // whether a table row happens to have a current-state column (a
    // combinational table author could legally omit writing one).
    let has_reg_output = io_list.iter().any(|h| matches!(h.aux_type(), crate::ast::io::IoAuxType::Reg))
        || io_list.iter().any(|h| h.items().iter().any(|item| reg_names.iter().any(|n| n == item.name())));
    let prim_type = if has_reg_output || init_value.is_some() { UdpPrimType::Sequential } else { UdpPrimType::Combinational };

    let udp = factory.new_udp(ts.region_since(start), name, prim_type, port_list, io_list, init_value, table);
    // §7: same "structural error excludes the construct" rule as a module
    // (§8 scenario 4's well-formedness checks), gated on this UDP's own
    // `check_udp_1995_form` errors.
    let mut counting = crate::manager::CountingMsgMgr::new(sink);
    crate::validators::check_udp_1995_form(udp, &mut counting);
    if !counting.has_errors() {
        manager.register_udp(udp);
    }
}

/// A single row: `input_symbols : output ;` (combinational) or
/// `input_symbols : current_state : next_state ;` (sequential). Symbols are
/// whatever single token (or parenthesized level-sensitive pair) the
/// tokenizer handed back, read verbatim rather than re-validated against
/// the fixed `0 1 x ? b r f p n * - ( )` alphabet IEEE 1364 defines — an
/// out-of-alphabet symbol here is a malformed table the caller's own
/// review will catch, not something this crate rejects outright.
fn parse_table_row<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    while !ts.check_operator(Operator::Colon) && !ts.is_eof() {
        state.add_udp_value(UdpSymbol::new(factory.arena().alloc_str(&parse_table_symbol(ts, sink))));
    }
    ts.expect_operator(Operator::Colon, sink);
    let inputs = state.take_udp_row();
    let first = UdpSymbol::new(factory.arena().alloc_str(&parse_table_symbol(ts, sink)));

    let (current_state, output) = if ts.eat_operator(Operator::Colon) {
        let second = UdpSymbol::new(factory.arena().alloc_str(&parse_table_symbol(ts, sink)));
        (Some(first), second)
    } else {
        (None, first)
    };
    ts.expect_operator(Operator::Terminator, sink);
    state.add_udp_entry(factory.new_udp_entry(ts.region_since(start), inputs, current_state, output));
}

/// One table symbol: a bare token's text (`0`, `1`, `x`, `b`, `-`, `?`, ...)
/// or a parenthesized level-sensitive transition pair like `(01)`.
fn parse_table_symbol(ts: &mut TokenStream, sink: &mut dyn MsgMgr) -> String {
    if ts.eat_operator(Operator::ParenL) {
        let mut sym = String::from("(");
        while !ts.check_operator(Operator::ParenR) && !ts.is_eof() {
            sym.push_str(&ts.advance().to_string());
        }
        ts.expect_operator(Operator::ParenR, sink);
        sym.push(')');
        sym
    } else {
        ts.advance().to_string()
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
    fn parses_combinational_udp() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut manager = PtManager::new(&arena);
        let mut sink = VecMsgMgr::new();
        let text = "primitive my_and (y, a, b);\noutput y;\ninput a, b;\ntable\n0 0 : 0;\n0 1 : 0;\n1 0 : 0;\n1 1 : 1;\nendtable\nendprimitive\n";
        let tokens = VerilogTokenizer::from_source_code(text).into_tokens();
        let mut ts = TokenStream::new(tokens);
        parse_udp_definition(&mut ts, &factory, &mut manager, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let udp = manager.udp("my_and").unwrap();
        assert_eq!(udp.prim_type(), UdpPrimType::Combinational);
        assert_eq!(udp.table().len(), 4);
    }

    #[test]
    fn parses_sequential_udp_with_initial_value() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut manager = PtManager::new(&arena);
        let mut sink = VecMsgMgr::new();
        let text = "primitive latch (q, clk, d);\noutput q;\nreg q;\ninput clk, d;\ninitial q = 0;\ntable\n1 0 : ? : 0;\n1 1 : ? : 1;\n0 ? : ? : -;\nendtable\nendprimitive\n";
        let tokens = VerilogTokenizer::from_source_code(text).into_tokens();
        let mut ts = TokenStream::new(tokens);
        parse_udp_definition(&mut ts, &factory, &mut manager, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let udp = manager.udp("latch").unwrap();
        assert_eq!(udp.prim_type(), UdpPrimType::Sequential);
        assert_eq!(udp.table().len(), 3);
        assert!(udp.init_value().is_some());
    }
}
