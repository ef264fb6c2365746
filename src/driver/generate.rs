//! `generate`/`endgenerate` constructs, §3.3 "Generate construct"/§4.6:
//! conditional (`if`/`case`) and iterative (`for`) item generation, plus the
//! plain `generate ... endgenerate` region that just groups ordinary items
//! without producing a node of its own.

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::item::PtItem;
use crate::factory::PtFactory;
use crate::manager::{MsgMgr, PtManager};
use crate::token::{Keyword, Operator};

/// `generate {generate_item} endgenerate`. The keywords themselves don't
/// introduce a scope or a node — each item inside is appended straight to
/// the enclosing module's item list, same as if `generate`/`endgenerate`
/// weren't there.
pub fn parse_generate_region<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &PtManager<'a>) {
    ts.expect_keyword(Keyword::Generate, sink);
    while !ts.check_keyword(Keyword::Endgenerate) && !ts.is_eof() {
        parse_generate_item(ts, factory, state, sink, manager);
    }
    ts.expect_keyword(Keyword::Endgenerate, sink);
}

/// One `if`/`case`/`for`-generate construct, or any ordinary module item
/// (declaration, instance, continuous assign, behavioral block, nested
/// `generate` region) valid inside one.
fn parse_generate_item<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &PtManager<'a>) {
    let start = ts.position();
    if ts.eat_keyword(Keyword::If) {
        ts.expect_operator(Operator::ParenL, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let then_items = parse_generate_body(ts, factory, state, sink, manager);
        let else_items = if ts.eat_keyword(Keyword::Else) { parse_generate_body(ts, factory, state, sink, manager) } else { Vec::new() };
        state.add_item(factory.new_item_generate_if(ts.region_since(start), expr, then_items, else_items));
        return;
    }
    if ts.check_keyword(Keyword::Case) || ts.check_keyword(Keyword::Casex) || ts.check_keyword(Keyword::Casez) {
        parse_generate_case(ts, factory, state, sink, manager, start);
        return;
    }
    if ts.eat_keyword(Keyword::For) {
        ts.expect_operator(Operator::ParenL, sink);
        let init_stmt = super::stmt::parse_single_assign(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        let next_stmt = super::stmt::parse_single_assign(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let (block_name, items) = parse_for_body(ts, factory, state, sink, manager);
        state.add_item(factory.new_item_generate_for(ts.region_since(start), init_stmt, expr, next_stmt, block_name, items));
        return;
    }
    if ts.check_keyword(Keyword::Generate) {
        parse_generate_region(ts, factory, state, sink, manager);
        return;
    }
    super::module::parse_module_item(ts, factory, state, sink, manager);
}

fn parse_generate_case<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &PtManager<'a>, start: crate::lexer::Position) {
    ts.advance();
    ts.expect_operator(Operator::ParenL, sink);
    let expr = super::expr::parse_expr(ts, factory, sink);
    ts.expect_operator(Operator::ParenR, sink);

    let mut items = Vec::new();
    while !ts.check_keyword(Keyword::Endcase) && !ts.is_eof() {
        let item_start = ts.position();
        let labels = if ts.eat_keyword(Keyword::Default) {
            Vec::new()
        } else {
            let mut ls = vec![super::expr::parse_expr(ts, factory, sink)];
            while ts.eat_operator(Operator::Comma) {
                ls.push(super::expr::parse_expr(ts, factory, sink));
            }
            ls
        };
        ts.expect_operator(Operator::Colon, sink);
        let body = parse_generate_body(ts, factory, state, sink, manager);
        items.push(factory.new_gencase_item(ts.region_since(item_start), labels, body));
    }
    ts.expect_keyword(Keyword::Endcase, sink);
    state.add_item(factory.new_item_generate_case(ts.region_since(start), expr, items));
}

/// A generate-for's body is always a named or unnamed `begin ... end`
/// block — unlike `if`/`case`, a bare single item isn't legal here because
/// the loop needs a fresh block scope per IEEE 1364-2001 §12.1.4 (the block
/// name, when present, becomes an array of scopes indexed by the genvar).
fn parse_for_body<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &PtManager<'a>) -> (Option<&'a str>, Vec<&'a PtItem<'a>>) {
    ts.expect_keyword(Keyword::Begin, sink);
    let name = super::stmt::parse_optional_block_name(ts).map(|n| factory.arena().alloc_str(&n));
    state.push_scope();
    while !ts.check_keyword(Keyword::End) && !ts.is_eof() {
        parse_generate_item(ts, factory, state, sink, manager);
    }
    ts.expect_keyword(Keyword::End, sink);
    let (_decl_heads, items) = state.pop_scope();
    (name, items)
}

/// A generate-if/-case branch's body: `;` (nothing), a single item, or a
/// `begin [: name] {item} end` block — the block form is folded into a
/// single [`PtItem::GenerateBlock`] entry so callers always just get back a
/// flat item list.
fn parse_generate_body<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &PtManager<'a>) -> Vec<&'a PtItem<'a>> {
    let start = ts.position();
    if ts.eat_operator(Operator::Terminator) {
        return Vec::new();
    }
    if ts.check_keyword(Keyword::Begin) {
        ts.advance();
        let name = super::stmt::parse_optional_block_name(ts).map(|n| factory.arena().alloc_str(&n));
        state.push_scope();
        while !ts.check_keyword(Keyword::End) && !ts.is_eof() {
            parse_generate_item(ts, factory, state, sink, manager);
        }
        ts.expect_keyword(Keyword::End, sink);
        let (_decl_heads, items) = state.pop_scope();
        return vec![factory.new_item_generate_block(ts.region_since(start), name, items)];
    }
    let before = state.scope_depth();
    state.push_scope();
    parse_generate_item(ts, factory, state, sink, manager);
    let (_decl_heads, items) = state.pop_scope();
    debug_assert_eq!(before, state.scope_depth());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::factory::compact::CompactFactory;
    use crate::manager::VecMsgMgr;
    use crate::token::VerilogTokenizer;

    fn run<'a>(factory: &CompactFactory<'a>, manager: &PtManager<'a>, src: &str) -> (AssemblyState<'a>, VecMsgMgr) {
        let tokens = VerilogTokenizer::from_source_code(src).into_tokens();
        let mut ts = TokenStream::new(tokens);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        parse_generate_region(&mut ts, factory, &mut state, &mut sink, manager);
        (state, sink)
    }

    #[test]
    fn parses_generate_if_else_with_instances() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let manager = PtManager::new(&arena);
        let (mut state, sink) = run(
            &factory,
            &manager,
            "generate\nif (WIDTH > 1) begin\nbuf u0(y, a);\nend else begin\nnot u0(y, a);\nend\nendgenerate\n",
        );
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(state.take_items().len(), 1);
    }

    #[test]
    fn parses_generate_for_loop() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let manager = PtManager::new(&arena);
        let (mut state, sink) = run(
            &factory,
            &manager,
            "generate\nfor (i = 0; i < 4; i = i + 1) begin : gen_blk\nbuf u0(y[i], a[i]);\nend\nendgenerate\n",
        );
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(state.take_items().len(), 1);
    }

    #[test]
    fn parses_generate_case() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let manager = PtManager::new(&arena);
        let (mut state, sink) = run(&factory, &manager, "generate\ncase (MODE)\n1: buf u0(y, a);\ndefault: not u0(y, a);\nendcase\nendgenerate\n");
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(state.take_items().len(), 1);
    }
}
