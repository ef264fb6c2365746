//! Statements, §3.2 "Statement"/§4.5.
//!
//! One `parse_statement` entry point, dispatching on the leading keyword or
//! (for assignments and task enables) falling through to an identifier-led
//! primary. Blocks thread [`AssemblyState::push_scope`]/`pop_scope` to
//! isolate their own declaration-header list; the statement list itself is
//! just a local `Vec` built up by the caller, since only declarations and
//! items are assembly-state managed (§4.4).

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::expr::PtExpr;
use crate::ast::stmt::StmtType;
use crate::factory::PtFactory;
use crate::hiername::HierNameBuilder;
use crate::manager::{Category, MsgMgr, Severity};
use crate::token::{Keyword, Operator};

pub fn parse_statement<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) -> &'a crate::ast::stmt::PtStmt<'a> {
    let start = ts.position();
    let _attrs = super::misc::parse_attr_insts(ts, factory, sink);

    if ts.eat_operator(Operator::Terminator) {
        return factory.new_stmt_null(ts.region_since(start));
    }
    if ts.check_keyword(Keyword::Begin) {
        return parse_seq_block(ts, factory, state, sink, start);
    }
    if ts.check_keyword(Keyword::Fork) {
        return parse_par_block(ts, factory, state, sink, start);
    }
    if ts.eat_keyword(Keyword::If) {
        ts.expect_operator(Operator::ParenL, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let body = parse_statement(ts, factory, state, sink);
        let else_body = if ts.eat_keyword(Keyword::Else) { Some(parse_statement(ts, factory, state, sink)) } else { None };
        return factory.new_stmt_if(ts.region_since(start), expr, body, else_body);
    }
    if ts.check_keyword(Keyword::Case) || ts.check_keyword(Keyword::Casex) || ts.check_keyword(Keyword::Casez) {
        return parse_case(ts, factory, state, sink, start);
    }
    if ts.eat_keyword(Keyword::Forever) {
        let body = parse_statement(ts, factory, state, sink);
        return factory.new_stmt_forever(ts.region_since(start), body);
    }
    if ts.eat_keyword(Keyword::Repeat) {
        ts.expect_operator(Operator::ParenL, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let body = parse_statement(ts, factory, state, sink);
        return factory.new_stmt_repeat(ts.region_since(start), expr, body);
    }
    if ts.eat_keyword(Keyword::While) {
        ts.expect_operator(Operator::ParenL, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let body = parse_statement(ts, factory, state, sink);
        return factory.new_stmt_while(ts.region_since(start), expr, body);
    }
    if ts.eat_keyword(Keyword::For) {
        ts.expect_operator(Operator::ParenL, sink);
        let init_stmt = parse_statement(ts, factory, state, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        let next_stmt = parse_single_assign(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let body = parse_statement(ts, factory, state, sink);
        return factory.new_stmt_for(ts.region_since(start), init_stmt, expr, next_stmt, body);
    }
    if ts.eat_keyword(Keyword::Wait) {
        ts.expect_operator(Operator::ParenL, sink);
        let expr = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let body = parse_statement_or_null(ts, factory, state, sink);
        return factory.new_stmt_wait(ts.region_since(start), expr, body);
    }
    if ts.eat_operator(Operator::ArrowR) {
        let (namebranch, name) = parse_hier_name(ts, factory);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_event_trigger(ts.region_since(start), namebranch, name);
    }
    if ts.eat_keyword(Keyword::Disable) {
        let (namebranch, name) = parse_hier_name(ts, factory);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_disable(ts.region_since(start), namebranch, name);
    }
    if ts.eat_keyword(Keyword::Assign) {
        let lhs = super::expr::parse_primary_expr(ts, factory, sink);
        ts.expect_operator(Operator::BlockAssign, sink);
        let rhs = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_pc_assign(ts.region_since(start), lhs, rhs);
    }
    if ts.eat_keyword(Keyword::Deassign) {
        let lhs = super::expr::parse_primary_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_deassign(ts.region_since(start), lhs);
    }
    if ts.eat_keyword(Keyword::Force) {
        let lhs = super::expr::parse_primary_expr(ts, factory, sink);
        ts.expect_operator(Operator::BlockAssign, sink);
        let rhs = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_force(ts.region_since(start), lhs, rhs);
    }
    if ts.eat_keyword(Keyword::Release) {
        let lhs = super::expr::parse_primary_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_release(ts.region_since(start), lhs);
    }
    if ts.check_operator(Operator::Pound) || ts.check_operator(Operator::At) {
        let control = super::misc::parse_control(ts, factory, sink).expect("guarded by check above");
        let body = if ts.eat_operator(Operator::Terminator) { None } else { Some(parse_statement(ts, factory, state, sink)) };
        return match control {
            crate::ast::misc::PtControl::Delay(_) => factory.new_stmt_delay_control(ts.region_since(start), control, body),
            _ => factory.new_stmt_event_control(ts.region_since(start), control, body),
        };
    }
    if ts.check_identifier() {
        return parse_identifier_led_stmt(ts, factory, sink, start);
    }

    sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected a statement, found `{}`", ts.peek()));
    ts.recover_to_boundary();
    factory.new_stmt_null(ts.region_since(start))
}

/// `wait`'s body, and a delay/event control's body, may be the null
/// statement spelled as a bare `;` with nothing following — parsed the same
/// way as any other statement, so this just defers to `parse_statement`.
fn parse_statement_or_null<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) -> Option<&'a crate::ast::stmt::PtStmt<'a>> {
    Some(parse_statement(ts, factory, state, sink))
}

pub(super) fn parse_hier_name<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F) -> (Vec<crate::ast::misc::PtNameBranch<'a>>, &'a str) {
    let mut hb = HierNameBuilder::new(ts.take_identifier().unwrap_or_default());
    while ts.eat_operator(Operator::Dot) {
        hb.push(ts.take_identifier().unwrap_or_default());
    }
    let (namebranch, name) = hb.finish(factory.arena());
    (namebranch.to_vec(), name)
}

/// A single assignment used as a `for` loop's init/step clause, without the
/// trailing `;` a full statement would expect.
pub(super) fn parse_single_assign<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a crate::ast::stmt::PtStmt<'a> {
    let start = ts.position();
    let lhs = super::expr::parse_primary_expr(ts, factory, sink);
    ts.expect_operator(Operator::BlockAssign, sink);
    let rhs = super::expr::parse_expr(ts, factory, sink);
    factory.new_stmt_blocking_assign(ts.region_since(start), lhs, rhs, None)
}

fn parse_identifier_led_stmt<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr, start: crate::lexer::Position) -> &'a crate::ast::stmt::PtStmt<'a> {
    let lhs = super::expr::parse_primary_expr(ts, factory, sink);

    if let PtExpr::FuncCall { is_system, namebranch, tail_name, args } = *lhs {
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_enable(ts.region_since(start), is_system, namebranch.to_vec(), tail_name, args.to_vec());
    }
    if lhs.is_simple() && ts.eat_operator(Operator::Terminator) {
        return factory.new_stmt_enable(ts.region_since(start), false, Vec::new(), lhs.tail_name(), Vec::new());
    }
    if ts.eat_operator(Operator::Lte) {
        let control = super::misc::parse_control(ts, factory, sink);
        let rhs = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Terminator, sink);
        return factory.new_stmt_nonblocking_assign(ts.region_since(start), lhs, rhs, control);
    }
    ts.expect_operator(Operator::BlockAssign, sink);
    let control = super::misc::parse_control(ts, factory, sink);
    let rhs = super::expr::parse_expr(ts, factory, sink);
    ts.expect_operator(Operator::Terminator, sink);
    factory.new_stmt_blocking_assign(ts.region_since(start), lhs, rhs, control)
}

fn parse_case<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, start: crate::lexer::Position) -> &'a crate::ast::stmt::PtStmt<'a> {
    let stmt_type = if ts.eat_keyword(Keyword::Casex) {
        StmtType::Casex
    } else if ts.eat_keyword(Keyword::Casez) {
        StmtType::Casez
    } else {
        ts.eat_keyword(Keyword::Case);
        StmtType::Case
    };
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
        let body = parse_statement(ts, factory, state, sink);
        items.push(factory.new_caseitem(ts.region_since(item_start), labels, body));
    }
    ts.expect_keyword(Keyword::Endcase, sink);
    factory.new_stmt_case(ts.region_since(start), stmt_type, expr, items)
}

pub(super) fn parse_optional_block_name(ts: &mut TokenStream) -> Option<String> {
    if ts.eat_operator(Operator::Colon) {
        ts.take_identifier()
    } else {
        None
    }
}

fn parse_seq_block<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, start: crate::lexer::Position) -> &'a crate::ast::stmt::PtStmt<'a> {
    ts.expect_keyword(Keyword::Begin, sink);
    let name = parse_optional_block_name(ts).map(|n| factory.arena().alloc_str(&n) as &str);
    state.push_scope();
    let mut stmts = Vec::new();
    while super::decl::starts_declaration(ts) {
        super::decl::parse_declaration(ts, factory, state, sink);
    }
    while !ts.check_keyword(Keyword::End) && !ts.is_eof() {
        stmts.push(parse_statement(ts, factory, state, sink));
    }
    ts.expect_keyword(Keyword::End, sink);
    let (decl_heads, _items) = state.pop_scope();
    let decls: Vec<_> = decl_heads.into_iter().cloned().collect();
    let stmt_type = if name.is_some() { StmtType::NamedSeqBlock } else { StmtType::SeqBlock };
    factory.new_stmt_block(ts.region_since(start), stmt_type, name, decls, stmts)
}

fn parse_par_block<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, start: crate::lexer::Position) -> &'a crate::ast::stmt::PtStmt<'a> {
    ts.expect_keyword(Keyword::Fork, sink);
    let name = parse_optional_block_name(ts).map(|n| factory.arena().alloc_str(&n) as &str);
    state.push_scope();
    let mut stmts = Vec::new();
    while super::decl::starts_declaration(ts) {
        super::decl::parse_declaration(ts, factory, state, sink);
    }
    while !ts.check_keyword(Keyword::Join) && !ts.is_eof() {
        stmts.push(parse_statement(ts, factory, state, sink));
    }
    ts.expect_keyword(Keyword::Join, sink);
    let (decl_heads, _items) = state.pop_scope();
    let decls: Vec<_> = decl_heads.into_iter().cloned().collect();
    let stmt_type = if name.is_some() { StmtType::NamedParBlock } else { StmtType::ParBlock };
    factory.new_stmt_block(ts.region_since(start), stmt_type, name, decls, stmts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::factory::compact::CompactFactory;
    use crate::manager::VecMsgMgr;
    use crate::token::VerilogTokenizer;

    #[test]
    fn parses_if_else_with_blocking_assigns() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("if (a) b = 1; else b = 0;").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let stmt = parse_statement(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(stmt.stmt_type(), StmtType::IfElse);
    }

    #[test]
    fn parses_named_seq_block_with_local_decl() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("begin : blk\nreg x;\nx = 1;\nend").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let stmt = parse_statement(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(stmt.stmt_type(), StmtType::NamedSeqBlock);
        assert_eq!(stmt.name(), "blk");
        assert_eq!(stmt.decl_head_num(), 1);
        assert_eq!(stmt.child_stmt_num(), 1);
    }

    #[test]
    fn parses_nonblocking_assign_with_event_control() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("q <= @(posedge clk) d;").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let stmt = parse_statement(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(stmt.stmt_type(), StmtType::NonBlockingAssign);
        assert!(stmt.control().is_some());
    }

    #[test]
    fn task_enable_with_no_arguments_parses_as_enable() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let mut state = AssemblyState::new();
        let tokens = VerilogTokenizer::from_source_code("my_task;").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let stmt = parse_statement(&mut ts, &factory, &mut state, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(stmt.stmt_type(), StmtType::Enable);
        assert_eq!(stmt.name(), "my_task");
        assert_eq!(stmt.arg_num(), 0);
    }
}
