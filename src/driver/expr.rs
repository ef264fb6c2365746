//! Expression grammar, §3.2 "Expression" / §4.6.
//!
//! A standard precedence-climbing parser keyed off [`OperatorKind::precedence`]
//! (higher binds tighter), with the ternary `?:` special-cased for its
//! right-associativity and hierarchical names/indices/range-selects folded
//! into primary parsing via [`crate::hiername::HierNameBuilder`].

use super::TokenStream;
use crate::ast::expr::{OperatorKind, PtExpr, RangeMode};
use crate::ast::misc::PtNameBranch;
use crate::factory::PtFactory;
use crate::hiername::HierNameBuilder;
use crate::manager::{Category, MsgMgr, Severity};
use crate::token::{Identifier, Lexeme, Number, Operator};

/// Entry point: a full expression, including the ternary operator.
pub fn parse_expr<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    parse_binary_expr(ts, factory, sink, 0)
}

fn binary_op_kind(op: Operator) -> Option<OperatorKind> {
    Some(match op {
        Operator::Pow => OperatorKind::Pow,
        Operator::Mult => OperatorKind::Mul,
        Operator::Div => OperatorKind::Div,
        Operator::Modulus => OperatorKind::Mod,
        Operator::Plus => OperatorKind::Add,
        Operator::Minus => OperatorKind::Sub,
        Operator::LogicShiftL => OperatorKind::ShiftL,
        Operator::LogicShiftR => OperatorKind::ShiftR,
        Operator::ArithShiftL => OperatorKind::ArithShiftL,
        Operator::ArithShiftR => OperatorKind::ArithShiftR,
        Operator::Lt => OperatorKind::Lt,
        Operator::Lte => OperatorKind::Le,
        Operator::Gt => OperatorKind::Gt,
        Operator::Gte => OperatorKind::Ge,
        Operator::LogicEq => OperatorKind::Eq,
        Operator::LogicIneq => OperatorKind::Neq,
        Operator::CaseEq => OperatorKind::CaseEq,
        Operator::CaseIneq => OperatorKind::CaseNeq,
        Operator::BitReductAnd => OperatorKind::BitAnd,
        Operator::BitReductXor => OperatorKind::BitXor,
        Operator::BitEquivReductXnor1 | Operator::BitEquivReductXnor2 => OperatorKind::BitXnor,
        Operator::BitReductOr => OperatorKind::BitOr,
        Operator::LogicAnd => OperatorKind::LogAnd,
        Operator::LogicOr => OperatorKind::LogOr,
        _ => return None,
    })
}

fn unary_op_kind(op: Operator) -> Option<OperatorKind> {
    Some(match op {
        Operator::Plus => OperatorKind::UnaryPlus,
        Operator::Minus => OperatorKind::UnaryMinus,
        Operator::LogicNeg => OperatorKind::LogicNot,
        Operator::BitNeg => OperatorKind::BitNeg,
        Operator::BitReductAnd => OperatorKind::ReductAnd,
        Operator::ReductNand => OperatorKind::ReductNand,
        Operator::BitReductOr => OperatorKind::ReductOr,
        Operator::ReductNor => OperatorKind::ReductNor,
        Operator::BitReductXor => OperatorKind::ReductXor,
        Operator::BitEquivReductXnor1 | Operator::BitEquivReductXnor2 => OperatorKind::ReductXnor,
        _ => return None,
    })
}

/// The lexical signature of an indexed part-select (`a[i +: w]` /
/// `a[i -: w]`) is a bare `+`/`-` immediately followed by `:`; that sequence
/// is otherwise never valid (an operand always separates them in ordinary
/// arithmetic), so climbing stops here unconditionally and lets the bracket
/// parser in `parse_hier_primary` claim it.
fn peek_binary_op(ts: &TokenStream) -> Option<(Operator, u8)> {
    match ts.peek() {
        Lexeme::Operator(op) => {
            if matches!(op, Operator::Plus | Operator::Minus) && matches!(ts.peek_at(1), Lexeme::Operator(Operator::Colon)) {
                return None;
            }
            binary_op_kind(*op).map(|kind| (*op, kind.precedence()))
        }
        _ => None,
    }
}

fn parse_binary_expr<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr, min_prec: u8) -> &'a PtExpr<'a> {
    let start = ts.position();
    let mut lhs = parse_unary_expr(ts, factory, sink);
    loop {
        if ts.check_operator(Operator::Question) {
            if min_prec > 0 {
                break;
            }
            ts.advance();
            let then_expr = parse_expr(ts, factory, sink);
            ts.expect_operator(Operator::Colon, sink);
            let else_expr = parse_binary_expr(ts, factory, sink, 0);
            let region = ts.region_since(start);
            lhs = factory.new_operator(region, OperatorKind::Condition, vec![lhs, then_expr, else_expr]);
            continue;
        }
        let (op, prec) = match peek_binary_op(ts) {
            Some(x) => x,
            None => break,
        };
        if prec < min_prec {
            break;
        }
        ts.advance();
        let rhs = parse_binary_expr(ts, factory, sink, prec + 1);
        let kind = binary_op_kind(op).expect("peek_binary_op only returns mapped operators");
        let region = ts.region_since(start);
        lhs = factory.new_operator(region, kind, vec![lhs, rhs]);
    }
    lhs
}

fn parse_unary_expr<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    let start = ts.position();
    if let Lexeme::Operator(op) = *ts.peek() {
        if let Some(kind) = unary_op_kind(op) {
            ts.advance();
            let operand = parse_unary_expr(ts, factory, sink);
            let region = ts.region_since(start);
            return factory.new_operator(region, kind, vec![operand]);
        }
    }
    parse_primary_expr(ts, factory, sink)
}

/// A primary with no prefix unary operator: constant, string, parenthesized
/// (or min:typ:max) expression, concatenation, system call, or hierarchical
/// name/index/range-select/function-call.
pub fn parse_primary_expr<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    let start = ts.position();
    match ts.peek().clone() {
        Lexeme::Number(n) => {
            ts.advance();
            number_to_expr(factory, ts.region_since(start), &n)
        }
        Lexeme::StringLiteral(s) => {
            ts.advance();
            factory.new_const_string(ts.region_since(start), &s)
        }
        Lexeme::Operator(Operator::ParenL) => parse_paren_expr(ts, factory, sink),
        Lexeme::Operator(Operator::ConcatL) | Lexeme::Operator(Operator::ReplicateL) => parse_concat(ts, factory, sink),
        Lexeme::Identifier(Identifier::System(_)) => parse_system_call(ts, factory, sink),
        Lexeme::Identifier(_) => parse_hier_primary(ts, factory, sink),
        other => {
            sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected an expression, found `{}`", other));
            factory.new_const_int(ts.region_here(), "0", None, false)
        }
    }
}

fn number_to_expr<'a, F: PtFactory<'a>>(factory: &F, region: crate::region::FileRegion, n: &Number) -> &'a PtExpr<'a> {
    match n {
        Number::Decimal(t) | Number::Unbased(t) | Number::OnlyBase(t) | Number::Time(t) => factory.new_const_int(region, t, None, false),
        Number::Based(t) => {
            let (size_str, rest) = match t.split_once('\'') {
                Some((s, r)) => (s, r),
                None => ("", t.as_str()),
            };
            let size = size_str.trim().parse::<u32>().ok();
            let is_signed = rest.chars().next().is_some_and(|c| c == 's' || c == 'S');
            factory.new_const_int(region, t, size, is_signed)
        }
        Number::Real(t) => factory.new_const_real(region, t),
    }
}

fn parse_paren_expr<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    let start = ts.position();
    ts.advance();
    let first = parse_expr(ts, factory, sink);
    if ts.eat_operator(Operator::Colon) {
        let typ = parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::Colon, sink);
        let max = parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let region = ts.region_since(start);
        return factory.new_operator(region, OperatorKind::MinTypMax, vec![first, typ, max]);
    }
    ts.expect_operator(Operator::ParenR, sink);
    first
}

/// Comma-separated argument/expression list, empty if `)` follows directly.
pub fn parse_expr_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Vec<&'a PtExpr<'a>> {
    let mut items = Vec::new();
    if ts.check_operator(Operator::ParenR) {
        return items;
    }
    loop {
        items.push(parse_expr(ts, factory, sink));
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    items
}

fn parse_system_call<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    let start = ts.position();
    let raw = ts.take_identifier().unwrap_or_default();
    let bare = raw.trim_start_matches('$').to_string();
    let args = if ts.eat_operator(Operator::ParenL) {
        let a = parse_expr_list(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        a
    } else {
        Vec::new()
    };
    let region = ts.region_since(start);
    factory.new_func_call(region, true, Vec::new(), factory.arena().alloc_str(&bare), args)
}

/// A bare identifier walked through `.`-separated hierarchy, `[...]`
/// indexing/range-selection, and an optional trailing call argument list
/// (only legal on an un-indexed tail, per the function/task-call grammar).
fn parse_hier_primary<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    let start = ts.position();
    let mut hb = HierNameBuilder::new(ts.take_identifier().unwrap_or_default());
    let mut index: Vec<&'a PtExpr<'a>> = Vec::new();
    let mut range_mode = RangeMode::None;
    let mut left_range = None;
    let mut right_range = None;

    loop {
        if ts.check_operator(Operator::BrackL) {
            ts.advance();
            let e0 = parse_expr(ts, factory, sink);
            if ts.eat_operator(Operator::Colon) {
                let e1 = parse_expr(ts, factory, sink);
                range_mode = RangeMode::Const;
                left_range = Some(e0);
                right_range = Some(e1);
            } else if ts.check_operator(Operator::Plus) {
                ts.advance();
                ts.expect_operator(Operator::Colon, sink);
                let e1 = parse_expr(ts, factory, sink);
                range_mode = RangeMode::Plus;
                left_range = Some(e0);
                right_range = Some(e1);
            } else if ts.check_operator(Operator::Minus) {
                ts.advance();
                ts.expect_operator(Operator::Colon, sink);
                let e1 = parse_expr(ts, factory, sink);
                range_mode = RangeMode::Minus;
                left_range = Some(e0);
                right_range = Some(e1);
            } else {
                index.push(e0);
            }
            ts.expect_operator(Operator::BrackR, sink);
            continue;
        }
        if ts.eat_operator(Operator::Dot) {
            if let Some(last_idx) = index.last() {
                if let Some(v) = last_idx.index_value() {
                    hb.index_tail(v as i32);
                }
            }
            index.clear();
            range_mode = RangeMode::None;
            left_range = None;
            right_range = None;
            let next = ts.take_identifier().unwrap_or_default();
            hb.push(next);
            continue;
        }
        break;
    }

    if index.is_empty() && range_mode == RangeMode::None && ts.check_operator(Operator::ParenL) {
        ts.advance();
        let args = parse_expr_list(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        let (namebranch, tail_name): (&'a [PtNameBranch<'a>], &'a str) = hb.finish(factory.arena());
        let region = ts.region_since(start);
        return factory.new_func_call(region, false, namebranch.to_vec(), tail_name, args);
    }

    let is_const_index = index.len() == 1 && range_mode == RangeMode::None && index[0].is_index_expr();
    let (namebranch, tail_name): (&'a [PtNameBranch<'a>], &'a str) = hb.finish(factory.arena());
    let region = ts.region_since(start);
    factory.new_primary(region, namebranch.to_vec(), tail_name, index, range_mode, left_range, right_range, is_const_index)
}

/// `{...}` concatenation and `{n{...}}` multi-concatenation. The tokenizer
/// fuses adjacent `{`/`}` pairs with no intervening whitespace into single
/// `ReplicateL`/`ReplicateR` tokens, which this treats as "two brace-opens
/// (or closes) at once". A concatenation-of-concatenations written with no
/// whitespace anywhere (`{{a,b},{c,d}}`) can still defeat this accounting;
/// that form is rare enough in practice that this parser does not attempt
/// to fully disambiguate it, and reports a diagnostic instead of panicking
/// if it does.
fn parse_concat<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a PtExpr<'a> {
    let start = ts.position();

    if ts.eat_operator(Operator::ReplicateL) {
        let inner_start = start;
        let mut inner_elems = vec![parse_expr(ts, factory, sink)];
        while ts.eat_operator(Operator::Comma) {
            inner_elems.push(parse_expr(ts, factory, sink));
        }
        let inner_region = ts.region_since(inner_start);
        if ts.eat_operator(Operator::ReplicateR) {
            let inner = factory.new_operator(inner_region, OperatorKind::Concat, inner_elems);
            let outer_region = ts.region_since(start);
            return factory.new_operator(outer_region, OperatorKind::Concat, vec![inner]);
        }
        ts.expect_operator(Operator::ConcatR, sink);
        let inner = factory.new_operator(inner_region, OperatorKind::Concat, inner_elems);
        let mut outer_elems = vec![inner];
        while ts.eat_operator(Operator::Comma) {
            outer_elems.push(parse_expr(ts, factory, sink));
        }
        ts.expect_operator(Operator::ConcatR, sink);
        let outer_region = ts.region_since(start);
        return factory.new_operator(outer_region, OperatorKind::Concat, outer_elems);
    }

    ts.expect_operator(Operator::ConcatL, sink);
    let first = parse_expr(ts, factory, sink);

    if ts.check_operator(Operator::ConcatL) {
        ts.advance();
        let mut elems = vec![parse_expr(ts, factory, sink)];
        while ts.eat_operator(Operator::Comma) {
            elems.push(parse_expr(ts, factory, sink));
        }
        if !ts.eat_operator(Operator::ReplicateR) {
            ts.expect_operator(Operator::ConcatR, sink);
            ts.expect_operator(Operator::ConcatR, sink);
        }
        let region = ts.region_since(start);
        let mut operands = vec![first];
        operands.extend(elems);
        return factory.new_operator(region, OperatorKind::MultiConcat, operands);
    }

    let mut elems = vec![first];
    while ts.eat_operator(Operator::Comma) {
        elems.push(parse_expr(ts, factory, sink));
    }
    ts.expect_operator(Operator::ConcatR, sink);
    let region = ts.region_since(start);
    factory.new_operator(region, OperatorKind::Concat, elems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::factory::compact::CompactFactory;
    use crate::manager::VecMsgMgr;
    use crate::token::VerilogTokenizer;

    fn parse(text: &str) -> (crate::ast::expr::ExprType, Option<crate::ast::expr::OperatorKind>) {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let tokens = VerilogTokenizer::from_source_code(text).into_tokens();
        let mut ts = TokenStream::new(tokens);
        let e = parse_expr(&mut ts, &factory, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        (e.expr_type(), e.operator_kind())
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (_, kind) = parse("a + b * c");
        assert_eq!(kind, Some(OperatorKind::Add));
    }

    #[test]
    fn ternary_is_right_associative() {
        let (_, kind) = parse("a ? b : c ? d : e");
        assert_eq!(kind, Some(OperatorKind::Condition));
    }

    #[test]
    fn indexed_part_select_plus_colon_is_not_arithmetic() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let tokens = VerilogTokenizer::from_source_code("bus[i +: 4]").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let e = parse_expr(&mut ts, &factory, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(e.range_mode(), RangeMode::Plus);
    }

    #[test]
    fn plain_concat_collects_all_elements() {
        let (etype, kind) = parse("{a, b, c}");
        assert_eq!(etype, crate::ast::expr::ExprType::Operator);
        assert_eq!(kind, Some(OperatorKind::Concat));
    }

    #[test]
    fn system_call_name_excludes_dollar_sign() {
        let arena = Arena::new();
        let factory = CompactFactory::new(&arena);
        let mut sink = VecMsgMgr::new();
        let tokens = VerilogTokenizer::from_source_code("$display(\"hi\")").into_tokens();
        let mut ts = TokenStream::new(tokens);
        let e = parse_expr(&mut ts, &factory, &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(e.tail_name(), "display");
    }
}
