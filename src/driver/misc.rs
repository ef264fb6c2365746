//! Shared grammar fragments: ranges, delays, strengths, controls, event
//! lists, and attribute instances, used across the declaration, statement,
//! and instance productions (§4.6).

use super::TokenStream;
use crate::ast::expr::OperatorKind;
use crate::ast::misc::{PtAttrInst, PtControl, PtDelay, PtRange, PtStrength, StrengthValue};
use crate::factory::PtFactory;
use crate::manager::{Category, MsgMgr, Severity};
use crate::token::{Keyword, Lexeme, Operator};

/// `[msb:lsb]`, if present.
pub fn parse_range<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Option<PtRange<'a>> {
    let start = ts.position();
    if !ts.eat_operator(Operator::BrackL) {
        return None;
    }
    let msb = super::expr::parse_expr(ts, factory, sink);
    ts.expect_operator(Operator::Colon, sink);
    let lsb = super::expr::parse_expr(ts, factory, sink);
    ts.expect_operator(Operator::BrackR, sink);
    Some(factory.new_range(ts.region_since(start), msb, lsb))
}

fn strength_value(kw: Keyword) -> Option<StrengthValue> {
    Some(match kw {
        Keyword::Supply0 => StrengthValue::Supply0,
        Keyword::Strong0 => StrengthValue::Strong0,
        Keyword::Pull0 => StrengthValue::Pull0,
        Keyword::Weak0 => StrengthValue::Weak0,
        Keyword::Highz0 => StrengthValue::Highz0,
        Keyword::Supply1 => StrengthValue::Supply1,
        Keyword::Strong1 => StrengthValue::Strong1,
        Keyword::Pull1 => StrengthValue::Pull1,
        Keyword::Weak1 => StrengthValue::Weak1,
        Keyword::Highz1 => StrengthValue::Highz1,
        _ => return None,
    })
}

fn peek_strength_keyword(ts: &TokenStream, n: usize) -> Option<StrengthValue> {
    match ts.peek_at(n) {
        Lexeme::Keyword(kw) => strength_value(*kw),
        _ => None,
    }
}

/// `(strength0, strength1)`, only attempted where the caller already knows a
/// strength is legal (gate and net declaration headers) — a bare `(` is
/// otherwise ambiguous with a delay or an instance's connection list, so
/// this bails unless the token right after `(` is a recognized strength
/// keyword.
pub fn parse_strength<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Option<PtStrength> {
    let start = ts.position();
    if !ts.check_operator(Operator::ParenL) || peek_strength_keyword(ts, 1).is_none() {
        return None;
    }
    ts.advance();
    let v0 = take_strength(ts, sink);
    ts.expect_operator(Operator::Comma, sink);
    let v1 = take_strength(ts, sink);
    ts.expect_operator(Operator::ParenR, sink);
    Some(factory.new_strength(ts.region_since(start), v0, v1))
}

fn take_strength(ts: &mut TokenStream, sink: &mut dyn MsgMgr) -> Option<StrengthValue> {
    if let Lexeme::Keyword(kw) = ts.peek().clone() {
        if let Some(v) = strength_value(kw) {
            ts.advance();
            return Some(v);
        }
    }
    sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected a strength keyword, found `{}`", ts.peek()));
    None
}

/// `#delay` or `#(d1[, d2[, d3]])`.
pub fn parse_delay<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Option<PtDelay<'a>> {
    let start = ts.position();
    if !ts.eat_operator(Operator::Pound) {
        return None;
    }
    let values = if ts.eat_operator(Operator::ParenL) {
        let mut vs = vec![super::expr::parse_expr(ts, factory, sink)];
        while ts.eat_operator(Operator::Comma) {
            vs.push(super::expr::parse_expr(ts, factory, sink));
        }
        ts.expect_operator(Operator::ParenR, sink);
        vs
    } else {
        vec![super::expr::parse_primary_expr(ts, factory, sink)]
    };
    Some(factory.new_delay(ts.region_since(start), values))
}

/// `@(event_expression {or|, event_expression})` or `@*`/`@(*)`. The
/// leading `@` must already have been consumed by the caller.
pub fn parse_event_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Vec<&'a crate::ast::expr::PtExpr<'a>> {
    if ts.eat_operator(Operator::Mult) {
        return Vec::new();
    }
    ts.expect_operator(Operator::ParenL, sink);
    if ts.eat_operator(Operator::Mult) {
        ts.expect_operator(Operator::ParenR, sink);
        return Vec::new();
    }
    let mut events = vec![parse_event_expr(ts, factory, sink)];
    while ts.eat_keyword(Keyword::Or) || ts.eat_operator(Operator::Comma) {
        events.push(parse_event_expr(ts, factory, sink));
    }
    ts.expect_operator(Operator::ParenR, sink);
    events
}

fn parse_event_expr<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> &'a crate::ast::expr::PtExpr<'a> {
    let start = ts.position();
    if ts.eat_keyword(Keyword::Posedge) {
        let e = super::expr::parse_expr(ts, factory, sink);
        return factory.new_operator(ts.region_since(start), OperatorKind::Posedge, vec![e]);
    }
    if ts.eat_keyword(Keyword::Negedge) {
        let e = super::expr::parse_expr(ts, factory, sink);
        return factory.new_operator(ts.region_since(start), OperatorKind::Negedge, vec![e]);
    }
    super::expr::parse_expr(ts, factory, sink)
}

/// A procedural control prefix: `#delay`, `@(events)`/`@*`, or
/// `repeat(n) @(events)`.
pub fn parse_control<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Option<PtControl<'a>> {
    if ts.check_operator(Operator::Pound) {
        return parse_delay(ts, factory, sink).map(PtControl::Delay);
    }
    if ts.eat_keyword(Keyword::Repeat) {
        ts.expect_operator(Operator::ParenL, sink);
        let n = super::expr::parse_expr(ts, factory, sink);
        ts.expect_operator(Operator::ParenR, sink);
        ts.expect_operator(Operator::At, sink);
        let events = parse_event_list(ts, factory, sink);
        return Some(PtControl::Repeat(n, factory.arena().alloc_slice(events)));
    }
    if ts.eat_operator(Operator::At) {
        let events = parse_event_list(ts, factory, sink);
        return Some(PtControl::Event(factory.arena().alloc_slice(events)));
    }
    None
}

/// Zero or more `(* name [= value] {, name [= value]} *)` groups preceding a
/// declaration, item, or port. Attribute-to-node attachment is left to the
/// caller, which knows the target node's region and has a `&mut PtManager`
/// in scope to call `reg_attrinst` with.
pub fn parse_attr_insts<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> Vec<PtAttrInst<'a>> {
    let mut insts = Vec::new();
    while ts.check_operator(Operator::AttrL) {
        let start = ts.position();
        ts.advance();
        let mut specs = Vec::new();
        loop {
            let spec_start = ts.position();
            let name = ts.take_identifier().unwrap_or_default();
            let name = factory.arena().alloc_str(&name);
            let value = if ts.eat_operator(Operator::BlockAssign) {
                Some(super::expr::parse_expr(ts, factory, sink))
            } else {
                None
            };
            specs.push(factory.new_attr_spec(ts.region_since(spec_start), name, value));
            if !ts.eat_operator(Operator::Comma) {
                break;
            }
        }
        ts.expect_operator(Operator::AttrR, sink);
        insts.push(factory.new_attr_inst(ts.region_since(start), specs));
    }
    insts
}
