//! Expression decompilation, §4.2.
//!
//! Turns a `PtExpr` back into Verilog source text, inserting parentheses
//! only where the child's operator binds looser than its parent's — the
//! counterpart of [`crate::ast::expr::OperatorKind::precedence`]. Used by
//! diagnostics that quote the offending sub-expression back to the user
//! (§4.7) and is otherwise independent of elaboration.

use crate::ast::expr::{ConstType, OperatorKind, PtExpr, RangeMode};
use std::fmt::Write as _;

/// Renders `expr` as Verilog source text.
pub fn decompile(expr: &PtExpr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

fn write_expr(out: &mut String, expr: &PtExpr, parent_prec: u8) {
    match expr {
        PtExpr::Constant { const_type, text, .. } => match const_type {
            ConstType::String => {
                let _ = write!(out, "\"{}\"", text);
            }
            _ => {
                let _ = write!(out, "{}", text);
            }
        },
        PtExpr::Primary {
            namebranch,
            tail_name,
            index,
            range_mode,
            left_range,
            right_range,
            ..
        } => {
            for branch in *namebranch {
                let _ = write!(out, "{}", branch.name());
                if let Some(idx) = branch.index() {
                    let _ = write!(out, "[{}]", idx);
                }
                out.push('.');
            }
            let _ = write!(out, "{}", tail_name);
            for idx in *index {
                out.push('[');
                write_expr(out, idx, 0);
                out.push(']');
            }
            match range_mode {
                RangeMode::None => {}
                RangeMode::Const => {
                    out.push('[');
                    if let Some(l) = left_range {
                        write_expr(out, l, 0);
                    }
                    out.push(':');
                    if let Some(r) = right_range {
                        write_expr(out, r, 0);
                    }
                    out.push(']');
                }
                RangeMode::Plus => {
                    out.push('[');
                    if let Some(l) = left_range {
                        write_expr(out, l, 0);
                    }
                    out.push_str("+:");
                    if let Some(r) = right_range {
                        write_expr(out, r, 0);
                    }
                    out.push(']');
                }
                RangeMode::Minus => {
                    out.push('[');
                    if let Some(l) = left_range {
                        write_expr(out, l, 0);
                    }
                    out.push_str("-:");
                    if let Some(r) = right_range {
                        write_expr(out, r, 0);
                    }
                    out.push(']');
                }
            }
        }
        PtExpr::FuncCall {
            is_system,
            namebranch,
            tail_name,
            args,
            ..
        } => {
            if *is_system {
                out.push('$');
            }
            for branch in *namebranch {
                let _ = write!(out, "{}.", branch.name());
            }
            let _ = write!(out, "{}(", tail_name);
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg, 0);
            }
            out.push(')');
        }
        PtExpr::Operator { kind, operands, .. } => write_operator(out, *kind, operands, parent_prec),
    }
}

fn write_operator(out: &mut String, kind: OperatorKind, operands: &[&PtExpr], parent_prec: u8) {
    let prec = kind.precedence();
    let needs_parens = prec < parent_prec;
    if needs_parens {
        out.push('(');
    }
    match kind {
        OperatorKind::Concat => {
            out.push('{');
            for (i, o) in operands.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, o, 0);
            }
            out.push('}');
        }
        OperatorKind::MultiConcat => {
            out.push('{');
            if let Some(rep) = operands.first() {
                write_expr(out, rep, 0);
            }
            out.push('{');
            for (i, o) in operands.iter().skip(1).enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, o, 0);
            }
            out.push('}');
            out.push('}');
        }
        OperatorKind::MinTypMax => {
            if let [min, typ, max] = operands {
                write_expr(out, min, 0);
                out.push(':');
                write_expr(out, typ, 0);
                out.push(':');
                write_expr(out, max, 0);
            }
        }
        OperatorKind::Condition => {
            if let [c, t, f] = operands {
                write_expr(out, c, prec + 1);
                out.push_str(" ? ");
                write_expr(out, t, 0);
                out.push_str(" : ");
                write_expr(out, f, 0);
            }
        }
        OperatorKind::EventOr => {
            for (i, o) in operands.iter().enumerate() {
                if i > 0 {
                    out.push_str(" or ");
                }
                write_expr(out, o, 0);
            }
        }
        unary if is_unary(unary) => {
            out.push_str(symbol(unary));
            if let Some(o) = operands.first() {
                write_expr(out, o, prec);
            }
        }
        binary => {
            if let [lhs, rhs] = operands {
                write_expr(out, lhs, prec);
                let _ = write!(out, " {} ", symbol(binary));
                write_expr(out, rhs, prec + 1);
            }
        }
    }
    if needs_parens {
        out.push(')');
    }
}

fn is_unary(kind: OperatorKind) -> bool {
    matches!(
        kind,
        OperatorKind::UnaryPlus
            | OperatorKind::UnaryMinus
            | OperatorKind::LogicNot
            | OperatorKind::BitNeg
            | OperatorKind::ReductAnd
            | OperatorKind::ReductNand
            | OperatorKind::ReductOr
            | OperatorKind::ReductNor
            | OperatorKind::ReductXor
            | OperatorKind::ReductXnor
            | OperatorKind::Posedge
            | OperatorKind::Negedge
    )
}

fn symbol(kind: OperatorKind) -> &'static str {
    use OperatorKind::*;
    match kind {
        UnaryPlus => "+",
        UnaryMinus => "-",
        LogicNot => "!",
        BitNeg => "~",
        ReductAnd => "&",
        ReductNand => "~&",
        ReductOr => "|",
        ReductNor => "~|",
        ReductXor => "^",
        ReductXnor => "~^",
        Posedge => "posedge ",
        Negedge => "negedge ",
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Pow => "**",
        Lt => "<",
        Le => "<=",
        Gt => ">",
        Ge => ">=",
        Eq => "==",
        Neq => "!=",
        CaseEq => "===",
        CaseNeq => "!==",
        LogAnd => "&&",
        LogOr => "||",
        BitAnd => "&",
        BitOr => "|",
        BitXor => "^",
        BitXnor => "~^",
        ShiftL => "<<",
        ShiftR => ">>",
        ArithShiftL => "<<<",
        ArithShiftR => ">>>",
        EventOr | Condition | Concat | MultiConcat | MinTypMax => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;
    use crate::region::FileRegion;

    fn region() -> FileRegion {
        FileRegion::at(Position::new())
    }

    fn constant(text: &'static str) -> PtExpr<'static> {
        PtExpr::Constant {
            region: region(),
            const_type: ConstType::IntUnsized,
            size: None,
            is_signed: false,
            text,
        }
    }

    #[test]
    fn parenthesizes_looser_child_under_tighter_parent() {
        let a = constant("1");
        let b = constant("2");
        let c = constant("3");
        let add_operands: &[&PtExpr] = &[&a, &b];
        let sum = PtExpr::Operator {
            region: region(),
            kind: OperatorKind::Add,
            operands: add_operands,
        };
        let mul_operands: &[&PtExpr] = &[&sum, &c];
        let product = PtExpr::Operator {
            region: region(),
            kind: OperatorKind::Mul,
            operands: mul_operands,
        };
        assert_eq!(decompile(&product), "(1 + 2) * 3");
    }

    #[test]
    fn does_not_parenthesize_tighter_child_under_looser_parent() {
        let a = constant("1");
        let b = constant("2");
        let c = constant("3");
        let mul_operands: &[&PtExpr] = &[&a, &b];
        let product = PtExpr::Operator {
            region: region(),
            kind: OperatorKind::Mul,
            operands: mul_operands,
        };
        let add_operands: &[&PtExpr] = &[&product, &c];
        let sum = PtExpr::Operator {
            region: region(),
            kind: OperatorKind::Add,
            operands: add_operands,
        };
        assert_eq!(decompile(&sum), "1 * 2 + 3");
    }

    #[test]
    fn decompiles_simple_primary() {
        let p = PtExpr::Primary {
            region: region(),
            namebranch: &[],
            tail_name: "a",
            index: &[],
            range_mode: RangeMode::None,
            left_range: None,
            right_range: None,
            is_const_index: false,
        };
        assert_eq!(decompile(&p), "a");
    }
}
