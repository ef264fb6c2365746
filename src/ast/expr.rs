//! Expressions (PtExpr), §3.2 "Expression".
//!
//! Every accessor is total: an operation not applicable to the expression's
//! variant returns its documented neutral value (0, empty slice, `None`)
//! rather than panicking, so traversal code never needs to match on
//! `expr_type()` before calling an accessor (§4.2's "virtual-accessor-
//! returns-default" idiom).

use super::misc::PtNameBranch;
use crate::region::FileRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprType {
    Operator,
    Constant,
    Primary,
    FuncCall,
    SysFuncCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // unary
    UnaryPlus,
    UnaryMinus,
    LogicNot,
    BitNeg,
    ReductAnd,
    ReductNand,
    ReductOr,
    ReductNor,
    ReductXor,
    ReductXnor,
    Posedge,
    Negedge,
    // binary, arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // binary, relational
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Neq,
    CaseEq,
    CaseNeq,
    // binary, logical
    LogAnd,
    LogOr,
    // binary, bitwise
    BitAnd,
    BitOr,
    BitXor,
    BitXnor,
    // binary, shift
    ShiftL,
    ShiftR,
    ArithShiftL,
    ArithShiftR,
    // event-expression join: `a or b`
    EventOr,
    // ternary
    Condition,
    // variadic
    Concat,
    MultiConcat,
    MinTypMax,
}

impl OperatorKind {
    pub fn operand_count(&self) -> OperandArity {
        use OperandArity::*;
        match self {
            Self::UnaryPlus
            | Self::UnaryMinus
            | Self::LogicNot
            | Self::BitNeg
            | Self::ReductAnd
            | Self::ReductNand
            | Self::ReductOr
            | Self::ReductNor
            | Self::ReductXor
            | Self::ReductXnor
            | Self::Posedge
            | Self::Negedge => Fixed(1),
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Mod
            | Self::Pow
            | Self::Lt
            | Self::Le
            | Self::Gt
            | Self::Ge
            | Self::Eq
            | Self::Neq
            | Self::CaseEq
            | Self::CaseNeq
            | Self::LogAnd
            | Self::LogOr
            | Self::BitAnd
            | Self::BitOr
            | Self::BitXor
            | Self::BitXnor
            | Self::ShiftL
            | Self::ShiftR
            | Self::ArithShiftL
            | Self::ArithShiftR
            | Self::EventOr => Fixed(2),
            Self::Condition | Self::MinTypMax => Fixed(3),
            Self::Concat | Self::MultiConcat => Variadic,
        }
    }

    /// IEEE 1364-2001 Table 5-4 binding power, 12 (tightest) down to 0
    /// (loosest). Used by the decompiler to decide where parens are needed.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::UnaryPlus
            | Self::UnaryMinus
            | Self::LogicNot
            | Self::BitNeg
            | Self::ReductAnd
            | Self::ReductNand
            | Self::ReductOr
            | Self::ReductNor
            | Self::ReductXor
            | Self::ReductXnor => 12,
            Self::Pow => 11,
            Self::Mul | Self::Div | Self::Mod => 10,
            Self::Add | Self::Sub => 9,
            Self::ShiftL | Self::ShiftR | Self::ArithShiftL | Self::ArithShiftR => 8,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 7,
            Self::Eq | Self::Neq | Self::CaseEq | Self::CaseNeq => 6,
            Self::BitAnd => 5,
            Self::BitXor | Self::BitXnor => 4,
            Self::BitOr => 3,
            Self::LogAnd => 2,
            Self::LogOr => 1,
            Self::Condition => 0,
            // these never need comparing against a parent's precedence: they
            // carry their own literal bracketing syntax
            Self::Concat | Self::MultiConcat | Self::MinTypMax | Self::EventOr | Self::Posedge | Self::Negedge => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandArity {
    Fixed(usize),
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstType {
    IntUnsized,
    IntSized,
    Real,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    None,
    Const,
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PtExpr<'a> {
    Operator {
        region: FileRegion,
        kind: OperatorKind,
        operands: &'a [&'a PtExpr<'a>],
    },
    Constant {
        region: FileRegion,
        const_type: ConstType,
        size: Option<u32>,
        is_signed: bool,
        /// The literal's original text (digits, base specifier, quoted
        /// string contents, ...), kept verbatim for decompilation.
        text: &'a str,
    },
    Primary {
        region: FileRegion,
        namebranch: &'a [PtNameBranch<'a>],
        tail_name: &'a str,
        index: &'a [&'a PtExpr<'a>],
        range_mode: RangeMode,
        left_range: Option<&'a PtExpr<'a>>,
        right_range: Option<&'a PtExpr<'a>>,
        is_const_index: bool,
    },
    FuncCall {
        region: FileRegion,
        is_system: bool,
        namebranch: &'a [PtNameBranch<'a>],
        tail_name: &'a str,
        args: &'a [&'a PtExpr<'a>],
    },
}

impl<'a> PtExpr<'a> {
    pub fn file_region(&self) -> FileRegion {
        match self {
            Self::Operator { region, .. } => *region,
            Self::Constant { region, .. } => *region,
            Self::Primary { region, .. } => *region,
            Self::FuncCall { region, .. } => *region,
        }
    }

    pub fn expr_type(&self) -> ExprType {
        match self {
            Self::Operator { .. } => ExprType::Operator,
            Self::Constant { .. } => ExprType::Constant,
            Self::Primary { .. } => ExprType::Primary,
            Self::FuncCall { is_system, .. } => {
                if *is_system {
                    ExprType::SysFuncCall
                } else {
                    ExprType::FuncCall
                }
            }
        }
    }

    pub fn operator_kind(&self) -> Option<OperatorKind> {
        match self {
            Self::Operator { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    fn operand_slice(&self) -> &'a [&'a PtExpr<'a>] {
        match self {
            Self::Operator { operands, .. } => operands,
            Self::FuncCall { args, .. } => args,
            _ => &[],
        }
    }

    pub fn operand_num(&self) -> usize {
        self.operand_slice().len()
    }

    pub fn operand(&self, i: usize) -> Option<&'a PtExpr<'a>> {
        self.operand_slice().get(i).copied()
    }

    pub fn operand0(&self) -> Option<&'a PtExpr<'a>> {
        self.operand(0)
    }

    pub fn operand1(&self) -> Option<&'a PtExpr<'a>> {
        self.operand(1)
    }

    pub fn operand2(&self) -> Option<&'a PtExpr<'a>> {
        self.operand(2)
    }

    pub fn namebranch_num(&self) -> usize {
        match self {
            Self::Primary { namebranch, .. } => namebranch.len(),
            Self::FuncCall { namebranch, .. } => namebranch.len(),
            _ => 0,
        }
    }

    pub fn namebranch(&self, i: usize) -> Option<PtNameBranch<'a>> {
        match self {
            Self::Primary { namebranch, .. } => namebranch.get(i).copied(),
            Self::FuncCall { namebranch, .. } => namebranch.get(i).copied(),
            _ => None,
        }
    }

    pub fn tail_name(&self) -> &'a str {
        match self {
            Self::Primary { tail_name, .. } => tail_name,
            Self::FuncCall { tail_name, .. } => tail_name,
            _ => "",
        }
    }

    pub fn is_const_index(&self) -> bool {
        matches!(self, Self::Primary { is_const_index: true, .. })
    }

    pub fn index_num(&self) -> usize {
        match self {
            Self::Primary { index, .. } => index.len(),
            _ => 0,
        }
    }

    pub fn index(&self, i: usize) -> Option<&'a PtExpr<'a>> {
        match self {
            Self::Primary { index, .. } => index.get(i).copied(),
            _ => None,
        }
    }

    pub fn range_mode(&self) -> RangeMode {
        match self {
            Self::Primary { range_mode, .. } => *range_mode,
            _ => RangeMode::None,
        }
    }

    pub fn left_range(&self) -> Option<&'a PtExpr<'a>> {
        match self {
            Self::Primary { left_range, .. } => *left_range,
            _ => None,
        }
    }

    pub fn right_range(&self) -> Option<&'a PtExpr<'a>> {
        match self {
            Self::Primary { right_range, .. } => *right_range,
            _ => None,
        }
    }

    pub fn const_type(&self) -> Option<ConstType> {
        match self {
            Self::Constant { const_type, .. } => Some(*const_type),
            _ => None,
        }
    }

    pub fn const_size(&self) -> u32 {
        match self {
            Self::Constant { size, .. } => size.unwrap_or(0),
            _ => 0,
        }
    }

    pub fn const_str(&self) -> &'a str {
        match self {
            Self::Constant { text, .. } => text,
            _ => "",
        }
    }

    /// Parses the constant's text as an unsigned 32-bit value, if it is an
    /// unsized or sized integer literal with a recognizable decimal digit
    /// field. Non-integer constants (real, string) return `None`.
    pub fn const_uint32(&self) -> Option<u32> {
        match self {
            Self::Constant { const_type, text, .. } => match const_type {
                ConstType::IntUnsized | ConstType::IntSized => {
                    let digits: String = text.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
                    let digits: String = digits.chars().rev().collect();
                    digits.parse().ok()
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn const_real(&self) -> Option<f64> {
        match self {
            Self::Constant {
                const_type: ConstType::Real,
                text,
                ..
            } => text.parse().ok(),
            _ => None,
        }
    }

    /// Whether this expression is admissible as a constant-foldable index.
    /// Per the spec's open question, only plain constants, unary-minus of a
    /// constant, and `is_const_index`-marked primaries qualify; any other
    /// arithmetic is rejected rather than attempted.
    pub fn is_index_expr(&self) -> bool {
        match self {
            Self::Constant { .. } => true,
            Self::Primary { is_const_index, .. } => *is_const_index,
            Self::Operator {
                kind: OperatorKind::UnaryMinus,
                operands,
                ..
            } => operands.first().is_some_and(|o| matches!(o, Self::Constant { .. })),
            _ => false,
        }
    }

    /// The constant-folded value of an `is_index_expr` expression, if one
    /// can be computed; `None` otherwise (including for non-index-exprs).
    pub fn index_value(&self) -> Option<i64> {
        if !self.is_index_expr() {
            return None;
        }
        match self {
            Self::Constant { .. } => self.const_uint32().map(|v| v as i64),
            Self::Operator {
                kind: OperatorKind::UnaryMinus,
                operands,
                ..
            } => operands
                .first()
                .and_then(|o| o.const_uint32())
                .map(|v| -(v as i64)),
            _ => None,
        }
    }

    /// A primary is "simple" when it is a bare identifier: no hierarchy, no
    /// index, no range selection.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Primary {
                namebranch,
                index,
                range_mode: RangeMode::None,
                ..
            } if namebranch.is_empty() && index.is_empty()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_operands_default_to_none() {
        let a = PtExpr::Constant {
            region: FileRegion::at(crate::lexer::Position::new()),
            const_type: ConstType::IntUnsized,
            size: None,
            is_signed: false,
            text: "1",
        };
        assert_eq!(a.operand(0), None);
        assert_eq!(a.operand_num(), 0);
        assert_eq!(a.namebranch_num(), 0);
        assert_eq!(a.tail_name(), "");
    }

    #[test]
    fn simple_primary_has_no_hierarchy_or_index() {
        let p = PtExpr::Primary {
            region: FileRegion::at(crate::lexer::Position::new()),
            namebranch: &[],
            tail_name: "a",
            index: &[],
            range_mode: RangeMode::None,
            left_range: None,
            right_range: None,
            is_const_index: false,
        };
        assert!(p.is_simple());
    }

    #[test]
    fn unary_minus_of_constant_is_index_expr() {
        let four = PtExpr::Constant {
            region: FileRegion::at(crate::lexer::Position::new()),
            const_type: ConstType::IntUnsized,
            size: None,
            is_signed: false,
            text: "4",
        };
        let operands: &[&PtExpr] = &[&four];
        let neg = PtExpr::Operator {
            region: FileRegion::at(crate::lexer::Position::new()),
            kind: OperatorKind::UnaryMinus,
            operands,
        };
        assert!(neg.is_index_expr());
        assert_eq!(neg.index_value(), Some(-4));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert!(OperatorKind::Mul.precedence() > OperatorKind::Add.precedence());
    }
}
