//! Auxiliary node kinds shared across the expression, statement, item, and
//! container families (§3.2 "Auxiliary").

use crate::region::FileRegion;

/// One segment of a hierarchical name: a name plus an optional constant
/// array index, e.g. the `mid[3]` in `top.mid[3].leaf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtNameBranch<'a> {
    name: &'a str,
    index: Option<i32>,
}

impl<'a> PtNameBranch<'a> {
    pub fn new(name: &'a str, index: Option<i32>) -> Self {
        Self { name, index }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn index(&self) -> Option<i32> {
        self.index
    }
}

/// A bit range `[msb:lsb]`. Both bounds are themselves expressions so that
/// parameterized widths (`[WIDTH-1:0]`) are representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtRange<'a> {
    region: FileRegion,
    msb: &'a super::expr::PtExpr<'a>,
    lsb: &'a super::expr::PtExpr<'a>,
}

impl<'a> PtRange<'a> {
    pub fn new(region: FileRegion, msb: &'a super::expr::PtExpr<'a>, lsb: &'a super::expr::PtExpr<'a>) -> Self {
        Self { region, msb, lsb }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn msb(&self) -> &'a super::expr::PtExpr<'a> {
        self.msb
    }

    pub fn lsb(&self) -> &'a super::expr::PtExpr<'a> {
        self.lsb
    }
}

/// A delay specification, 1 to 3 expression slots (`#d`, `#(d1,d2)`, `#(d1,d2,d3)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtDelay<'a> {
    region: FileRegion,
    values: &'a [&'a super::expr::PtExpr<'a>],
}

impl<'a> PtDelay<'a> {
    pub fn new(region: FileRegion, values: &'a [&'a super::expr::PtExpr<'a>]) -> Self {
        Self { region, values }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn value(&self, i: usize) -> Option<&'a super::expr::PtExpr<'a>> {
        self.values.get(i).copied()
    }

    pub fn value_num(&self) -> usize {
        self.values.len()
    }
}

/// Drive/charge strength pair for a gate, net, or continuous assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthValue {
    Supply0,
    Strong0,
    Pull0,
    Weak0,
    Highz0,
    Supply1,
    Strong1,
    Pull1,
    Weak1,
    Highz1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtStrength {
    region: FileRegion,
    value0: Option<StrengthValue>,
    value1: Option<StrengthValue>,
}

impl PtStrength {
    pub fn new(region: FileRegion, value0: Option<StrengthValue>, value1: Option<StrengthValue>) -> Self {
        Self { region, value0, value1 }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn value0(&self) -> Option<StrengthValue> {
        self.value0
    }

    pub fn value1(&self) -> Option<StrengthValue> {
        self.value1
    }
}

/// A procedural control prefix attached to a blocking/non-blocking assign
/// or a standalone statement: `#delay`, `@(event)`, or `repeat(n) @(event)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PtControl<'a> {
    Delay(PtDelay<'a>),
    Event(&'a [&'a super::expr::PtExpr<'a>]),
    Repeat(&'a super::expr::PtExpr<'a>, &'a [&'a super::expr::PtExpr<'a>]),
}

impl<'a> PtControl<'a> {
    pub fn as_delay(&self) -> Option<&PtDelay<'a>> {
        match self {
            Self::Delay(d) => Some(d),
            _ => None,
        }
    }

    pub fn event_list(&self) -> &'a [&'a super::expr::PtExpr<'a>] {
        match self {
            Self::Event(e) => e,
            Self::Repeat(_, e) => e,
            Self::Delay(_) => &[],
        }
    }
}

/// One port connection in a module/UDP instance: ordered (by position) or
/// named (`.clk(sys_clk)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtConnection<'a> {
    region: FileRegion,
    name: Option<&'a str>,
    expr: Option<&'a super::expr::PtExpr<'a>>,
}

impl<'a> PtConnection<'a> {
    pub fn new_ordered(region: FileRegion, expr: Option<&'a super::expr::PtExpr<'a>>) -> Self {
        Self { region, name: None, expr }
    }

    pub fn new_named(region: FileRegion, name: &'a str, expr: Option<&'a super::expr::PtExpr<'a>>) -> Self {
        Self { region, name: Some(name), expr }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    pub fn expr(&self) -> Option<&'a super::expr::PtExpr<'a>> {
        self.expr
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// A `(* key = value *)` attribute instance: an ordered list of specs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtAttrSpec<'a> {
    region: FileRegion,
    name: &'a str,
    value: Option<&'a super::expr::PtExpr<'a>>,
}

impl<'a> PtAttrSpec<'a> {
    pub fn new(region: FileRegion, name: &'a str, value: Option<&'a super::expr::PtExpr<'a>>) -> Self {
        Self { region, name, value }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> Option<&'a super::expr::PtExpr<'a>> {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtAttrInst<'a> {
    region: FileRegion,
    specs: &'a [PtAttrSpec<'a>],
}

impl<'a> PtAttrInst<'a> {
    pub fn new(region: FileRegion, specs: &'a [PtAttrSpec<'a>]) -> Self {
        Self { region, specs }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn specs(&self) -> &'a [PtAttrSpec<'a>] {
        self.specs
    }
}

/// A single path-delay value slot. `specify` paths carry 1, 2, 3, 6, or 12
/// of these depending on the declared edge-sensitivity form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtPathDelay<'a> {
    region: FileRegion,
    values: &'a [&'a super::expr::PtExpr<'a>],
}

impl<'a> PtPathDelay<'a> {
    pub fn new(region: FileRegion, values: &'a [&'a super::expr::PtExpr<'a>]) -> Self {
        Self { region, values }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn values(&self) -> &'a [&'a super::expr::PtExpr<'a>] {
        self.values
    }

    /// The LRM only recognizes 1/2/3/6/12-value path-delay forms.
    pub fn is_well_formed(&self) -> bool {
        matches!(self.values.len(), 1 | 2 | 3 | 6 | 12)
    }
}

/// The edge-sensitivity / polarity prefix of a specify path (`->`, `=>`,
/// polarity operator `+`/`-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEdge {
    None,
    Posedge,
    Negedge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtPathDecl<'a> {
    region: FileRegion,
    edge: PathEdge,
    inputs: &'a [&'a str],
    outputs: &'a [&'a str],
    is_full_connection: bool,
    delay: PtPathDelay<'a>,
}

impl<'a> PtPathDecl<'a> {
    pub fn new(
        region: FileRegion,
        edge: PathEdge,
        inputs: &'a [&'a str],
        outputs: &'a [&'a str],
        is_full_connection: bool,
        delay: PtPathDelay<'a>,
    ) -> Self {
        Self {
            region,
            edge,
            inputs,
            outputs,
            is_full_connection,
            delay,
        }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn edge(&self) -> PathEdge {
        self.edge
    }

    pub fn inputs(&self) -> &'a [&'a str] {
        self.inputs
    }

    pub fn outputs(&self) -> &'a [&'a str] {
        self.outputs
    }

    pub fn is_full_connection(&self) -> bool {
        self.is_full_connection
    }

    pub fn delay(&self) -> &PtPathDelay<'a> {
        &self.delay
    }
}
