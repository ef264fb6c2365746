//! Container nodes (PtModule, PtUdp, PtPort), §3.2 "Container nodes".
//!
//! These are the roots of the forest the [`crate::manager::PtManager`]
//! registers: one `PtModule` or `PtUdp` per top-level Verilog design unit.

use super::decl::PtDeclHead;
use super::expr::PtExpr;
use super::io::PtIOHead;
use super::item::PtItem;
use crate::region::FileRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayMode {
    None,
    Distributed,
    Path,
    Unit,
    Zero,
    MinTypMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultNetType {
    Wire,
    Tri,
    Tri0,
    Tri1,
    Wand,
    Wor,
    Trireg,
    Uwire,
    None,
}

/// One port in a module's port list: an external name the instantiation
/// site sees, and the internal reference(s) it binds to. A concatenated
/// port (`.p({a, b})`) carries multiple internal refs, one per element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtPort<'a> {
    region: FileRegion,
    external_name: &'a str,
    reference: Option<&'a PtExpr<'a>>,
    concat_refs: &'a [&'a PtExpr<'a>],
}

impl<'a> PtPort<'a> {
    pub fn new(region: FileRegion, external_name: &'a str, reference: Option<&'a PtExpr<'a>>, concat_refs: &'a [&'a PtExpr<'a>]) -> Self {
        Self {
            region,
            external_name,
            reference,
            concat_refs,
        }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn external_name(&self) -> &'a str {
        self.external_name
    }

    pub fn reference(&self) -> Option<&'a PtExpr<'a>> {
        self.reference
    }

    pub fn concat_refs(&self) -> &'a [&'a PtExpr<'a>] {
        self.concat_refs
    }

    pub fn is_concat(&self) -> bool {
        !self.concat_refs.is_empty()
    }
}

/// A top-level `module` ... `endmodule` design unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtModule<'a> {
    region: FileRegion,
    name: &'a str,
    is_macromodule: bool,
    is_protected: bool,
    is_cell_define: bool,
    time_unit: Option<&'a str>,
    time_precision: Option<&'a str>,
    default_net_type: DefaultNetType,
    delay_mode: DelayMode,
    explicit_port_names: bool,
    config_name: Option<&'a str>,
    library_name: Option<&'a str>,
    cell_name: Option<&'a str>,
    param_port_list: &'a [&'a PtDeclHead<'a>],
    port_list: &'a [PtPort<'a>],
    io_head_list: &'a [&'a PtIOHead<'a>],
    decl_list: &'a [&'a PtDeclHead<'a>],
    item_list: &'a [&'a PtItem<'a>],
}

impl<'a> PtModule<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: FileRegion,
        name: &'a str,
        is_macromodule: bool,
        is_protected: bool,
        is_cell_define: bool,
        time_unit: Option<&'a str>,
        time_precision: Option<&'a str>,
        default_net_type: DefaultNetType,
        delay_mode: DelayMode,
        explicit_port_names: bool,
        config_name: Option<&'a str>,
        library_name: Option<&'a str>,
        cell_name: Option<&'a str>,
        param_port_list: &'a [&'a PtDeclHead<'a>],
        port_list: &'a [PtPort<'a>],
        io_head_list: &'a [&'a PtIOHead<'a>],
        decl_list: &'a [&'a PtDeclHead<'a>],
        item_list: &'a [&'a PtItem<'a>],
    ) -> Self {
        Self {
            region,
            name,
            is_macromodule,
            is_protected,
            is_cell_define,
            time_unit,
            time_precision,
            default_net_type,
            delay_mode,
            explicit_port_names,
            config_name,
            library_name,
            cell_name,
            param_port_list,
            port_list,
            io_head_list,
            decl_list,
            item_list,
        }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn is_macromodule(&self) -> bool {
        self.is_macromodule
    }

    pub fn is_protected(&self) -> bool {
        self.is_protected
    }

    pub fn is_cell_define(&self) -> bool {
        self.is_cell_define
    }

    pub fn time_unit(&self) -> Option<&'a str> {
        self.time_unit
    }

    pub fn time_precision(&self) -> Option<&'a str> {
        self.time_precision
    }

    pub fn default_net_type(&self) -> DefaultNetType {
        self.default_net_type
    }

    pub fn delay_mode(&self) -> DelayMode {
        self.delay_mode
    }

    pub fn explicit_port_names(&self) -> bool {
        self.explicit_port_names
    }

    pub fn config_name(&self) -> Option<&'a str> {
        self.config_name
    }

    pub fn library_name(&self) -> Option<&'a str> {
        self.library_name
    }

    pub fn cell_name(&self) -> Option<&'a str> {
        self.cell_name
    }

    pub fn param_port_list(&self) -> &'a [&'a PtDeclHead<'a>] {
        self.param_port_list
    }

    pub fn port_list(&self) -> &'a [PtPort<'a>] {
        self.port_list
    }

    pub fn iohead_num(&self) -> usize {
        self.io_head_list.len()
    }

    pub fn iohead(&self, i: usize) -> Option<&'a PtIOHead<'a>> {
        self.io_head_list.get(i).copied()
    }

    pub fn decl_list(&self) -> &'a [&'a PtDeclHead<'a>] {
        self.decl_list
    }

    pub fn item_num(&self) -> usize {
        self.item_list.len()
    }

    pub fn item(&self, i: usize) -> Option<&'a PtItem<'a>> {
        self.item_list.get(i).copied()
    }

    /// §3.4/§8: every external port name appears at most once.
    pub fn has_unique_port_names(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.port_list.iter().all(|p| seen.insert(p.external_name()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpPrimType {
    Combinational,
    Sequential,
}

/// One symbol in a UDP table row: `0`, `1`, `x`, or a 2-char edge symbol
/// like `01`, `(01)`, `r`, `f`, `p`, `n`, `*`, `b`, `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpSymbol<'a>(&'a str);

impl<'a> UdpSymbol<'a> {
    pub fn new(s: &'a str) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_edge(&self) -> bool {
        self.0.len() > 1
    }
}

/// One row of a UDP truth table: an input-value per input port, an
/// optional current-state value (sequential UDPs only), and an output
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtUdpEntry<'a> {
    region: FileRegion,
    inputs: &'a [UdpSymbol<'a>],
    current_state: Option<UdpSymbol<'a>>,
    output: UdpSymbol<'a>,
}

impl<'a> PtUdpEntry<'a> {
    pub fn new(region: FileRegion, inputs: &'a [UdpSymbol<'a>], current_state: Option<UdpSymbol<'a>>, output: UdpSymbol<'a>) -> Self {
        Self {
            region,
            inputs,
            current_state,
            output,
        }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn inputs(&self) -> &'a [UdpSymbol<'a>] {
        self.inputs
    }

    pub fn current_state(&self) -> Option<UdpSymbol<'a>> {
        self.current_state
    }

    pub fn output(&self) -> UdpSymbol<'a> {
        self.output
    }
}

/// A `primitive` ... `endprimitive` user-defined primitive design unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtUdp<'a> {
    region: FileRegion,
    name: &'a str,
    prim_type: UdpPrimType,
    port_list: &'a [&'a str],
    io_list: &'a [&'a PtIOHead<'a>],
    init_value: Option<&'a PtExpr<'a>>,
    table: &'a [PtUdpEntry<'a>],
}

impl<'a> PtUdp<'a> {
    pub fn new(
        region: FileRegion,
        name: &'a str,
        prim_type: UdpPrimType,
        port_list: &'a [&'a str],
        io_list: &'a [&'a PtIOHead<'a>],
        init_value: Option<&'a PtExpr<'a>>,
        table: &'a [PtUdpEntry<'a>],
    ) -> Self {
        Self {
            region,
            name,
            prim_type,
            port_list,
            io_list,
            init_value,
            table,
        }
    }

    pub fn region(&self) -> FileRegion {
        self.region
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn prim_type(&self) -> UdpPrimType {
        self.prim_type
    }

    pub fn port_list(&self) -> &'a [&'a str] {
        self.port_list
    }

    pub fn io_list(&self) -> &'a [&'a PtIOHead<'a>] {
        self.io_list
    }

    pub fn init_value(&self) -> Option<&'a PtExpr<'a>> {
        self.init_value
    }

    pub fn table(&self) -> &'a [PtUdpEntry<'a>] {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;

    #[test]
    fn unique_port_names_pass() {
        let region = FileRegion::at(Position::new());
        let ports = [
            PtPort::new(region, "a", None, &[]),
            PtPort::new(region, "b", None, &[]),
        ];
        let m = PtModule::new(
            region, "m", false, false, false, None, None, DefaultNetType::Wire, DelayMode::None, true, None, None, None, &[], &ports, &[], &[], &[],
        );
        assert!(m.has_unique_port_names());
    }

    #[test]
    fn duplicate_port_names_fail() {
        let region = FileRegion::at(Position::new());
        let ports = [
            PtPort::new(region, "a", None, &[]),
            PtPort::new(region, "a", None, &[]),
        ];
        let m = PtModule::new(
            region, "m", false, false, false, None, None, DefaultNetType::Wire, DelayMode::None, true, None, None, None, &[], &ports, &[], &[], &[],
        );
        assert!(!m.has_unique_port_names());
    }
}
