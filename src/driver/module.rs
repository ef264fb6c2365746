//! Design-unit driver (C6, "module"/"primitive" entry), §3.2 "Module"/§4.6.
//!
//! `parse_design_unit` is what `super::parse_source`'s top-level loop calls
//! once per iteration: compiler directives and attribute instances ahead of
//! a unit, the unit's own keyword (`module`/`macromodule`/`primitive`), and
//! everything up to the matching `end*`. `generate.rs` folds back into
//! [`parse_module_item`] for anything inside a generate region that isn't
//! itself a generate construct, so this file also owns the module-item
//! grammar shared between plain module bodies and generate regions.

use super::TokenStream;
use crate::assembly::AssemblyState;
use crate::ast::container::{DefaultNetType, DelayMode};
use crate::ast::decl::NetType;
use crate::ast::item::{FunctionReturnType, PtItem};
use crate::ast::misc::{PathEdge, PtAttrInst};
use crate::config::ParserConfig;
use crate::factory::compact::CompactFactory;
use crate::factory::PtFactory;
use crate::manager::{Category, MsgMgr, PtManager, Severity};
use crate::region::FileRegion;
use crate::token::{Keyword, Lexeme, Number, Operator};

/// File-scope compiler-directive state threaded across consecutive design
/// units by [`super::parse_source`]'s loop. `` `celldefine``/``
/// `default_nettype``/`` `timescale`` persist until countermanded or until
/// `` `resetall`` clears them, same as in an actual compilation unit; this
/// crate only tracks the directives that feed a [`crate::ast::container::PtModule`]
/// field; `` `include`` and search-path directives stay out of scope.
#[derive(Debug, Clone, Default)]
pub(crate) struct DirectiveState {
    cell_define: bool,
    default_net_type: Option<DefaultNetType>,
    time_unit: Option<String>,
    time_precision: Option<String>,
}

fn net_type_to_default(nt: NetType) -> Option<DefaultNetType> {
    Some(match nt {
        NetType::Wire => DefaultNetType::Wire,
        NetType::Tri => DefaultNetType::Tri,
        NetType::Tri0 => DefaultNetType::Tri0,
        NetType::Tri1 => DefaultNetType::Tri1,
        NetType::Wand => DefaultNetType::Wand,
        NetType::Wor => DefaultNetType::Wor,
        NetType::Trireg => DefaultNetType::Trireg,
        NetType::Uwire => DefaultNetType::Uwire,
        // `supply0`/`supply1`/`triand`/`trior` have no counterpart here; a
        // `` `default_nettype`` naming one of them is left as a no-op.
        NetType::Triand | NetType::Trior | NetType::Supply0 | NetType::Supply1 => return None,
    })
}

fn take_time_literal(ts: &mut TokenStream) -> Option<String> {
    match ts.peek().clone() {
        Lexeme::Number(n) => {
            ts.advance();
            Some(match n {
                Number::Decimal(t) | Number::Unbased(t) | Number::OnlyBase(t) | Number::Time(t) | Number::Based(t) | Number::Real(t) => t,
            })
        }
        Lexeme::Identifier(id) => {
            ts.advance();
            Some(id.as_str().to_string())
        }
        _ => None,
    }
}

/// Consumes every compiler directive and attribute instance ahead of the
/// next design unit, folding directive effects into `dstate`. Attribute
/// instances found here precede a design unit with no node of their own to
/// attach to in IEEE 1364's grammar, so (matching every other
/// `parse_attr_insts` call site outside this file) they are parsed only to
/// keep the cursor in sync and then dropped.
fn consume_directives_and_attrs<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, dstate: &mut DirectiveState, sink: &mut dyn MsgMgr) {
    loop {
        if ts.check_operator(Operator::AttrL) {
            let _ = super::misc::parse_attr_insts(ts, factory, sink);
            continue;
        }
        let name = match ts.peek() {
            Lexeme::Directive(name) => name.clone(),
            _ => break,
        };
        ts.advance();
        match name.as_str() {
            "celldefine" => dstate.cell_define = true,
            "endcelldefine" => dstate.cell_define = false,
            "resetall" => *dstate = DirectiveState::default(),
            "default_nettype" => match super::decl::take_net_type(ts) {
                Some(nt) => dstate.default_net_type = net_type_to_default(nt),
                None => match ts.take_identifier().as_deref() {
                    Some("none") => dstate.default_net_type = Some(DefaultNetType::None),
                    // `supply0`/`supply1`/`triand`/`trior` or an unrecognized
                    // spelling; left as a no-op, same as an unmapped `NetType`.
                    _ => {}
                },
            },
            "timescale" => {
                let unit = take_time_literal(ts);
                ts.expect_operator(Operator::Div, sink);
                let precision = take_time_literal(ts);
                dstate.time_unit = unit;
                dstate.time_precision = precision;
            }
            "unconnected_drive" => {
                if matches!(ts.peek(), Lexeme::Keyword(Keyword::Pull0) | Lexeme::Keyword(Keyword::Pull1)) {
                    ts.advance();
                }
            }
            "nounconnected_drive" => {}
            _ => sink.put_msg(Severity::Warning, Category::Pars, ts.region_here(), format!("unrecognized compiler directive `{}`", name)),
        }
    }
}

/// One design unit: a `module`/`macromodule` definition, a `primitive`
/// definition, or (if neither keyword is found after directives/attributes
/// are consumed) a malformed leading token that gets skipped so the loop in
/// `super::parse_source` can keep making progress. `dstate` carries
/// compiler-directive effects across the whole file, since `` `celldefine``
/// and friends outlive the design unit they precede.
pub fn parse_design_unit<'a>(ts: &mut TokenStream, manager: &mut PtManager<'a>, config: &ParserConfig, sink: &mut dyn MsgMgr, dstate: &mut DirectiveState) {
    let factory = CompactFactory::new(manager.arena());
    consume_directives_and_attrs(ts, &factory, dstate, sink);

    if ts.check_keyword(Keyword::Module) || ts.check_keyword(Keyword::Macromodule) {
        parse_module(ts, &factory, manager, config, sink, dstate);
        return;
    }
    if ts.check_keyword(Keyword::Primitive) {
        super::udp::parse_udp_definition(ts, &factory, manager, sink);
        return;
    }
    if ts.check_keyword(Keyword::Config) {
        skip_config_block(ts, sink);
        return;
    }
    if ts.is_eof() {
        return;
    }

    sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected `module`, `macromodule`, or `primitive`, found `{}`", ts.peek()));
    ts.recover_to_boundary();
}

/// Library-map `config ... endconfig` blocks describe which cell/library a
/// design references, not the modules themselves (IEEE 1364-2001 Annex J);
/// resolving them needs the search-path machinery this crate leaves out, so
/// a block is skipped wholesale rather than given its own node type.
fn skip_config_block(ts: &mut TokenStream, sink: &mut dyn MsgMgr) {
    ts.expect_keyword(Keyword::Config, sink);
    while !ts.check_keyword(Keyword::Endconfig) && !ts.is_eof() {
        ts.advance();
    }
    ts.expect_keyword(Keyword::Endconfig, sink);
}

/// `parameter_declaration {, parameter_declaration}` inside a module's
/// `#( ... )` header. This can't reuse [`super::decl::parse_declaration`]
/// as-is: that production ends on a `;`, while a parameter-port list ends
/// on the closing `)` and separates entries with `,` (an entry can itself
/// introduce a fresh `parameter` keyword, or continue the previous type
/// under a shared one).
fn parse_param_port_list<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    if ts.check_operator(Operator::ParenR) {
        return;
    }
    loop {
        let head_start = ts.position();
        ts.eat_keyword(Keyword::Parameter);
        let is_signed = ts.eat_keyword(Keyword::Signed);
        let range = super::misc::parse_range(ts, factory, sink);
        let head = factory.new_decl_head(ts.region_since(head_start), crate::ast::decl::DeclHeadType::Parameter, is_signed, range, None, None);

        loop {
            let item_start = ts.position();
            let name = ts.take_identifier().unwrap_or_default();
            let name = factory.arena().alloc_str(&name);
            ts.expect_operator(Operator::BlockAssign, sink);
            let init = Some(super::expr::parse_expr(ts, factory, sink));
            state.add_decl_item(factory.new_decl_item(ts.region_since(item_start), name, init, Vec::new()));
            if ts.check_keyword(Keyword::Parameter) || !ts.eat_operator(Operator::Comma) {
                break;
            }
        }
        state.add_param_port_head(head);
        state.flush_paramport(factory.arena());

        if !ts.check_keyword(Keyword::Parameter) {
            break;
        }
    }
}

/// `module`/`macromodule` name `[#(param_port_list)] [port_list] ;
/// {module_item} endmodule`.
fn parse_module<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, manager: &mut PtManager<'a>, config: &ParserConfig, sink: &mut dyn MsgMgr, dstate: &DirectiveState) {
    let start = ts.position();
    let is_macromodule = ts.eat_keyword(Keyword::Macromodule);
    if !is_macromodule {
        ts.expect_keyword(Keyword::Module, sink);
    }
    let name = ts.take_identifier().unwrap_or_default();
    let name = factory.arena().alloc_str(&name);

    let mut state = AssemblyState::new();

    if ts.eat_operator(Operator::Pound) {
        ts.expect_operator(Operator::ParenL, sink);
        parse_param_port_list(ts, factory, &mut state, sink);
        ts.expect_operator(Operator::ParenR, sink);
    }
    let param_port_list = state.take_param_port_heads();

    let explicit_port_names = super::port::parse_port_list(ts, factory, &mut state, sink);
    ts.expect_operator(Operator::Terminator, sink);

    while !ts.check_keyword(Keyword::Endmodule) && !ts.is_eof() {
        parse_module_item(ts, factory, &mut state, sink, manager);
    }
    ts.expect_keyword(Keyword::Endmodule, sink);

    let port_list = state.take_port_list();
    let io_head_list = state.take_module_io_heads();
    let decl_list = state.take_decl_heads();
    let item_list = state.take_items();

    let time_unit = dstate.time_unit.as_deref().map(|s| factory.arena().alloc_str(s) as &str);
    let time_precision = dstate.time_precision.as_deref().map(|s| factory.arena().alloc_str(s) as &str);
    let default_net_type = dstate.default_net_type.unwrap_or(DefaultNetType::Wire);
    let _ = config;

    let module = factory.new_module(
        ts.region_since(start),
        name,
        is_macromodule,
        false,
        dstate.cell_define,
        time_unit,
        time_precision,
        default_net_type,
        DelayMode::None,
        explicit_port_names,
        None,
        None,
        None,
        param_port_list,
        port_list,
        io_head_list,
        decl_list,
        item_list,
    );
    // §7: a structural error (duplicate port, illegal function-body
    // statement, ...) "inhibits construction of the enclosing container" —
    // count errors `check_module` raises for *this* module and skip
    // registration rather than exposing a known-invalid tree (§8 scenario
    // 3, 6).
    let mut counting = crate::manager::CountingMsgMgr::new(sink);
    crate::validators::check_module(module, &mut counting);
    if !counting.has_errors() {
        manager.register_module(module);
    }
}

/// One module item, shared between a plain module body and a generate
/// region's body (`generate.rs` falls through to this for anything that
/// isn't itself a conditional/iterative generate construct).
pub fn parse_module_item<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr, manager: &PtManager<'a>) {
    let attrs = super::misc::parse_attr_insts(ts, factory, sink);

    if super::decl::starts_declaration(ts) || super::decl::starts_io(ts) {
        super::decl::parse_any_declaration(ts, factory, state, sink);
        return;
    }
    if ts.check_keyword(Keyword::Defparam) {
        super::inst::parse_defparam(ts, factory, state, sink);
        return;
    }
    if ts.check_keyword(Keyword::Assign) {
        super::inst::parse_cont_assign(ts, factory, state, sink);
        return;
    }
    if ts.check_keyword(Keyword::Initial) {
        let start = ts.position();
        ts.advance();
        let body = super::stmt::parse_statement(ts, factory, state, sink);
        let item = factory.new_item_initial(ts.region_since(start), body);
        attach_attrs(manager, item.file_region(), attrs);
        state.add_item(item);
        return;
    }
    if ts.check_keyword(Keyword::Always) {
        let start = ts.position();
        ts.advance();
        let body = super::stmt::parse_statement(ts, factory, state, sink);
        let item = factory.new_item_always(ts.region_since(start), body);
        attach_attrs(manager, item.file_region(), attrs);
        state.add_item(item);
        return;
    }
    if ts.check_keyword(Keyword::Task) {
        let item = parse_task(ts, factory, state, sink);
        attach_attrs(manager, item.file_region(), attrs);
        state.add_item(item);
        return;
    }
    if ts.check_keyword(Keyword::Function) {
        let item = parse_function(ts, factory, state, sink);
        attach_attrs(manager, item.file_region(), attrs);
        state.add_item(item);
        return;
    }
    if ts.check_keyword(Keyword::Generate) {
        super::generate::parse_generate_region(ts, factory, state, sink, manager);
        return;
    }
    if ts.check_keyword(Keyword::Specify) {
        parse_specify_block(ts, factory, state, sink);
        return;
    }
    if super::inst::starts_gate_instance(ts) {
        super::inst::parse_gate_instance(ts, factory, state, sink);
        return;
    }
    if ts.check_identifier() {
        super::inst::parse_module_instance(ts, factory, state, sink, manager);
        return;
    }

    sink.put_msg(Severity::Error, Category::Pars, ts.region_here(), format!("expected a module item, found `{}`", ts.peek()));
    ts.recover_to_boundary();
}

fn attach_attrs<'a>(manager: &PtManager<'a>, region: FileRegion, attrs: Vec<PtAttrInst<'a>>) {
    for attr in attrs {
        manager.reg_attrinst(region, attr);
    }
}

/// `task [automatic] name ; {io_declaration|declaration} statement
/// endtask`.
fn parse_task<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) -> &'a PtItem<'a> {
    let start = ts.position();
    ts.expect_keyword(Keyword::Task, sink);
    let is_automatic = ts.eat_keyword(Keyword::Automatic);
    let name = ts.take_identifier().unwrap_or_default();
    let name = factory.arena().alloc_str(&name);
    ts.expect_operator(Operator::Terminator, sink);

    let (io_list, decl_list, body) = parse_subroutine_body(ts, factory, state, sink, Keyword::Endtask);

    factory.new_item_task(ts.region_since(start), name, is_automatic, io_list, decl_list, body)
}

/// `function [automatic] [return_type] name ; {io_declaration|declaration}
/// statement endfunction`.
fn parse_function<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) -> &'a PtItem<'a> {
    let start = ts.position();
    ts.expect_keyword(Keyword::Function, sink);
    let is_automatic = ts.eat_keyword(Keyword::Automatic);
    let (return_type, return_range) = parse_function_return_type(ts, factory, sink);
    let name = ts.take_identifier().unwrap_or_default();
    let name = factory.arena().alloc_str(&name);
    ts.expect_operator(Operator::Terminator, sink);

    let (io_list, decl_list, body) = parse_subroutine_body(ts, factory, state, sink, Keyword::Endfunction);
    crate::validators::check_function_body(body, sink);

    factory.new_item_function(ts.region_since(start), name, is_automatic, return_type, return_range, io_list, decl_list, body)
}

/// The header/body shape a task and a function definition share: the
/// IO/declaration section under task/function header scope, then one
/// statement (almost always a `begin...end` block) as the body, then the
/// closing keyword.
fn parse_subroutine_body<'a, F: PtFactory<'a>>(
    ts: &mut TokenStream,
    factory: &F,
    state: &mut AssemblyState<'a>,
    sink: &mut dyn MsgMgr,
    closer: Keyword,
) -> (Vec<&'a crate::ast::io::PtIOHead<'a>>, Vec<&'a crate::ast::decl::PtDeclHead<'a>>, &'a crate::ast::stmt::PtStmt<'a>) {
    state.enter_task_function_headers();
    state.push_scope();
    while super::decl::starts_declaration(ts) || super::decl::starts_io(ts) {
        super::decl::parse_any_declaration(ts, factory, state, sink);
    }
    let io_list = state.take_taskfunc_io_heads();
    state.exit_task_function_headers();
    let decl_list = state.take_decl_heads();

    let body = super::stmt::parse_statement(ts, factory, state, sink);
    ts.expect_keyword(closer, sink);
    let _ = state.pop_scope();

    (io_list, decl_list, body)
}

fn parse_function_return_type<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, sink: &mut dyn MsgMgr) -> (FunctionReturnType, Option<&'a crate::ast::misc::PtRange<'a>>) {
    if ts.eat_keyword(Keyword::Integer) {
        return (FunctionReturnType::Integer, None);
    }
    if ts.eat_keyword(Keyword::Real) {
        return (FunctionReturnType::Real, None);
    }
    if ts.eat_keyword(Keyword::Realtime) {
        return (FunctionReturnType::Realtime, None);
    }
    if ts.eat_keyword(Keyword::Time) {
        return (FunctionReturnType::Time, None);
    }
    let _is_signed = ts.eat_keyword(Keyword::Signed);
    match super::misc::parse_range(ts, factory, sink) {
        Some(r) => (FunctionReturnType::Sized, Some(factory.arena().alloc(r))),
        None => (FunctionReturnType::Untyped, None),
    }
}

/// A simplified subset of `specify ... endspecify`: zero or more simple
/// path declarations (`(input_list [polarity] -> output_list) = delay;`,
/// accepting `->` where IEEE 1364 spells the simple-path operator `=>`
/// since the tokenizer has no dedicated token for it) plus, for anything
/// else a specify block can hold
/// (`$setup`/`$hold`/timing-check system tasks, `specparam` inside the
/// block, pulse-control assignments), one opaque [`PtItem::SpecifyItem`]
/// per statement, carrying its source text verbatim rather than a
/// structured node — the validation and cross-referencing those forms feed
/// is elaboration's job, outside what this crate's node taxonomy models.
fn parse_specify_block<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    ts.expect_keyword(Keyword::Specify, sink);
    while !ts.check_keyword(Keyword::Endspecify) && !ts.is_eof() {
        if ts.check_operator(Operator::ParenL) {
            parse_specify_path(ts, factory, state, sink);
        } else {
            parse_specify_opaque_item(ts, factory, state, sink);
        }
    }
    ts.expect_keyword(Keyword::Endspecify, sink);
}

fn parse_name_list(ts: &mut TokenStream) -> Vec<String> {
    let mut names = Vec::new();
    loop {
        match ts.take_identifier() {
            Some(n) => names.push(n),
            None => break,
        }
        if !ts.eat_operator(Operator::Comma) {
            break;
        }
    }
    names
}

fn parse_specify_path<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    ts.expect_operator(Operator::ParenL, sink);
    let edge = if ts.eat_keyword(Keyword::Posedge) {
        PathEdge::Posedge
    } else if ts.eat_keyword(Keyword::Negedge) {
        PathEdge::Negedge
    } else {
        PathEdge::None
    };
    let inputs = parse_name_list(ts);
    // Full connection (`*>`) has no dedicated token; it tokenizes as `Mult`
    // then `Gt`. The simplified path operator (`=>`) has no dedicated token
    // either and is accepted spelled as `->` instead.
    let is_full_connection = ts.eat_operator(Operator::Mult) && ts.eat_operator(Operator::Gt);
    if !is_full_connection {
        let _ = ts.eat_operator(Operator::ArrowR);
    }
    let outputs = parse_name_list(ts);
    ts.expect_operator(Operator::ParenR, sink);
    ts.expect_operator(Operator::BlockAssign, sink);
    let delay_start = ts.position();
    let values = if ts.eat_operator(Operator::ParenL) {
        let mut vs = vec![super::expr::parse_expr(ts, factory, sink)];
        while ts.eat_operator(Operator::Comma) {
            vs.push(super::expr::parse_expr(ts, factory, sink));
        }
        ts.expect_operator(Operator::ParenR, sink);
        vs
    } else {
        vec![super::expr::parse_expr(ts, factory, sink)]
    };
    ts.expect_operator(Operator::Terminator, sink);

    let inputs: Vec<&str> = inputs.iter().map(|n| factory.arena().alloc_str(n) as &str).collect();
    let outputs: Vec<&str> = outputs.iter().map(|n| factory.arena().alloc_str(n) as &str).collect();
    let delay = factory.new_path_delay(ts.region_since(delay_start), values);
    let decl = factory.new_path_decl(ts.region_since(start), edge, inputs, outputs, is_full_connection, delay);
    state.add_item(factory.new_item_specify_path(ts.region_since(start), decl));
}

fn parse_specify_opaque_item<'a, F: PtFactory<'a>>(ts: &mut TokenStream, factory: &F, state: &mut AssemblyState<'a>, sink: &mut dyn MsgMgr) {
    let start = ts.position();
    let mut text = String::new();
    while !ts.eat_operator(Operator::Terminator) {
        if ts.is_eof() || ts.check_keyword(Keyword::Endspecify) {
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&ts.advance().to_string());
    }
    let text = factory.arena().alloc_str(&text);
    state.add_item(factory.new_item_specify_item(ts.region_since(start), text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::manager::VecMsgMgr;
    use crate::token::VerilogTokenizer;

    fn run(src: &str) -> (PtManager<'static>, VecMsgMgr) {
        let arena = Box::leak(Box::new(Arena::new()));
        let mut mgr = PtManager::new(arena);
        let mut sink = VecMsgMgr::new();
        let tokens = VerilogTokenizer::from_source_code(src).into_tokens();
        let mut ts = TokenStream::new(tokens);
        let config = ParserConfig::default();
        let mut dstate = DirectiveState::default();
        while !ts.is_eof() {
            parse_design_unit(&mut ts, &mut mgr, &config, &mut sink, &mut dstate);
        }
        (mgr, sink)
    }

    #[test]
    fn parses_module_with_task_and_function() {
        let (mgr, sink) = run(
            "module m;\n\
             reg [7:0] acc;\n\
             task add;\n\
             input [7:0] x;\n\
             begin\n\
             acc = acc + x;\n\
             end\n\
             endtask\n\
             function [7:0] square;\n\
             input [7:0] x;\n\
             begin\n\
             square = x * x;\n\
             end\n\
             endfunction\n\
             endmodule\n",
        );
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let m = mgr.module("m").unwrap();
        assert_eq!(m.item_num(), 3);
    }

    #[test]
    fn parses_celldefine_and_timescale_directives() {
        let (mgr, sink) = run("`celldefine\n`timescale 1ns / 10ps\nmodule m;\nendmodule\n`endcelldefine\n");
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let m = mgr.module("m").unwrap();
        assert!(m.is_cell_define());
        assert_eq!(m.time_unit(), Some("1ns"));
        assert_eq!(m.time_precision(), Some("10ps"));
    }

    #[test]
    fn parses_default_nettype_directive() {
        let (mgr, sink) = run("`default_nettype tri\nmodule m;\nendmodule\n");
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let m = mgr.module("m").unwrap();
        assert_eq!(m.default_net_type(), DefaultNetType::Tri);
    }

    #[test]
    fn parses_generate_region_with_nested_instance() {
        let (mgr, sink) = run("module m;\ngenerate\nif (1) begin\nbuf u0(y, a);\nend\nendgenerate\nendmodule\n");
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let m = mgr.module("m").unwrap();
        assert_eq!(m.item_num(), 1);
    }

    #[test]
    fn parses_simplified_specify_path() {
        let (mgr, sink) = run("module m;\nspecify\n(a -> b) = 2;\nendspecify\nendmodule\n");
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let m = mgr.module("m").unwrap();
        assert_eq!(m.item_num(), 1);
    }

    #[test]
    fn parses_primitive_definition_as_a_design_unit() {
        let (mgr, sink) = run("primitive my_buf (y, a);\noutput y;\ninput a;\ntable\n0 : 0;\n1 : 1;\nendtable\nendprimitive\n");
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert!(mgr.udp("my_buf").is_some());
    }
}
