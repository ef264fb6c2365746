//! Tokenizer & Grammar Driver (C6, driver half), §4.6.
//!
//! `parse_source` is the crate's single entry point for turning Verilog
//! source text into registered [`crate::ast::PtModule`]/[`crate::ast::PtUdp`]
//! trees: run the tokenizer (C6's lexer half, `token/`), hand the resulting
//! [`TokenStream`] to the top-level design-unit dispatch loop, and let each
//! submodule build its slice of the tree through a shared [`crate::factory::PtFactory`].
//!
//! Grammar productions are free functions rather than methods on a combined
//! driver struct, each taking its own `(ts, factory, state, sink)` — the
//! teacher's own parse routines (e.g. `Module::from_tokens`) are likewise
//! free-standing, consuming a token cursor and returning a symbol; splitting
//! by production here avoids simultaneous-borrow conflicts between
//! driver-owned working state and the caller-supplied `&mut dyn MsgMgr`.

mod decl;
mod expr;
mod generate;
mod inst;
mod misc;
mod module;
mod port;
mod stmt;
mod udp;

use crate::config::ParserConfig;
use crate::lexer::{Position, Token, Tokenize};
use crate::manager::{Category, MsgMgr, PtManager, Severity};
use crate::region::FileRegion;
use crate::token::{Keyword, Lexeme, Operator, VerilogTokenizer};

/// A keyword set a recovery pass stops in front of without consuming:
/// every `end*` closing keyword in the grammar, so recovery never eats past
/// the boundary of the construct currently failing.
const BLOCK_ENDERS: &[Keyword] = &[
    Keyword::End,
    Keyword::Endmodule,
    Keyword::Endfunction,
    Keyword::Endtask,
    Keyword::Endcase,
    Keyword::Endgenerate,
    Keyword::Endprimitive,
    Keyword::Endtable,
    Keyword::Endspecify,
    Keyword::Endconfig,
];

/// Random-access cursor over a fully-scanned token list. Not a literal
/// `Peekable` iterator: the grammar routinely needs multi-token lookahead
/// (e.g. telling a continuous assignment, a module instantiation, and a
/// task enable apart by the second or third token) that fights Rust's
/// iterator-adapter ownership rules when modeled as nested `Peekable`s.
pub struct TokenStream {
    tokens: Vec<Token<Lexeme>>,
    pos: usize,
    last_pos: Position,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token<Lexeme>>) -> Self {
        Self {
            tokens,
            pos: 0,
            last_pos: Position::new(),
        }
    }

    pub fn peek(&self) -> &Lexeme {
        self.peek_at(0)
    }

    pub fn peek_at(&self, n: usize) -> &Lexeme {
        static EOF: Lexeme = Lexeme::Eof;
        self.tokens.get(self.pos + n).map(Token::as_type).unwrap_or(&EOF)
    }

    pub fn position(&self) -> Position {
        self.tokens.get(self.pos).map(|t| *t.locate()).unwrap_or(self.last_pos)
    }

    /// A zero-width region at the cursor's current position, for
    /// diagnostics that have no constructed node to anchor to yet.
    pub fn region_here(&self) -> FileRegion {
        FileRegion::at(self.position())
    }

    /// The region spanning from `start` through the last token consumed by
    /// `advance`. Call after parsing a production to build its node region.
    pub fn region_since(&self, start: Position) -> FileRegion {
        FileRegion::new(start, self.last_pos)
    }

    pub fn is_eof(&self) -> bool {
        self.peek().is_eof()
    }

    pub fn advance(&mut self) -> Lexeme {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                self.last_pos = *tok.locate();
                self.pos += 1;
                tok.as_type().clone()
            }
            None => Lexeme::Eof,
        }
    }

    pub fn check_keyword(&self, kw: Keyword) -> bool {
        self.peek().check_keyword(&kw)
    }

    pub fn check_operator(&self, op: Operator) -> bool {
        self.peek().check_delimiter(&op)
    }

    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_operator(&mut self, op: Operator) -> bool {
        if self.check_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect_keyword(&mut self, kw: Keyword, sink: &mut dyn MsgMgr) -> bool {
        if self.eat_keyword(kw) {
            true
        } else {
            sink.put_msg(
                Severity::Error,
                Category::Pars,
                self.region_here(),
                format!("expected `{}`, found `{}`", kw, self.peek()),
            );
            false
        }
    }

    pub fn expect_operator(&mut self, op: Operator, sink: &mut dyn MsgMgr) -> bool {
        if self.eat_operator(op) {
            true
        } else {
            sink.put_msg(
                Severity::Error,
                Category::Pars,
                self.region_here(),
                format!("expected `{}`, found `{}`", op, self.peek()),
            );
            false
        }
    }

    /// Consumes a plain or escaped/system identifier's text, if the current
    /// token is one; advances past it. Returns `None` without consuming
    /// anything otherwise.
    pub fn take_identifier(&mut self) -> Option<String> {
        match self.peek() {
            Lexeme::Identifier(id) => {
                let s = id.as_str().to_string();
                self.advance();
                Some(s)
            }
            _ => None,
        }
    }

    pub fn check_identifier(&self) -> bool {
        matches!(self.peek(), Lexeme::Identifier(_))
    }

    /// Skips tokens until a `;` (consumed) or one of [`BLOCK_ENDERS`] (left
    /// unconsumed, so the enclosing construct's own `end*` match succeeds)
    /// or EOF. Used after a syntax error to resynchronize the cursor on the
    /// next recognizable boundary rather than aborting the whole parse (§7).
    pub fn recover_to_boundary(&mut self) {
        loop {
            if self.is_eof() {
                return;
            }
            if self.eat_operator(Operator::Terminator) {
                return;
            }
            if BLOCK_ENDERS.iter().any(|kw| self.check_keyword(*kw)) {
                return;
            }
            self.advance();
        }
    }
}

/// Reads `text` through the tokenizer, forwarding scan errors to `sink`,
/// then drives the grammar over the resulting token stream, registering
/// every module/primitive it completes with `manager` (§4.6/§4.7).
pub fn parse_source(manager: &mut PtManager, text: &str, config: &ParserConfig, sink: &mut dyn MsgMgr) {
    let tokenizer = VerilogTokenizer::from_source_code(text);
    for err in tokenizer.errors() {
        sink.put_msg(Severity::Error, Category::VlParser, FileRegion::at(*err.position()), err.error().to_string());
    }
    let tokens = tokenizer.into_tokens();
    let mut ts = TokenStream::new(tokens);

    // `` `celldefine``/`` `default_nettype``/`` `timescale`` persist across
    // design units within one file until countermanded or `` `resetall``,
    // so one compilation-unit-scoped state is threaded through every
    // iteration rather than rebuilt per unit.
    let mut dstate = module::DirectiveState::default();
    while !ts.is_eof() {
        module::parse_design_unit(&mut ts, manager, config, sink, &mut dstate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::manager::VecMsgMgr;

    #[test]
    fn parses_minimal_module_with_ports() {
        let text = "module top(a, b, c);\ninput a;\ninput b;\noutput c;\nendmodule\n";
        let arena = crate::arena::Arena::new();
        let mut mgr = PtManager::new(&arena);
        let mut sink = VecMsgMgr::new();
        parse_source(&mut mgr, text, &ParserConfig::default(), &mut sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(mgr.module_num(), 1);
        let m = mgr.module("top").unwrap();
        assert_eq!(m.port_list().len(), 3);
        assert_eq!(m.iohead_num(), 3);
    }

    #[test]
    fn recovers_after_malformed_module_and_keeps_parsing() {
        let text = "module broken(a b c\nendmodule\nmodule good(x);\ninput x;\nendmodule\n";
        let arena = crate::arena::Arena::new();
        let mut mgr = PtManager::new(&arena);
        let mut sink = VecMsgMgr::new();
        parse_source(&mut mgr, text, &ParserConfig::default(), &mut sink);
        assert!(mgr.module("good").is_some());
    }
}
