//! The character-to-lexeme scanner (C6, Tokenizer half).

use super::error::LexError;
use super::token::Lexeme;
use crate::lexer;
use crate::lexer::{Token, TokenError, Tokenize, TrainCar};
use std::str::FromStr;

pub mod char_set {
    pub const DOUBLE_QUOTE: char = '\"';
    pub const STAR: char = '*';
    pub const FWD_SLASH: char = '/';
    pub const SINGLE_QUOTE: char = '\'';
    pub const PLUS: char = '+';
    pub const MINUS: char = '-';
    pub const UNDER_SCORE: char = '_';
    pub const DOLLAR_SIGN: char = '$';
    pub const GRAVE_ACCENT: char = '`';
    pub const BIG_E: char = 'E';
    pub const LIL_E: char = 'e';
    pub const ESC: char = '\\';
    pub const DOT: char = '.';

    /// Set: `abcdefghijklmnopqrstuvwxyz` plus the Latin-1 lower-case range.
    pub fn is_lower(c: &char) -> bool {
        match c {
            '\u{00F7}' => false, // division sign
            'a'..='z' | 'ß'..='ÿ' => true,
            _ => false,
        }
    }

    /// Set: `ABCDEFGHIJKLMNOPQRSTUVWXYZ` plus the Latin-1 upper-case range.
    pub fn is_upper(c: &char) -> bool {
        match c {
            '\u{00D7}' => false, // multiplication sign
            'A'..='Z' | 'À'..='Þ' => true,
            _ => false,
        }
    }

    pub fn is_letter(c: &char) -> bool {
        is_lower(c) || is_upper(c)
    }

    pub fn is_newline(c: &char) -> bool {
        c == &'\n'
    }

    pub fn is_letter_or_digit_or_underscore(c: &char) -> bool {
        is_digit(c) || is_letter(c) || c == &UNDER_SCORE
    }

    pub fn is_digit_or_underscore(c: &char) -> bool {
        is_digit(c) || c == &UNDER_SCORE
    }

    /// The set `[a-z][A-Z][0-9][_][$]` allowed in identifiers after the
    /// initial letter is captured.
    pub fn is_identifier_character(c: &char) -> bool {
        matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$')
    }

    pub fn is_digit(c: &char) -> bool {
        matches!(c, '0'..='9')
    }

    pub fn is_hex(c: &char) -> bool {
        matches!(c, 'a'..='f' | 'A'..='F')
    }

    pub fn is_digit_or_underscore_or_signal_char(c: &char) -> bool {
        is_digit(c) || is_hex(c) || c == &UNDER_SCORE || matches!(c, 'x' | 'X' | 'z' | 'Z' | '?')
    }

    /// IEEE 1364-2001 §2.2: white space is spaces, tabs, newlines, formfeeds.
    pub fn is_whitespace(c: &char) -> bool {
        c == &'\u{0020}' || c == &'\u{00A0}' ||
        c == &'\u{0009}' || c == &'\u{000B}' || c == &'\u{000D}' || c == &'\u{000A}'
    }

    pub fn is_not_whitespace(c: &char) -> bool {
        !is_whitespace(c)
    }
}

#[derive(Debug, PartialEq)]
struct VerilogElement(Result<Token<Lexeme>, TokenError<LexError>>);

#[derive(PartialEq)]
pub struct VerilogTokenizer {
    tokens: Vec<VerilogElement>,
}

impl Tokenize for VerilogTokenizer {
    type TokenType = Lexeme;
    type Err = LexError;

    fn tokenize(s: &str) -> Vec<Result<Token<Self::TokenType>, TokenError<Self::Err>>> {
        let mut train = TrainCar::new(s.chars());
        let mut tokens: Vec<Result<Token<Self::TokenType>, TokenError<Self::Err>>> = Vec::new();
        while let Some(c) = train.consume() {
            if char_set::is_whitespace(&c) {
                continue;
            }
            let tk_loc = *train.locate();
            let next = train.peek();
            tokens.push(
                if char_set::is_letter(&c) || char_set::UNDER_SCORE == c {
                    match Self::TokenType::consume_word(&mut train, c) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::ESC == c {
                    match Self::TokenType::consume_escaped_identifier(&mut train) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::DOUBLE_QUOTE == c {
                    match Self::TokenType::consume_str_literal(&mut train) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::is_digit(&c)
                    || char_set::SINGLE_QUOTE == c
                    || ((char_set::PLUS == c || char_set::MINUS == c)
                        && next.is_some_and(|d| char_set::is_digit(d)))
                {
                    match Self::TokenType::consume_number(&mut train, c) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::FWD_SLASH == c && next.is_some_and(|d| d == &char_set::FWD_SLASH) {
                    match Self::TokenType::consume_oneline_comment(&mut train) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::FWD_SLASH == c && next.is_some_and(|f| f == &char_set::STAR) {
                    match Self::TokenType::consume_block_comment(&mut train) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::DOLLAR_SIGN == c {
                    match Self::TokenType::consume_word(&mut train, c) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else if char_set::GRAVE_ACCENT == c {
                    match Self::TokenType::consume_compiler_directive(&mut train) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                } else {
                    match Self::TokenType::consume_operator(&mut train, Some(c)) {
                        Ok(tk) => Ok(Token::new(tk, tk_loc)),
                        Err(e) => Err(TokenError::new(e, *train.locate())),
                    }
                },
            );
        }
        let mut tk_loc = *train.locate();
        tk_loc.next_col();
        tokens.push(Ok(Token::new(Lexeme::Eof, tk_loc)));
        tokens
    }
}

impl FromStr for VerilogTokenizer {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_source_code(s))
    }
}

impl VerilogTokenizer {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn from_source_code(s: &str) -> Self {
        Self {
            tokens: Self::tokenize(s).into_iter().map(VerilogElement).collect(),
        }
    }

    /// Transforms the scan results into a token list, silently dropping
    /// errors and comments. To keep comments, see [`Self::into_tokens_all`].
    pub fn into_tokens(self) -> Vec<Token<Lexeme>> {
        self.tokens
            .into_iter()
            .filter_map(|f| match f.0 {
                Ok(t) => match t.as_ref() {
                    Lexeme::Comment(_) => None,
                    _ => Some(t),
                },
                Err(_) => None,
            })
            .collect()
    }

    /// Transforms the scan results into a token list, keeping comments but
    /// silently dropping errors.
    pub fn into_tokens_all(self) -> Vec<Token<Lexeme>> {
        self.tokens
            .into_iter()
            .filter_map(|f| f.0.ok())
            .collect()
    }

    pub fn as_tokens_all(&self) -> Vec<&Token<Lexeme>> {
        self.tokens.iter().filter_map(|f| f.0.as_ref().ok()).collect()
    }

    /// Collects every scan error encountered, in source order.
    pub fn errors(&self) -> Vec<&TokenError<LexError>> {
        self.tokens.iter().filter_map(|f| f.0.as_ref().err()).collect()
    }
}

impl Default for VerilogTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VerilogTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for tk in &self.tokens {
            match &tk.0 {
                Ok(t) => writeln!(f, "{}\t{:?}", t.locate(), t)?,
                Err(e) => writeln!(f, "{}\t{:?}", e.position(), e)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::keyword::Keyword;
    use super::*;
    use lexer::TokenError;

    #[test]
    fn tokenizes_a_small_module() {
        let s = r#"// This is a comment on one line.
module toplevel(clock,reset);
    input clock;
    input reset;


    `define integer HELLO = 1;

    reg flop1;
    reg flop2;
    /*
    Block   comment!! // Wooo!!
    */
    always @(posedge reset or posedge clock) begin
        if (reset) begin
            flop1 <= 1;
            flop2 <= 0;
            $display("hello world! %d", `HELLO);
        end
        else begin
            flop1 <= flop2;
            flop2 <= flop1;
        end
    end
endmodule"#;
        let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize(s)
            .into_iter()
            .map(|f| f.unwrap())
            .collect();
        assert_eq!(73, tokens.len());
    }

    #[test]
    fn based_constants_are_valid() {
        let valid_cases = vec![
            "'h 837FF;",
            "'o7460;",
            "16'hz;",
            "16'sd?;",
            "-4 'sd15;",
            "4 'shf;",
            "-8 'd 6;",
            "16'b0011_0101_0001_1111;",
        ];
        for s in valid_cases {
            let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .map(|f| f.unwrap())
                .collect();
            assert_eq!(tokens.len(), 3);
        }
    }

    #[test]
    fn malformed_based_constants_are_rejected() {
        let invalid_cases = vec!["4af;", "8 'd -6;"];
        for s in invalid_cases {
            let errors: Vec<TokenError<LexError>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .filter_map(|f| f.err())
                .collect();
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn real_constants_are_valid() {
        let valid_cases = vec![
            "1.2;",
            "0.1;",
            "2394.26331;",
            "1.2E12;",
            "1.30e-2;",
            "0.1e-0;",
            "23E10;",
            "29E-2;",
            "236.123_763_e-12;",
        ];
        for s in valid_cases {
            let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .map(|f| f.unwrap())
                .collect();
            assert_eq!(tokens.len(), 3);
        }
    }

    #[test]
    fn malformed_real_constants_are_rejected() {
        let invalid_cases = vec!["9.;", "4.E3;"];
        for s in invalid_cases {
            let errors: Vec<TokenError<LexError>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .filter_map(|f| f.err())
                .collect();
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn identifiers_are_valid() {
        let valid_cases = vec![
            "hello",
            "\\cpu3",
            "Module",
            "v$ar_a",
            "var23_g",
            "MY_ID",
            "_unused_port",
        ];
        for s in valid_cases {
            let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .map(|f| f.unwrap())
                .collect();
            assert_eq!(tokens.len(), 2);
        }
    }

    #[test]
    fn string_literals_are_valid() {
        let valid_cases = vec![r#""hello world!");"#, r#""\"hello world!\"");"#];
        for s in valid_cases {
            let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .map(|f| f.unwrap())
                .collect();
            assert_eq!(tokens.len(), 4);
        }
    }

    #[test]
    fn compiler_directives_are_valid() {
        let valid_cases = vec!["`timescale 1ns/1ps", "`MY_MACRO <= 2;"];
        for s in valid_cases {
            let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize(s)
                .into_iter()
                .map(|f| f.unwrap())
                .collect();
            assert_eq!(tokens.len(), 5);
        }
    }

    #[test]
    fn module_keyword_is_recognized() {
        let tokens: Vec<Token<Lexeme>> = VerilogTokenizer::tokenize("module")
            .into_iter()
            .map(|f| f.unwrap())
            .collect();
        assert_eq!(tokens[0].as_type(), &Lexeme::Keyword(Keyword::Module));
    }
}
