//! The scanned lexeme type produced by [`super::tokenizer::VerilogTokenizer`],
//! and the character-consumption routines that build each variant.

use super::error::LexError;
use super::identifier::Identifier;
use super::keyword::Keyword;
use super::number::Number;
use super::operator::Operator;
use super::tokenizer::char_set;
use crate::lexer::{Position, TrainCar};
use std::fmt::Display;

#[derive(Debug, PartialEq, Clone)]
pub enum Lexeme {
    Comment(Comment),
    Operator(Operator),
    Number(Number),
    Identifier(Identifier),
    Keyword(Keyword),
    StringLiteral(String),
    Directive(String),
    Eof,
}

impl Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Comment(c) => c.to_string(),
                Self::Operator(o) => o.to_string(),
                Self::Number(n) => n.to_string(),
                Self::Identifier(i) => i.to_string(),
                Self::Keyword(k) => k.to_string(),
                Self::StringLiteral(s) => s.to_string(),
                Self::Directive(d) => d.to_string(),
                Self::Eof => String::new(),
            }
        )
    }
}

impl Lexeme {
    pub fn check_keyword(&self, kw: &Keyword) -> bool {
        matches!(self, Self::Keyword(r) if r == kw)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    pub fn is_directive(&self) -> bool {
        matches!(self, Self::Directive(_))
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(num) => Some(num),
            _ => None,
        }
    }

    pub fn check_delimiter(&self, d: &Operator) -> bool {
        matches!(self, Self::Operator(r) if r == d)
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Self::Comment(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    pub fn take_identifier(self) -> Option<Identifier> {
        match self {
            Self::Identifier(i) => Some(i),
            _ => None,
        }
    }

    pub fn take_keyword(self) -> Option<Keyword> {
        match self {
            Self::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self {
            Self::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    pub fn as_delimiter(&self) -> Option<&Operator> {
        match self {
            Self::Operator(d) => Some(d),
            _ => None,
        }
    }
}

impl Lexeme {
    /// Walks through the stream to gather a literal until finding the
    /// exiting character `br`. An escape is allowed via `\` before `br`.
    fn consume_literal(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        br: &char,
    ) -> Result<String, LexError> {
        let mut result = String::new();
        while let Some(c) = train.consume() {
            if &c == &char_set::ESC {
                result.push(c);
                if let Some(d) = train.consume() {
                    result.push(d);
                } else {
                    return Err(LexError::UnclosedLiteral(*br));
                }
            } else if &c == br {
                break;
            } else {
                result.push(c);
            }
        }
        Ok(result)
    }

    fn match_delimiter(s: &str) -> Result<Self, LexError> {
        match Operator::transform(s) {
            Some(d) => Ok(Self::Operator(d)),
            None => Err(LexError::InvalidSequence(s.to_string())),
        }
    }

    /// Captures the generic pattern production rule `A ::= A { A }`, where
    /// membership in `A` is decided by `eval`. An empty result is legal.
    pub fn consume_value_pattern(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: Option<char>,
        eval: fn(&char) -> bool,
    ) -> Result<String, LexError> {
        let mut car = if let Some(c) = c0 {
            String::from(c)
        } else {
            String::new()
        };
        while let Some(c) = train.peek() {
            if eval(c) {
                car.push(train.consume().unwrap());
            } else {
                break;
            }
        }
        Ok(car)
    }

    /// Captures an exponent: `E [+] integer | E - integer`. Assumes `c0` (the
    /// letter `E`/`e`) was the last character consumed.
    fn consume_exponent(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<String, LexError> {
        let mut expon = String::from(c0);
        let sign = if let Some(c1) = train.consume() {
            if c1 != char_set::PLUS && c1 != char_set::MINUS && !char_set::is_digit(&c1) {
                return Err(LexError::InvalidExponChar(c1));
            } else {
                c1
            }
        } else {
            return Err(LexError::EmptyExponChar);
        };
        let c0 = if char_set::is_digit(&sign) {
            Some(sign)
        } else {
            expon.push(sign);
            None
        };
        let value = Self::consume_value_pattern(train, c0, char_set::is_digit_or_underscore)?;
        if value.is_empty() {
            Err(LexError::EmptyExponNumber)
        } else {
            expon.push_str(&value);
            Ok(expon)
        }
    }
}

impl Lexeme {
    /// Captures a keyword, basic identifier, or system identifier.
    /// Assumes `c0` was the last char consumed before this call.
    pub fn consume_word(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<Self, LexError> {
        let word = Self::consume_value_pattern(train, Some(c0), char_set::is_identifier_character)?;
        if c0 == char_set::UNDER_SCORE {
            Ok(Self::Identifier(Identifier::Basic(word)))
        } else if c0 == char_set::DOLLAR_SIGN {
            Ok(Self::Identifier(Identifier::System(word)))
        } else {
            match Keyword::match_keyword(&word) {
                Some(kw) => Ok(Self::Keyword(kw)),
                None => Ok(Self::Identifier(Identifier::Basic(word))),
            }
        }
    }

    /// Captures a compiler directive name. Assumes the grave accent was
    /// the last character consumed. A keyword/identifier must follow it
    /// immediately.
    pub fn consume_compiler_directive(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<Self, LexError> {
        let word = Self::consume_value_pattern(train, None, char_set::is_identifier_character)?;
        match word.as_ref() {
            "" => Err(LexError::EmptyCompilerDirective),
            _ => Ok(Self::Directive(word)),
        }
    }

    /// Captures an escaped identifier introduced by `\`. Collects characters
    /// until whitespace.
    pub fn consume_escaped_identifier(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<Self, LexError> {
        let word = Self::consume_value_pattern(train, None, char_set::is_not_whitespace)?;
        Ok(Self::Identifier(Identifier::Escaped(word)))
    }

    /// Captures a string literal. Assumes the opening `"` was the last char
    /// consumed.
    pub fn consume_str_literal(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<Self, LexError> {
        let value = Self::consume_literal(train, &char_set::DOUBLE_QUOTE)?;
        Ok(Lexeme::StringLiteral(value))
    }

    /// Collects a single-line comment. Assumes the opening `/` was the last
    /// char consumed and the next char is `/`.
    pub fn consume_oneline_comment(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<Self, LexError> {
        train.consume();
        let mut note = String::new();
        while let Some(c) = train.consume() {
            if c == '\u{000B}' || c == '\u{000D}' || c == '\u{000A}' {
                break;
            } else {
                note.push(c);
            }
        }
        Ok(Self::Comment(Comment::OneLine(note)))
    }

    /// Collects a block comment. Assumes the opening `/` was the last char
    /// consumed and the next char is `*`.
    pub fn consume_block_comment(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<Self, LexError> {
        train.consume();
        let mut note = String::new();
        while let Some(c) = train.consume() {
            if c == char_set::STAR {
                if let Some(c_next) = train.peek() {
                    if c_next == &char_set::FWD_SLASH {
                        train.consume();
                        return Ok(Self::Comment(Comment::Block(note)));
                    }
                }
            }
            note.push(c);
        }
        Err(LexError::UnclosedBlockComment)
    }

    /// Walks through the possible interpretations to capture a delimiter.
    pub fn consume_operator(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: Option<char>,
    ) -> Result<Self, LexError> {
        let mut op_buf = String::with_capacity(3);
        if let Some(c) = c0 {
            op_buf.push(c);
        };
        while let Some(c) = train.peek() {
            match op_buf.len() {
                // the first character alone never resolves a multi-char operator
                // family; always attempt to grow before settling
                0 => op_buf.push(train.consume().unwrap()),
                // 1 and 2 character buffers: try to grow by one more character;
                // if the grown sequence isn't a real operator, fall back to
                // whatever the un-grown buffer already resolves to
                1 | 2 => {
                    op_buf.push(*c);
                    if Self::match_delimiter(&op_buf).is_ok() {
                        train.consume();
                    } else {
                        op_buf.pop();
                        return Self::match_delimiter(&op_buf);
                    }
                }
                _ => return Self::match_delimiter(&op_buf),
            }
        }
        Self::match_delimiter(&op_buf)
    }

    /// Captures integer or real numeric constants. Assumes `c0` was the last
    /// char consumed.
    pub fn consume_number(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<Self, LexError> {
        let mut number = String::new();

        if c0 != char_set::SINGLE_QUOTE {
            number = Self::consume_value_pattern(train, Some(c0), char_set::is_digit_or_underscore)?;

            if let Some(c) = train.peek() {
                if c == &char_set::DOT || c == &char_set::BIG_E || c == &char_set::LIL_E {
                    if c == &char_set::DOT {
                        number.push(train.consume().unwrap());
                        let fraction =
                            Self::consume_value_pattern(train, None, char_set::is_digit_or_underscore)?;
                        if fraction.is_empty() {
                            return Err(LexError::MissingNumbersAfterDecimalPoint);
                        }
                        number.push_str(&fraction);
                        if train
                            .peek()
                            .is_some_and(|d| d == &char_set::BIG_E || d == &char_set::LIL_E)
                        {
                            let e = train.consume().unwrap();
                            let expon = Self::consume_exponent(train, e)?;
                            number.push_str(&expon);
                        }
                        return Ok(Self::Number(Number::Real(number)));
                    } else {
                        let e = train.consume().unwrap();
                        let expon = Self::consume_exponent(train, e)?;
                        number.push_str(&expon);
                        return Ok(Self::Number(Number::Real(number)));
                    }
                } else {
                    let mut d = *c;
                    let mut time_unit = String::new();
                    while char_set::is_letter(&d) {
                        time_unit.push(train.consume().unwrap());
                        if let Some(f) = train.peek() {
                            d = *f;
                        } else {
                            break;
                        }
                    }
                    while char_set::is_whitespace(&d) {
                        train.consume().unwrap();
                        if let Some(f) = train.peek() {
                            d = *f;
                        } else {
                            if !time_unit.is_empty() {
                                return if Number::is_valid_time_units(&time_unit) {
                                    number.push_str(&time_unit);
                                    Ok(Self::Number(Number::Time(number)))
                                } else {
                                    Err(LexError::InvalidCharInNumber(
                                        time_unit.chars().next().unwrap(),
                                    ))
                                };
                            }
                            return Ok(Self::Number(Number::Decimal(number)));
                        }
                    }
                    if d != char_set::SINGLE_QUOTE {
                        if !time_unit.is_empty() {
                            return if Number::is_valid_time_units(&time_unit) {
                                number.push_str(&time_unit);
                                Ok(Self::Number(Number::Time(number)))
                            } else {
                                Err(LexError::InvalidCharInNumber(
                                    time_unit.chars().next().unwrap(),
                                ))
                            };
                        }
                        return Ok(Self::Number(Number::Decimal(number)));
                    } else {
                        number.push(train.consume().unwrap());
                    }
                }
            } else {
                return Ok(Self::Number(Number::Decimal(number)));
            }
        } else {
            number.push(c0);
            if let Some(c) = train.peek() {
                if c == &'(' || c == &'{' {
                    return Ok(Self::Operator(Operator::SingleQuote));
                }
            }
        }

        // based constant: the next character must be a valid base specifier
        if let Some(c) = train.peek() {
            match c {
                's' | 'S' => {
                    number.push(train.consume().unwrap());
                    if let Some(c) = train.consume() {
                        match c {
                            'd' | 'D' | 'o' | 'O' | 'h' | 'H' | 'b' | 'B' => number.push(c),
                            _ => return Err(LexError::InvalidBaseSpecifier(c)),
                        }
                    } else {
                        return Err(LexError::MissingBaseSpecifier);
                    }
                }
                'd' | 'D' | 'o' | 'O' | 'h' | 'H' | 'b' | 'B' => {
                    number.push(train.consume().unwrap())
                }
                '1' | '0' | 'x' | 'X' | 'z' | 'Z' => {
                    number.push(train.consume().unwrap());
                    return Ok(Self::Number(Number::Unbased(number)));
                }
                '(' | '{' => {
                    return Ok(Self::Number(Number::OnlyBase(number)));
                }
                _ => return Err(LexError::InvalidBaseSpecifier(*c)),
            }
        } else {
            return Err(LexError::MissingBaseSpecifier);
        }

        if let Some(mut d) = train.peek() {
            while char_set::is_whitespace(d) {
                train.consume().unwrap();
                if let Some(f) = train.peek() {
                    d = f;
                } else {
                    return Err(LexError::EmptyBaseConstNumber);
                }
            }
        } else {
            return Err(LexError::EmptyBaseConstNumber);
        }

        let value =
            Self::consume_value_pattern(train, None, char_set::is_digit_or_underscore_or_signal_char)?;
        match value.len() {
            0 => Err(LexError::EmptyBaseConstNumber),
            _ => {
                number.push_str(&value);
                Ok(Self::Number(Number::Based(number)))
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Comment {
    OneLine(String),
    Block(String),
}

impl Comment {
    fn as_str(&self) -> &str {
        match self {
            Self::OneLine(note) => note.as_ref(),
            Self::Block(note) => note.as_ref(),
        }
    }

    /// Computes the position the cursor ends up at after the comment's text,
    /// accounting for the opening (and, for block comments, closing) delimiters.
    pub fn ending_position(&self) -> Position {
        let mut pos = Position::place(1, 2);
        let mut chars = self.as_str().chars();
        while let Some(c) = chars.next() {
            if char_set::is_newline(&c) {
                pos.next_line();
            } else {
                pos.next_col();
            }
        }
        if let Self::Block(_) = self {
            pos.next_col();
            pos.next_col();
        }
        pos
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneLine(c) => write!(f, "//{}", c),
            Self::Block(c) => write!(f, "/*{}*/", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumes_keyword_over_identifier() {
        let mut car = TrainCar::new("module".chars());
        let c0 = car.consume().unwrap();
        let tk = Lexeme::consume_word(&mut car, c0).unwrap();
        assert_eq!(tk, Lexeme::Keyword(Keyword::Module));
    }

    #[test]
    fn consumes_plain_identifier() {
        let mut car = TrainCar::new("flop1".chars());
        let c0 = car.consume().unwrap();
        let tk = Lexeme::consume_word(&mut car, c0).unwrap();
        assert_eq!(tk, Lexeme::Identifier(Identifier::Basic("flop1".to_string())));
    }

    #[test]
    fn consumes_real_number_with_exponent() {
        let mut car = TrainCar::new("1.30e-2;".chars());
        let c0 = car.consume().unwrap();
        let tk = Lexeme::consume_number(&mut car, c0).unwrap();
        assert_eq!(tk, Lexeme::Number(Number::Real("1.30e-2".to_string())));
    }
}
