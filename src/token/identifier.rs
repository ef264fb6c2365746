//! Verilog identifier lexemes: basic, escaped, system, and compiler-directive names.

use super::error::LexError;
use super::token::Lexeme;
use super::tokenizer::char_set;
use crate::lexer::TrainCar;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

#[derive(Debug, Clone, PartialOrd, Ord)]
pub enum Identifier {
    Basic(String),
    Escaped(String),
    System(String),
    /// Bound to a macro name scanned off the back of a ` compiler directive.
    Directive(String),
}

impl Eq for Identifier {}

impl Identifier {
    pub fn new() -> Self {
        Self::Basic(String::new())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(id) => id.as_ref(),
            Self::Escaped(id) => id.as_ref(),
            Self::System(id) => id.as_ref(),
            Self::Directive(id) => id.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Basic(s) => s.len(),
            Self::Escaped(s) => s.len(),
            Self::System(s) => s.len(),
            Self::Directive(s) => s.len(),
        }
    }

    /// Checks if the identifier names a system task/function or a macro,
    /// as opposed to a user-declared name.
    pub fn is_nonuser_name(&self) -> bool {
        matches!(self, Self::System(_) | Self::Directive(_))
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Basic(id) => id.to_lowercase().hash(state),
            Self::Escaped(id) => id.hash(state),
            Self::System(id) => format!("${}", id).hash(state),
            Self::Directive(id) => format!("`{}", id).hash(state),
        }
    }
}

impl FromStr for Identifier {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = TrainCar::new(s.chars());
        match chars.consume() {
            Some(c) => Ok(match c {
                '\\' => Self::Escaped(Lexeme::consume_value_pattern(
                    &mut chars,
                    None,
                    char_set::is_not_whitespace,
                )?),
                '$' => Self::System(Lexeme::consume_value_pattern(
                    &mut chars,
                    None,
                    char_set::is_identifier_character,
                )?),
                _ => match char_set::is_letter(&c) || c == char_set::UNDER_SCORE {
                    true => Self::Basic(Lexeme::consume_value_pattern(
                        &mut chars,
                        Some(c),
                        char_set::is_identifier_character,
                    )?),
                    false => return Err(LexError::InvalidChar(c)),
                },
            }),
            None => Err(LexError::UnexpectedEof),
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        // a basic identifier is compared case-insensitively per the LRM's
        // treatment of reserved names, but system/directive names must
        // never collide with a user-declared basic name
        if self.is_nonuser_name() != other.is_nonuser_name() {
            false
        } else {
            self.as_str() == other.as_str()
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic(id) => write!(f, "{}", id),
            Self::Escaped(id) => write!(f, "\\{}", id),
            Self::System(id) => write!(f, "${}", id),
            Self::Directive(id) => write!(f, "`{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_identifier() {
        let id: Identifier = "cpu_core".parse().unwrap();
        assert_eq!(id, Identifier::Basic("cpu_core".to_string()));
    }

    #[test]
    fn parses_escaped_identifier() {
        let id: Identifier = "\\cpu-3".parse().unwrap();
        assert_eq!(id.as_str(), "cpu-3");
        assert!(matches!(id, Identifier::Escaped(_)));
    }

    #[test]
    fn parses_system_identifier() {
        let id: Identifier = "$display".parse().unwrap();
        assert_eq!(id.to_string(), "$display");
    }

    #[test]
    fn system_names_never_equal_basic_names() {
        let a = Identifier::System("display".to_string());
        let b = Identifier::Basic("display".to_string());
        assert_ne!(a, b);
    }
}
