//! Parser Configuration (C8), §4.8.
//!
//! A small `toml`-backed settings document, read the same way as the
//! original's manifest files: `Deserialize` the struct, `FromStr` over
//! `toml::from_str`, and a constant "what does a fresh one look like"
//! writer for first-run scaffolding.

use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Default simulation timescale applied to a module lacking its own
/// `` `timescale `` directive.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Timescale {
    pub unit: String,
    pub precision: String,
}

impl Default for Timescale {
    fn default() -> Self {
        Self {
            unit: "1ns".to_string(),
            precision: "1ps".to_string(),
        }
    }
}

fn default_max_include_depth() -> u32 {
    24
}

/// Settings consulted by the tokenizer and driver while building a parse
/// tree. Loaded once per [`crate::manager::PtManager`] and held for its
/// lifetime; none of these are mutated mid-parse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub timescale: Timescale,

    /// Directories searched, in order, for an `` `include `` target that
    /// isn't found relative to the including file.
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,

    /// Enables lexing the SystemVerilog-superset operator and keyword
    /// extensions already recognized (but gated) by the tokenizer, e.g.
    /// `++`, `+=`, `'{`.
    #[serde(default)]
    pub sv_superset: bool,

    /// Hard ceiling on nested `` `include `` depth, guarding against a
    /// self-including file looping forever.
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            timescale: Timescale::default(),
            include_paths: Vec::new(),
            sv_superset: false,
            max_include_depth: default_max_include_depth(),
        }
    }
}

impl FromStr for ParserConfig {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl ParserConfig {
    /// Reads and parses a configuration file from disk.
    pub fn from_file(path: &PathBuf) -> Result<Self, crate::manager::ParseError> {
        let text = std::fs::read_to_string(path).map_err(crate::manager::ParseError::Io)?;
        text.parse().map_err(|e: toml::de::Error| crate::manager::ParseError::BadConfig(e.to_string()))
    }

    /// What a fresh, minimal configuration file looks like; used by the
    /// same first-run scaffolding convention as the manifest's
    /// `write_empty_manifest`.
    pub fn write_empty_config() -> String {
        r#"sv_superset = false
max_include_depth = 24

[timescale]
unit = "1ns"
precision = "1ps"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_table_is_empty() {
        let cfg: ParserConfig = "".parse().unwrap();
        assert_eq!(cfg.max_include_depth, 24);
        assert!(!cfg.sv_superset);
        assert_eq!(cfg.timescale, Timescale::default());
    }

    #[test]
    fn overrides_round_trip_through_toml() {
        let text = r#"
sv_superset = true
max_include_depth = 4
include_paths = ["a", "b"]

[timescale]
unit = "10ns"
precision = "1ns"
"#;
        let cfg: ParserConfig = text.parse().unwrap();
        assert!(cfg.sv_superset);
        assert_eq!(cfg.max_include_depth, 4);
        assert_eq!(cfg.include_paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cfg.timescale.unit, "10ns");
    }
}
