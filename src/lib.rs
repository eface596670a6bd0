pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;

pub use config::Config;
pub use engine::Misspeller;
pub use error::{ConfigError, MisspellError};
pub use rules::RuleSet;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which misspelling passes to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    All,
    Phonological,
    Typographical,
}

impl Mode {
    pub fn phonological(self) -> bool {
        matches!(self, Mode::All | Mode::Phonological)
    }

    pub fn typographical(self) -> bool {
        matches!(self, Mode::All | Mode::Typographical)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::All => write!(f, "all"),
            Mode::Phonological => write!(f, "phonological"),
            Mode::Typographical => write!(f, "typographical"),
        }
    }
}

/// Summary of one misspelling run.
#[derive(Debug, Clone, Default)]
pub struct MisspellResult {
    pub mode: Mode,
    pub line_count: usize,
    pub input: String,
    pub output: String,
}

/// Decode raw input, rejecting anything that is not UTF-8 text.
pub fn decode_input(bytes: Vec<u8>) -> Result<String, MisspellError> {
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_passes() {
        assert!(Mode::All.phonological() && Mode::All.typographical());
        assert!(Mode::Phonological.phonological() && !Mode::Phonological.typographical());
        assert!(!Mode::Typographical.phonological() && Mode::Typographical.typographical());
    }

    #[test]
    fn test_decode_rejects_binary() {
        assert_eq!(decode_input(b"plain".to_vec()).unwrap(), "plain");
        assert!(matches!(
            decode_input(vec![0xff, 0xfe, 0x00]),
            Err(MisspellError::InvalidInput(_))
        ));
    }
}
