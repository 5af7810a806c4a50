use std::path::PathBuf;
use thiserror::Error;

/// A malformed line in the pins file. Any one of these rejects the whole file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line_no}: not of form 'PATTERN: REPLACEMENT': {line:?}")]
    MissingColon { line_no: usize, line: String },

    #[error("line {line_no}: zero-length pattern in {line:?}")]
    EmptyPattern { line_no: usize, line: String },

    #[error("line {line_no}: zero-length replacement in {line:?}")]
    EmptyReplacement { line_no: usize, line: String },

    #[error("line {line_no}: first token in pattern must be '{expected}', not {found:?}, in {line:?}")]
    BadSentinel {
        line_no: usize,
        line: String,
        expected: &'static str,
        found: String,
    },
}

/// A pin whose tokens break the model's invariants, before any line is attached.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidPin {
    #[error("zero-length pattern")]
    EmptyPattern,

    #[error("zero-length replacement")]
    EmptyReplacement,

    #[error("first token in pattern must be '{expected}', not {found:?}")]
    BadSentinel { expected: &'static str, found: String },
}

impl InvalidPin {
    pub fn at(self, line_no: usize, line: &str) -> ConfigError {
        let line = line.to_string();
        match self {
            InvalidPin::EmptyPattern => ConfigError::EmptyPattern { line_no, line },
            InvalidPin::EmptyReplacement => ConfigError::EmptyReplacement { line_no, line },
            InvalidPin::BadSentinel { expected, found } => ConfigError::BadSentinel {
                line_no,
                line,
                expected,
                found,
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no pins matched, and no default gcloud on PATH")]
    NoDefault,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid pin: {0:?} does not exist")]
    Missing(PathBuf),

    #[error("invalid pin: {0:?} is a directory")]
    IsDirectory(PathBuf),
}
