//! Error types shared by the loader, the configuration and the controller.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a pattern could not be seeded onto the grid.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read pattern file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The RLE `x = .., y = ..` line could not be parsed
    #[error("malformed header: {line:?}")]
    MalformedHeader { line: String },

    /// Only B3/S23 is simulated
    #[error("unsupported rule {0:?}, only B3/S23 is supported")]
    UnsupportedRule(String),

    #[error("unexpected character {ch:?} on line {line}")]
    UnexpectedCharacter { line: usize, ch: char },

    /// The RLE data stream ended without a `!`
    #[error("pattern data ended without a terminating '!'")]
    Unterminated,

    #[error("cell ({x}, {y}) lies outside the grid")]
    OutOfBounds { x: i64, y: i64 },
}

/// Rejected simulation settings. Raised before any grid is allocated.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size {0} is not a power of two")]
    SizeNotPowerOfTwo(usize),

    #[error("grid size {0} is smaller than the minimum of {min}", min = crate::config::MIN_SIZE)]
    SizeTooSmall(usize),

    #[error("grid size {0} is larger than the maximum of {max}", max = crate::config::MAX_SIZE)]
    SizeTooLarge(usize),

    #[error("cycle history of {0} cannot detect any period, need at least {min} slots", min = crate::config::MIN_HISTORY)]
    HistoryTooShort(usize),

    #[error("cycle history of {0} is longer than the maximum of {max}", max = crate::config::MAX_HISTORY)]
    HistoryTooLong(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("pattern could not be loaded: {0}")]
    Load(#[from] LoadError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
