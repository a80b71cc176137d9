//! Error types for generation, prefab loading and configuration

use thiserror::Error;

use crate::dungeon::RoomShape;

/// Prefab resource failures
///
/// A failed prefab only sinks the room that asked for it.
#[derive(Error, Debug)]
pub enum PrefabError {
    #[error("Could not read prefab '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown prefab '{0}'")]
    UnknownPrefab(String),

    #[error("Prefab is empty, expected a '<height> <width>' header")]
    MissingHeader,

    #[error("Invalid prefab header '{0}', expected '<height> <width>'")]
    BadHeader(String),

    #[error("Prefab declares {expected} rows but has {found}")]
    LineCount { expected: usize, found: usize },

    #[error("Prefab row {line} is {found} cells wide, expected {expected}")]
    LineWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Prefab row {line}, column {column}: unknown symbol '{symbol}'")]
    BadSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },
}

/// Reasons a single room proposal cannot be built
#[derive(Error, Debug)]
pub enum RoomError {
    #[error("{width}x{height} is too small for a {shape} room")]
    Degenerate {
        shape: RoomShape,
        width: usize,
        height: usize,
    },

    #[error("{width}x{height} room does not fit a {map_width}x{map_height} map")]
    TooLarge {
        width: usize,
        height: usize,
        map_width: usize,
        map_height: usize,
    },

    #[error("Prefab load failed: {0}")]
    Prefab(#[from] PrefabError),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
