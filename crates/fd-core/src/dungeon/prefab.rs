//! Prefab rooms
//!
//! A prefab is a hand-authored mask, walls included. The text format is a
//! `"<height> <width>"` header followed by exactly `height` rows of `width`
//! blueprint characters (`x`, `w`, `f`, `c`).
//!
//! The generator only sees the [`PrefabLoader`] trait, so it never does file
//! I/O itself.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{CharGrid, Symbol};
use crate::error::PrefabError;

/// Supplies prefab masks by resource id
pub trait PrefabLoader {
    fn load(&self, id: &str) -> Result<CharGrid, PrefabError>;
}

/// Parse prefab text into a mask
///
/// Fails on the first malformed line instead of truncating or padding.
/// Trailing blank lines are ignored.
pub fn parse_prefab(text: &str) -> Result<CharGrid, PrefabError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(PrefabError::MissingHeader)?.trim();
    if header.is_empty() {
        return Err(PrefabError::MissingHeader);
    }

    let dims: Vec<usize> = header
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<_, _>>()
        .map_err(|_| PrefabError::BadHeader(header.to_string()))?;
    let [height, width] = dims[..] else {
        return Err(PrefabError::BadHeader(header.to_string()));
    };
    if height == 0 || width == 0 {
        return Err(PrefabError::BadHeader(header.to_string()));
    }

    let mut rows: Vec<&str> = lines.map(str::trim_end).collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    if rows.len() != height {
        return Err(PrefabError::LineCount {
            expected: height,
            found: rows.len(),
        });
    }

    let mut grid = CharGrid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(PrefabError::LineWidth {
                line: y + 1,
                expected: width,
                found,
            });
        }
        for (x, c) in row.chars().enumerate() {
            let symbol = Symbol::from_char(c).ok_or(PrefabError::BadSymbol {
                line: y + 1,
                column: x + 1,
                symbol: c,
            })?;
            grid[(x, y)] = symbol;
        }
    }
    Ok(grid)
}

/// Loads prefabs from text files under a root directory
#[derive(Debug, Clone)]
pub struct FilePrefabLoader {
    root: PathBuf,
}

impl FilePrefabLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Loader for the prefabs shipped with this crate
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/prefabs"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PrefabLoader for FilePrefabLoader {
    fn load(&self, id: &str) -> Result<CharGrid, PrefabError> {
        let path = self.root.join(id);
        let text = fs::read_to_string(&path).map_err(|source| PrefabError::Io {
            id: id.to_string(),
            source,
        })?;
        parse_prefab(&text)
    }
}

/// In-memory prefab table, keyed by id
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefabLoader {
    prefabs: HashMap<String, String>,
}

impl MemoryPrefabLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register prefab text under an id (parsed on every load)
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.prefabs.insert(id.into(), text.into());
    }

    pub fn with(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }
}

impl PrefabLoader for MemoryPrefabLoader {
    fn load(&self, id: &str) -> Result<CharGrid, PrefabError> {
        let text = self
            .prefabs
            .get(id)
            .ok_or_else(|| PrefabError::UnknownPrefab(id.to_string()))?;
        parse_prefab(text)
    }
}
