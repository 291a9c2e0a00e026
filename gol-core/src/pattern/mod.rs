//! Seeding the grid from built-in patterns or pattern files.
//!
//! Every dialect anchors its pattern on [`Grid::center`] and writes through
//! [`Grid::set_alive_checked`], so a cell that would land off the grid fails
//! the whole load instead of being clamped or wrapped.

mod builtin;
mod life106;
mod plaintext;
mod rle;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::LoadError;
use crate::grid::Grid;

pub use builtin::Builtin;

/// Text formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Run-length encoded, `.rle`
    Rle,
    /// Plaintext / Life 1.05, `.cells`
    Plaintext,
    /// Life 1.06 coordinate list, anything else
    Life106,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("rle") => Dialect::Rle,
            Some("cells") => Dialect::Plaintext,
            _ => Dialect::Life106,
        }
    }

    pub fn parse(self, text: &str, grid: &mut Grid) -> Result<(), LoadError> {
        match self {
            Dialect::Rle => rle::parse(text, grid),
            Dialect::Plaintext => plaintext::parse(text, grid),
            Dialect::Life106 => life106::parse(text, grid),
        }
    }
}

/// Where the initial generation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    Builtin(Builtin),
    File(PathBuf),
}

impl Default for PatternSource {
    fn default() -> Self {
        PatternSource::Builtin(Builtin::Acorn)
    }
}

impl From<Option<PathBuf>> for PatternSource {
    fn from(path: Option<PathBuf>) -> Self {
        path.map(PatternSource::File).unwrap_or_default()
    }
}

/// Seeds `grid` from `source`. On error the grid may hold part of the pattern
/// and should be discarded.
pub fn seed(grid: &mut Grid, source: &PatternSource) -> Result<(), LoadError> {
    match source {
        PatternSource::Builtin(builtin) => builtin.seed(grid)?,
        PatternSource::File(path) => load_file(grid, path)?,
    }
    debug!("seeded {} live cells", grid.population());
    Ok(())
}

pub fn load_file(grid: &mut Grid, path: &Path) -> Result<(), LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dialect = Dialect::from_path(path);
    debug!("loading {} as {:?}", path.display(), dialect);
    dialect.parse(&text, grid)
}

/// `center + offset`, saturating so that absurd offsets still read as off-grid.
fn offset(center: usize, delta: i64) -> i64 {
    (center as i64).saturating_add(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Topology;

    #[test]
    fn dialect_follows_extension() {
        assert_eq!(Dialect::from_path(Path::new("gun.rle")), Dialect::Rle);
        assert_eq!(Dialect::from_path(Path::new("dir/pulsar.cells")), Dialect::Plaintext);
        assert_eq!(Dialect::from_path(Path::new("glider.lif")), Dialect::Life106);
        assert_eq!(Dialect::from_path(Path::new("no_extension")), Dialect::Life106);
        assert_eq!(Dialect::from_path(Path::new("upper.RLE")), Dialect::Life106);
    }

    #[test]
    fn missing_path_means_acorn() {
        assert_eq!(PatternSource::from(None), PatternSource::Builtin(Builtin::Acorn));
        assert_eq!(
            PatternSource::from(Some(PathBuf::from("a.rle"))),
            PatternSource::File(PathBuf::from("a.rle"))
        );
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let mut grid = Grid::new(64, Topology::Bounded);
        let source = PatternSource::File(PathBuf::from("/nonexistent/pattern.rle"));
        assert!(matches!(seed(&mut grid, &source), Err(LoadError::Io { .. })));
    }

    #[test]
    fn default_source_seeds_acorn() {
        let mut grid = Grid::new(64, Topology::Bounded);
        seed(&mut grid, &PatternSource::default()).unwrap();
        assert_eq!(grid.population(), 7);
    }
}
