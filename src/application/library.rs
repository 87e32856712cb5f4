use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::codec::{self, ParseError, PatternFormat};
use crate::domain::{Pattern, presets};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("pattern {0:?} is not in the catalog")]
    NotFound(String),
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("{0:?} is not a recognized pattern file")]
    UnknownFormat(PathBuf),
}

/// One catalog slot. Files that fail to decode stay in the catalog with
/// their error attached so the gallery can report them instead of
/// silently shrinking.
pub struct CatalogEntry {
    pub name: String,
    /// None for built-in patterns
    pub filename: Option<PathBuf>,
    pub pattern: Result<Pattern, LibraryError>,
}

/// Catalog of built-in and user-supplied patterns.
///
/// Loading is eager: `scan` decodes every recognized file up front, and
/// the catalog stays as-is until the next explicit `scan` call.
pub struct PatternLibrary {
    entries: Vec<CatalogEntry>,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A library pre-populated with the built-in patterns
    pub fn with_builtins() -> Self {
        let mut library = Self::new();
        for pattern in presets::all_patterns() {
            library.entries.push(CatalogEntry {
                name: pattern.name.clone(),
                filename: None,
                pattern: Ok(pattern),
            });
        }
        library.sort();
        library
    }

    /// Scan a directory (non-recursively) for pattern files and add them
    /// to the catalog. Files that fail to read or decode are kept as
    /// failed entries and logged; returns the number of files cataloged.
    pub fn scan(&mut self, dir: &Path) -> Result<usize, LibraryError> {
        self.scan_inner(dir, None)
    }

    /// Like `scan`, but stops once the wall-clock budget is spent. Files
    /// not reached within the budget are simply omitted.
    pub fn scan_budgeted(&mut self, dir: &Path, budget: Duration) -> Result<usize, LibraryError> {
        self.scan_inner(dir, Some(Instant::now() + budget))
    }

    fn scan_inner(&mut self, dir: &Path, deadline: Option<Instant>) -> Result<usize, LibraryError> {
        let reader = fs::read_dir(dir).map_err(|source| LibraryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut candidates: Vec<PathBuf> = reader
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && PatternFormat::from_path(path).is_some())
            .collect();
        candidates.sort();

        let mut added = 0;
        for path in candidates {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                log::warn!("pattern scan of {dir:?} ran out of budget; remaining files skipped");
                break;
            }
            let result = load_file(&path);
            let name = match &result {
                Ok(pattern) => pattern.name.clone(),
                Err(e) => {
                    log::warn!("skipping pattern file: {e}");
                    file_stem(&path)
                }
            };
            self.entries.push(CatalogEntry {
                name,
                filename: Some(path),
                pattern: result,
            });
            added += 1;
        }
        self.sort();
        log::info!("cataloged {added} pattern files from {dir:?}");
        Ok(added)
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Look a pattern up by name
    pub fn get(&self, name: &str) -> Result<&Pattern, LibraryError> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.pattern.as_ref().ok())
            .ok_or_else(|| LibraryError::NotFound(name.to_string()))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of catalog entries whose file failed to load
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.pattern.is_err()).count()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Load a single pattern file. Used by the scan and for a pattern path
/// requested directly (e.g. on the command line), where the failure is
/// the operation's own result rather than a catalog annotation.
pub fn load_file(path: &Path) -> Result<Pattern, LibraryError> {
    let format = PatternFormat::from_path(path)
        .ok_or_else(|| LibraryError::UnknownFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut pattern = codec::decode(&text, format).map_err(|source| LibraryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if pattern.name.is_empty() {
        pattern.name = file_stem(path);
    }
    Ok(pattern)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
