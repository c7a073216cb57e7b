use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::core::{FileSelectorError, Result};
use crate::fs::{FileSystem, FsEntry};

/// Compiled shell-style glob used to filter file names (`*.csv`, `[!.]*`).
#[derive(Clone, Debug)]
pub struct FilePattern {
    raw: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    /// Compile a pattern; `*`, `?`, `[abc]` and `[!abc]` are supported.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let raw = pattern.into();
        let glob = GlobBuilder::new(&raw)
            .literal_separator(true)
            .build()
            .map_err(|source| FileSelectorError::InvalidPattern {
                pattern: raw.clone(),
                source,
            })?;
        Ok(Self {
            matcher: glob.compile_matcher(),
            raw,
        })
    }

    /// Whether a base name matches.
    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

/// Directories and files found in one directory, each sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Listing {
    /// Full paths of sub-directories (and links to directories).
    pub dirs: Vec<String>,
    /// Full paths of files whose base name matched the pattern.
    pub files: Vec<String>,
}

impl Listing {
    /// Sort both halves lexicographically.
    pub fn sort(&mut self) {
        self.dirs.sort();
        self.files.sort();
    }

    /// Whether `path` appears among the directories.
    pub fn contains_dir(&self, path: &str) -> bool {
        self.dirs.iter().any(|d| d == path)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.dirs.len() + self.files.len()
    }

    /// Whether the listing holds no entries.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolved {
    Dir,
    File,
    Skip,
}

/// Classifies an entry by what it points at. Dangling links are skipped.
fn resolve_entry(fs: &dyn FileSystem, entry: &FsEntry) -> Resolved {
    if entry.is_symlink {
        return match fs.metadata(&entry.path) {
            Ok(md) if md.is_dir => Resolved::Dir,
            Ok(md) if md.is_file => Resolved::File,
            _ => Resolved::Skip,
        };
    }
    if entry.is_dir {
        Resolved::Dir
    } else if entry.is_file {
        Resolved::File
    } else {
        Resolved::Skip
    }
}

/// Scan the direct children of `dir`, keeping every directory and the files
/// whose base name matches `pattern`.
///
/// Hidden entries are not filtered here; pass [`crate::HIDDEN_EXCLUDING_PATTERN`]
/// or filter the result.
pub fn scan_path(fs: &dyn FileSystem, dir: &Path, pattern: &FilePattern) -> Result<Listing> {
    let mut listing = Listing::default();
    for entry in fs.read_dir(dir)? {
        let path = entry.path.to_string_lossy().to_string();
        match resolve_entry(fs, &entry) {
            Resolved::Dir => listing.dirs.push(path),
            Resolved::File if pattern.is_match(&entry.name) => listing.files.push(path),
            Resolved::File | Resolved::Skip => {}
        }
    }
    listing.sort();
    trace_scan_completed(dir, pattern.as_str(), listing.len());
    Ok(listing)
}

#[cfg(feature = "tracing")]
fn trace_scan_completed(dir: &Path, pattern: &str, entries: usize) {
    tracing::trace!(
        event = "scan.completed",
        dir = %dir.display(),
        pattern,
        entries,
        "directory scanned"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_scan_completed(_dir: &Path, _pattern: &str, _entries: usize) {}
