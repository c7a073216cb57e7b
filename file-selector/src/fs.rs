use std::path::{Path, PathBuf};

use bitflags::bitflags;

use crate::core::BackendError;

/// Minimal file metadata used by the local provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FsMetadata {
    /// Whether the path (after following links) refers to a directory.
    pub is_dir: bool,
    /// Whether the path (after following links) refers to a regular file.
    pub is_file: bool,
    /// Whether the path itself is a symbolic link.
    pub is_symlink: bool,
}

/// Directory entry returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug)]
pub struct FsEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Whether this entry is a directory (not following links).
    pub is_dir: bool,
    /// Whether this entry is a regular file (not following links).
    pub is_file: bool,
    /// Whether this entry itself is a symbolic link.
    pub is_symlink: bool,
}

/// Local file system abstraction.
///
/// Only the read side is needed: the selector never creates, moves or removes
/// anything.
pub trait FileSystem {
    /// List entries of a directory.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>>;
    /// Canonicalize a path (resolves links, requires the path to exist).
    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;
    /// Fetch metadata for a path, following symbolic links.
    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata>;
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>> {
        let mut out = Vec::new();
        let rd = std::fs::read_dir(dir)?;
        for e in rd {
            let e = match e {
                Ok(v) => v,
                Err(_) => continue,
            };
            let ft = match e.file_type() {
                Ok(v) => v,
                Err(_) => continue,
            };
            out.push(FsEntry {
                name: e.file_name().to_string_lossy().to_string(),
                path: e.path(),
                is_dir: ft.is_dir(),
                is_file: ft.is_file(),
                is_symlink: ft.is_symlink(),
            });
        }
        Ok(out)
    }

    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata> {
        let md = std::fs::metadata(path)?;
        let link_md = std::fs::symlink_metadata(path)?;
        Ok(FsMetadata {
            is_dir: md.is_dir(),
            is_file: md.is_file(),
            is_symlink: link_md.file_type().is_symlink(),
        })
    }
}

bitflags! {
    /// Operations a remote filesystem client supports.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RemoteCapabilities: u8 {
        /// Detailed listing (`ls` with name/type per entry).
        const DETAIL_LIST = 1 << 0;
        /// Glob expansion.
        const GLOB = 1 << 1;
        /// Directory test.
        const IS_DIR = 1 << 2;
    }
}

/// Entry type reported by a remote listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteEntryType {
    /// A directory (or prefix, for object stores).
    Directory,
    /// A file/object.
    File,
    /// Anything else the backend reports (links, devices, ...).
    Other(String),
}

/// One entry of a remote detailed listing.
///
/// `name` is the backend's full name for the entry *without* the protocol
/// prefix, e.g. `bucket/data/a.csv` for `s3://bucket/data/a.csv`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Backend name of the entry.
    pub name: String,
    /// Reported entry type.
    pub entry_type: RemoteEntryType,
}

impl RemoteEntry {
    /// Directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: RemoteEntryType::Directory,
        }
    }

    /// File entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: RemoteEntryType::File,
        }
    }
}

/// Client for a remote or virtual filesystem (object stores, SFTP, ...).
///
/// Implementations wrap whatever client library talks to the backend. Errors
/// are passed through to the caller untouched.
pub trait RemoteFileSystem: Send + Sync {
    /// Capabilities this client implements. A provider is only built for
    /// clients reporting [`RemoteCapabilities::all`].
    fn capabilities(&self) -> RemoteCapabilities {
        RemoteCapabilities::all()
    }

    /// Name used when rejecting the client.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Detailed listing of the direct children of `path`.
    fn ls(&self, path: &str) -> Result<Vec<RemoteEntry>, BackendError>;

    /// Expand a glob such as `bucket/data/*.csv`.
    fn glob(&self, pattern: &str) -> Result<Vec<RemoteEntry>, BackendError>;

    /// Whether `path` is a directory.
    fn isdir(&self, path: &str) -> Result<bool, BackendError>;
}
