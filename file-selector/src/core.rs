use thiserror::Error;

/// Label of the pseudo-entry that ascends to the parent directory.
pub const ASCEND_LABEL: &str = "⬆ ..";

/// Value carried by the ascend pseudo-entry.
pub const ASCEND_VALUE: &str = "..";

/// Marker prefixed to directory labels in listings.
pub const FOLDER_MARKER: &str = "📁";

/// Single option shown when the entered directory cannot be listed.
pub const INVALID_PATH_OPTION: &str = "Entered path is not valid";

/// Glob that matches every name except dotfiles.
pub const HIDDEN_EXCLUDING_PATTERN: &str = "[!.]*";

/// Kind of a filesystem entry as seen by the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// Regular file (or a link resolving to one).
    File,
    /// Directory (or a link resolving to one).
    #[cfg_attr(feature = "serde", serde(rename = "folder"))]
    Folder,
}

impl EntryKind {
    /// Returns `true` for [`EntryKind::Folder`].
    pub fn is_folder(self) -> bool {
        matches!(self, EntryKind::Folder)
    }
}

/// Boxed error produced by a remote filesystem client.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by providers, navigators and trees.
#[derive(Error, Debug)]
pub enum FileSelectorError {
    /// The supplied backend does not offer the remote filesystem capabilities.
    #[error("unsupported filesystem type: {type_name}")]
    UnsupportedFilesystem {
        /// Type name of the rejected backend.
        type_name: String,
    },
    /// I/O error from the local filesystem
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Error reported by a remote filesystem client
    #[error("backend error: {0}")]
    Backend(#[source] BackendError),
    /// The file pattern is not a valid glob
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Underlying glob parse error.
        #[source]
        source: globset::Error,
    },
    /// Invalid or non-existing path requested
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(String),
    /// No tree node is indexed under the id
    #[error("unknown tree node: {0}")]
    UnknownNode(String),
}

impl FileSelectorError {
    /// Wrap an error coming from a remote filesystem client.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<BackendError>,
    {
        FileSelectorError::Backend(err.into())
    }
}

/// Convenience alias for results in this crate.
pub type Result<T, E = FileSelectorError> = std::result::Result<T, E>;
