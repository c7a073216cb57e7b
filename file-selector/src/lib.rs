#![deny(missing_docs)]
//! Headless file browsing and selection engine.
//!
//! The crate holds the state machines behind a file-selector widget and leaves
//! rendering to the host:
//! - [`FileProvider`]s list and normalize paths on the local filesystem or on
//!   any [`RemoteFileSystem`] client (`s3://`, `gs://`, ...)
//! - [`Navigator`] drives a directory browser with back/forward/up history and
//!   a dual-list selection whose unselected side is the denylist
//! - [`FileTree`] indexes a directory as a lazily expanded node tree with an
//!   optional depth cap
//!
//! Every operation runs to completion and then exposes plain data
//! ([`SelectorView`], [`TreeNode`], [`NodeInfo`]) for the presentation layer.
//! Enable the `serde` feature to ship that data to a web front-end.

mod config;
mod core;
mod fs;
mod history;
mod navigator;
mod navigator_events;
mod navigator_state;
mod path_util;
mod provider;
mod refresh;
mod scan;
mod selection;
mod tree;

pub use config::{SelectorConfig, TreeConfig};
pub use core::{
    ASCEND_LABEL, ASCEND_VALUE, BackendError, EntryKind, FOLDER_MARKER, FileSelectorError,
    HIDDEN_EXCLUDING_PATTERN, INVALID_PATH_OPTION, Result,
};
pub use fs::{
    FileSystem, FsEntry, FsMetadata, RemoteCapabilities, RemoteEntry, RemoteEntryType,
    RemoteFileSystem, StdFileSystem,
};
pub use history::NavigationHistory;
pub use navigator::Navigator;
pub use navigator_events::NavigatorEvent;
pub use navigator_state::{NavControls, NavigationState, SelectorView};
pub use provider::{Backend, FileProvider, LocalFileProvider, RemoteFileProvider};
pub use refresh::{RefreshScheduler, RefreshTimer};
pub use scan::{FilePattern, Listing, scan_path};
pub use selection::{DenylistUpdate, SelectionSet, filter_denylist};
pub use tree::{Children, FileTree, NodeInfo, TreeNode};
