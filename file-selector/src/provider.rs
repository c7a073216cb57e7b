use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::core::{EntryKind, FileSelectorError, Result};
use crate::fs::{FileSystem, RemoteCapabilities, RemoteEntryType, RemoteFileSystem, StdFileSystem};
use crate::path_util;
use crate::scan::{FilePattern, Listing, scan_path};

/// Uniform listing/normalization interface over a filesystem backend.
pub trait FileProvider {
    /// List `path`: every sub-directory, and the files matching `pattern`.
    fn list(&self, path: &str, pattern: &FilePattern) -> Result<Listing>;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &str) -> Result<bool>;

    /// Normalize a user-supplied path. Relative paths resolve against the
    /// parent of `root` when given.
    fn normalize(&self, path: &str, root: Option<&str>) -> Result<String>;

    /// Classify `path`; `None` when it does not exist.
    ///
    /// The default asks [`is_dir`](Self::is_dir) and treats everything else as a
    /// file.
    fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>> {
        Ok(Some(if self.is_dir(path)? {
            EntryKind::Folder
        } else {
            EntryKind::File
        }))
    }

    /// The remote client behind this provider, if any.
    fn remote(&self) -> Option<&Arc<dyn RemoteFileSystem>> {
        None
    }
}

/// Which filesystem a selector browses.
#[derive(Clone, Default)]
pub enum Backend {
    /// The local OS filesystem.
    #[default]
    Local,
    /// A remote/virtual filesystem client.
    Remote(Arc<dyn RemoteFileSystem>),
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Local => f.write_str("Local"),
            Backend::Remote(fs) => f.debug_tuple("Remote").field(&fs.type_name()).finish(),
        }
    }
}

impl Backend {
    /// Wrap a remote client.
    pub fn remote<F>(fs: F) -> Self
    where
        F: RemoteFileSystem + 'static,
    {
        Backend::Remote(Arc::new(fs))
    }

    /// Build the provider for this backend.
    ///
    /// Remote clients must report every [`RemoteCapabilities`] flag, otherwise
    /// [`FileSelectorError::UnsupportedFilesystem`] is returned.
    pub fn into_provider(self) -> Result<Box<dyn FileProvider>> {
        match self {
            Backend::Local => Ok(Box::new(LocalFileProvider::new())),
            Backend::Remote(fs) => Ok(Box::new(RemoteFileProvider::new(fs)?)),
        }
    }
}

/// Provider backed by the local OS filesystem.
#[derive(Clone, Debug, Default)]
pub struct LocalFileProvider<F: FileSystem = StdFileSystem> {
    fs: F,
}

impl LocalFileProvider {
    /// Provider over the real OS filesystem.
    pub fn new() -> Self {
        Self { fs: StdFileSystem }
    }
}

impl<F: FileSystem> LocalFileProvider<F> {
    /// Provider over a custom [`FileSystem`].
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> FileProvider for LocalFileProvider<F> {
    fn list(&self, path: &str, pattern: &FilePattern) -> Result<Listing> {
        if !self.is_dir(path)? {
            return Ok(Listing::default());
        }
        scan_path(&self.fs, Path::new(path), pattern)
    }

    fn is_dir(&self, path: &str) -> Result<bool> {
        Ok(self
            .fs
            .metadata(Path::new(path))
            .map(|m| m.is_dir)
            .unwrap_or(false))
    }

    fn normalize(&self, path: &str, root: Option<&str>) -> Result<String> {
        let normalized = lexical_normalize(&expand_home(path));
        if normalized.is_absolute() {
            return Ok(lossy(&normalized));
        }
        let resolved = match root {
            Some(root) => {
                let root = Path::new(root);
                lexical_normalize(&root.parent().unwrap_or(root).join(&normalized))
            }
            None => {
                let joined = std::env::current_dir()?.join(&normalized);
                self.fs
                    .canonicalize(&joined)
                    .unwrap_or_else(|_| lexical_normalize(&joined))
            }
        };
        Ok(lossy(&resolved))
    }

    fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>> {
        Ok(match self.fs.metadata(Path::new(path)) {
            Ok(md) if md.is_dir => Some(EntryKind::Folder),
            Ok(md) if md.is_file => Some(EntryKind::File),
            _ => None,
        })
    }
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn expand_home(path: &str) -> PathBuf {
    let native_prefix = format!("~{}", std::path::MAIN_SEPARATOR);
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
            .or_else(|| path.strip_prefix(native_prefix.as_str()))
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Resolve `.` and `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Provider adapting a [`RemoteFileSystem`] client.
#[derive(Clone)]
pub struct RemoteFileProvider {
    fs: Arc<dyn RemoteFileSystem>,
}

impl std::fmt::Debug for RemoteFileProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFileProvider")
            .field("fs", &self.fs.type_name())
            .finish()
    }
}

impl RemoteFileProvider {
    /// Wrap a client, rejecting it when it lacks a required capability.
    pub fn new(fs: Arc<dyn RemoteFileSystem>) -> Result<Self> {
        let caps = fs.capabilities();
        if !caps.contains(RemoteCapabilities::all()) {
            trace_backend_rejected(fs.type_name(), caps);
            return Err(FileSelectorError::UnsupportedFilesystem {
                type_name: fs.type_name().to_string(),
            });
        }
        Ok(Self { fs })
    }
}

impl FileProvider for RemoteFileProvider {
    fn list(&self, path: &str, pattern: &FilePattern) -> Result<Listing> {
        let query = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };
        let prefix = path_util::scheme_prefix(&query);
        let with_prefix = |name: &str| format!("{prefix}{}", path_util::trim_trailing_sep(name));

        let raw = self.fs.ls(&query).map_err(FileSelectorError::Backend)?;
        let dirs = raw
            .iter()
            .filter(|e| e.entry_type == RemoteEntryType::Directory)
            .map(|e| with_prefix(&e.name))
            .collect();

        let globbed = self
            .fs
            .glob(&format!("{query}{}", pattern.as_str()))
            .map_err(FileSelectorError::Backend)?;
        let files = globbed
            .iter()
            .filter(|e| e.entry_type == RemoteEntryType::File)
            .map(|e| with_prefix(&e.name))
            .collect();

        let mut listing = Listing { dirs, files };
        listing.sort();
        Ok(listing)
    }

    fn is_dir(&self, path: &str) -> Result<bool> {
        self.fs.isdir(path).map_err(FileSelectorError::Backend)
    }

    fn normalize(&self, path: &str, _root: Option<&str>) -> Result<String> {
        Ok(path_util::collapse_dots(path_util::trim_trailing_sep(path)))
    }

    fn remote(&self) -> Option<&Arc<dyn RemoteFileSystem>> {
        Some(&self.fs)
    }
}

#[cfg(feature = "tracing")]
fn trace_backend_rejected(type_name: &str, caps: RemoteCapabilities) {
    tracing::warn!(
        event = "provider.rejected",
        type_name,
        ?caps,
        "remote filesystem lacks required capabilities"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_backend_rejected(_type_name: &str, _caps: RemoteCapabilities) {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::BackendError;
    use crate::fs::RemoteEntry;
    use crate::scan::tests::data_fs;
    use std::sync::Mutex;

    /// Object-store double: `ls` answers from `entries`, `glob` from `globbed`.
    #[derive(Default)]
    pub(crate) struct FakeBucket {
        pub(crate) entries: Vec<RemoteEntry>,
        pub(crate) globbed: Vec<RemoteEntry>,
        pub(crate) dirs: Vec<String>,
        pub(crate) calls: Mutex<Vec<String>>,
        pub(crate) fail: bool,
    }

    impl RemoteFileSystem for FakeBucket {
        fn ls(&self, path: &str) -> Result<Vec<RemoteEntry>, BackendError> {
            self.calls.lock().unwrap().push(format!("ls {path}"));
            if self.fail {
                return Err("access denied".into());
            }
            Ok(self.entries.clone())
        }

        fn glob(&self, pattern: &str) -> Result<Vec<RemoteEntry>, BackendError> {
            self.calls.lock().unwrap().push(format!("glob {pattern}"));
            Ok(self.globbed.clone())
        }

        fn isdir(&self, path: &str) -> Result<bool, BackendError> {
            if self.fail {
                return Err("access denied".into());
            }
            Ok(self.dirs.iter().any(|d| d == path))
        }
    }

    struct NoGlob;

    impl RemoteFileSystem for NoGlob {
        fn capabilities(&self) -> RemoteCapabilities {
            RemoteCapabilities::DETAIL_LIST | RemoteCapabilities::IS_DIR
        }

        fn ls(&self, _path: &str) -> Result<Vec<RemoteEntry>, BackendError> {
            Ok(Vec::new())
        }

        fn glob(&self, _pattern: &str) -> Result<Vec<RemoteEntry>, BackendError> {
            Ok(Vec::new())
        }

        fn isdir(&self, _path: &str) -> Result<bool, BackendError> {
            Ok(false)
        }
    }

    #[test]
    fn local_backend_builds_local_provider() {
        let provider = Backend::Local.into_provider().unwrap();
        assert!(provider.remote().is_none());
    }

    #[test]
    fn incapable_remote_is_rejected_with_its_type_name() {
        let Err(err) = Backend::remote(NoGlob).into_provider() else {
            panic!("a client without glob support must be rejected");
        };
        match err {
            FileSelectorError::UnsupportedFilesystem { type_name } => {
                assert!(type_name.ends_with("NoGlob"), "{type_name}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn remote_listing_prefixes_scheme_and_splits_kinds() {
        let bucket = Arc::new(FakeBucket {
            entries: vec![
                RemoteEntry::directory("bucket/data/sub/"),
                RemoteEntry::file("bucket/data/a.csv"),
            ],
            globbed: vec![
                RemoteEntry::file("bucket/data/a.csv"),
                RemoteEntry::directory("bucket/data/sub"),
            ],
            ..Default::default()
        });
        let provider = RemoteFileProvider::new(bucket.clone()).unwrap();
        let listing = provider
            .list("s3://bucket/data", &FilePattern::new("*.csv").unwrap())
            .unwrap();
        assert_eq!(listing.dirs, vec!["s3://bucket/data/sub"]);
        assert_eq!(listing.files, vec!["s3://bucket/data/a.csv"]);
        assert_eq!(
            *bucket.calls.lock().unwrap(),
            vec!["ls s3://bucket/data/", "glob s3://bucket/data/*.csv"]
        );
    }

    #[test]
    fn remote_errors_propagate() {
        let provider = RemoteFileProvider::new(Arc::new(FakeBucket {
            fail: true,
            ..Default::default()
        }))
        .unwrap();
        let err = provider
            .list("s3://bucket", &FilePattern::new("*").unwrap())
            .unwrap_err();
        assert!(matches!(err, FileSelectorError::Backend(_)));
        assert!(provider.is_dir("s3://bucket").is_err());
    }

    #[test]
    fn remote_normalize_only_trims_and_collapses_dots() {
        let provider = RemoteFileProvider::new(Arc::new(FakeBucket::default())).unwrap();
        assert_eq!(
            provider.normalize("s3://bucket/data/", None).unwrap(),
            "s3://bucket/data"
        );
        assert_eq!(
            provider.normalize("s3://bucket/data/sub/..", Some("s3://other")).unwrap(),
            "s3://bucket/data"
        );
    }

    #[cfg(unix)]
    #[test]
    fn local_normalize_resolves_dots_and_relative_roots() {
        let provider = LocalFileProvider::with_fs(data_fs());
        assert_eq!(provider.normalize("/data/./sub/..", None).unwrap(), "/data");
        assert_eq!(provider.normalize("/../data", None).unwrap(), "/data");
        assert_eq!(
            provider.normalize("sub/deep", Some("/data/root")).unwrap(),
            "/data/sub/deep"
        );
    }

    #[cfg(unix)]
    #[test]
    fn local_normalize_expands_home() {
        let provider = LocalFileProvider::new();
        if let Some(home) = dirs::home_dir() {
            let expected = lexical_normalize(&home.join("docs"));
            assert_eq!(
                provider.normalize("~/docs", None).unwrap(),
                expected.to_string_lossy()
            );
        }
    }

    #[test]
    fn local_normalize_resolves_relative_paths_against_cwd() {
        let provider = LocalFileProvider::new();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            provider.normalize("missing-child/../also-missing", None).unwrap(),
            cwd.join("also-missing").to_string_lossy()
        );
        assert_eq!(
            provider.normalize(".", None).unwrap(),
            std::fs::canonicalize(&cwd).unwrap().to_string_lossy()
        );
    }

    #[test]
    fn local_list_of_missing_dir_is_empty() {
        let provider = LocalFileProvider::with_fs(data_fs());
        let listing = provider
            .list("/missing", &FilePattern::new("*").unwrap())
            .unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn local_entry_kind_follows_metadata() {
        let provider = LocalFileProvider::with_fs(data_fs());
        assert_eq!(
            provider.entry_kind("/data/sub").unwrap(),
            Some(EntryKind::Folder)
        );
        assert_eq!(
            provider.entry_kind("/data/a.txt").unwrap(),
            Some(EntryKind::File)
        );
        assert_eq!(provider.entry_kind("/data/nope").unwrap(), None);
    }
}
