use std::collections::BTreeMap;

use file_selector::{
    Backend, BackendError, FileSelectorError, Navigator, RemoteCapabilities, RemoteEntry,
    RemoteFileSystem, SelectorConfig,
};

/// Object store keyed by `bucket/key`; directories are implicit prefixes.
struct MemoryBucket {
    objects: BTreeMap<String, Vec<u8>>,
}

impl MemoryBucket {
    fn new(keys: &[&str]) -> Self {
        Self {
            objects: keys.iter().map(|k| (k.to_string(), Vec::new())).collect(),
        }
    }

    fn strip(path: &str) -> &str {
        let path = path.strip_prefix("mem://").unwrap_or(path);
        path.trim_end_matches('/')
    }
}

impl RemoteFileSystem for MemoryBucket {
    fn ls(&self, path: &str) -> Result<Vec<RemoteEntry>, BackendError> {
        let prefix = format!("{}/", Self::strip(path));
        let mut out: Vec<RemoteEntry> = Vec::new();
        for key in self.objects.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    let entry = RemoteEntry::directory(format!("{prefix}{dir}/"));
                    if !out.contains(&entry) {
                        out.push(entry);
                    }
                }
                None => out.push(RemoteEntry::file(key.clone())),
            }
        }
        Ok(out)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<RemoteEntry>, BackendError> {
        let pattern = Self::strip(pattern);
        let (dir, suffix) = pattern
            .rsplit_once("/*")
            .ok_or_else(|| BackendError::from(format!("unsupported glob {pattern}")))?;
        Ok(self
            .ls(dir)?
            .into_iter()
            .filter(|e| e.name.ends_with(suffix))
            .collect())
    }

    fn isdir(&self, path: &str) -> Result<bool, BackendError> {
        let prefix = format!("{}/", Self::strip(path));
        Ok(self.objects.keys().any(|k| k.starts_with(&prefix)))
    }
}

struct ReadOnlyIndex;

impl RemoteFileSystem for ReadOnlyIndex {
    fn capabilities(&self) -> RemoteCapabilities {
        RemoteCapabilities::DETAIL_LIST
    }

    fn ls(&self, _path: &str) -> Result<Vec<RemoteEntry>, BackendError> {
        Ok(Vec::new())
    }

    fn glob(&self, _pattern: &str) -> Result<Vec<RemoteEntry>, BackendError> {
        Err("no glob".into())
    }

    fn isdir(&self, _path: &str) -> Result<bool, BackendError> {
        Err("no isdir".into())
    }
}

fn bucket() -> Backend {
    Backend::remote(MemoryBucket::new(&[
        "bucket/data/a.csv",
        "bucket/data/b.txt",
        "bucket/data/sub/c.csv",
    ]))
}

#[test]
fn remote_listing_uses_scheme_prefixed_paths() {
    let cfg = SelectorConfig::new()
        .directory("mem://bucket/data/")
        .file_pattern("*.csv");
    let mut nav = Navigator::new(cfg, bucket()).unwrap();
    assert_eq!(nav.current_directory(), Some("mem://bucket/data"));
    assert_eq!(
        nav.view().options.keys().collect::<Vec<_>>(),
        vec!["📁sub", "a.csv"]
    );
    assert!(nav.fs().is_some());

    nav.double_click("📁sub").unwrap();
    assert_eq!(nav.current_directory(), Some("mem://bucket/data/sub"));
    assert_eq!(
        nav.view().path_for_label("c.csv"),
        Some("mem://bucket/data/sub/c.csv")
    );
    nav.up().unwrap();
    assert_eq!(nav.current_directory(), Some("mem://bucket/data"));
}

#[test]
fn clients_without_glob_are_rejected() {
    let err = Navigator::new(SelectorConfig::new(), Backend::remote(ReadOnlyIndex)).unwrap_err();
    match err {
        FileSelectorError::UnsupportedFilesystem { type_name } => {
            assert!(type_name.ends_with("ReadOnlyIndex"), "{type_name}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
