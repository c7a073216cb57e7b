use indexmap::{IndexMap, IndexSet};

use crate::core::{ASCEND_LABEL, ASCEND_VALUE, EntryKind, Result};
use crate::provider::FileProvider;
use crate::scan::Listing;

/// Selected paths, insertion ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    paths: IndexSet<String>,
    only_files: bool,
}

impl SelectionSet {
    /// Empty selection; `only_files` rejects directories on reconciliation.
    pub fn new(only_files: bool) -> Self {
        Self {
            paths: IndexSet::new(),
            only_files,
        }
    }

    /// Whether only plain files may stay selected.
    pub fn only_files(&self) -> bool {
        self.only_files
    }

    /// Change the files-only rule. Takes effect on the next reconciliation.
    pub fn set_only_files(&mut self, only_files: bool) {
        self.only_files = only_files;
    }

    /// Replace the selection with `values` coming from the UI.
    ///
    /// The ascend pseudo-entry is dropped, as is everything that is not a
    /// plain file when `only_files` is set.
    pub fn reconcile<I, S>(&mut self, values: I, provider: &dyn FileProvider) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = IndexSet::new();
        for value in values {
            let value = value.into();
            if value == ASCEND_VALUE {
                continue;
            }
            if self.only_files && provider.entry_kind(&value)? != Some(EntryKind::File) {
                continue;
            }
            next.insert(value);
        }
        self.paths = next;
        Ok(())
    }

    /// Append selected paths missing from `listing`, classified by what they
    /// resolve to, so they stay visible after the directory changes.
    ///
    /// Paths that no longer exist are left out of the listing but stay
    /// selected.
    pub fn merge_into(&self, listing: &mut Listing, provider: &dyn FileProvider) -> Result<()> {
        for path in &self.paths {
            if listing.dirs.contains(path) || listing.files.contains(path) {
                continue;
            }
            match provider.entry_kind(path)? {
                Some(EntryKind::Folder) => listing.dirs.push(path.clone()),
                Some(EntryKind::File) => listing.files.push(path.clone()),
                None => {}
            }
        }
        Ok(())
    }

    /// Whether `path` is selected.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Selected paths in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Selected paths as an owned list.
    pub fn to_vec(&self) -> Vec<String> {
        self.paths.iter().cloned().collect()
    }

    /// Number of selected paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drop every selected path.
    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

/// Options and denylist recomputed by [`filter_denylist`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DenylistUpdate {
    /// Label -> path options, ascend entry first when present.
    pub options: IndexMap<String, String>,
    /// Labels available but unselected.
    pub denylist: Vec<String>,
}

/// Keep the dual-list options consistent after the unselected side changed.
///
/// `present` holds the labels of the entries physically in the current
/// directory. An option survives when its label is present or its path is
/// selected; the denylist keeps only present labels. The ascend entry leads
/// both lists when `with_ascend` is set.
pub fn filter_denylist(
    options: &IndexMap<String, String>,
    denylist: &[String],
    present: &IndexSet<String>,
    selection: &SelectionSet,
    with_ascend: bool,
) -> DenylistUpdate {
    let mut update = DenylistUpdate::default();
    if with_ascend {
        update
            .options
            .insert(ASCEND_LABEL.to_string(), ASCEND_VALUE.to_string());
        update.denylist.push(ASCEND_LABEL.to_string());
    }
    for (label, path) in options {
        if label == ASCEND_LABEL {
            continue;
        }
        if present.contains(label) || selection.contains(path) {
            update.options.insert(label.clone(), path.clone());
        }
    }
    update.denylist.extend(
        denylist
            .iter()
            .filter(|label| label.as_str() != ASCEND_LABEL && present.contains(*label))
            .cloned(),
    );
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::LocalFileProvider;
    use crate::scan::tests::data_fs;

    fn provider() -> LocalFileProvider<crate::scan::tests::MemFs> {
        LocalFileProvider::with_fs(data_fs())
    }

    #[test]
    fn reconcile_drops_ascend_and_keeps_order() {
        let mut sel = SelectionSet::new(false);
        sel.reconcile(["/data/b.csv", "..", "/data/sub", "/data/a.txt"], &provider())
            .unwrap();
        assert_eq!(sel.to_vec(), vec!["/data/b.csv", "/data/sub", "/data/a.txt"]);
    }

    #[test]
    fn only_files_rejects_directories_and_missing_paths() {
        let mut sel = SelectionSet::new(true);
        sel.reconcile(["/data/sub", "/data/a.txt", "/data/gone.txt"], &provider())
            .unwrap();
        assert_eq!(sel.to_vec(), vec!["/data/a.txt"]);
    }

    #[test]
    fn merge_appends_selected_entries_from_other_directories() {
        let mut sel = SelectionSet::new(false);
        sel.reconcile(["/data/sub/c.txt", "/data/sub/deep", "/data/a.txt"], &provider())
            .unwrap();
        let mut listing = Listing {
            dirs: vec![],
            files: vec!["/data/a.txt".into()],
        };
        sel.merge_into(&mut listing, &provider()).unwrap();
        assert_eq!(listing.dirs, vec!["/data/sub/deep"]);
        assert_eq!(listing.files, vec!["/data/a.txt", "/data/sub/c.txt"]);
    }

    #[test]
    fn denylist_filter_keeps_selected_absent_entries() {
        let mut sel = SelectionSet::new(false);
        sel.reconcile(["/data/sub/c.txt"], &provider()).unwrap();

        let options: IndexMap<String, String> = [
            (ASCEND_LABEL, ".."),
            ("a.txt", "/data/a.txt"),
            ("sub/c.txt", "/data/sub/c.txt"),
            ("old.txt", "/data/old.txt"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let present: IndexSet<String> = ["a.txt".to_string()].into_iter().collect();
        let denylist = vec![
            ASCEND_LABEL.to_string(),
            "a.txt".to_string(),
            "old.txt".to_string(),
        ];

        let update = filter_denylist(&options, &denylist, &present, &sel, true);
        assert_eq!(
            update.options.keys().collect::<Vec<_>>(),
            vec![ASCEND_LABEL, "a.txt", "sub/c.txt"]
        );
        assert_eq!(update.denylist, vec![ASCEND_LABEL, "a.txt"]);

        let at_root = filter_denylist(&options, &denylist, &present, &sel, false);
        assert!(!at_root.options.contains_key(ASCEND_LABEL));
        assert_eq!(at_root.denylist, vec!["a.txt"]);
    }
}
