use std::fs;
use std::path::Path;

use file_selector::{Backend, Children, EntryKind, FileTree, TreeConfig};
use tempfile::TempDir;

fn data_dir() -> (TempDir, String) {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(data.join("sub").join("deep")).unwrap();
    fs::create_dir_all(data.join(".git")).unwrap();
    fs::write(data.join("a.txt"), b"a").unwrap();
    fs::write(data.join("sub").join("c.txt"), b"c").unwrap();
    fs::write(data.join("sub").join("deep").join("d.txt"), b"d").unwrap();
    let data = data.to_string_lossy().to_string();
    (tmp, data)
}

fn join(base: &str, rel: &str) -> String {
    Path::new(base).join(rel).to_string_lossy().to_string()
}

#[test]
fn depth_cap_disables_folders_at_the_limit() {
    let (_tmp, data) = data_dir();
    let cfg = TreeConfig::new().directory(&data).max_depth(1);
    let tree = FileTree::new(cfg, Backend::Local).unwrap();

    let sub = tree.node(&join(&data, "sub")).unwrap();
    assert!(sub.disabled);
    assert_eq!(sub.children, Children::Expanded(Vec::new()));
    assert!(tree.node(&join(&data, "sub/deep")).is_none());
    assert!(tree.node(&join(&data, ".git")).is_none());
}

#[test]
fn index_mirrors_the_node_tree() {
    let (_tmp, data) = data_dir();
    let mut tree = FileTree::new(TreeConfig::new().directory(&data), Backend::Local).unwrap();
    let deep = join(&data, "sub/deep");
    assert_eq!(tree.index()[&deep].children, None);

    tree.expand_to_depth(&deep, 2).unwrap();
    let info = &tree.index()[&join(&data, "sub/deep/d.txt")];
    assert_eq!(info.kind, EntryKind::File);
    assert_eq!(info.parent.as_deref(), Some(deep.as_str()));

    for (id, info) in tree.index() {
        for child in info.children.iter().flatten() {
            assert_eq!(tree.index()[child].parent.as_deref(), Some(id.as_str()));
        }
    }
}

#[test]
fn directory_change_rebuilds_the_index() {
    let (_tmp, data) = data_dir();
    let mut tree = FileTree::new(TreeConfig::new().directory(&data), Backend::Local).unwrap();
    tree.set_directory(&join(&data, "sub")).unwrap();
    assert_eq!(tree.root().label, "sub");
    assert!(!tree.index().contains_key(&join(&data, "a.txt")));
    assert!(tree.index().contains_key(&join(&data, "sub/deep/d.txt")));
}

#[test]
fn only_files_value_keeps_file_nodes() {
    let (_tmp, data) = data_dir();
    let cfg = TreeConfig::new().directory(&data).only_files(true);
    let mut tree = FileTree::new(cfg, Backend::Local).unwrap();
    tree.set_value([join(&data, "sub"), join(&data, "a.txt")]);
    assert_eq!(tree.value(), [join(&data, "a.txt")]);
}
