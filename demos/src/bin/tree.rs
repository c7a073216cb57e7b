//! Print a directory as a tree.
//!
//! Usage: `tree [DIRECTORY] [MAX_DEPTH] [PATTERN]`. Folders that were not
//! listed yet are expanded on the fly.

use std::io::{self, Write};

use file_selector::{Backend, Children, FileTree, TreeConfig, TreeNode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    file_selector_demos::init_tracing();

    let mut args = std::env::args().skip(1);
    let mut config = TreeConfig::new();
    if let Some(dir) = args.next() {
        config = config.directory(dir);
    }
    if let Some(depth) = args.next() {
        config = config.max_depth(depth.parse()?);
    }
    if let Some(pattern) = args.next() {
        config = config.file_pattern(pattern);
    }
    let unlimited = config.max_depth == 0;

    let mut tree = FileTree::new(config, Backend::Local)?;
    if !unlimited {
        let pending: Vec<String> = tree
            .index()
            .iter()
            .filter(|(_, info)| info.children.is_none())
            .map(|(id, _)| id.clone())
            .collect();
        for id in pending {
            tree.expand_to_depth(&id, usize::MAX)?;
        }
    }
    tracing::info!(nodes = tree.index().len(), "tree indexed");

    let mut out = io::stdout().lock();
    print_node(&mut out, tree.root(), 0)?;
    Ok(())
}

fn print_node(out: &mut impl Write, node: &TreeNode, level: usize) -> io::Result<()> {
    let suffix = match (&node.children, node.kind.is_folder()) {
        (_, false) => "",
        (_, true) if node.disabled => "/ (depth limit)",
        (Children::NotExpanded, true) => "/ ...",
        (Children::Expanded(_), true) => "/",
    };
    writeln!(out, "{:indent$}{}{suffix}", "", node.label, indent = level * 2)?;
    if let Some(children) = node.children.nodes() {
        for child in children {
            print_node(out, child, level + 1)?;
        }
    }
    Ok(())
}
