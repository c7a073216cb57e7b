use indexmap::{IndexMap, IndexSet};

use crate::config::TreeConfig;
use crate::core::{EntryKind, FileSelectorError, Result};
use crate::path_util;
use crate::provider::{Backend, FileProvider};
use crate::scan::FilePattern;

/// Expansion state of a tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Children {
    /// The folder was never listed.
    NotExpanded,
    /// The folder was listed (possibly empty). File leaves are always
    /// `Expanded` with no children.
    Expanded(Vec<TreeNode>),
}

impl Children {
    /// Child nodes, `None` while not expanded.
    pub fn nodes(&self) -> Option<&[TreeNode]> {
        match self {
            Children::NotExpanded => None,
            Children::Expanded(nodes) => Some(nodes),
        }
    }

    /// Whether the node was listed.
    pub fn is_expanded(&self) -> bool {
        matches!(self, Children::Expanded(_))
    }
}

/// One file or folder of a [`FileTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeNode {
    /// Normalized path; unique within a tree.
    pub id: String,
    /// Basename.
    pub label: String,
    /// File or folder.
    pub kind: EntryKind,
    /// Id of the parent folder (`None` for the root).
    pub parent: Option<String>,
    /// Expansion state.
    pub children: Children,
    /// Below the depth cap; shown but not expandable.
    pub disabled: bool,
}

impl TreeNode {
    fn file(id: String, parent: &str) -> Self {
        Self {
            label: path_util::file_name(&id).to_string(),
            id,
            kind: EntryKind::File,
            parent: Some(parent.to_string()),
            children: Children::Expanded(Vec::new()),
            disabled: false,
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        if self.id == id {
            return Some(self);
        }
        if !path_util::is_within(id, &self.id) {
            return None;
        }
        match &mut self.children {
            Children::Expanded(nodes) => nodes.iter_mut().find_map(|n| n.find_mut(id)),
            Children::NotExpanded => None,
        }
    }

    fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        if !path_util::is_within(id, &self.id) {
            return None;
        }
        self.children
            .nodes()?
            .iter()
            .find_map(|n| n.find(id))
    }
}

/// Flat index entry of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeInfo {
    /// File or folder.
    pub kind: EntryKind,
    /// Parent id.
    pub parent: Option<String>,
    /// Child ids, `None` while not expanded.
    pub children: Option<Vec<String>>,
}

/// Hierarchical view over a directory with lazy expansion and an optional
/// depth cap.
///
/// The root is listed eagerly one level deep; deeper folders are listed on
/// [`expand`](Self::expand). Folders at or below `max_depth` are disabled and
/// never listed.
pub struct FileTree {
    provider: Box<dyn FileProvider>,
    pattern: FilePattern,
    config: TreeConfig,
    directory: String,
    root_directory: String,
    root: TreeNode,
    index: IndexMap<String, NodeInfo>,
    value: Vec<String>,
}

impl std::fmt::Debug for FileTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTree")
            .field("directory", &self.directory)
            .field("root_directory", &self.root_directory)
            .field("nodes", &self.index.len())
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl FileTree {
    /// Build a tree over `config.directory`.
    pub fn new(config: TreeConfig, backend: Backend) -> Result<Self> {
        let provider = backend.into_provider()?;
        Self::with_provider(config, provider)
    }

    /// Build a tree over an already constructed provider.
    pub fn with_provider(config: TreeConfig, provider: Box<dyn FileProvider>) -> Result<Self> {
        let directory = match config.directory.as_deref() {
            Some(dir) => provider.normalize(dir, None)?,
            None => std::env::current_dir()?.to_string_lossy().to_string(),
        };
        let root_directory = match config.root_directory.as_deref() {
            Some(root) => provider.normalize(root, None)?,
            None => directory.clone(),
        };
        let directory = if path_util::is_within(&directory, &root_directory) {
            directory
        } else {
            root_directory.clone()
        };
        let pattern = FilePattern::new(config.file_pattern.as_str())?;
        let mut tree = Self {
            provider,
            pattern,
            config,
            root: placeholder(&directory),
            directory,
            root_directory,
            index: IndexMap::new(),
            value: Vec::new(),
        };
        tree.rebuild()?;
        Ok(tree)
    }

    /// Point the tree at another directory, rebuilding every node. The
    /// directory is clamped to the root directory.
    pub fn set_directory(&mut self, directory: &str) -> Result<()> {
        let normalized = self.provider.normalize(directory, None)?;
        self.directory = if path_util::is_within(&normalized, &self.root_directory) {
            normalized
        } else {
            self.root_directory.clone()
        };
        self.rebuild()
    }

    /// List a folder node's children one level deep.
    pub fn expand(&mut self, id: &str) -> Result<()> {
        self.expand_with_skip(id, 0, &[])
    }

    /// List a folder node and eagerly expand `depth` further levels.
    pub fn expand_to_depth(&mut self, id: &str, depth: usize) -> Result<()> {
        self.expand_with_skip(id, depth, &[])
    }

    /// List a folder node, leaving out the child ids in `skip`.
    pub fn expand_with_skip(&mut self, id: &str, depth: usize, skip: &[String]) -> Result<()> {
        let kind = self.kind_of(id)?;
        if kind != EntryKind::Folder {
            return Err(FileSelectorError::NotADirectory(id.to_string()));
        }
        let children = self.children_of(id, depth, skip)?;
        let disabled = self.exceeds(id);
        let node = self
            .root
            .find_mut(id)
            .ok_or_else(|| FileSelectorError::UnknownNode(id.to_string()))?;
        node.children = Children::Expanded(children);
        node.disabled = disabled;
        self.reindex();
        trace_expanded(id, depth, self.index.len());
        Ok(())
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Node lookup by id.
    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.root.find(id)
    }

    /// Flat id -> node metadata index, in depth-first order.
    pub fn index(&self) -> &IndexMap<String, NodeInfo> {
        &self.index
    }

    /// The directory shown at the root.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// The navigation floor.
    pub fn root_directory(&self) -> &str {
        &self.root_directory
    }

    /// Replace the selected node ids. With `only_files`, ids not indexed as
    /// files are dropped.
    pub fn set_value<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: IndexSet<String> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| {
                !self.config.only_files
                    || self.index.get(id).map(|n| n.kind) == Some(EntryKind::File)
            })
            .collect();
        self.value = ids.into_iter().collect();
    }

    /// Selected node ids.
    pub fn value(&self) -> &[String] {
        &self.value
    }

    fn rebuild(&mut self) -> Result<()> {
        let mut root = placeholder(&self.directory);
        root.children = Children::Expanded(self.children_of(&self.directory, 1, &[])?);
        self.root = root;
        self.reindex();
        trace_rebuilt(&self.directory, self.index.len());
        Ok(())
    }

    fn kind_of(&self, id: &str) -> Result<EntryKind> {
        self.index
            .get(id)
            .map(|n| n.kind)
            .ok_or_else(|| FileSelectorError::UnknownNode(id.to_string()))
    }

    fn exceeds(&self, path: &str) -> bool {
        self.config.max_depth > 0
            && path_util::depth_below(path, &self.directory) >= self.config.max_depth
    }

    /// Children of `dir`; subfolders are listed while `depth` lasts.
    fn children_of(&self, dir: &str, depth: usize, skip: &[String]) -> Result<Vec<TreeNode>> {
        if self.exceeds(dir) {
            return Ok(Vec::new());
        }
        let listing = self.provider.list(dir, &self.pattern)?;
        let keep = |p: &String| !path_util::is_hidden(p) && !skip.contains(p);
        let mut dirs: Vec<String> = listing.dirs.into_iter().filter(keep).collect();
        let mut files: Vec<String> = listing.files.into_iter().filter(keep).collect();
        if self.config.sort {
            dirs.sort();
            files.sort();
        }

        let mut nodes = Vec::with_capacity(dirs.len() + files.len());
        for sub in dirs {
            let disabled = self.exceeds(&sub);
            let children = if disabled {
                Children::Expanded(Vec::new())
            } else if depth > 0 {
                Children::Expanded(self.children_of(&sub, depth - 1, &[])?)
            } else {
                Children::NotExpanded
            };
            nodes.push(TreeNode {
                label: path_util::file_name(&sub).to_string(),
                id: sub,
                kind: EntryKind::Folder,
                parent: Some(dir.to_string()),
                children,
                disabled,
            });
        }
        nodes.extend(files.into_iter().map(|f| TreeNode::file(f, dir)));
        Ok(nodes)
    }

    fn reindex(&mut self) {
        fn walk(node: &TreeNode, index: &mut IndexMap<String, NodeInfo>) {
            index.insert(
                node.id.clone(),
                NodeInfo {
                    kind: node.kind,
                    parent: node.parent.clone(),
                    children: node
                        .children
                        .nodes()
                        .map(|nodes| nodes.iter().map(|n| n.id.clone()).collect()),
                },
            );
            if let Some(nodes) = node.children.nodes() {
                for child in nodes {
                    walk(child, index);
                }
            }
        }
        let mut index = IndexMap::with_capacity(self.index.len());
        walk(&self.root, &mut index);
        self.index = index;
    }
}

fn placeholder(directory: &str) -> TreeNode {
    let label = match path_util::file_name(directory) {
        "" => directory,
        name => name,
    };
    TreeNode {
        id: directory.to_string(),
        label: label.to_string(),
        kind: EntryKind::Folder,
        parent: None,
        children: Children::NotExpanded,
        disabled: false,
    }
}

#[cfg(feature = "tracing")]
fn trace_rebuilt(directory: &str, nodes: usize) {
    tracing::debug!(event = "tree.rebuilt", directory, nodes, "tree rebuilt");
}

#[cfg(not(feature = "tracing"))]
fn trace_rebuilt(_directory: &str, _nodes: usize) {}

#[cfg(feature = "tracing")]
fn trace_expanded(id: &str, depth: usize, nodes: usize) {
    tracing::trace!(event = "tree.expanded", id, depth, nodes, "node expanded");
}

#[cfg(not(feature = "tracing"))]
fn trace_expanded(_id: &str, _depth: usize, _nodes: usize) {}
