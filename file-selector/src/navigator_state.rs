use indexmap::IndexMap;

use crate::history::NavigationHistory;

/// Canonical navigation state owned by a [`Navigator`](crate::Navigator).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Directory currently listed (`None` until a directory was listed).
    pub current_directory: Option<String>,
    /// Visited directories.
    pub history: NavigationHistory,
    /// Navigation floor; nothing above it can be reached.
    pub root_directory: String,
}

/// Enabled state of the navigation buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavControls {
    /// "Back" can be pressed.
    pub back: bool,
    /// "Forward" can be pressed.
    pub forward: bool,
    /// "Up" can be pressed.
    pub up: bool,
    /// "Go" can be pressed (pending input differs from the listed directory).
    pub go: bool,
}

/// Everything a presentation layer needs to draw the selector.
///
/// The navigator rebuilds this after every operation; hosts read it and never
/// write it back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectorView {
    /// Text of the directory input field.
    pub directory_input: String,
    /// Label -> path options of the dual list, in display order.
    pub options: IndexMap<String, String>,
    /// Selected paths.
    pub value: Vec<String>,
    /// Labels available but unselected.
    pub denylist: Vec<String>,
    /// The list is disabled (invalid directory entered).
    pub disabled: bool,
    /// Rows shown at once.
    pub size: usize,
    /// Navigation buttons.
    pub controls: NavControls,
}

impl SelectorView {
    /// Path behind a displayed label.
    pub fn path_for_label(&self, label: &str) -> Option<&str> {
        self.options.get(label).map(String::as_str)
    }

    /// Label displayed for a path.
    pub fn label_for_path(&self, path: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(_, p)| p.as_str() == path)
            .map(|(label, _)| label.as_str())
    }
}
