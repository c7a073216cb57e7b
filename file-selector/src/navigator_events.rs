/// Domain events for driving a [`Navigator`](crate::Navigator).
///
/// These are emitted by the presentation layer (button presses, text input,
/// list interactions) and handled by [`Navigator::handle_event`](crate::Navigator::handle_event).
/// Keeping them free of widget types keeps the navigator testable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigatorEvent {
    /// The directory input field changed.
    DirectoryInput(String),
    /// "Go" pressed: list the pending directory.
    Go,
    /// "Reload" pressed.
    Reload,
    /// Periodic refresh tick.
    Refresh,
    /// "Back" pressed.
    Back,
    /// "Forward" pressed.
    Forward,
    /// "Up" pressed.
    Up,
    /// An entry label was double-clicked.
    DoubleClick(String),
    /// The highlighted labels of the unselected list changed.
    CandidatesChanged(Vec<String>),
    /// The selected paths changed.
    ValueChanged(Vec<String>),
    /// The unselected list's options changed.
    DenylistChanged,
    /// Toggle dotfiles.
    SetShowHidden(bool),
    /// Replace the file glob.
    SetFilePattern(String),
    /// Restrict the selection to plain files.
    SetOnlyFiles(bool),
}
