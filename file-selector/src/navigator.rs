use std::sync::Arc;
use std::time::Duration;

use indexmap::{IndexMap, IndexSet};

use crate::config::SelectorConfig;
use crate::core::{ASCEND_LABEL, ASCEND_VALUE, FOLDER_MARKER, INVALID_PATH_OPTION, Result};
use crate::fs::RemoteFileSystem;
use crate::navigator_events::NavigatorEvent;
use crate::navigator_state::{NavControls, NavigationState, SelectorView};
use crate::path_util;
use crate::provider::{Backend, FileProvider};
use crate::refresh::{RefreshScheduler, RefreshTimer};
use crate::scan::{FilePattern, Listing};
use crate::selection::{SelectionSet, filter_denylist};

/// Direction of a history move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Back,
    Forward,
}

/// How a commit treats the history and the pending input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommitKind {
    /// Fresh navigation: validate the input and record it.
    Navigate,
    /// Validate the input without recording it (back/forward, file clicks).
    Revisit,
    /// Re-list the current directory as is.
    Refresh,
}

impl CommitKind {
    #[cfg(feature = "tracing")]
    fn as_str(self) -> &'static str {
        match self {
            CommitKind::Navigate => "navigate",
            CommitKind::Revisit => "revisit",
            CommitKind::Refresh => "refresh",
        }
    }
}

/// Stateful directory browser with back/forward/up history and a dual-list
/// selection.
///
/// Every operation runs to completion and then exposes the derived
/// [`SelectorView`].
///
/// Examples
/// ```no_run
/// use file_selector::{Backend, Navigator, SelectorConfig};
///
/// let cfg = SelectorConfig::new().directory("~").file_pattern("*.png");
/// let mut nav = Navigator::new(cfg, Backend::Local)?;
/// nav.double_click("📁Pictures")?;
/// for (label, path) in &nav.view().options {
///     println!("{label} -> {path}");
/// }
/// # Ok::<(), file_selector::FileSelectorError>(())
/// ```
pub struct Navigator {
    provider: Box<dyn FileProvider>,
    pattern: FilePattern,
    show_hidden: bool,
    state: NavigationState,
    selection: SelectionSet,
    view: SelectorView,
    refresh: RefreshTimer,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("pattern", &self.pattern.as_str())
            .field("show_hidden", &self.show_hidden)
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Build a navigator and list its start directory.
    ///
    /// Fails when the backend is unsupported, the pattern does not compile or
    /// the backend errors while listing. An invalid start directory is not an
    /// error: the view shows the invalid-path state instead.
    pub fn new(config: SelectorConfig, backend: Backend) -> Result<Self> {
        let provider = backend.into_provider()?;
        Self::with_provider(config, provider)
    }

    /// Build a navigator over an already constructed provider.
    pub fn with_provider(config: SelectorConfig, provider: Box<dyn FileProvider>) -> Result<Self> {
        let start = match config.directory.as_deref() {
            Some(dir) => provider.normalize(dir, None)?,
            None => std::env::current_dir()?.to_string_lossy().to_string(),
        };
        let root_directory = match config.root_directory.as_deref() {
            Some(root) => provider.normalize(root, None)?,
            None => start.clone(),
        };
        let start = if path_util::is_within(&start, &root_directory) {
            start
        } else {
            root_directory.clone()
        };
        let pattern = FilePattern::new(config.file_pattern)?;

        let mut nav = Self {
            provider,
            pattern,
            show_hidden: config.show_hidden,
            state: NavigationState {
                current_directory: None,
                history: Default::default(),
                root_directory,
            },
            selection: SelectionSet::new(config.only_files),
            view: SelectorView {
                directory_input: start,
                size: config.size,
                ..Default::default()
            },
            refresh: RefreshTimer::new(config.refresh_period),
        };
        nav.commit(CommitKind::Navigate)?;
        Ok(nav)
    }

    /// Apply one event.
    pub fn handle_event(&mut self, event: NavigatorEvent) -> Result<()> {
        match event {
            NavigatorEvent::DirectoryInput(raw) => self.set_directory_input(&raw),
            NavigatorEvent::Go => self.go(),
            NavigatorEvent::Reload | NavigatorEvent::Refresh => self.refresh(),
            NavigatorEvent::Back => self.back(),
            NavigatorEvent::Forward => self.forward(),
            NavigatorEvent::Up => self.up(),
            NavigatorEvent::DoubleClick(label) => self.double_click(&label),
            NavigatorEvent::CandidatesChanged(labels) => self.set_candidates(&labels),
            NavigatorEvent::ValueChanged(values) => self.set_value(values),
            NavigatorEvent::DenylistChanged => self.filter_denylist(),
            NavigatorEvent::SetShowHidden(v) => self.set_show_hidden(v),
            NavigatorEvent::SetFilePattern(p) => self.set_file_pattern(&p),
            NavigatorEvent::SetOnlyFiles(v) => self.set_only_files(v),
        }
    }

    /// The derived view state.
    pub fn view(&self) -> &SelectorView {
        &self.view
    }

    /// The canonical navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Selected paths, in selection order.
    pub fn value(&self) -> &[String] {
        &self.view.value
    }

    /// The directory currently listed.
    pub fn current_directory(&self) -> Option<&str> {
        self.state.current_directory.as_deref()
    }

    /// The navigation floor.
    pub fn root_directory(&self) -> &str {
        &self.state.root_directory
    }

    /// The remote client, when browsing a remote backend.
    pub fn fs(&self) -> Option<&Arc<dyn RemoteFileSystem>> {
        self.provider.remote()
    }

    /// The active file glob.
    pub fn file_pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Update the pending directory input.
    ///
    /// The input is normalized and clamped to the root directory; nothing is
    /// listed until [`go`](Self::go).
    pub fn set_directory_input(&mut self, raw: &str) -> Result<()> {
        let normalized = self.provider.normalize(raw, None)?;
        let path = self.clamp_to_root(normalized);
        self.view.controls.go = self.state.current_directory.as_deref() != Some(path.as_str());
        self.view.directory_input = path;
        Ok(())
    }

    /// List the pending directory, recording it in the history.
    pub fn go(&mut self) -> Result<()> {
        self.commit(CommitKind::Navigate)
    }

    /// Re-list the current directory without touching the history. Used by
    /// the reload button and by periodic refresh ticks.
    pub fn refresh(&mut self) -> Result<()> {
        self.commit(CommitKind::Refresh)
    }

    /// Go back one history entry.
    pub fn back(&mut self) -> Result<()> {
        self.revisit(Step::Back)
    }

    /// Go forward one history entry.
    pub fn forward(&mut self) -> Result<()> {
        self.revisit(Step::Forward)
    }

    /// Go to the parent of the current directory. No-op at the root.
    pub fn up(&mut self) -> Result<()> {
        let Some(cwd) = self.state.current_directory.as_deref() else {
            return Ok(());
        };
        if self.is_at_root(cwd) {
            return Ok(());
        }
        let parent = path_util::parent(cwd);
        self.view.directory_input = self.clamp_to_root(parent);
        self.commit(CommitKind::Navigate)
    }

    /// Handle a double-click on a displayed label.
    ///
    /// The ascend entry goes up, a directory is entered, a file only re-lists
    /// the current directory.
    pub fn double_click(&mut self, label: &str) -> Result<()> {
        let relpath = path_util::strip_markers(label);
        if relpath == ASCEND_VALUE {
            return self.up();
        }
        let Some(target) = self.resolve_label(&relpath)? else {
            return Ok(());
        };
        if self.provider.is_dir(&target)? {
            self.set_directory_input(&target)?;
            self.commit(CommitKind::Navigate)
        } else {
            self.reset_input_to_cwd();
            self.commit(CommitKind::Revisit)
        }
    }

    /// Handle a change of the highlighted (not yet selected) labels.
    ///
    /// A single highlighted directory becomes the pending input; anything
    /// else resets the input to the current directory.
    pub fn set_candidates(&mut self, labels: &[String]) -> Result<()> {
        let target = match labels {
            [label] => self.resolve_label(&path_util::strip_markers(label))?,
            _ => None,
        };
        match target {
            Some(target) if self.provider.is_dir(&target)? => self.set_directory_input(&target),
            _ => {
                self.reset_input_to_cwd();
                Ok(())
            }
        }
    }

    /// Replace the selection with values coming from the UI.
    pub fn set_value<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.reconcile(values, &*self.provider)?;
        self.view.value = self.selection.to_vec();
        self.view.denylist = self.unselected_labels();
        trace_selection_changed(self.selection.len());
        Ok(())
    }

    /// Toggle the files-only rule; the current selection is reconciled
    /// against it right away.
    pub fn set_only_files(&mut self, only_files: bool) -> Result<()> {
        if self.selection.only_files() == only_files {
            return Ok(());
        }
        self.selection.set_only_files(only_files);
        let current: Vec<String> = self.selection.iter().map(str::to_string).collect();
        self.set_value(current)
    }

    /// Drop the whole selection.
    pub fn clear_value(&mut self) {
        self.selection.clear();
        self.view.value.clear();
        self.view.denylist = self.unselected_labels();
    }

    /// Recompute options and denylist after the unselected list changed.
    ///
    /// Options neither present in the current directory nor selected are
    /// dropped; selected entries from other directories stay.
    pub fn filter_denylist(&mut self) -> Result<()> {
        let Some(cwd) = self.state.current_directory.clone() else {
            return Ok(());
        };
        let listing = self.provider.list(&cwd, &self.pattern)?;
        let present: IndexSet<String> = listing
            .dirs
            .iter()
            .map(|d| format!("{FOLDER_MARKER}{}", path_util::relative_to(d, &cwd)))
            .chain(listing.files.iter().map(|f| path_util::relative_to(f, &cwd)))
            .collect();
        let update = filter_denylist(
            &self.view.options,
            &self.view.denylist,
            &present,
            &self.selection,
            !self.is_at_root(&cwd),
        );
        self.view.options = update.options;
        self.view.denylist = update.denylist;
        Ok(())
    }

    /// Toggle dotfiles and re-list.
    pub fn set_show_hidden(&mut self, show_hidden: bool) -> Result<()> {
        if self.show_hidden == show_hidden {
            return Ok(());
        }
        self.show_hidden = show_hidden;
        self.refresh()
    }

    /// Replace the file glob and re-list.
    pub fn set_file_pattern(&mut self, pattern: &str) -> Result<()> {
        if self.pattern.as_str() == pattern {
            return Ok(());
        }
        self.pattern = FilePattern::new(pattern)?;
        self.refresh()
    }

    /// Change the periodic refresh interval (`None`/zero stops it).
    pub fn set_refresh_period(&mut self, period: Option<Duration>) {
        self.refresh.set_period(period);
    }

    /// The periodic refresh interval.
    pub fn refresh_period(&self) -> Option<Duration> {
        self.refresh.period()
    }

    /// Attach the host timer driving [`refresh`](Self::refresh). It is started
    /// right away when a period is configured.
    pub fn attach_scheduler(
        &mut self,
        scheduler: Box<dyn RefreshScheduler>,
    ) -> Option<Box<dyn RefreshScheduler>> {
        self.refresh.attach(scheduler)
    }

    /// Detach (and stop) the host timer.
    pub fn detach_scheduler(&mut self) -> Option<Box<dyn RefreshScheduler>> {
        self.refresh.detach()
    }

    /// Move the history cursor and list its entry. The cursor is put back
    /// when the entry is no longer a directory.
    fn revisit(&mut self, step: Step) -> Result<()> {
        let moved = match step {
            Step::Back => self.state.history.back(),
            Step::Forward => self.state.history.forward(),
        };
        let Some(target) = moved.map(str::to_string) else {
            return Ok(());
        };
        let valid = self.provider.is_dir(&target);
        if !matches!(valid, Ok(true)) {
            match step {
                Step::Back => self.state.history.forward(),
                Step::Forward => self.state.history.back(),
            };
        }
        if !valid? {
            self.view.directory_input = target.clone();
            self.show_invalid_path(&target);
            return Ok(());
        }
        self.view.directory_input = target;
        self.commit(CommitKind::Revisit)
    }

    fn commit(&mut self, kind: CommitKind) -> Result<()> {
        let path = match kind {
            CommitKind::Refresh => match self.state.current_directory.clone() {
                Some(cwd) => cwd,
                None => return Ok(()),
            },
            CommitKind::Navigate | CommitKind::Revisit => {
                let normalized = self.provider.normalize(&self.view.directory_input, None)?;
                let path = self.clamp_to_root(normalized);
                if !self.provider.is_dir(&path)? {
                    self.show_invalid_path(&path);
                    return Ok(());
                }
                if kind == CommitKind::Navigate {
                    self.state.history.push(path.clone());
                }
                self.view.directory_input = path.clone();
                self.view.controls.go = false;
                path
            }
        };

        self.state.current_directory = Some(path.clone());
        self.view.disabled = false;
        self.view.controls = NavControls {
            back: self.state.history.can_go_back(),
            forward: self.state.history.can_go_forward(),
            up: !self.is_at_root(&path),
            go: self.view.controls.go,
        };
        self.relist(&path)?;
        trace_commit(kind, &path, self.view.options.len());
        Ok(())
    }

    fn relist(&mut self, cwd: &str) -> Result<()> {
        let mut listing = self.provider.list(cwd, &self.pattern)?;
        self.selection.merge_into(&mut listing, &*self.provider)?;
        self.view.options = build_options(listing, cwd, self.show_hidden, self.view.controls.up);
        self.view.value = self.selection.to_vec();
        self.view.denylist = self.unselected_labels();
        Ok(())
    }

    fn show_invalid_path(&mut self, path: &str) {
        let mut options = IndexMap::new();
        options.insert(
            INVALID_PATH_OPTION.to_string(),
            INVALID_PATH_OPTION.to_string(),
        );
        self.view.options = options;
        self.view.denylist = vec![INVALID_PATH_OPTION.to_string()];
        self.view.disabled = true;
        trace_invalid_path(path);
    }

    fn unselected_labels(&self) -> Vec<String> {
        self.view
            .options
            .iter()
            .filter(|(_, path)| !self.selection.contains(path))
            .map(|(label, _)| label.clone())
            .collect()
    }

    fn resolve_label(&self, relpath: &str) -> Result<Option<String>> {
        let Some(cwd) = self.state.current_directory.as_deref() else {
            return Ok(None);
        };
        let joined = path_util::join(cwd, relpath);
        Ok(Some(self.provider.normalize(&joined, None)?))
    }

    fn reset_input_to_cwd(&mut self) {
        if let Some(cwd) = self.state.current_directory.clone() {
            self.view.directory_input = cwd;
        }
        self.view.controls.go = false;
    }

    fn clamp_to_root(&self, path: String) -> String {
        if path_util::is_within(&path, &self.state.root_directory) {
            path
        } else {
            trace_clamped(&path, &self.state.root_directory);
            self.state.root_directory.clone()
        }
    }

    fn is_at_root(&self, path: &str) -> bool {
        path_util::trim_trailing_sep(path) == path_util::trim_trailing_sep(&self.state.root_directory)
    }
}

/// Turn a listing into display options: dotfiles dropped unless requested,
/// directories then files (each sorted, deduplicated), ascend entry first
/// when `with_ascend`.
fn build_options(
    listing: Listing,
    cwd: &str,
    show_hidden: bool,
    with_ascend: bool,
) -> IndexMap<String, String> {
    let Listing {
        mut dirs,
        mut files,
    } = listing;
    dirs.sort();
    dirs.dedup();
    files.sort();
    files.dedup();

    let visible = |p: &String| show_hidden || !path_util::is_hidden(p);
    let mut options = IndexMap::new();
    if with_ascend {
        options.insert(ASCEND_LABEL.to_string(), ASCEND_VALUE.to_string());
    }
    for dir in dirs.into_iter().filter(visible) {
        let label = format!("{FOLDER_MARKER}{}", path_util::relative_to(&dir, cwd));
        options.entry(label).or_insert(dir);
    }
    for file in files.into_iter().filter(visible) {
        options
            .entry(path_util::relative_to(&file, cwd))
            .or_insert(file);
    }
    options
}

#[cfg(feature = "tracing")]
fn trace_commit(kind: CommitKind, cwd: &str, options: usize) {
    tracing::debug!(
        event = "navigator.commit",
        kind = kind.as_str(),
        cwd,
        options,
        "directory listed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_commit(_kind: CommitKind, _cwd: &str, _options: usize) {}

#[cfg(feature = "tracing")]
fn trace_invalid_path(path: &str) {
    tracing::debug!(event = "navigator.invalid_path", path, "entered path is not a directory");
}

#[cfg(not(feature = "tracing"))]
fn trace_invalid_path(_path: &str) {}

#[cfg(feature = "tracing")]
fn trace_clamped(path: &str, root: &str) {
    tracing::trace!(event = "navigator.clamped", path, root, "path clamped to root");
}

#[cfg(not(feature = "tracing"))]
fn trace_clamped(_path: &str, _root: &str) {}

#[cfg(feature = "tracing")]
fn trace_selection_changed(selected: usize) {
    tracing::trace!(event = "navigator.selection", selected, "selection reconciled");
}

#[cfg(not(feature = "tracing"))]
fn trace_selection_changed(_selected: usize) {}
