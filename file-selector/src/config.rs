use std::time::Duration;

/// Configuration for a [`Navigator`](crate::Navigator).
///
/// Examples
/// ```
/// use file_selector::SelectorConfig;
/// use std::time::Duration;
///
/// let cfg = SelectorConfig::new()
///     .directory("~/data")
///     .file_pattern("*.csv")
///     .only_files(true)
///     .refresh_period(Some(Duration::from_millis(2000)));
/// assert_eq!(cfg.file_pattern, "*.csv");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// Start directory (`None` = process working directory).
    pub directory: Option<String>,
    /// Glob applied to file names.
    pub file_pattern: String,
    /// Only plain files may be selected.
    pub only_files: bool,
    /// Navigation floor (`None` = the start directory).
    pub root_directory: Option<String>,
    /// Show entries whose name starts with a dot.
    pub show_hidden: bool,
    /// Number of rows shown at once by the host widget.
    pub size: usize,
    /// Re-list the current directory on this interval.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub refresh_period: Option<Duration>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_pattern: "*".to_string(),
            only_files: false,
            root_directory: None,
            show_hidden: false,
            size: 10,
            refresh_period: None,
        }
    }
}

impl SelectorConfig {
    /// Defaults: cwd, `*`, files and directories selectable, no refresh.
    pub fn new() -> Self {
        Self::default()
    }
    /// Set the start directory
    pub fn directory(mut self, dir: impl Into<String>) -> Self {
        self.directory = Some(dir.into());
        self
    }
    /// Set the file glob
    pub fn file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }
    /// Restrict the selection to files
    pub fn only_files(mut self, yes: bool) -> Self {
        self.only_files = yes;
        self
    }
    /// Set the navigation floor
    pub fn root_directory(mut self, dir: impl Into<String>) -> Self {
        self.root_directory = Some(dir.into());
        self
    }
    /// Show dotfiles
    pub fn show_hidden(mut self, yes: bool) -> Self {
        self.show_hidden = yes;
        self
    }
    /// Visible rows
    pub fn size(mut self, rows: usize) -> Self {
        self.size = rows;
        self
    }
    /// Periodic refresh interval (`None` or zero disables it)
    pub fn refresh_period(mut self, period: Option<Duration>) -> Self {
        self.refresh_period = period;
        self
    }
}

/// Configuration for a [`FileTree`](crate::FileTree).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    /// Directory at the root of the tree (`None` = process working directory).
    pub directory: Option<String>,
    /// Glob applied to file names.
    pub file_pattern: String,
    /// Only file nodes may be selected.
    pub only_files: bool,
    /// Navigation floor (`None` = the tree directory).
    pub root_directory: Option<String>,
    /// Sort folders and files by name.
    pub sort: bool,
    /// Deepest level shown; `0` shows everything.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_pattern: "*".to_string(),
            only_files: false,
            root_directory: None,
            sort: true,
            max_depth: 0,
        }
    }
}

impl TreeConfig {
    /// Defaults: cwd, `*`, sorted, unlimited depth.
    pub fn new() -> Self {
        Self::default()
    }
    /// Set the tree directory
    pub fn directory(mut self, dir: impl Into<String>) -> Self {
        self.directory = Some(dir.into());
        self
    }
    /// Set the file glob
    pub fn file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }
    /// Restrict the selection to files
    pub fn only_files(mut self, yes: bool) -> Self {
        self.only_files = yes;
        self
    }
    /// Set the navigation floor
    pub fn root_directory(mut self, dir: impl Into<String>) -> Self {
        self.root_directory = Some(dir.into());
        self
    }
    /// Sort nodes by name
    pub fn sort(mut self, yes: bool) -> Self {
        self.sort = yes;
        self
    }
    /// Depth cap (`0` = unlimited)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = Option::<u64>::deserialize(deserializer)?;
        Ok(ms.filter(|ms| *ms > 0).map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_defaults_match_documented_values() {
        let cfg = SelectorConfig::default();
        assert_eq!(cfg.file_pattern, "*");
        assert_eq!(cfg.size, 10);
        assert!(!cfg.only_files && !cfg.show_hidden);
        assert!(cfg.directory.is_none() && cfg.root_directory.is_none());
        assert!(cfg.refresh_period.is_none());
    }

    #[test]
    fn tree_builder_sets_fields() {
        let cfg = TreeConfig::new().directory("/data").max_depth(2).sort(false);
        assert_eq!(cfg.directory.as_deref(), Some("/data"));
        assert_eq!(cfg.max_depth, 2);
        assert!(!cfg.sort);
    }
}
