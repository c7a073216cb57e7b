/// Linear stack of visited directories with a cursor.
///
/// `position` indexes a valid entry as soon as one directory was pushed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    position: Option<usize>,
}

impl NavigationHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Entries ahead of the cursor are discarded first;
    /// revisiting the current entry records nothing.
    ///
    /// Returns whether an entry was added.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.current() == Some(path.as_str()) {
            return false;
        }
        if let Some(pos) = self.position {
            self.entries.truncate(pos + 1);
        }
        self.entries.push(path);
        self.position = Some(self.entries.len() - 1);
        true
    }

    /// Step back, returning the new current entry.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.position = self.position.map(|p| p - 1);
        self.current()
    }

    /// Step forward, returning the new current entry.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.position = self.position.map(|p| p + 1);
        self.current()
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.position
            .and_then(|p| self.entries.get(p))
            .map(String::as_str)
    }

    /// Cursor index, `None` before the first push.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether [`back`](Self::back) would move.
    pub fn can_go_back(&self) -> bool {
        matches!(self.position, Some(p) if p > 0)
    }

    /// Whether [`forward`](Self::forward) would move.
    pub fn can_go_forward(&self) -> bool {
        matches!(self.position, Some(p) if p + 1 < self.entries.len())
    }

    /// All visited entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was visited yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_skips_the_current_entry() {
        let mut h = NavigationHistory::new();
        assert!(h.push("/a"));
        assert!(!h.push("/a"));
        assert!(h.push("/b"));
        assert_eq!(h.entries(), ["/a", "/b"]);
        assert_eq!(h.position(), Some(1));
    }

    #[test]
    fn back_and_forward_stay_in_bounds() {
        let mut h = NavigationHistory::new();
        assert_eq!(h.back(), None);
        h.push("/a");
        h.push("/b");
        h.push("/c");
        assert_eq!(h.back(), Some("/b"));
        assert_eq!(h.back(), Some("/a"));
        assert_eq!(h.back(), None);
        assert!(!h.can_go_back());
        assert_eq!(h.forward(), Some("/b"));
        assert_eq!(h.forward(), Some("/c"));
        assert_eq!(h.forward(), None);
        assert!(!h.can_go_forward());
    }

    #[test]
    fn push_after_back_discards_forward_entries() {
        let mut h = NavigationHistory::new();
        h.push("/a");
        h.push("/b");
        h.push("/c");
        h.back();
        h.back();
        assert!(h.push("/d"));
        assert_eq!(h.entries(), ["/a", "/d"]);
        assert_eq!(h.current(), Some("/d"));
        assert!(!h.can_go_forward());
    }

    #[test]
    fn cursor_always_matches_current_under_random_walks() {
        let mut h = NavigationHistory::new();
        for dir in ["/a", "/b", "/c", "/d"] {
            h.push(dir);
        }
        let moves = [false, false, true, false, false, false, true, true, true, true];
        for forward in moves {
            if forward {
                h.forward();
            } else {
                h.back();
            }
            let pos = h.position().unwrap();
            assert_eq!(h.current(), Some(h.entries()[pos].as_str()));
            assert_eq!(h.can_go_forward(), pos != h.len() - 1);
            assert_eq!(h.can_go_back(), pos > 0);
        }
    }
}
