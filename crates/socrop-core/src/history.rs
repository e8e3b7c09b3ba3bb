//! Bounded linear undo history.

use crate::state::EditorState;
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 80;

/// Undo/redo availability, as shown by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    /// Index of the current snapshot.
    pub position: usize,
    pub len: usize,
}

/// A list of full-state snapshots plus a cursor.
///
/// Never empty: it is created with an initial snapshot and every reset
/// installs a new one. Committing after an undo discards the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<EditorState>,
    index: usize,
    limit: usize,
}

impl History {
    /// `limit` below 1 is raised to 1.
    pub fn new(initial: EditorState, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Replace every entry with a single snapshot.
    pub fn reset(&mut self, state: EditorState) {
        self.entries.clear();
        self.entries.push(state);
        self.index = 0;
    }

    /// Append `state` after the cursor, dropping any redo branch and evicting
    /// the oldest snapshots beyond the limit.
    pub fn commit(&mut self, state: EditorState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(state);

        let overflow = self.entries.len().saturating_sub(self.limit);
        if overflow > 0 {
            self.entries.drain(..overflow);
            log::debug!("History full, evicted {overflow} oldest snapshot(s)");
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back. Returns the snapshot to load, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&EditorState> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward. Returns the snapshot to load, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&EditorState> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &EditorState {
        &self.entries[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn entries(&self) -> &[EditorState] {
        &self.entries
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            position: self.index,
            len: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(rotation: i32) -> EditorState {
        EditorState {
            rotation,
            ..EditorState::default()
        }
    }

    #[test]
    fn test_new_history() {
        let history = History::new(state(0), 80);
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), &state(0));
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new(state(0), 80);
        history.commit(state(1));
        history.commit(state(2));

        assert_eq!(history.undo(), Some(&state(1)));
        assert_eq!(history.undo(), Some(&state(0)));
        assert_eq!(history.undo(), None);
        assert_eq!(history.position(), 0);

        assert_eq!(history.redo(), Some(&state(1)));
        assert_eq!(history.redo(), Some(&state(2)));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_commit_discards_branch() {
        let mut history = History::new(state(0), 80);
        history.commit(state(1));
        history.commit(state(2));
        history.undo();
        history.commit(state(3));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(&state(1)));
    }

    #[test]
    fn test_eviction() {
        let mut history = History::new(state(0), 3);
        for i in 1..=5 {
            history.commit(state(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0], state(3));
        assert_eq!(history.position(), 2);
    }

    #[test]
    fn test_limit_floor() {
        let mut history = History::new(state(0), 0);
        assert_eq!(history.limit(), 1);
        history.commit(state(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &state(1));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(state(0), 80);
        history.commit(state(1));
        history.reset(state(9));
        assert_eq!(
            history.status(),
            HistoryStatus {
                can_undo: false,
                can_redo: false,
                position: 0,
                len: 1
            }
        );
    }
}
