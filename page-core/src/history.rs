//! Linear undo/redo over full snapshots.

use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Snapshot history with a cursor.
///
/// Whenever the history is non-empty the cursor points at a valid entry.
/// Pushing after an undo drops the redo-able future; pushing past the limit
/// drops the oldest snapshot.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: VecDeque<T>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// History whose first entry is `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// History with a custom snapshot cap (at least 1).
    #[must_use]
    pub fn with_limit(initial: T, limit: usize) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
        self.cursor = 0;
    }

    /// Record a new state.
    pub fn push(&mut self, snapshot: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.limit {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; returns the restored snapshot.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!(cursor = self.cursor, "history undo");
        self.snapshots.get(self.cursor)
    }

    /// Step forward; returns the restored snapshot.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, "history redo");
        self.snapshots.get(self.cursor)
    }

    /// Whether [`Self::undo`] would do anything.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`Self::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.snapshots.get(self.cursor)
    }

    /// Cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot cap.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.current(), Some(&1));
    }

    #[test]
    fn test_push_truncates_future() {
        let mut history = History::new("a");
        history.push("b");
        history.push("c");
        history.undo();
        history.push("d");
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some(&"b"));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(0, 3);
        for n in 1..=5 {
            history.push(n);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&5));
        assert_eq!(history.undo(), Some(&4));
        assert_eq!(history.undo(), Some(&3));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut history = History::with_limit(0, 0);
        history.push(1);
        assert_eq!(history.limit(), 1);
        assert_eq!(history.current(), Some(&1));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(1);
        history.push(2);
        history.reset(9);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn undo_all_restores_initial(
                actions in proptest::collection::vec(any::<u32>(), 1..20)
            ) {
                let mut history = History::with_limit(u32::MAX, 64);
                for action in &actions {
                    history.push(*action);
                }
                for _ in 0..actions.len() {
                    history.undo();
                }
                prop_assert_eq!(history.current(), Some(&u32::MAX));
                prop_assert!(!history.can_undo());
            }

            #[test]
            fn new_action_after_undo_clears_redo(
                actions in proptest::collection::vec(any::<u32>(), 2..20),
                extra in any::<u32>(),
            ) {
                let mut history = History::new(0u32);
                for action in &actions {
                    history.push(*action);
                }
                history.undo();
                prop_assert!(history.can_redo());
                history.push(extra);
                prop_assert!(!history.can_redo());
                prop_assert_eq!(history.current(), Some(&extra));
            }
        }
    }
}
