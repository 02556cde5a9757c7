//! # Undo History
//!
//! Linear log of [`UndoOperation`]s with a cursor separating applied
//! entries from undone ones.
//!
//! ```text
//!                      applied
//!                         │
//! [e1, e2*, e3, e4*, e5, e6*]        * = last entry of an action
//!  └──── undo ────┘   └ redo ┘
//! ```
//!
//! Recording a new entry discards everything after the cursor: redo is
//! linear, there is no redo tree. Entries are grouped into actions by
//! the `is_last_in_action` flag; undo and redo always move over whole
//! actions.

use crate::{Direction, UndoOperation};
use kifu_sgf::{NodeId, NodeStore};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Identity of an entry, never reused within one history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

#[derive(Debug)]
pub(crate) struct UndoEntry {
    id: EntryId,
    operation: UndoOperation,
    is_last_in_action: bool,
}

/// Result of walking over one action
#[derive(Debug, Default)]
pub(crate) struct Replayed {
    pub entries: usize,
    pub node_to_switch_to: Option<NodeId>,
    /// Number of entries that asked for a cursor switch
    pub switch_requests: usize,
}

pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    /// Number of leading entries that are applied
    applied: usize,
    /// Last applied entry at the unmodified state, `None` for the empty
    /// log
    baseline: Option<EntryId>,
    /// Last entry evicted from the front of the log
    evicted: Option<EntryId>,
    next_id: u64,
}

impl fmt::Debug for UndoHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoHistory")
            .field("entries", &self.entries.len())
            .field("applied", &self.applied)
            .field("undo_levels", &self.undo_levels())
            .field("redo_levels", &self.redo_levels())
            .field("modified", &self.is_modified())
            .finish()
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            applied: 0,
            baseline: None,
            evicted: None,
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently applied entry
    pub fn last_applied(&self) -> Option<EntryId> {
        match self.applied {
            0 => self.evicted,
            applied => Some(self.entries[applied - 1].id),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.last_applied() != self.baseline
    }

    pub fn set_baseline_to_current(&mut self) {
        self.baseline = self.last_applied();
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    /// Number of actions that can be undone
    pub fn undo_levels(&self) -> usize {
        self.entries
            .iter()
            .take(self.applied)
            .filter(|entry| entry.is_last_in_action)
            .count()
    }

    /// Number of actions that can be redone
    pub fn redo_levels(&self) -> usize {
        self.entries
            .iter()
            .skip(self.applied)
            .filter(|entry| entry.is_last_in_action)
            .count()
    }

    /// Operations the next undo would revert, newest first
    pub(crate) fn next_undo_action(&self) -> impl Iterator<Item = &UndoOperation> + '_ {
        let start = self.action_start(self.applied);
        self.entries
            .range(start..self.applied)
            .rev()
            .map(|entry| &entry.operation)
    }

    /// Operations the next redo would perform, oldest first
    pub(crate) fn next_redo_action(&self) -> impl Iterator<Item = &UndoOperation> + '_ {
        let end = self.action_end(self.applied);
        self.entries
            .range(self.applied..end)
            .map(|entry| &entry.operation)
    }

    /// Drop the redo branch, releasing entries that were never reapplied
    pub(crate) fn discard_redo(&mut self, nodes: &mut NodeStore) -> usize {
        let count = self.entries.len() - self.applied;
        while self.entries.len() > self.applied {
            if let Some(entry) = self.entries.pop_back() {
                entry.operation.release(false, nodes);
            }
        }

        if count > 0 {
            debug!(count, "discarded redo entries");
        }
        count
    }

    /// Append an entry after the cursor and mark it applied
    ///
    /// The operation itself is performed by the caller.
    pub(crate) fn push(&mut self, operation: UndoOperation) -> &mut UndoOperation {
        debug_assert_eq!(self.applied, self.entries.len(), "redo branch must be discarded first");

        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push_back(UndoEntry {
            id,
            operation,
            is_last_in_action: false,
        });
        self.applied += 1;

        let entry = self.entries.back_mut().expect("entry was just pushed");
        &mut entry.operation
    }

    /// Close the current action at the most recently applied entry
    pub(crate) fn close_action(&mut self) {
        if let Some(entry) = self.applied.checked_sub(1).and_then(|index| self.entries.get_mut(index)) {
            entry.is_last_in_action = true;
        }
    }

    pub(crate) fn undo(&mut self, nodes: &mut NodeStore) -> Replayed {
        let mut replayed = Replayed::default();
        let start = self.action_start(self.applied);

        while self.applied > start {
            self.applied -= 1;
            let entry = &mut self.entries[self.applied];
            if let Some(node) = entry.operation.apply(nodes, Direction::Backward) {
                replayed.node_to_switch_to = Some(node);
                replayed.switch_requests += 1;
            }
            replayed.entries += 1;
        }

        replayed
    }

    pub(crate) fn redo(&mut self, nodes: &mut NodeStore) -> Replayed {
        let mut replayed = Replayed::default();
        let end = self.action_end(self.applied);

        while self.applied < end {
            let entry = &mut self.entries[self.applied];
            if let Some(node) = entry.operation.apply(nodes, Direction::Forward) {
                replayed.node_to_switch_to = Some(node);
                replayed.switch_requests += 1;
            }
            self.applied += 1;
            replayed.entries += 1;
        }

        replayed
    }

    /// Forget the oldest actions until at most `max_actions` applied
    /// actions remain
    pub(crate) fn evict_excess_actions(&mut self, max_actions: usize, nodes: &mut NodeStore) -> usize {
        let mut evicted = 0;

        while self.undo_levels() > max_actions {
            while let Some(entry) = self.entries.pop_front() {
                self.applied -= 1;
                self.evicted = Some(entry.id);
                evicted += 1;

                let is_last = entry.is_last_in_action;
                entry.operation.release(true, nodes);
                if is_last {
                    break;
                }
            }
        }

        if evicted > 0 {
            debug!(evicted, max_actions, "evicted old undo entries");
        }
        evicted
    }

    /// Release every entry, leaving the history empty
    pub(crate) fn release_all(&mut self, nodes: &mut NodeStore) {
        let applied = self.applied;
        for (index, entry) in self.entries.drain(..).enumerate() {
            entry.operation.release(index < applied, nodes);
        }
        self.applied = 0;
    }

    /// Index of the first entry of the action ending right before `end`
    fn action_start(&self, end: usize) -> usize {
        let mut start = end;
        while start > 0 {
            if start < end && self.entries[start - 1].is_last_in_action {
                break;
            }
            start -= 1;
        }
        start
    }

    /// Index past the last entry of the action starting at `start`
    fn action_end(&self, start: usize) -> usize {
        self.entries
            .iter()
            .skip(start)
            .position(|entry| entry.is_last_in_action)
            .map_or(self.entries.len(), |offset| start + offset + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeColor;
    use kifu_sgf::MoveColor;

    fn color_change(node: NodeId, color: MoveColor) -> UndoOperation {
        UndoOperation::ChangeNodeColor {
            node,
            color: NodeColor::Move(color),
        }
    }

    fn record(history: &mut UndoHistory, nodes: &mut NodeStore, operation: UndoOperation) {
        history.discard_redo(nodes);
        history.push(operation).apply(nodes, Direction::Forward);
    }

    #[test]
    fn test_undo_and_redo_whole_actions() {
        let mut nodes = NodeStore::new();
        let root = nodes.create(None);
        let mut history = UndoHistory::new();

        record(&mut history, &mut nodes, color_change(root, MoveColor::Setup));
        history.close_action();
        record(&mut history, &mut nodes, color_change(root, MoveColor::Black));
        record(&mut history, &mut nodes, color_change(root, MoveColor::White));
        history.close_action();

        assert_eq!(history.undo_levels(), 2);
        assert_eq!(nodes[root].move_color, MoveColor::White);

        let replayed = history.undo(&mut nodes);
        assert_eq!(replayed.entries, 2);
        assert_eq!(replayed.node_to_switch_to, Some(root));
        assert_eq!(nodes[root].move_color, MoveColor::Setup);
        assert_eq!(history.redo_levels(), 1);

        history.undo(&mut nodes);
        assert_eq!(nodes[root].move_color, MoveColor::None);
        assert!(!history.can_undo());
        assert_eq!(history.undo(&mut nodes).entries, 0);

        history.redo(&mut nodes);
        history.redo(&mut nodes);
        assert_eq!(nodes[root].move_color, MoveColor::White);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_baseline_tracking() {
        let mut nodes = NodeStore::new();
        let root = nodes.create(None);
        let mut history = UndoHistory::new();
        assert!(!history.is_modified());

        record(&mut history, &mut nodes, color_change(root, MoveColor::Setup));
        history.close_action();
        assert!(history.is_modified());

        history.undo(&mut nodes);
        assert!(!history.is_modified());

        history.redo(&mut nodes);
        history.set_baseline_to_current();
        assert!(!history.is_modified());

        history.undo(&mut nodes);
        record(&mut history, &mut nodes, color_change(root, MoveColor::Black));
        history.close_action();
        assert!(history.is_modified());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_eviction_keeps_recent_actions() {
        let mut nodes = NodeStore::new();
        let root = nodes.create(None);
        let mut history = UndoHistory::new();

        for color in [MoveColor::Setup, MoveColor::Black, MoveColor::White] {
            record(&mut history, &mut nodes, color_change(root, color));
            history.close_action();
        }

        assert_eq!(history.evict_excess_actions(2, &mut nodes), 1);
        assert_eq!(history.undo_levels(), 2);

        history.undo(&mut nodes);
        history.undo(&mut nodes);
        assert!(!history.can_undo());
        assert_eq!(nodes[root].move_color, MoveColor::Setup);
        assert!(history.is_modified());
    }

    #[test]
    fn test_evicted_baseline_matches_when_rewound_to_it() {
        let mut nodes = NodeStore::new();
        let root = nodes.create(None);
        let mut history = UndoHistory::new();

        record(&mut history, &mut nodes, color_change(root, MoveColor::Setup));
        history.close_action();
        history.set_baseline_to_current();

        for color in [MoveColor::Black, MoveColor::White] {
            record(&mut history, &mut nodes, color_change(root, color));
            history.close_action();
        }
        assert_eq!(history.evict_excess_actions(2, &mut nodes), 1);
        assert!(history.is_modified());

        // Back at the saved state, which is no longer in the log
        history.undo(&mut nodes);
        history.undo(&mut nodes);
        assert_eq!(nodes[root].move_color, MoveColor::Setup);
        assert!(!history.is_modified());

        history.redo(&mut nodes);
        assert!(history.is_modified());
    }
}
