//! Caller-defined undo operations

use crate::Direction;
use kifu_sgf::{NodeId, NodeStore};
use std::fmt::Debug;

/// An undoable edit implemented outside this crate
///
/// Custom operations go through the same undo log as the built-in ones,
/// so they undo and redo together with whatever action they were
/// recorded in.
pub trait CustomOperation: Debug {
    /// Perform (`Forward`) or revert (`Backward`) the edit
    fn apply(&mut self, nodes: &mut NodeStore, direction: Direction);

    /// Called exactly once when the operation leaves the undo log
    ///
    /// `was_applied` tells which side of the edit is live in the tree.
    fn release(&mut self, was_applied: bool, nodes: &mut NodeStore) {
        let _ = (was_applied, nodes);
    }

    /// Node the cursor should move to once the action completes
    fn node_to_switch_to(&self) -> Option<NodeId> {
        None
    }

    /// Whether the edit changes the shape of the tree
    fn modifies_structure(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}
