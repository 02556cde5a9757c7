//! # Collection
//!
//! A collection owns the game trees of one document and answers "does
//! anything need saving" without visiting every tree. Trees report to a
//! shared [`ModificationTracker`] whenever their undo cursor crosses the
//! saved baseline, or when an edit is made that cannot be undone.

use crate::{EditorError, GameTree, TreeConfig};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

type ModifiedListener = Box<dyn FnMut(bool)>;

#[derive(Default)]
struct TrackerState {
    modified_histories: Cell<usize>,
    irreversibly_modified: Cell<bool>,
    listeners: RefCell<Vec<ModifiedListener>>,
}

/// Shared modification counter of a collection
///
/// Cloning yields another handle to the same counter.
#[derive(Clone, Default)]
pub struct ModificationTracker(Rc<TrackerState>);

impl fmt::Debug for ModificationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModificationTracker")
            .field("modified_histories", &self.0.modified_histories.get())
            .field("irreversibly_modified", &self.0.irreversibly_modified.get())
            .field("listeners", &self.0.listeners.borrow().len())
            .finish()
    }
}

impl ModificationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_modified(&self) -> bool {
        self.0.modified_histories.get() > 0 || self.0.irreversibly_modified.get()
    }

    pub(crate) fn history_became_modified(&self) {
        self.0.modified_histories.set(self.0.modified_histories.get() + 1);
    }

    pub(crate) fn history_became_unmodified(&self) {
        let count = self.0.modified_histories.get();
        debug_assert!(count > 0, "modification counter underflow");
        self.0.modified_histories.set(count.saturating_sub(1));
    }

    pub(crate) fn mark_irreversibly_modified(&self) {
        self.0.irreversibly_modified.set(true);
    }

    pub(crate) fn clear_irreversibly_modified(&self) {
        self.0.irreversibly_modified.set(false);
    }

    /// Subscribe to changes of [`is_modified`](Self::is_modified)
    pub fn on_modified_changed(&self, listener: impl FnMut(bool) + 'static) {
        self.0.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Tell listeners if the modified state differs from `was_modified`
    pub(crate) fn notify_if_changed(&self, was_modified: bool) {
        let modified = self.is_modified();
        if modified == was_modified {
            return;
        }

        debug!(modified, "collection modified state changed");
        // Listeners added while notifying are kept but not called this time
        let mut listeners = self.0.listeners.take();
        for listener in listeners.iter_mut() {
            listener(modified);
        }
        let mut current = self.0.listeners.borrow_mut();
        listeners.append(&mut current);
        *current = listeners;
    }
}

#[derive(Debug, Default)]
pub struct Collection {
    trees: Vec<GameTree>,
    tracker: ModificationTracker,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree that reports to this collection, returning its index
    pub fn add_tree(&mut self, config: &TreeConfig) -> Result<usize, EditorError> {
        let tree = GameTree::with_tracker(config, self.tracker.clone())?;
        self.trees.push(tree);
        Ok(self.trees.len() - 1)
    }

    pub fn tree(&self, index: usize) -> Option<&GameTree> {
        self.trees.get(index)
    }

    pub fn tree_mut(&mut self, index: usize) -> Option<&mut GameTree> {
        self.trees.get_mut(index)
    }

    pub fn trees(&self) -> &[GameTree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Remove a tree; removing a tree counts as an unrecoverable edit
    pub fn remove_tree(&mut self, index: usize) -> Option<GameTree> {
        if index >= self.trees.len() {
            return None;
        }

        let was_modified = self.tracker.is_modified();
        let tree = self.trees.remove(index);
        self.tracker.mark_irreversibly_modified();
        self.tracker.notify_if_changed(was_modified);
        Some(tree)
    }

    pub fn tracker(&self) -> &ModificationTracker {
        &self.tracker
    }

    pub fn is_modified(&self) -> bool {
        self.tracker.is_modified()
    }

    pub fn on_modified_changed(&self, listener: impl FnMut(bool) + 'static) {
        self.tracker.on_modified_changed(listener);
    }

    /// Record that the collection has been saved
    pub fn mark_saved(&mut self) {
        let was_modified = self.tracker.is_modified();
        for tree in &mut self.trees {
            tree.reset_baseline();
        }
        self.tracker.clear_irreversibly_modified();
        self.tracker.notify_if_changed(was_modified);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts_histories() {
        let tracker = ModificationTracker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tracker.on_modified_changed(move |modified| sink.borrow_mut().push(modified));

        tracker.history_became_modified();
        tracker.notify_if_changed(false);
        tracker.history_became_modified();
        tracker.notify_if_changed(true);
        tracker.history_became_unmodified();
        tracker.history_became_unmodified();
        tracker.notify_if_changed(true);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!tracker.is_modified());
    }

    #[test]
    fn test_remove_tree_marks_modified() {
        let mut collection = Collection::new();
        collection.add_tree(&TreeConfig::default()).unwrap();
        assert!(!collection.is_modified());

        assert!(collection.remove_tree(0).is_some());
        assert!(collection.is_modified());

        collection.mark_saved();
        assert!(!collection.is_modified());
    }
}
