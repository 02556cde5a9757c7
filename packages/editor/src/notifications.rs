//! Change notifications for tree observers

use crate::GameTree;

/// Events fired by a [`GameTree`]
///
/// Every `AboutTo*` event is followed by exactly one matching completion
/// event per top-level operation, however many primitive edits the
/// operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    AboutToChangeCurrentNode,
    CurrentNodeChanged,
    AboutToModifyTree,
    TreeModified,
    /// The graphical layout of the tree is about to become stale
    AboutToModifyMap,
    MapModified,
}

impl TreeEvent {
    /// Completion event matching an `AboutTo*` event
    pub fn completion(self) -> Option<TreeEvent> {
        match self {
            TreeEvent::AboutToChangeCurrentNode => Some(TreeEvent::CurrentNodeChanged),
            TreeEvent::AboutToModifyTree => Some(TreeEvent::TreeModified),
            TreeEvent::AboutToModifyMap => Some(TreeEvent::MapModified),
            _ => None,
        }
    }

    /// Whether this is an `AboutTo*` event
    pub fn is_announcement(self) -> bool {
        self.completion().is_some()
    }
}

/// Receives tree events synchronously
///
/// Completion events are fired once the operation is over, so a
/// handler may edit or navigate the tree from them, nested actions
/// included. During an `AboutTo*` event the tree is still as it was
/// before the operation started and must not be changed.
pub trait TreeObserver {
    fn on_event(&mut self, tree: &mut GameTree, event: TreeEvent);
}

impl<F> TreeObserver for F
where
    F: FnMut(&mut GameTree, TreeEvent),
{
    fn on_event(&mut self, tree: &mut GameTree, event: TreeEvent) {
        self(tree, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_pairs() {
        assert_eq!(
            TreeEvent::AboutToModifyMap.completion(),
            Some(TreeEvent::MapModified)
        );
        assert_eq!(TreeEvent::TreeModified.completion(), None);
        assert!(TreeEvent::AboutToChangeCurrentNode.is_announcement());
        assert!(!TreeEvent::CurrentNodeChanged.is_announcement());
    }
}
