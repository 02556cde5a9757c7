//! # Game Tree
//!
//! A [`GameTree`] owns the nodes of one game, the cursor (current node)
//! and, optionally, the board the cursor position is replayed on and
//! the undo history.
//!
//! ## Transactions
//!
//! Every edit runs inside an action (see [`GameTree::begin_action`]).
//! While the outermost action is open, edits only touch the node store
//! and remember where the cursor should end up. Closing the action
//! moves the cursor, fires the completion events and updates the
//! collection's modification counter, once per action. Undo and redo
//! run the same way over a whole recorded action.

use crate::{
    BoardState, CustomOperation, EditorError, ModificationTracker, TreeConfig, TreeEvent,
    TreeObserver, UndoHistory, UndoOperation,
};
use kifu_board::{Board, BoardError, Color, Game};
use kifu_sgf::{Node, NodeId, NodeStore};
use std::fmt;
use tracing::debug;

#[derive(Debug, Default)]
pub(crate) struct ActionState {
    pub level: usize,
    pub node_to_switch_to: Option<NodeId>,
    /// Number of operations in this transaction that asked for a switch
    pub switch_requests: usize,
    pub modifying_map: bool,
    pub modifying_tree: bool,
    pub tree_was_modified: bool,
    pub collection_was_modified: bool,
    /// Operations applied without history, released once the cursor
    /// has left whatever they detached
    pub pending_release: Vec<UndoOperation>,
}

pub struct GameTree {
    pub(crate) game: Game,
    pub(crate) width: u8,
    pub(crate) height: u8,
    pub(crate) nodes: NodeStore,
    pub(crate) root: NodeId,
    pub(crate) current_node: NodeId,
    pub(crate) current_node_depth: usize,
    pub(crate) board: Option<Box<dyn Board>>,
    pub(crate) board_state: BoardState,
    pub(crate) history: Option<UndoHistory>,
    pub(crate) max_actions: usize,
    pub(crate) action: ActionState,
    observers: Vec<Box<dyn TreeObserver>>,
    /// Set while observers handle an `AboutTo*` event
    announcing: bool,
    tracker: ModificationTracker,
}

impl fmt::Debug for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameTree")
            .field("game", &self.game)
            .field("size", &(self.width, self.height))
            .field("nodes", &self.nodes.len())
            .field("current_node", &self.current_node)
            .field("current_node_depth", &self.current_node_depth)
            .field("board", &self.board)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GameTree {
    /// Create a tree holding only a root node
    pub fn new(config: &TreeConfig) -> Result<Self, EditorError> {
        Self::with_tracker(config, ModificationTracker::new())
    }

    pub(crate) fn with_tracker(config: &TreeConfig, tracker: ModificationTracker) -> Result<Self, EditorError> {
        config.validate()?;

        let mut nodes = NodeStore::new();
        let root = nodes.create(None);

        let mut tree = Self {
            game: config.game,
            width: config.board_width,
            height: config.board_height,
            nodes,
            root,
            current_node: root,
            current_node_depth: 0,
            board: None,
            board_state: BoardState::default(),
            history: config.history.enabled.then(UndoHistory::new),
            max_actions: config.history.max_actions,
            action: ActionState::default(),
            observers: Vec::new(),
            announcing: false,
            tracker,
        };
        tree.enter_tree_at(root);

        Ok(tree)
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn current_node(&self) -> NodeId {
        self.current_node
    }

    /// Number of moves (edges) from the root to the current node
    pub fn current_node_depth(&self) -> usize {
        self.current_node_depth
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn board(&self) -> Option<&dyn Board> {
        self.board.as_deref()
    }

    pub fn board_state(&self) -> &BoardState {
        &self.board_state
    }

    pub fn color_to_play(&self) -> Color {
        self.board_state.color_to_play
    }

    pub fn history(&self) -> Option<&UndoHistory> {
        self.history.as_ref()
    }

    pub fn tracker(&self) -> &ModificationTracker {
        &self.tracker
    }

    /// Attach a board and replay the current path on it
    ///
    /// The board is reset first; it stays owned by the tree until
    /// [`leave_tree`](Self::leave_tree).
    pub fn enter_tree(&mut self, board: Box<dyn Board>) -> Result<(), EditorError> {
        if (board.width(), board.height()) != (self.width, self.height) {
            return Err(BoardError::SizeMismatch {
                expected: (self.width, self.height),
                found: (board.width(), board.height()),
            }
            .into());
        }
        if board.game() != self.game {
            return Err(EditorError::InvalidConfig(format!(
                "board plays {:?}, tree records {:?}",
                board.game(),
                self.game
            )));
        }

        self.board = Some(board);
        self.enter_tree_at(self.current_node);
        Ok(())
    }

    /// Detach the board; derived state keeps being maintained headless
    pub fn leave_tree(&mut self) -> Option<Box<dyn Board>> {
        self.board.take()
    }

    pub fn subscribe(&mut self, observer: impl TreeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub(crate) fn notify(&mut self, event: TreeEvent) {
        let announcement = event.is_announcement();
        if announcement {
            self.assert_not_announcing();
        }
        if self.observers.is_empty() {
            return;
        }

        // Events raised by a handler's own edits are not delivered back
        // to the observers being notified
        let mut observers = std::mem::take(&mut self.observers);
        self.announcing = announcement;
        for observer in observers.iter_mut() {
            observer.on_event(self, event);
        }
        self.announcing = false;
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    fn assert_not_announcing(&self) {
        assert!(!self.announcing, "the tree cannot be changed while a change is being announced");
    }

    pub fn is_in_action(&self) -> bool {
        self.action.level > 0
    }

    /// Open an action; actions nest and only the outermost one becomes
    /// an undo step
    pub fn begin_action(&mut self) {
        self.assert_not_announcing();
        if self.action.level == 0 {
            self.begin_transaction();
        }
        self.action.level += 1;
    }

    pub fn end_action(&mut self) {
        assert!(self.action.level > 0, "end_action without matching begin_action");
        self.action.level -= 1;

        if self.action.level == 0 {
            if let Some(history) = &mut self.history {
                history.close_action();
                if self.max_actions > 0 {
                    history.evict_excess_actions(self.max_actions, &mut self.nodes);
                }
            }
            self.end_transaction();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(UndoHistory::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(UndoHistory::can_redo)
    }

    pub fn undo_levels(&self) -> usize {
        self.history.as_ref().map_or(0, UndoHistory::undo_levels)
    }

    pub fn redo_levels(&self) -> usize {
        self.history.as_ref().map_or(0, UndoHistory::redo_levels)
    }

    /// Revert the last action; does nothing if there is none
    pub fn undo(&mut self) {
        assert!(!self.is_in_action(), "undo called inside an open action");
        self.assert_not_announcing();
        if !self.can_undo() {
            return;
        }

        self.begin_transaction();
        let structural = self
            .history
            .as_ref()
            .is_some_and(|history| history.next_undo_action().any(UndoOperation::modifies_structure));
        if structural {
            self.set_modifying_map();
            self.set_modifying_tree();
        }

        if let Some(history) = &mut self.history {
            let replayed = history.undo(&mut self.nodes);
            debug!(entries = replayed.entries, "undid action");
            if replayed.node_to_switch_to.is_some() {
                self.action.node_to_switch_to = replayed.node_to_switch_to;
                self.action.switch_requests = replayed.switch_requests;
            }
        }
        self.end_transaction();
    }

    /// Reapply the last undone action; does nothing if there is none
    pub fn redo(&mut self) {
        assert!(!self.is_in_action(), "redo called inside an open action");
        self.assert_not_announcing();
        if !self.can_redo() {
            return;
        }

        self.begin_transaction();
        let structural = self
            .history
            .as_ref()
            .is_some_and(|history| history.next_redo_action().any(UndoOperation::modifies_structure));
        if structural {
            self.set_modifying_map();
            self.set_modifying_tree();
        }

        if let Some(history) = &mut self.history {
            let replayed = history.redo(&mut self.nodes);
            debug!(entries = replayed.entries, "redid action");
            if replayed.node_to_switch_to.is_some() {
                self.action.node_to_switch_to = replayed.node_to_switch_to;
                self.action.switch_requests = replayed.switch_requests;
            }
        }
        self.end_transaction();
    }

    /// Whether the tree differs from its last saved state
    pub fn is_modified(&self) -> bool {
        self.history.as_ref().is_some_and(UndoHistory::is_modified)
    }

    /// Declare the current state saved
    pub fn set_unmodified(&mut self) {
        let collection_was_modified = self.tracker.is_modified();
        self.reset_baseline();
        self.tracker.notify_if_changed(collection_was_modified);
    }

    pub(crate) fn reset_baseline(&mut self) {
        if let Some(history) = &mut self.history {
            if history.is_modified() {
                history.set_baseline_to_current();
                self.tracker.history_became_unmodified();
            }
        }
    }

    /// Record a caller-defined operation as its own action
    pub fn apply_custom(&mut self, operation: Box<dyn CustomOperation>) {
        self.begin_action();
        self.apply_operation(UndoOperation::Custom(operation));
        self.end_action();
    }

    /// Record `operation` and perform it
    ///
    /// Must be called inside an action. Any undone actions are
    /// discarded first.
    pub(crate) fn apply_operation(&mut self, mut operation: UndoOperation) {
        debug_assert!(self.is_in_action(), "operations must be applied inside an action");

        if operation.modifies_structure() {
            self.set_modifying_map();
            self.set_modifying_tree();
        }

        let name = operation.name();
        let target = match &mut self.history {
            Some(history) => {
                history.discard_redo(&mut self.nodes);
                history
                    .push(operation)
                    .apply(&mut self.nodes, crate::Direction::Forward)
            }
            None => {
                let target = operation.apply(&mut self.nodes, crate::Direction::Forward);
                self.action.pending_release.push(operation);
                self.tracker.mark_irreversibly_modified();
                target
            }
        };
        debug!(operation = name, "applied undo entry");

        if target.is_some() {
            self.action.node_to_switch_to = target;
            self.action.switch_requests += 1;
        }
    }

    fn begin_transaction(&mut self) {
        self.action.node_to_switch_to = None;
        self.action.switch_requests = 0;
        self.action.modifying_map = false;
        self.action.modifying_tree = false;
        self.action.tree_was_modified = self.is_modified();
        self.action.collection_was_modified = self.tracker.is_modified();
    }

    pub(crate) fn set_modifying_map(&mut self) {
        if !self.action.modifying_map {
            self.action.modifying_map = true;
            self.notify(TreeEvent::AboutToModifyMap);
        }
    }

    pub(crate) fn set_modifying_tree(&mut self) {
        if !self.action.modifying_tree {
            self.action.modifying_tree = true;
            self.notify(TreeEvent::AboutToModifyTree);
        }
    }

    /// Move the cursor, settle modification state and fire the
    /// completion events
    ///
    /// The action state is cleared before any completion event fires,
    /// so handlers may open actions of their own.
    fn end_transaction(&mut self) {
        let action = std::mem::take(&mut self.action);

        let cursor_moved = match action.node_to_switch_to {
            Some(target) => {
                self.notify(TreeEvent::AboutToChangeCurrentNode);
                self.move_cursor_after_edit(target, action.switch_requests == 1);
                true
            }
            None => false,
        };

        if action.modifying_tree {
            self.refresh_last_main_variation_node();
        }

        for operation in action.pending_release {
            operation.release(true, &mut self.nodes);
        }

        let modified = self.is_modified();
        match (action.tree_was_modified, modified) {
            (false, true) => self.tracker.history_became_modified(),
            (true, false) => self.tracker.history_became_unmodified(),
            _ => {}
        }
        self.tracker.notify_if_changed(action.collection_was_modified);

        if cursor_moved {
            self.notify(TreeEvent::CurrentNodeChanged);
        }
        if action.modifying_tree {
            self.notify(TreeEvent::TreeModified);
        }
        if action.modifying_map {
            self.notify(TreeEvent::MapModified);
        }
    }

    /// Bring the cursor to `target` after the tree has been edited
    fn move_cursor_after_edit(&mut self, target: NodeId, single_edit: bool) {
        let current = &self.nodes[self.current_node];

        if single_edit && current.parent() == Some(target) {
            self.ascend_nodes(1);
        } else if single_edit
            && self.nodes[target].parent() == Some(self.current_node)
            && current.current_variation() == Some(target)
        {
            self.descend_nodes(1);
        } else {
            self.switch_path_to(target);
        }
    }
}

impl Drop for GameTree {
    fn drop(&mut self) {
        if let Some(mut history) = self.history.take() {
            if history.is_modified() {
                self.tracker.history_became_unmodified();
            }
            history.release_all(&mut self.nodes);
        }
    }
}
