//! # Undo Operations
//!
//! Every edit of a game tree is recorded as one [`UndoOperation`]. An
//! operation carries exactly what it needs to both perform and revert
//! itself; [`UndoOperation::apply`] takes the direction as a parameter.
//!
//! Most operations are swaps: the entry holds the value that is *not*
//! currently live in the tree, and applying the operation in either
//! direction exchanges it with the live one. Nodes and properties move
//! between the tree and the entry the same way, so whichever side is
//! not live is owned by the entry and released with it.

use crate::CustomOperation;
use kifu_board::Color;
use kifu_sgf::{MoveColor, NodeId, NodeStore, Property, PropertyValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Node field swapped by [`UndoOperation::ChangeNodeColor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeColor {
    Move(MoveColor),
    ToPlay(Option<Color>),
}

#[derive(Debug)]
pub enum UndoOperation {
    /// Splice a freshly created node into its parent's children
    ///
    /// `parent_current_variation` holds the parent's current variation
    /// that is not live: the new node itself while unapplied, the
    /// previous one while applied.
    NewNode {
        node: NodeId,
        parent_current_variation: Option<NodeId>,
    },

    /// Detach a node with its subtree
    DeleteNode {
        node: NodeId,
        parent_current_variation: Option<NodeId>,
    },

    /// Detach all children of a node at once
    DeleteChildren {
        parent: NodeId,
        first_child: NodeId,
        current_variation: Option<NodeId>,
    },

    ChangeNodeColor { node: NodeId, color: NodeColor },

    /// `property` is `Some` while the entry owns it (unapplied)
    NewProperty {
        node: NodeId,
        index: usize,
        property: Option<Property>,
    },

    /// `property` is `Some` while the entry owns it (applied)
    DeleteProperty {
        node: NodeId,
        index: usize,
        property: Option<Property>,
    },

    ChangeProperty {
        node: NodeId,
        index: usize,
        value: PropertyValue,
    },

    /// Exchange the positions of two sibling nodes
    SwapNodes { first: NodeId, second: NodeId },

    Custom(Box<dyn CustomOperation>),
}

impl UndoOperation {
    /// Perform or revert the operation, returning the node the cursor
    /// should end up at
    pub fn apply(&mut self, nodes: &mut NodeStore, direction: Direction) -> Option<NodeId> {
        match self {
            UndoOperation::NewNode {
                node,
                parent_current_variation,
            } => {
                let parent = parent_of(nodes, *node);
                match direction {
                    Direction::Forward => {
                        nodes.link(*node);
                        swap_current_variation(nodes, parent, parent_current_variation);
                        Some(*node)
                    }
                    Direction::Backward => {
                        nodes.unlink(*node);
                        swap_current_variation(nodes, parent, parent_current_variation);
                        Some(parent)
                    }
                }
            }

            UndoOperation::DeleteNode {
                node,
                parent_current_variation,
            } => {
                let parent = parent_of(nodes, *node);
                match direction {
                    Direction::Forward => {
                        nodes.unlink(*node);
                        swap_current_variation(nodes, parent, parent_current_variation);
                        Some(parent)
                    }
                    Direction::Backward => {
                        nodes.link(*node);
                        swap_current_variation(nodes, parent, parent_current_variation);
                        Some(*node)
                    }
                }
            }

            UndoOperation::DeleteChildren {
                parent,
                first_child,
                current_variation,
            } => {
                match direction {
                    Direction::Forward => {
                        let detached = nodes.unlink_children(*parent);
                        debug_assert_eq!(detached, Some(*first_child));
                        swap_current_variation(nodes, *parent, current_variation);
                    }
                    Direction::Backward => {
                        nodes.link_children(*parent, *first_child);
                        swap_current_variation(nodes, *parent, current_variation);
                    }
                }
                Some(*parent)
            }

            UndoOperation::ChangeNodeColor { node, color } => {
                let target = &mut nodes[*node];
                match color {
                    NodeColor::Move(move_color) => std::mem::swap(&mut target.move_color, move_color),
                    NodeColor::ToPlay(to_play) => std::mem::swap(&mut target.to_play, to_play),
                }
                Some(*node)
            }

            UndoOperation::NewProperty { node, index, property } => {
                let was_owned = property.is_some();
                toggle_property(nodes, *node, *index, property, direction == Direction::Forward);
                debug_assert_ne!(was_owned, property.is_some());
                Some(*node)
            }

            UndoOperation::DeleteProperty { node, index, property } => {
                toggle_property(nodes, *node, *index, property, direction == Direction::Backward);
                Some(*node)
            }

            UndoOperation::ChangeProperty { node, index, value } => {
                let old = std::mem::replace(value, PropertyValue::None);
                *value = nodes[*node].replace_property_value(*index, old);
                Some(*node)
            }

            UndoOperation::SwapNodes { first, second } => {
                nodes.swap_siblings(*first, *second);
                None
            }

            UndoOperation::Custom(operation) => {
                operation.apply(nodes, direction);
                operation.node_to_switch_to()
            }
        }
    }

    /// Release whatever the entry owns as it leaves the undo log
    pub fn release(self, was_applied: bool, nodes: &mut NodeStore) {
        match self {
            UndoOperation::NewNode { node, .. } if !was_applied => nodes.free_subtree(node),
            UndoOperation::DeleteNode { node, .. } if was_applied => nodes.free_subtree(node),
            UndoOperation::DeleteChildren { first_child, .. } if was_applied => nodes.free_chain(first_child),
            UndoOperation::Custom(mut operation) => operation.release(was_applied, nodes),
            // Properties and values are owned by the entry and drop with it
            _ => {}
        }
    }

    /// Structural edits invalidate tree views, not just node content
    pub fn modifies_structure(&self) -> bool {
        match self {
            UndoOperation::NewNode { .. }
            | UndoOperation::DeleteNode { .. }
            | UndoOperation::DeleteChildren { .. }
            | UndoOperation::SwapNodes { .. } => true,
            UndoOperation::Custom(operation) => operation.modifies_structure(),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UndoOperation::NewNode { .. } => "new-node",
            UndoOperation::DeleteNode { .. } => "delete-node",
            UndoOperation::DeleteChildren { .. } => "delete-children",
            UndoOperation::ChangeNodeColor { .. } => "change-node-color",
            UndoOperation::NewProperty { .. } => "new-property",
            UndoOperation::DeleteProperty { .. } => "delete-property",
            UndoOperation::ChangeProperty { .. } => "change-property",
            UndoOperation::SwapNodes { .. } => "swap-nodes",
            UndoOperation::Custom(operation) => operation.name(),
        }
    }
}

fn parent_of(nodes: &NodeStore, node: NodeId) -> NodeId {
    nodes[node].parent().expect("the root node cannot be added or deleted")
}

fn swap_current_variation(nodes: &mut NodeStore, parent: NodeId, stored: &mut Option<NodeId>) {
    let live = nodes[parent].current_variation();
    nodes.set_current_variation(parent, *stored);
    *stored = live;
}

/// Move a property between the entry and the node
fn toggle_property(
    nodes: &mut NodeStore,
    node: NodeId,
    index: usize,
    property: &mut Option<Property>,
    insert: bool,
) {
    if insert {
        let owned = property.take().expect("property is already live");
        nodes[node].insert_property(index, owned);
    } else {
        debug_assert!(property.is_none(), "entry already owns a property");
        *property = Some(nodes[node].remove_property(index));
    }
}
