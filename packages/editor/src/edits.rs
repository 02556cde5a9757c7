//! Undoable edits of a game tree
//!
//! Each public edit wraps its primitive operations in an action, so a
//! caller that needs several edits to undo as one step only has to
//! surround them with its own `begin_action`/`end_action` pair.

use crate::{EditorError, GameTree, NodeColor, TreeEvent, UndoOperation, VariationDirection};
use kifu_board::{Color, MovePayload, MovePoint, PointList};
use kifu_sgf::{
    normalize_text, Figure, LabelList, MoveColor, NodeId, PropertyEdit, PropertyType, PropertyValue,
    ValueType,
};

impl GameTree {
    /// Append a child without a move to the current node and go there
    pub fn append_variation(&mut self) -> NodeId {
        self.append_node(MoveColor::None, MovePoint::Pass, None)
    }

    /// Append a move to the current node and go there
    pub fn append_move(&mut self, color: Color, point: MovePoint, payload: Option<MovePayload>) -> NodeId {
        self.append_node(color.into(), point, payload)
    }

    fn append_node(&mut self, move_color: MoveColor, move_point: MovePoint, payload: Option<MovePayload>) -> NodeId {
        let node = self.nodes.create(Some(self.current_node));
        let created = &mut self.nodes[node];
        created.move_color = move_color;
        created.move_point = move_point;
        created.payload = payload;

        self.begin_action();
        self.apply_operation(UndoOperation::NewNode {
            node,
            parent_current_variation: Some(node),
        });
        self.end_action();

        node
    }

    /// Delete the current node with its subtree and go to its parent
    pub fn delete_current_node(&mut self) {
        let node = self.current_node;
        let parent = self.nodes[node].parent().expect("the root node cannot be deleted");

        // The parent must not keep pointing at the deleted node
        let live_variation = self.nodes[parent].current_variation();
        let parent_current_variation = if live_variation == Some(node) {
            self.nodes[node]
                .next_sibling()
                .or_else(|| self.nodes.previous_sibling(node))
        } else {
            live_variation
        };

        self.begin_action();
        self.apply_operation(UndoOperation::DeleteNode {
            node,
            parent_current_variation,
        });
        self.end_action();
    }

    /// Delete every child of the current node; returns whether there
    /// were any
    pub fn delete_current_node_children(&mut self) -> bool {
        let parent = self.current_node;
        let Some(first_child) = self.nodes[parent].first_child() else {
            return false;
        };

        self.begin_action();
        self.apply_operation(UndoOperation::DeleteChildren {
            parent,
            first_child,
            current_variation: None,
        });
        self.end_action();
        true
    }

    /// Exchange the current node with a neighboring sibling, reordering
    /// the variations
    pub fn swap_with_sibling(&mut self, direction: VariationDirection) -> bool {
        let node = self.current_node;
        let sibling = match direction {
            VariationDirection::Next => self.nodes[node].next_sibling(),
            VariationDirection::Previous => self.nodes.previous_sibling(node),
        };
        let Some(sibling) = sibling else {
            return false;
        };

        self.begin_action();
        self.apply_operation(UndoOperation::SwapNodes {
            first: node,
            second: sibling,
        });
        self.end_action();
        true
    }

    pub fn set_move_color(&mut self, node: NodeId, move_color: MoveColor) -> bool {
        if self.nodes[node].move_color == move_color {
            return false;
        }

        self.begin_action();
        self.apply_operation(UndoOperation::ChangeNodeColor {
            node,
            color: NodeColor::Move(move_color),
        });
        self.end_action();
        true
    }

    /// Override whose turn it is after a setup node
    pub fn set_to_play(&mut self, node: NodeId, to_play: Option<Color>) -> bool {
        if self.nodes[node].to_play == to_play {
            return false;
        }

        self.begin_action();
        self.apply_operation(UndoOperation::ChangeNodeColor {
            node,
            color: NodeColor::ToPlay(to_play),
        });
        self.end_action();
        true
    }

    /// Give `ty` a new value on `node`, or remove it with `None`
    ///
    /// `same` compares the current and the new value; when it says they
    /// are equal nothing is recorded. Returns whether the node changed.
    pub fn set_property_with<F>(
        &mut self,
        node: NodeId,
        ty: PropertyType,
        value: Option<PropertyValue>,
        same: F,
    ) -> Result<bool, EditorError>
    where
        F: Fn(&PropertyValue, &PropertyValue) -> bool,
    {
        assert!(self.nodes.contains(node), "node {node} does not belong to this tree");

        let edit = self.nodes[node].plan_property_edit(ty, value, same)?;
        Ok(self.record_property_edit(node, edit))
    }

    fn record_property_edit(&mut self, node: NodeId, edit: PropertyEdit) -> bool {
        let operation = match edit {
            PropertyEdit::Unchanged => return false,
            PropertyEdit::Insert { index, property } => UndoOperation::NewProperty {
                node,
                index,
                property: Some(property),
            },
            PropertyEdit::Replace { index, value } => UndoOperation::ChangeProperty { node, index, value },
            PropertyEdit::Remove { index } => UndoOperation::DeleteProperty {
                node,
                index,
                property: None,
            },
        };

        self.begin_action();
        self.apply_operation(operation);
        self.end_action();
        true
    }

    pub fn set_property(
        &mut self,
        node: NodeId,
        ty: PropertyType,
        value: Option<PropertyValue>,
    ) -> Result<bool, EditorError> {
        self.set_property_with(node, ty, value, |old, new| old == new)
    }

    pub fn delete_property(&mut self, node: NodeId, ty: PropertyType) -> bool {
        // Removal never builds a value, so it cannot fail
        self.set_property(node, ty, None).unwrap_or(false)
    }

    /// Remove one unrecognized property, leaving other unknown ones
    pub fn delete_unknown_property(&mut self, node: NodeId, identifier: &str) -> bool {
        assert!(self.nodes.contains(node), "node {node} does not belong to this tree");

        let edit = self.nodes[node].plan_unknown_property_removal(identifier);
        self.record_property_edit(node, edit)
    }

    /// Set a property that has no value, such as `KO` or `DO`
    pub fn set_none_property(&mut self, node: NodeId, ty: PropertyType) -> Result<bool, EditorError> {
        self.set_property(node, ty, Some(PropertyValue::None))
    }

    pub fn set_number_property(&mut self, node: NodeId, ty: PropertyType, number: i32) -> Result<bool, EditorError> {
        self.set_property(node, ty, Some(PropertyValue::Number(number)))
    }

    pub fn set_real_property(&mut self, node: NodeId, ty: PropertyType, real: f64) -> Result<bool, EditorError> {
        self.set_property(node, ty, Some(PropertyValue::Real(real)))
    }

    /// Set a text property, normalizing the text first
    ///
    /// Text that normalizes to nothing removes the property.
    pub fn set_text_property(&mut self, node: NodeId, ty: PropertyType, text: &str) -> Result<bool, EditorError> {
        let simple = ty.value_type() == ValueType::SimpleText;
        let value = normalize_text(text, simple).map(|text| {
            if simple {
                PropertyValue::SimpleText(text)
            } else {
                PropertyValue::Text(text)
            }
        });
        self.set_property(node, ty, value)
    }

    /// Set a point list property; an empty list removes the property
    /// unless the type allows empty lists
    pub fn set_point_list_property(
        &mut self,
        node: NodeId,
        ty: PropertyType,
        points: PointList,
    ) -> Result<bool, EditorError> {
        let points = if ty.value_type() == ValueType::EmptyPointList {
            Some(points)
        } else {
            points.non_empty()
        };
        self.set_property(node, ty, points.map(PropertyValue::PointList))
    }

    pub fn set_label_list_property(
        &mut self,
        node: NodeId,
        ty: PropertyType,
        labels: LabelList,
    ) -> Result<bool, EditorError> {
        let value = (!labels.is_empty()).then(|| PropertyValue::LabelList(labels));
        self.set_property(node, ty, value)
    }

    pub fn set_figure_property(&mut self, node: NodeId, figure: Option<Figure>) -> Result<bool, EditorError> {
        let value = figure.map_or(PropertyValue::None, PropertyValue::Figure);
        self.set_property(node, PropertyType::Figure, Some(value))
    }

    /// Record the clock of `color` at `node` as one action
    ///
    /// `moves_left` is only written when given. The cached clock state is
    /// refreshed when `node` is the current node.
    pub fn set_time_left(
        &mut self,
        node: NodeId,
        color: Color,
        seconds: f64,
        moves_left: Option<i32>,
    ) -> Result<bool, EditorError> {
        let (time_type, moves_type) = match color {
            Color::Black => (PropertyType::BlackTimeLeft, PropertyType::BlackMovesLeft),
            Color::White => (PropertyType::WhiteTimeLeft, PropertyType::WhiteMovesLeft),
        };

        self.begin_action();
        let result = self.set_real_property(node, time_type, seconds).and_then(|time_changed| {
            let moves_changed = match moves_left {
                Some(moves) => self.set_number_property(node, moves_type, moves)?,
                None => false,
            };
            Ok(time_changed || moves_changed)
        });
        self.end_action();

        if self.current_node == node {
            self.board_state.time_left[color.index()] = Some(seconds);
            if moves_left.is_some() {
                self.board_state.moves_left[color.index()] = moves_left;
            }
        }

        result
    }

    /// Fold or unfold a node in tree views; not recorded for undo
    pub fn set_node_collapsed(&mut self, node: NodeId, collapsed: bool) -> bool {
        if self.nodes[node].collapsed == collapsed {
            return false;
        }

        self.notify(TreeEvent::AboutToModifyMap);
        self.nodes[node].collapsed = collapsed;
        self.notify(TreeEvent::MapModified);
        true
    }
}
