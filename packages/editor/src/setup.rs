//! # Setup & Markup Diff
//!
//! Turns a desired board (or markup layout) into the smallest set of
//! property edits on the current node, recorded as one action.

use crate::{EditorError, GameTree, NodeColor, UndoOperation};
use kifu_board::{BoardError, Game, Grid, Point, PointList, SetupChanges};
use kifu_sgf::{MoveColor, NodeId, PropertyType, PropertyValue};
use tracing::{debug, instrument};

/// Cosmetic point markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Markup {
    Cross,
    Circle,
    Square,
    Triangle,
    Selected,
}

impl Markup {
    pub const ALL: [Markup; 5] = [
        Markup::Cross,
        Markup::Circle,
        Markup::Square,
        Markup::Triangle,
        Markup::Selected,
    ];

    pub fn property_type(self) -> PropertyType {
        match self {
            Markup::Cross => PropertyType::Cross,
            Markup::Circle => PropertyType::Circle,
            Markup::Square => PropertyType::Square,
            Markup::Triangle => PropertyType::Triangle,
            Markup::Selected => PropertyType::Selected,
        }
    }
}

/// At most one markup per board point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupGrid {
    width: u8,
    height: u8,
    cells: Vec<Option<Markup>>,
}

impl MarkupGrid {
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        // Same size limits as a board grid
        Grid::new(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn get(&self, point: Point) -> Option<Markup> {
        self.index(point).and_then(|index| self.cells[index])
    }

    pub fn set(&mut self, point: Point, markup: Option<Markup>) -> Result<(), BoardError> {
        let index = self.index(point).ok_or(BoardError::OutOfBounds {
            point,
            width: self.width,
            height: self.height,
        })?;
        self.cells[index] = markup;
        Ok(())
    }

    /// Points carrying `markup`
    pub fn points_with(&self, markup: Markup) -> PointList {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Point::new(x, y)))
            .filter(|point| self.get(*point) == Some(markup))
            .collect()
    }

    fn index(&self, point: Point) -> Option<usize> {
        (point.x < self.width && point.y < self.height)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }
}

impl GameTree {
    /// Make the position at the current node look like `desired`
    ///
    /// The difference is stored as setup properties: on a new setup
    /// child if the current node is a move, on the current node
    /// otherwise. Returns whether any property changed.
    #[instrument(skip(self, desired), fields(node = %self.current_node))]
    pub fn apply_setup_changes(&mut self, desired: &Grid) -> Result<bool, EditorError> {
        let board = self.board.as_deref().ok_or(EditorError::NoBoard)?;
        if (desired.width(), desired.height()) != (board.width(), board.height()) {
            return Err(BoardError::SizeMismatch {
                expected: (board.width(), board.height()),
                found: (desired.width(), desired.height()),
            }
            .into());
        }

        let node = self.current_node;
        let parent = self.nodes[node].parent();

        // Diff against the position before this node's own setup
        let rewound = self.nodes[node].is_setup();
        if rewound {
            match parent {
                Some(_) => self.ascend_nodes(1),
                None => {
                    if let Some(board) = self.board.as_deref_mut() {
                        board.undo(1);
                    }
                }
            }
        }

        let mut changes = match self.board.as_deref() {
            Some(board) => board.diff(desired)?,
            None => SetupChanges::default(),
        };
        if self.game != Game::Amazons {
            changes.arrows = PointList::default();
        }

        self.begin_action();
        let result = self.record_setup_changes(node, changes);

        if rewound && self.action.node_to_switch_to.is_none() {
            match parent {
                Some(_) => self.descend_nodes(1),
                None => self.enter_tree_at(node),
            }
        }
        self.end_action();

        if let Ok(changed) = result {
            debug!(changed, "applied setup changes");
        }
        result
    }

    fn record_setup_changes(&mut self, node: NodeId, changes: SetupChanges) -> Result<bool, EditorError> {
        let has_difference = !changes.is_empty();
        let lists = [
            (PropertyType::AddEmpty, changes.remove),
            (PropertyType::AddBlack, changes.black),
            (PropertyType::AddWhite, changes.white),
            (PropertyType::AddArrows, changes.arrows),
        ];

        if self.nodes[node].is_move() {
            if !has_difference {
                return Ok(false);
            }

            // Properties of a brand new node need no undo entries of
            // their own; recording the node is enough
            let child = self.nodes.create(Some(node));
            self.nodes[child].move_color = MoveColor::Setup;
            for (ty, points) in lists {
                if let Some(points) = points.non_empty() {
                    self.nodes[child].set_property(ty, Some(PropertyValue::PointList(points)))?;
                }
            }

            self.apply_operation(UndoOperation::NewNode {
                node: child,
                parent_current_variation: Some(child),
            });
            return Ok(true);
        }

        let move_color = if has_difference { MoveColor::Setup } else { MoveColor::None };
        if self.nodes[node].move_color != move_color {
            self.apply_operation(UndoOperation::ChangeNodeColor {
                node,
                color: NodeColor::Move(move_color),
            });
        }

        let mut changed = false;
        for (ty, points) in lists {
            changed |= self.set_property(node, ty, points.non_empty().map(PropertyValue::PointList))?;
        }
        Ok(changed)
    }

    /// Replace the markup of the current node with `markup`
    #[instrument(skip(self, markup), fields(node = %self.current_node))]
    pub fn apply_markup_changes(&mut self, markup: &MarkupGrid) -> Result<bool, EditorError> {
        if (markup.width(), markup.height()) != (self.width, self.height) {
            return Err(BoardError::SizeMismatch {
                expected: (self.width, self.height),
                found: (markup.width(), markup.height()),
            }
            .into());
        }

        let node = self.current_node;
        let mut changed = false;

        self.begin_action();
        let result = Markup::ALL.iter().try_for_each(|kind| {
            let points = markup.points_with(*kind).non_empty();
            changed |= self.set_property(node, kind.property_type(), points.map(PropertyValue::PointList))?;
            Ok::<_, EditorError>(())
        });
        self.end_action();
        result?;

        debug!(changed, "applied markup changes");
        Ok(changed)
    }

    /// Markup stored on the current node
    pub fn markup(&self) -> MarkupGrid {
        let mut grid = MarkupGrid {
            width: self.width,
            height: self.height,
            cells: vec![None; self.width as usize * self.height as usize],
        };

        let node = &self.nodes[self.current_node];
        for kind in Markup::ALL {
            if let Some(points) = node.point_list(kind.property_type()) {
                for point in points {
                    if let Err(error) = grid.set(*point, Some(kind)) {
                        debug!(%error, "skipping markup outside the board");
                    }
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_grid_bounds() {
        let mut grid = MarkupGrid::new(5, 5).unwrap();
        grid.set(Point::new(4, 4), Some(Markup::Circle)).unwrap();
        assert!(grid.set(Point::new(5, 0), Some(Markup::Cross)).is_err());

        assert_eq!(grid.get(Point::new(4, 4)), Some(Markup::Circle));
        assert_eq!(grid.points_with(Markup::Circle).len(), 1);
        assert!(MarkupGrid::new(0, 5).is_err());
    }
}
