//! # Navigation & Replay
//!
//! Moves the cursor through the tree and keeps the attached board and
//! the [`BoardState`](crate::BoardState) cache in step with it.
//!
//! The board is used as a ply stack: descending one node pushes exactly
//! one ply (a move, a setup change or a dummy move) and ascending pops
//! them again. Jumping to an arbitrary node resets the board and replays
//! the path from the root.

use crate::{GameTree, TreeEvent};
use kifu_board::{Color, Game, MovePoint, Point};
use kifu_sgf::{NodeId, PropertyType};
use std::collections::BTreeMap;
use tracing::debug;

/// Which sibling to move to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationDirection {
    Next,
    Previous,
}

/// Variations available at some level of the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariationSummary {
    pub total: usize,
    /// Black moves, counted per point
    pub black: BTreeMap<Point, usize>,
    pub white: BTreeMap<Point, usize>,
    /// Variations that are not a move on the board (passes included)
    pub other: usize,
}

const TIME_LEFT: [PropertyType; 2] = [PropertyType::BlackTimeLeft, PropertyType::WhiteTimeLeft];
const MOVES_LEFT: [PropertyType; 2] = [PropertyType::BlackMovesLeft, PropertyType::WhiteMovesLeft];

impl GameTree {
    /// Go `count` nodes down the current variation; a negative count
    /// goes to the end of the variation
    ///
    /// Returns whether the cursor moved.
    pub fn go_down(&mut self, count: isize) -> bool {
        if count == 0 || self.nodes[self.current_node].first_child().is_none() {
            return false;
        }

        self.notify(TreeEvent::AboutToChangeCurrentNode);
        self.descend_nodes(usize::try_from(count).unwrap_or(usize::MAX));
        self.notify(TreeEvent::CurrentNodeChanged);
        true
    }

    /// Go `count` nodes up; a negative count goes to the root
    pub fn go_up(&mut self, count: isize) -> bool {
        if count == 0 || self.nodes[self.current_node].parent().is_none() {
            return false;
        }

        self.notify(TreeEvent::AboutToChangeCurrentNode);
        match usize::try_from(count) {
            Ok(count) => self.ascend_nodes(count),
            Err(_) => self.enter_tree_at(self.root),
        }
        self.notify(TreeEvent::CurrentNodeChanged);
        true
    }

    /// Move to the next or previous sibling of the current node
    pub fn switch_to_variation(&mut self, direction: VariationDirection) -> bool {
        let current = self.current_node;
        let sibling = match direction {
            VariationDirection::Next => self.nodes[current].next_sibling(),
            VariationDirection::Previous => self.nodes.previous_sibling(current),
        };

        match sibling {
            Some(sibling) => self.switch_to_given_variation(sibling),
            None => false,
        }
    }

    /// Move to `node`, which must be a sibling of the current node
    pub fn switch_to_given_variation(&mut self, node: NodeId) -> bool {
        let parent = self.nodes[self.current_node].parent();
        assert_eq!(
            self.nodes[node].parent(),
            parent,
            "node {node} is not a sibling of the current node"
        );
        if node == self.current_node {
            return false;
        }
        let Some(parent) = parent else {
            return false;
        };

        self.notify(TreeEvent::AboutToChangeCurrentNode);
        self.ascend_nodes(1);
        self.nodes.set_current_variation(parent, Some(node));
        self.descend_nodes(1);
        self.notify(TreeEvent::CurrentNodeChanged);
        true
    }

    /// Jump to any node of the tree
    pub fn switch_to_given_node(&mut self, node: NodeId) -> bool {
        assert!(self.nodes.contains(node), "node {node} does not belong to this tree");
        if node == self.current_node {
            return false;
        }

        self.notify(TreeEvent::AboutToChangeCurrentNode);
        self.switch_path_to(node);
        self.notify(TreeEvent::CurrentNodeChanged);
        true
    }

    /// Count the variations among the current node and its siblings
    /// (`of_current_node`) or among the current node's children
    pub fn variation_summary(&self, of_current_node: bool) -> VariationSummary {
        let current = &self.nodes[self.current_node];
        let first = match (of_current_node, current.parent()) {
            (true, Some(parent)) => self.nodes[parent].first_child(),
            (true, None) => Some(self.current_node),
            (false, _) => current.first_child(),
        };

        let mut summary = VariationSummary::default();
        let mut variation = first;
        while let Some(id) = variation {
            let node = &self.nodes[id];
            match (node.move_color.color(), node.move_point) {
                (Some(Color::Black), MovePoint::At(point)) => *summary.black.entry(point).or_default() += 1,
                (Some(Color::White), MovePoint::At(point)) => *summary.white.entry(point).or_default() += 1,
                _ => summary.other += 1,
            }
            summary.total += 1;
            variation = node.next_sibling();
        }

        summary
    }

    /// Find a sibling variation (the current node included) with a move
    /// at `point`
    ///
    /// With `after_current`, only siblings past the current node in the
    /// given direction are considered. Otherwise `Next` finds the first
    /// and `Previous` the last such variation.
    pub fn find_variation_at(
        &self,
        point: Point,
        direction: VariationDirection,
        after_current: bool,
    ) -> Option<NodeId> {
        let current = self.current_node;
        let siblings: Vec<NodeId> = match self.nodes[current].parent() {
            Some(parent) => self.nodes.children(parent).collect(),
            None => vec![current],
        };
        let position = siblings.iter().position(|node| *node == current)?;

        let plays_at = |id: &&NodeId| {
            let node = &self.nodes[**id];
            node.is_move() && node.move_point == MovePoint::At(point)
        };

        match (direction, after_current) {
            (VariationDirection::Next, true) => siblings[position + 1..].iter().find(plays_at),
            (VariationDirection::Next, false) => siblings.iter().find(plays_at),
            (VariationDirection::Previous, true) => siblings[..position].iter().rev().find(plays_at),
            (VariationDirection::Previous, false) => siblings.iter().rev().find(plays_at),
        }
        .copied()
    }

    /// Point every ancestor of `node` towards it, then replay from the
    /// root
    pub(crate) fn switch_path_to(&mut self, node: NodeId) {
        let mut child = node;
        while let Some(parent) = self.nodes[child].parent() {
            self.nodes.set_current_variation(parent, Some(child));
            child = parent;
        }
        debug_assert_eq!(child, self.root, "node {node} is detached from the tree");

        self.enter_tree_at(node);
    }

    /// Reset the board and derived state, then replay from the root down
    /// to `target`, which must lie on the current-variation path
    pub(crate) fn enter_tree_at(&mut self, target: NodeId) {
        if let Some(board) = self.board.as_deref_mut() {
            board.reset();
        }
        self.board_state = Default::default();

        let depth = self
            .nodes
            .depth_delta(self.root, target)
            .expect("target node is not in this tree");
        self.replay_down(None, depth + 1);
        debug_assert_eq!(self.current_node, target, "target is off the current-variation path");

        debug!(depth, "entered tree");
    }

    /// Go down from the current node
    pub(crate) fn descend_nodes(&mut self, count: usize) {
        self.replay_down(Some(self.current_node), count);
    }

    /// Follow current variations down from `start` (`None` is the
    /// position before the root)
    fn replay_down(&mut self, start: Option<NodeId>, count: usize) {
        let mut cursor = start;
        let mut depth = start.map(|_| self.current_node_depth);
        let mut steps = 0;

        while steps < count {
            let next = match cursor {
                None => self.root,
                Some(node) => match self.next_on_path(node) {
                    Some(next) => next,
                    None => break,
                },
            };

            let next_depth = depth.map_or(0, |depth| depth + 1);
            if self.board_state.game_info.is_none() && self.nodes[next].is_game_info_node() {
                self.board_state.game_info = Some((next, next_depth));
            }
            self.replay_node(next);

            cursor = Some(next);
            depth = Some(next_depth);
            steps += 1;
        }

        if let (Some(node), Some(depth)) = (cursor, depth) {
            if steps > 0 {
                self.find_time_control_data(start, node);
                self.current_node = node;
                self.current_node_depth = depth;
                self.determine_final_color_to_play();
            }
        }
    }

    /// Child to descend into, defaulting the current variation to the
    /// first child on the first visit
    fn next_on_path(&mut self, node: NodeId) -> Option<NodeId> {
        let first_child = self.nodes[node].first_child()?;
        match self.nodes[node].current_variation() {
            Some(variation) => {
                if variation != first_child && self.board_state.last_main_variation_node.is_none() {
                    self.board_state.last_main_variation_node = Some(node);
                }
                Some(variation)
            }
            None => {
                self.nodes.set_current_variation(node, Some(first_child));
                Some(first_child)
            }
        }
    }

    /// Re-derive the main-line departure point after the sibling order
    /// on the current path may have changed
    pub(crate) fn refresh_last_main_variation_node(&mut self) {
        let path = self.nodes.path_to_root(self.current_node);
        self.board_state.last_main_variation_node = path
            .windows(2)
            .filter(|pair| self.nodes[pair[1]].first_child() != Some(pair[0]))
            .map(|pair| pair[1])
            .last();
    }

    /// Push one ply for `id` onto the board and update the cache
    fn replay_node(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let state = &mut self.board_state;
        let board = self.board.as_deref_mut();

        if let Some(color) = node.move_color.color() {
            if let Some(board) = board {
                board.play_move(color, node.move_point, node.payload.as_ref());
            }
            state.sgf_color_to_play = Some(color.other());
            state.last_move = Some(node.move_point);
            state.last_move_node = Some(id);
        } else if node.is_setup() {
            if let Some(board) = board {
                let mut changes = node.setup_changes();
                if self.game != Game::Amazons {
                    changes.arrows = Default::default();
                }
                board.apply_setup(&changes);
            }
            state.last_move = None;
            if let Some(color) = node.to_play {
                state.sgf_color_to_play = Some(color);
            }
        } else if let Some(board) = board {
            board.add_dummy_move();
        }

        if !node.is_setup() {
            let move_number = node
                .number(PropertyType::MoveNumber)
                .and_then(|number| u32::try_from(number).ok());
            if let (Some(board), Some(move_number)) = (self.board.as_deref_mut(), move_number) {
                board.set_move_number(move_number);
            }
        }
    }

    /// Go `count` nodes up, re-deriving the cached state from the path
    /// above the new current node
    pub(crate) fn ascend_nodes(&mut self, count: usize) {
        let mut node = self.current_node;
        let mut steps = 0;
        while steps < count {
            let Some(parent) = self.nodes[node].parent() else {
                break;
            };
            node = parent;
            steps += 1;
            if self.board_state.last_main_variation_node == Some(node) {
                self.board_state.last_main_variation_node = None;
            }
        }

        if node == self.root {
            self.enter_tree_at(self.root);
            return;
        }

        if let Some(board) = self.board.as_deref_mut() {
            board.undo(steps);
        }
        self.rederive_last_move(node);
        self.refresh_time_control_data(node);

        self.current_node = node;
        self.current_node_depth -= steps;
        if matches!(self.board_state.game_info, Some((_, depth)) if depth > self.current_node_depth) {
            self.board_state.game_info = None;
        }
        self.determine_final_color_to_play();
    }

    /// Walk up from `from` to the nearest node that fixes the last move
    fn rederive_last_move(&mut self, from: NodeId) {
        let state = &mut self.board_state;
        state.sgf_color_to_play = None;
        state.last_move = None;
        state.last_move_node = None;

        let mut need_coordinates = true;
        let mut look_up = Some(from);
        while let Some(id) = look_up {
            let node = &self.nodes[id];
            if let Some(color) = node.move_color.color() {
                state.sgf_color_to_play.get_or_insert(color.other());
                state.last_move_node = Some(id);
                if need_coordinates {
                    state.last_move = Some(node.move_point);
                }
                break;
            }
            if node.is_setup() {
                if state.sgf_color_to_play.is_none() {
                    state.sgf_color_to_play = node.to_play;
                }
                need_coordinates = false;
            }
            look_up = node.parent();
        }
    }

    /// Look for clock data from `lower` upwards, stopping before `upper`
    ///
    /// Values already cached for the path above `upper` stay in place
    /// unless a node in between overrides them.
    fn find_time_control_data(&mut self, upper: Option<NodeId>, lower: NodeId) {
        let mut have_time = [false; 2];
        let mut have_moves = [false; 2];
        self.scan_time_control(upper, lower, &mut have_time, &mut have_moves);
    }

    /// After going up, cached clock data may come from nodes that are no
    /// longer on the path; search again for those values only
    fn refresh_time_control_data(&mut self, from: NodeId) {
        let state = &mut self.board_state;
        let mut have_time = [false; 2];
        let mut have_moves = [false; 2];
        for index in 0..2 {
            have_time[index] = state.time_left[index].take().is_none();
            have_moves[index] = state.moves_left[index].take().is_none();
        }

        self.scan_time_control(None, from, &mut have_time, &mut have_moves);
    }

    fn scan_time_control(
        &mut self,
        upper: Option<NodeId>,
        lower: NodeId,
        have_time: &mut [bool; 2],
        have_moves: &mut [bool; 2],
    ) {
        let state = &mut self.board_state;
        let mut cursor = Some(lower);

        while let Some(id) = cursor {
            if Some(id) == upper || (have_time.iter().all(|have| *have) && have_moves.iter().all(|have| *have)) {
                break;
            }

            let node = &self.nodes[id];
            for index in 0..2 {
                if !have_time[index] {
                    if let Some(seconds) = node.real(TIME_LEFT[index]) {
                        state.time_left[index] = Some(seconds);
                        have_time[index] = true;
                    }
                }
                if !have_moves[index] {
                    if let Some(moves) = node.number(MOVES_LEFT[index]) {
                        state.moves_left[index] = Some(moves);
                        have_moves[index] = true;
                    }
                }
            }
            cursor = node.parent();
        }
    }

    fn determine_final_color_to_play(&mut self) {
        let state = &mut self.board_state;

        if state.sgf_color_to_play.is_none() && self.game == Game::Go {
            if let Some((game_info, _)) = state.game_info {
                let node = &self.nodes[game_info];
                match node.number(PropertyType::Handicap) {
                    Some(handicap) if handicap > 0 && node.has_property(PropertyType::AddBlack) => {
                        state.sgf_color_to_play = Some(Color::White);
                    }
                    Some(0) => state.sgf_color_to_play = Some(Color::Black),
                    _ => {}
                }
            }
        }

        state.color_to_play = match self.board.as_deref() {
            Some(board) => board.adjust_color_to_play(state.sgf_color_to_play),
            None => state.sgf_color_to_play.unwrap_or(Color::Black),
        };
    }
}
