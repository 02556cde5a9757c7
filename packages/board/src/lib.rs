//! # Kifu Board
//!
//! Board vocabulary shared by the game record model and the editor.
//!
//! The editor never evaluates positions on its own. It replays nodes
//! onto an implementation of the [`Board`] trait, which behaves like a
//! stack: every move, setup change or dummy entry pushes one ply, and
//! [`Board::undo`] pops plies again.
//!
//! ```text
//! descend:  play_move / apply_setup / add_dummy_move   (push)
//! ascend:   undo(n)                                    (pop)
//! enter:    reset, then replay from the root
//! ```
//!
//! [`SnapshotBoard`] is a rule-free implementation: it places stones
//! and arrows but never captures. Rule engines live outside this crate.

mod board;
mod color;
mod error;
mod game;
mod grid;
mod point;
mod snapshot;

pub use board::Board;
pub use color::{Cell, Color};
pub use error::BoardError;
pub use game::Game;
pub use grid::{Grid, SetupChanges};
pub use point::{MovePayload, MovePoint, Point, PointList};
pub use snapshot::SnapshotBoard;

/// Largest board dimension an SGF record can describe.
pub const MAX_BOARD_SIZE: u8 = 52;
