//! # Kifu Editor
//!
//! Editing engine for game records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ sgf: node arena + properties                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: GameTree                            │
//! │  - Undo history (actions of operations)     │
//! │  - Cursor navigation + replay on a board    │
//! │  - Setup / markup diffs                     │
//! │  - Notifications + collection tracking      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ board: Board trait (replay target)          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Every edit is an undo entry**: trees change only through
//!    recorded operations, grouped into actions
//! 2. **Incremental replay**: the board follows the cursor one ply at a
//!    time instead of being rebuilt on every move
//! 3. **One notification per action**: observers see each `AboutTo*`
//!    event paired with exactly one completion event; handlers may edit
//!    the tree from completion events
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kifu_board::{Color, Game, Point, SnapshotBoard};
//! use kifu_editor::{GameTree, TreeConfig};
//!
//! let config = TreeConfig::new(Game::Go, 9, 9);
//! let mut tree = GameTree::new(&config)?;
//! tree.enter_tree(Box::new(SnapshotBoard::new(Game::Go, 9, 9)?))?;
//!
//! tree.append_move(Color::Black, Point::new(3, 3).into(), None);
//! tree.delete_current_node();
//! tree.undo();
//! ```

mod board_state;
mod collection;
mod config;
mod custom;
mod edits;
mod errors;
mod history;
mod navigation;
mod notifications;
mod operations;
mod setup;
mod tree;

pub use board_state::BoardState;
pub use collection::{Collection, ModificationTracker};
pub use config::{HistoryConfig, TreeConfig};
pub use custom::CustomOperation;
pub use errors::EditorError;
pub use history::{EntryId, UndoHistory};
pub use navigation::{VariationDirection, VariationSummary};
pub use notifications::{TreeEvent, TreeObserver};
pub use operations::{Direction, NodeColor, UndoOperation};
pub use setup::{Markup, MarkupGrid};
pub use tree::GameTree;
