//! # Kifu SGF
//!
//! In-memory store for game records: nodes, their variations and the
//! annotations (properties) attached to them.
//!
//! ## Structure
//!
//! ```text
//! NodeStore (arena)
//!   root ── first_child ──► A ── next_sibling ──► B ── next_sibling ──► C
//!                           │
//!                           └─ first_child ──► ...
//! ```
//!
//! Nodes live in an arena and refer to each other through [`NodeId`]
//! handles. `parent`, `next_sibling` and `current_variation` are plain
//! handles, so the structure has no reference cycles. A node stays in
//! the arena until someone explicitly frees it, which lets an undo log
//! detach a subtree now and resurrect it later.
//!
//! This crate is purely structural: it never touches a board and never
//! notifies anyone. Undo tracking lives in the editor crate.

mod error;
mod node;
mod property;
mod store;
mod text;
mod value;

pub use error::SgfError;
pub use node::{MoveColor, Node, NodeId, PropertyEdit, PropertySlot};
pub use property::{Property, PropertyType, ValueType};
pub use store::{Children, NodeStore};
pub use text::normalize_text;
pub use value::{Emphasis, Figure, Label, LabelList, PropertyValue};
