//! Block document domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the edit and session layers.
//! - Keep one flat, ordered block shape for every rendering surface.
//!
//! # Invariants
//! - Every block is identified by a stable `BlockId`.
//! - Removal is permanent; there are no tombstones.

pub mod block;
pub mod document;
