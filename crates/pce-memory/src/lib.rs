//! # pce-memory
//!
//! The memory pipeline of the persistent context engine.
//!
//! - **Builder**: [`FrameBuilder`] distills one user/assistant exchange into a
//!   size-bounded [`Frame`](pce_core::Frame) using rule tables and the text
//!   primitives from `pce-core`
//! - **Store**: [`FrameStore`] appends frames to a JSONL log and prunes it to
//!   the most recent frames
//! - **Retrieval**: keyword and recency scoring with a most-recent fallback
//! - **Reconstruction**: folds selected frames into a
//!   [`ContextBundle`](pce_core::ContextBundle)
//! - **Engine**: [`ContextEngine`] ties the pieces into `save`, `load`, and
//!   `summarize`

#![deny(unsafe_code)]

pub mod builder;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod reconstruct;
pub mod retrieval;
pub mod rules;
pub mod store;

pub use builder::FrameBuilder;
pub use engine::ContextEngine;
pub use errors::{MemoryError, Result};
pub use reconstruct::reconstruct;
pub use retrieval::{ScoredFrame, rank_frames, select_frames};
pub use store::FrameStore;
