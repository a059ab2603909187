//! # pce-core
//!
//! Foundation types and text primitives for the persistent context engine.
//!
//! This crate provides the shared vocabulary the other crates depend on:
//!
//! - **Frames**: [`Frame`] and its nested value types, the persisted unit of memory
//! - **Bundles**: [`ContextBundle`], the reconstructed view handed to callers
//! - **Text**: deterministic tokenizer, keyword extractor, and sentence compressor
//! - **Time**: second-precision UTC timestamps used as frame ordering keys
//! - **Logging**: `tracing` subscriber setup shared by binaries

#![deny(unsafe_code)]

pub mod constants;
pub mod frame;
pub mod logging;
pub mod text;
pub mod time;

pub use frame::{
    ContextBundle, Frame, Preferences, ProceduralMemory, ProjectState, SemanticMemory,
};
pub use text::{compress, dedup_preserving_order, extract_keywords, tokenize};
