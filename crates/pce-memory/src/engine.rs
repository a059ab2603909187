//! Context engine: the save/load entry points over a frame store.
//!
//! ```text
//! save(user, assistant) ──► FrameBuilder ──► FrameStore::append ──► Frame
//! load(query)           ──► FrameStore::read_all ──► select_frames ──► reconstruct ──► ContextBundle
//! ```

use pce_core::time::now_timestamp;
use pce_core::{ContextBundle, Frame};
use pce_settings::{PceSettings, RetrievalSettings};
use tracing::{debug, instrument};

use crate::builder::FrameBuilder;
use crate::errors::{MemoryError, Result};
use crate::reconstruct::reconstruct;
use crate::retrieval::select_frames;
use crate::store::FrameStore;

/// Persistent context engine.
#[derive(Clone, Debug)]
pub struct ContextEngine {
    store: FrameStore,
    builder: FrameBuilder,
    retrieval: RetrievalSettings,
}

impl ContextEngine {
    /// Create an engine from its parts.
    pub fn new(store: FrameStore, builder: FrameBuilder, retrieval: RetrievalSettings) -> Self {
        Self {
            store,
            builder,
            retrieval,
        }
    }

    /// Create an engine from loaded settings.
    pub fn from_settings(settings: &PceSettings) -> Self {
        Self::new(
            FrameStore::from_settings(&settings.store),
            FrameBuilder::new(settings.distill.clone()),
            settings.retrieval.clone(),
        )
    }

    /// Underlying frame store.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Distill one interaction into a frame and persist it.
    ///
    /// Returns [`MemoryError::EmptyInput`] without writing when either
    /// message is empty after trimming.
    pub fn save(&self, user: &str, assistant: &str) -> Result<Frame> {
        self.save_at(user, assistant, now_timestamp())
    }

    /// [`save`](Self::save) with an explicit timestamp.
    #[instrument(skip_all, fields(timestamp = %timestamp))]
    pub fn save_at(&self, user: &str, assistant: &str, timestamp: String) -> Result<Frame> {
        if user.trim().is_empty() {
            return Err(MemoryError::EmptyInput("user"));
        }
        if assistant.trim().is_empty() {
            return Err(MemoryError::EmptyInput("assistant"));
        }

        let frame = self.builder.build(user, assistant, timestamp);
        self.store.append(&frame)?;
        debug!(topics = ?frame.key_topics, tags = ?frame.tags, "saved frame");
        Ok(frame)
    }

    /// Reconstruct context from the frames most relevant to `query`.
    ///
    /// An empty query selects the most recent frames.
    pub fn load(&self, query: &str) -> Result<ContextBundle> {
        self.load_with_limit(query, self.retrieval.load_max_frames)
    }

    /// Reconstruct context from at most `max_frames` selected frames.
    #[instrument(skip(self))]
    pub fn load_with_limit(&self, query: &str, max_frames: usize) -> Result<ContextBundle> {
        let frames = self.store.read_all()?;
        let selected: Vec<Frame> = select_frames(&frames, query, max_frames)
            .into_iter()
            .map(|scored| scored.frame.clone())
            .collect();
        debug!(stored = frames.len(), selected = selected.len(), "selected frames");
        Ok(reconstruct(&selected))
    }

    /// Reconstruct context from recent history with the larger summary cap.
    pub fn summarize(&self) -> Result<ContextBundle> {
        self.load_with_limit("", self.retrieval.summary_max_frames)
    }
}
