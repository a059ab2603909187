//! Append-only JSONL frame store with bounded retention.
//!
//! One frame per line, keys sorted for reproducible diffs. After every append
//! the store counts its frames and, once over the cap, rewrites the file with
//! only the most recent ones.
//!
//! The append and the pruning rewrite are separate file operations and the
//! rewrite is not atomic. A crash between them leaves the log over the cap
//! (the next append catches up); a crash during the rewrite can truncate it.
//! Readers tolerate damage one line at a time. There is no locking: a single
//! process is assumed to own the file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use pce_core::Frame;
use pce_settings::StoreSettings;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::{MemoryError, Result};

/// JSONL-backed frame log.
#[derive(Clone, Debug)]
pub struct FrameStore {
    path: PathBuf,
    max_frames: usize,
}

impl FrameStore {
    /// Create a store over `path` keeping at most `max_frames` frames.
    ///
    /// Nothing touches the filesystem until the first append.
    pub fn new(path: impl Into<PathBuf>, max_frames: usize) -> Self {
        Self {
            path: path.into(),
            max_frames,
        }
    }

    /// Create a store from loaded settings.
    pub fn from_settings(settings: &StoreSettings) -> Self {
        Self::new(settings.path.clone(), settings.max_frames)
    }

    /// Path of the frame log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Retention cap.
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Append one frame, then enforce retention.
    pub fn append(&self, frame: &Frame) -> Result<()> {
        self.ensure_parent_dir()?;

        let line = encode_frame(frame)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| MemoryError::io("open", &self.path, e))?;
        file.write_all(line.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .and_then(|()| file.flush())
            .map_err(|e| MemoryError::io("append to", &self.path, e))?;
        info!(
            path = %self.path.display(),
            timestamp = %frame.timestamp,
            "frame appended"
        );

        let _ = self.prune()?;
        Ok(())
    }

    /// Read every parsable frame in write order.
    ///
    /// A missing file reads as empty. Blank lines are ignored. Lines that are
    /// not valid UTF-8 JSON frames are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<Frame>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|e| MemoryError::io("open", &self.path, e))?;

        let mut frames = Vec::new();
        // Raw bytes per line: a torn write can split a multi-byte character.
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|e| MemoryError::io("read", &self.path, e))?;
            if line.trim_ascii().is_empty() {
                continue;
            }
            match serde_json::from_slice::<Frame>(&line) {
                Ok(frame) => frames.push(frame),
                Err(error) => warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    %error,
                    "skipping unparsable frame record"
                ),
            }
        }
        Ok(frames)
    }

    /// Number of parsable frames in the log.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_all()?.len())
    }

    /// Whether the log holds no parsable frames.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop the oldest frames when the log exceeds the cap.
    ///
    /// Returns how many frames were removed. Unparsable lines do not survive
    /// a rewrite.
    pub fn prune(&self) -> Result<usize> {
        let frames = self.read_all()?;
        if frames.len() <= self.max_frames {
            return Ok(0);
        }

        let removed = frames.len() - self.max_frames;
        self.rewrite(&frames[removed..])?;
        debug!(
            path = %self.path.display(),
            removed,
            kept = self.max_frames,
            "pruned frame log"
        );
        Ok(removed)
    }

    fn rewrite(&self, frames: &[Frame]) -> Result<()> {
        self.ensure_parent_dir()?;
        let file = File::create(&self.path).map_err(|e| MemoryError::io("rewrite", &self.path, e))?;
        let mut writer = BufWriter::new(file);
        for frame in frames {
            let line = encode_frame(frame)?;
            writer
                .write_all(line.as_bytes())
                .and_then(|()| writer.write_all(b"\n"))
                .map_err(|e| MemoryError::io("rewrite", &self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| MemoryError::io("rewrite", &self.path, e))
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .map_err(|e| MemoryError::io("create directory for", &self.path, e)),
            _ => Ok(()),
        }
    }
}

/// Encode a frame as one canonical JSON line with keys sorted at every level.
pub fn encode_frame(frame: &Frame) -> Result<String> {
    let value = sort_keys(serde_json::to_value(frame)?);
    Ok(serde_json::to_string(&value)?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            let mut sorted = Map::new();
            for (key, val) in entries {
                let _ = sorted.insert(key, sort_keys(val));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn frame(n: usize) -> Frame {
        Frame {
            timestamp: format!("2025-01-01T00:{:02}:{:02}Z", n / 60 % 60, n % 60),
            distilled_user_intent: format!("message {n}"),
            ..Frame::default()
        }
    }

    fn temp_store(max_frames: usize) -> (tempfile::TempDir, FrameStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FrameStore::new(dir.path().join("memory").join("context.jsonl"), max_frames);
        (dir, store)
    }

    #[test]
    fn missing_file_reads_empty() {
        let (_dir, store) = temp_store(300);
        assert!(store.read_all().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn append_creates_directory_and_file() {
        let (_dir, store) = temp_store(300);
        store.append(&frame(1)).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.read_all().unwrap(), vec![frame(1)]);
    }

    #[test]
    fn reads_back_in_write_order() {
        let (_dir, store) = temp_store(300);
        for n in 0..5 {
            store.append(&frame(n)).unwrap();
        }
        let frames = store.read_all().unwrap();
        let intents: Vec<_> = frames.iter().map(|f| f.distilled_user_intent.as_str()).collect();
        assert_eq!(
            intents,
            vec!["message 0", "message 1", "message 2", "message 3", "message 4"]
        );
    }

    #[test]
    fn one_line_per_frame() {
        let (_dir, store) = temp_store(300);
        store.append(&frame(1)).unwrap();
        store.append(&frame(2)).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn retention_keeps_most_recent_frames() {
        let (_dir, store) = temp_store(300);
        for n in 0..305 {
            store.append(&frame(n)).unwrap();
        }
        let frames = store.read_all().unwrap();
        assert_eq!(frames.len(), 300);
        let expected: Vec<Frame> = (5..305).map(frame).collect();
        assert_eq!(frames, expected);
    }

    #[test]
    fn prune_reports_removed_count() {
        let (_dir, store) = temp_store(10);
        for n in 0..4 {
            store.append(&frame(n)).unwrap();
        }
        let wide = FrameStore::new(store.path(), 2);
        assert_eq!(wide.prune().unwrap(), 2);
        assert_eq!(wide.read_all().unwrap(), vec![frame(2), frame(3)]);
        assert_eq!(wide.prune().unwrap(), 0);
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let (_dir, store) = temp_store(300);
        store.append(&frame(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[1, 2, 3]").unwrap();
        drop(file);
        store.append(&frame(2)).unwrap();

        assert_eq!(store.read_all().unwrap(), vec![frame(1), frame(2)]);
    }

    #[test]
    fn torn_multibyte_line_is_skipped() {
        let (_dir, store) = temp_store(300);
        store.append(&frame(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        file.write_all(b"{\"rawUserMessage\":\"x \xE2\x80\n").unwrap();
        drop(file);

        assert_eq!(store.read_all().unwrap(), vec![frame(1)]);
        store.append(&frame(2)).unwrap();
        assert_eq!(store.read_all().unwrap(), vec![frame(1), frame(2)]);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn invalid_utf8_inside_json_string_is_skipped() {
        let (_dir, store) = temp_store(2);
        store.append(&frame(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        file.write_all(b"{\"timestamp\":\"\xFF\"}\n").unwrap();
        drop(file);
        store.append(&frame(2)).unwrap();
        store.append(&frame(3)).unwrap();

        let content = fs::read(store.path()).unwrap();
        assert!(!content.contains(&0xFF));
        assert_eq!(store.read_all().unwrap(), vec![frame(2), frame(3)]);
    }

    #[test]
    fn records_with_missing_fields_default() {
        let (_dir, store) = temp_store(300);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "{\"timestamp\":\"2025-01-01T00:00:00Z\",\"tags\":[\"tech\"]}\n",
        )
        .unwrap();
        let frames = store.read_all().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tags, vec!["tech"]);
        assert!(frames[0].key_topics.is_empty());
        assert!(frames[0].project_state.summary.is_empty());
    }

    #[test]
    fn snake_case_records_load_and_rewrite_camel_case() {
        let (_dir, store) = temp_store(1);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "{\"timestamp\":\"2025-01-01T00:00:00Z\",\"key_topics\":[\"db\"],\"project_state\":{\"summary\":\"s\"}}\n",
        )
        .unwrap();
        let frames = store.read_all().unwrap();
        assert_eq!(frames[0].key_topics, vec!["db"]);
        assert_eq!(frames[0].project_state.summary, "s");

        store.append(&frame(1)).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert!(!content.contains("key_topics"));
        assert_eq!(store.read_all().unwrap(), vec![frame(1)]);
    }

    #[test]
    fn rewrite_drops_corrupt_lines() {
        let (_dir, store) = temp_store(2);
        store.append(&frame(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        writeln!(file, "garbage").unwrap();
        drop(file);
        store.append(&frame(2)).unwrap();
        store.append(&frame(3)).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(!content.contains("garbage"));
        assert_eq!(store.read_all().unwrap(), vec![frame(2), frame(3)]);
    }

    #[test]
    fn encoded_keys_are_sorted() {
        let line = encode_frame(&Frame::default()).unwrap();
        insta::assert_snapshot!(line, @r#"{"distilledSystemOutput":"","distilledUserIntent":"","keyTopics":[],"preferences":{"constraints":[],"other":{},"style":"","tone":""},"procedural":{"checklists":[],"workflows":[]},"projectState":{"activeWorkstream":"","constraints":[],"pendingTasks":[],"projectName":"","summary":""},"rawAssistantMessage":"","rawUserMessage":"","semantic":{"concepts":[],"notes":""},"tags":[],"timestamp":""}"#);
    }

    #[test]
    fn encoded_line_has_no_newlines() {
        let mut f = frame(1);
        f.raw_user_message = "line one\nline two".to_string();
        let line = encode_frame(&f).unwrap();
        assert!(!line.contains('\n'));
        let back: Frame = serde_json::from_str(&line).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = FrameStore::new(blocker.join("context.jsonl"), 300);
        assert_matches!(store.append(&frame(1)), Err(MemoryError::Io { .. }));
    }
}
