//! Loading of the three Claude Code data sources.
//!
//! Reads from `~/.claude` (or an override root):
//!
//! - `stats-cache.json` — whole-file summary cache
//! - `history.jsonl` — one prompt per line
//! - `projects/*/*.jsonl` — session transcripts, one event per line
//!
//! # Error Handling
//!
//! The loader is designed to be resilient and recover from errors:
//!
//! - **Missing file or directory**: contributes an empty default,
//!   logged at info level.
//! - **Malformed JSON line**: logged as warning, line skipped,
//!   loading continues. The warning is also recorded in
//!   [`LoadedData::warnings`].
//! - **Unparseable summary file**: whole source treated as empty,
//!   warning logged.
//! - **Unreadable transcript file**: file skipped, loading continues.
//!
//! Nothing the loader encounters aborts the run.

use crate::types::{HistoryEntry, SessionEvent, SummaryStats};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Everything the pipeline consumes, loaded in one pass.
#[derive(Debug, Default)]
pub struct LoadedData {
    /// Summary cache; `SummaryStats::default()` when absent or invalid.
    pub stats: SummaryStats,
    /// Prompt history in file order; partial on per-line failures.
    pub history: Vec<HistoryEntry>,
    /// Session events aggregated across every transcript file.
    pub sessions: Vec<SessionEvent>,
    /// Non-fatal problems encountered while loading.
    pub warnings: Vec<String>,
}

impl LoadedData {
    /// True when neither the summary cache nor the history yielded any
    /// usable data. Session transcripts alone do not count: without
    /// history or summary there is nothing to anchor a report on.
    pub fn is_unusable(&self) -> bool {
        self.stats.is_empty() && self.history.is_empty()
    }
}

/// Locates and reads the three data sources under one root directory.
pub struct Loader {
    root: PathBuf,
}

impl Loader {
    /// Create a loader over the default root (~/.claude).
    pub fn new() -> Self {
        let root = std::env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".claude");
        Self { root }
    }

    /// Create a loader over a custom root (for testing and overrides).
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Load all three sources. Infallible by design: every failure
    /// degrades the result and lands in [`LoadedData::warnings`].
    pub fn load(&self) -> LoadedData {
        let mut data = LoadedData::default();

        self.load_summary(&mut data);
        self.load_history(&mut data);
        self.load_sessions(&mut data);

        tracing::info!(
            history = data.history.len(),
            session_events = data.sessions.len(),
            warnings = data.warnings.len(),
            "Loaded data sources"
        );

        data
    }

    fn warn(data: &mut LoadedData, message: String) {
        tracing::warn!("{}", message);
        data.warnings.push(message);
    }

    fn load_summary(&self, data: &mut LoadedData) {
        let path = self.root.join("stats-cache.json");
        if !path.exists() {
            tracing::info!(path = %path.display(), "No summary cache");
            return;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                Self::warn(
                    data,
                    format!("failed to read {}: {}", path.display(), e),
                );
                return;
            }
        };

        match serde_json::from_str::<SummaryStats>(&content) {
            Ok(stats) => data.stats = stats,
            Err(e) => {
                Self::warn(
                    data,
                    format!("failed to parse {}: {}", path.display(), e),
                );
            }
        }
    }

    fn load_history(&self, data: &mut LoadedData) {
        let path = self.root.join("history.jsonl");
        if !path.exists() {
            tracing::info!(path = %path.display(), "No history file");
            return;
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                Self::warn(
                    data,
                    format!("failed to open {}: {}", path.display(), e),
                );
                return;
            }
        };

        for (line_number, line_result) in BufReader::new(file).lines().enumerate() {
            let line = match line_result {
                Ok(l) => l,
                Err(e) => {
                    Self::warn(
                        data,
                        format!("{} line {}: read error: {}", path.display(), line_number + 1, e),
                    );
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) => data.history.push(entry),
                Err(e) => {
                    Self::warn(
                        data,
                        format!(
                            "{} line {}: JSON parse error: {}",
                            path.display(),
                            line_number + 1,
                            e
                        ),
                    );
                }
            }
        }
    }

    fn load_sessions(&self, data: &mut LoadedData) {
        let projects_dir = self.root.join("projects");
        if !projects_dir.is_dir() {
            tracing::info!(path = %projects_dir.display(), "No projects directory");
            return;
        }

        let entries = match std::fs::read_dir(&projects_dir) {
            Ok(entries) => entries,
            Err(e) => {
                Self::warn(
                    data,
                    format!("failed to read {}: {}", projects_dir.display(), e),
                );
                return;
            }
        };

        for entry in entries.flatten() {
            let dir = entry.path();
            let hidden = entry
                .file_name()
                .to_str()
                .map(|n| n.starts_with('.'))
                .unwrap_or(false);
            if hidden || !dir.is_dir() {
                continue;
            }

            let pattern = dir.join("*.jsonl");
            let paths = match glob::glob(&pattern.to_string_lossy()) {
                Ok(paths) => paths,
                Err(e) => {
                    Self::warn(data, format!("invalid glob {}: {}", pattern.display(), e));
                    continue;
                }
            };

            for session_file in paths.flatten() {
                self.load_transcript(&session_file, data);
            }
        }
    }

    fn load_transcript(&self, path: &Path, data: &mut LoadedData) {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                Self::warn(data, format!("failed to open {}: {}", path.display(), e));
                return;
            }
        };

        for (line_number, line_result) in BufReader::new(file).lines().enumerate() {
            let line = match line_result {
                Ok(l) => l,
                Err(e) => {
                    Self::warn(
                        data,
                        format!("{} line {}: read error: {}", path.display(), line_number + 1, e),
                    );
                    // A read error mid-file usually means the rest is bad too
                    return;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            // Two-phase parse: syntax first, then shape. A line that is
            // valid JSON but an unexpected shape is still skipped with a
            // warning rather than aborting the file.
            let value: serde_json::Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    Self::warn(
                        data,
                        format!(
                            "{} line {}: JSON parse error: {}",
                            path.display(),
                            line_number + 1,
                            e
                        ),
                    );
                    continue;
                }
            };

            match serde_json::from_value::<SessionEvent>(value) {
                Ok(event) => data.sessions.push(event),
                Err(e) => {
                    Self::warn(
                        data,
                        format!(
                            "{} line {}: deserialization error: {}",
                            path.display(),
                            line_number + 1,
                            e
                        ),
                    );
                }
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
