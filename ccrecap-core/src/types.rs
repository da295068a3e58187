//! Record types for the three Claude Code data sources.
//!
//! All shapes are best-effort: every field is defaulted so that a
//! record missing any field still deserializes. Validation happens at
//! use sites, never at parse time.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Contents of `~/.claude/stats-cache.json`.
///
/// A precomputed cache of aggregate usage statistics maintained by
/// Claude Code itself (v2.0.64+). Treated as optional data throughout:
/// an absent or unparseable file yields `SummaryStats::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryStats {
    pub total_sessions: Option<u64>,
    pub first_session_date: Option<String>,
    pub daily_activity: Vec<DailyActivity>,
    pub longest_session: Option<LongestSession>,
    /// BTreeMap so iteration order is deterministic across runs.
    pub model_usage: BTreeMap<String, ModelUsage>,
}

impl SummaryStats {
    /// True when no known field carried data.
    pub fn is_empty(&self) -> bool {
        self.total_sessions.is_none()
            && self.first_session_date.is_none()
            && self.daily_activity.is_empty()
            && self.longest_session.is_none()
            && self.model_usage.is_empty()
    }
}

/// One entry of `dailyActivity` in the summary cache.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyActivity {
    pub date: String,
    pub message_count: u64,
}

/// The `longestSession` entry of the summary cache.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LongestSession {
    /// Duration in milliseconds.
    pub duration: u64,
    pub message_count: u64,
}

/// Per-model token counts from `modelUsage`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// One line of `~/.claude/history.jsonl`: a single submitted prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    /// The prompt text as displayed.
    pub display: String,
    /// Milliseconds since the Unix epoch; 0 when missing.
    pub timestamp: i64,
    /// Path of the project the prompt was issued from.
    pub project: String,
}

/// One line of a session transcript under `~/.claude/projects/*/`.
///
/// Only the two fields this pipeline reads are modeled; everything
/// else on the line is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionEvent {
    pub message: Option<EventMessage>,
    /// Kept as raw JSON: in the wild this field is sometimes a plain
    /// string instead of an object, and patch extraction has to cope.
    pub tool_use_result: Option<serde_json::Value>,
}

impl SessionEvent {
    /// Iterate over every diff line of every structured patch in this
    /// event's tool result. Yields nothing when the result is absent,
    /// not an object, or shaped unexpectedly.
    pub fn patch_lines(&self) -> impl Iterator<Item = &str> {
        self.tool_use_result
            .as_ref()
            .and_then(|v| v.get("structuredPatch"))
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .filter_map(|patch| patch.get("lines").and_then(|v| v.as_array()))
            .flatten()
            .filter_map(|line| line.as_str())
    }
}

/// The `message` object of a session event.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventMessage {
    pub content: Option<MessageContent>,
}

impl EventMessage {
    /// Content blocks of this message; empty slice for plain-text
    /// content.
    pub fn blocks(&self) -> &[ContentBlock] {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks,
            _ => &[],
        }
    }
}

/// Message content: either a plain string or a list of typed blocks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// A typed content block, discriminated by its `type` field.
///
/// Only `tool_use` matters to this pipeline; every other block type
/// collapses into `Unknown`.
#[derive(Debug)]
pub enum ContentBlock {
    ToolUse {
        name: String,
        input: serde_json::Value,
    },
    // Catch-all for text, tool_result, image, thinking, ...
    Unknown,
}

// Hand-rolled so a malformed element degrades to `Unknown` instead of
// failing the whole event: blocks that are not objects, carry no
// `type`, or have odd field shapes still appear in transcripts, and
// the event's tool result must survive them.
impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("type").and_then(|t| t.as_str()) == Some("tool_use") {
            let name = value
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let input = value
                .get("input")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            Ok(ContentBlock::ToolUse { name, input })
        } else {
            Ok(ContentBlock::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_empty() {
        let stats: SummaryStats = serde_json::from_str("{}").unwrap();
        assert!(stats.is_empty());

        let stats: SummaryStats = serde_json::from_str(r#"{"totalSessions": 3}"#).unwrap();
        assert!(!stats.is_empty());
        assert_eq!(stats.total_sessions, Some(3));
    }

    #[test]
    fn test_summary_stats_full() {
        let json = r#"{
            "totalSessions": 42,
            "firstSessionDate": "2025-01-15T08:00:00.000Z",
            "dailyActivity": [
                {"date": "2025-01-15", "messageCount": 10},
                {"date": "2025-01-16", "messageCount": 25}
            ],
            "longestSession": {"duration": 7200000, "messageCount": 310},
            "modelUsage": {
                "claude-opus-4-20250514": {"inputTokens": 100, "outputTokens": 200}
            }
        }"#;
        let stats: SummaryStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.daily_activity.len(), 2);
        assert_eq!(stats.daily_activity[1].message_count, 25);
        assert_eq!(stats.longest_session.as_ref().unwrap().duration, 7_200_000);
        assert_eq!(
            stats.model_usage["claude-opus-4-20250514"].output_tokens,
            200
        );
    }

    #[test]
    fn test_history_entry_defaults() {
        let entry: HistoryEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.display, "");
        assert_eq!(entry.timestamp, 0);
        assert_eq!(entry.project, "");
    }

    #[test]
    fn test_tool_use_block() {
        let json = r#"{
            "message": {"content": [
                {"type": "text", "text": "editing now"},
                {"type": "tool_use", "name": "Edit", "input": {"file_path": "/tmp/x.rs"}}
            ]}
        }"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        let blocks = event.message.as_ref().unwrap().blocks();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], ContentBlock::Unknown));
        match &blocks[1] {
            ContentBlock::ToolUse { name, input } => {
                assert_eq!(name, "Edit");
                assert_eq!(input["file_path"], "/tmp/x.rs");
            }
            other => panic!("unexpected block: {:?}", other),
        }
    }

    #[test]
    fn test_string_message_content_has_no_blocks() {
        let json = r#"{"message": {"content": "plain text"}}"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        assert!(event.message.as_ref().unwrap().blocks().is_empty());
    }

    #[test]
    fn test_untyped_blocks_degrade_without_dropping_event() {
        // A block missing `type` and a non-object element must not fail
        // the line; the patch alongside them still has to come through.
        let json = r#"{
            "message": {"content": [{"text": "no type field"}, 42]},
            "toolUseResult": {"structuredPatch": [{"lines": ["+a", "+b", "-c"]}]}
        }"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        let blocks = event.message.as_ref().unwrap().blocks();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, ContentBlock::Unknown)));
        assert_eq!(event.patch_lines().count(), 3);
    }

    #[test]
    fn test_patch_lines() {
        let json = r#"{
            "toolUseResult": {"structuredPatch": [
                {"lines": ["+hello", "-old", " ctx"]},
                {"lines": ["+more"]}
            ]}
        }"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        let lines: Vec<&str> = event.patch_lines().collect();
        assert_eq!(lines, vec!["+hello", "-old", " ctx", "+more"]);
    }

    #[test]
    fn test_patch_lines_tolerates_string_result() {
        let json = r#"{"toolUseResult": "file written"}"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.patch_lines().count(), 0);
    }
}
