//! Tool usage, edited-file, and code-change analysis over session
//! transcripts.

use super::Counter;
use crate::languages;
use crate::types::{ContentBlock, SessionEvent};

/// Tools whose invocation mutates a file on disk.
const FILE_WRITE_TOOL: &str = "Write";
const FILE_EDIT_TOOL: &str = "Edit";

/// Aggregated tool and code-change statistics.
#[derive(Debug, Default)]
pub struct ToolUsage {
    /// Invocation count per tool name.
    pub tools: Counter<String>,
    /// Edited-file extensions that passed the validity check.
    pub extensions: Counter<String>,
    /// Languages grouped from extensions via the lookup table.
    pub languages: Counter<String>,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub files_created: u64,
    pub files_edited: u64,
}

impl ToolUsage {
    pub fn total_tool_calls(&self) -> u64 {
        self.tools.total()
    }

    pub fn lines_changed(&self) -> u64 {
        self.lines_added + self.lines_removed
    }
}

/// Scan every session event for tool invocations and diff lines.
///
/// Counts are commutative; event order does not matter.
pub fn analyze(events: &[SessionEvent]) -> ToolUsage {
    let mut usage = ToolUsage::default();

    for event in events {
        if let Some(message) = &event.message {
            for block in message.blocks() {
                let ContentBlock::ToolUse { name, input } = block else {
                    continue;
                };
                let tool_name = if name.is_empty() { "unknown" } else { name.as_str() };
                usage.tools.increment(tool_name.to_string());

                if tool_name != FILE_WRITE_TOOL && tool_name != FILE_EDIT_TOOL {
                    continue;
                }
                let Some(file_path) = input.get("file_path").and_then(|v| v.as_str()) else {
                    continue;
                };
                if file_path.is_empty() {
                    continue;
                }

                if let Some(ext) = valid_extension(file_path) {
                    if let Some(lang) = languages::language_for(&ext) {
                        usage.languages.increment(lang.to_string());
                    }
                    usage.extensions.increment(ext);
                }

                if tool_name == FILE_WRITE_TOOL {
                    usage.files_created += 1;
                } else {
                    usage.files_edited += 1;
                }
            }
        }

        for line in event.patch_lines() {
            if line.starts_with('+') && !line.starts_with("+++") {
                usage.lines_added += 1;
            } else if line.starts_with('-') && !line.starts_with("---") {
                usage.lines_removed += 1;
            }
        }
    }

    usage
}

/// Extract a lowercased file extension from the last path segment.
///
/// Returns `None` unless the extension is non-empty, at most 12
/// characters, and purely alphanumeric. This guards against false
/// extensions from paths with no real suffix.
fn valid_extension(file_path: &str) -> Option<String> {
    let filename = file_path.rsplit('/').next().unwrap_or(file_path);
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    if ext.is_empty() || ext.chars().count() > 12 || !ext.chars().all(char::is_alphanumeric) {
        return None;
    }
    Some(ext)
}
