//! Assembly of the final normalized report document.
//!
//! Merges the four analyzer outputs with the summary cache's model
//! usage into one JSON document with fixed top-level sections. The
//! document is raw data for a downstream consumer; nothing here
//! interprets it.

use super::{prompts, sampler, temporal, tools};
use crate::ingest::LoadedData;
use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Table sizes, matching what the report promises downstream.
const TOP_TOOLS: usize = 20;
const TOP_EXTENSIONS: usize = 15;
const TOP_LANGUAGES: usize = 15;
const TOP_ACTION_WORDS: usize = 30;

/// Options for report generation.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Number of sample prompts to include.
    pub sample_prompts: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { sample_prompts: 20 }
    }
}

/// A JSON object whose key order is the ranking order, not
/// alphabetical. Frequency tables and the model breakdown go through
/// this so the emitted document reads top-down.
#[derive(Debug, Clone)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The complete report document.
#[derive(Debug, serde::Serialize)]
pub struct Report {
    pub meta: Meta,
    pub summary: Summary,
    pub code_changes: CodeChanges,
    pub languages: OrderedMap<u64>,
    pub file_types: OrderedMap<u64>,
    pub tools: OrderedMap<u64>,
    pub models: OrderedMap<ModelTokens>,
    pub time_patterns: TimePatternsSection,
    pub prompt_stats: PromptStatsSection,
    pub sample_prompts: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub period_start: String,
    pub period_end: String,
    pub data_note: &'static str,
}

#[derive(Debug, serde::Serialize)]
pub struct Summary {
    pub total_sessions: u64,
    pub total_prompts: usize,
    pub total_tool_calls: u64,
    pub total_output_tokens: u64,
    pub favorite_model: String,
    pub projects_worked_on: usize,
}

#[derive(Debug, serde::Serialize)]
pub struct CodeChanges {
    pub lines_added: u64,
    pub lines_removed: u64,
    pub lines_changed: u64,
    pub net_lines: i64,
    pub files_created: u64,
    pub files_edited: u64,
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct ModelTokens {
    pub output_tokens: u64,
    pub input_tokens: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct TimePatternsSection {
    pub busiest_day_date: String,
    pub busiest_day_messages: u64,
    pub weekday_distribution: OrderedMap<u64>,
    pub hour_distribution: OrderedMap<u64>,
    pub peak_hours: Vec<(u32, u64)>,
    pub longest_session_hours: f64,
    pub longest_session_messages: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct PromptStatsSection {
    pub total_prompts: usize,
    pub avg_length_chars: u64,
    pub with_code_blocks: u64,
    pub with_errors: u64,
    pub distinct_projects: usize,
    pub top_words: OrderedMap<u64>,
}

impl Report {
    /// Run every analyzer over the loaded data and assemble the
    /// document. `now` is injected so two runs over unchanged input
    /// differ only in the generation timestamp.
    pub fn build(data: &LoadedData, options: &ReportOptions, now: DateTime<Local>) -> Report {
        let tool_usage = tools::analyze(&data.sessions);
        let prompt_stats = prompts::analyze(&data.history);
        let time_patterns = temporal::analyze(&data.stats, &data.history);
        let sample_prompts = sampler::sample_prompts(&data.history, options.sample_prompts);

        let (models, favorite_model) = model_breakdown(data);
        let total_output_tokens = data
            .stats
            .model_usage
            .values()
            .map(|usage| usage.output_tokens)
            .sum();

        let period_start = data
            .stats
            .first_session_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| d.chars().take(10).collect())
            .unwrap_or_else(|| "Unknown".to_string());

        Report {
            meta: Meta {
                generated_at: now.to_rfc3339(),
                period_start,
                period_end: now.format("%Y-%m-%d").to_string(),
                data_note: "Aggregate stats tracking may not cover the full usage history.",
            },
            summary: Summary {
                total_sessions: data.stats.total_sessions.unwrap_or(0),
                total_prompts: prompt_stats.total_prompts,
                total_tool_calls: tool_usage.total_tool_calls(),
                total_output_tokens,
                favorite_model,
                projects_worked_on: prompt_stats.projects.len(),
            },
            code_changes: CodeChanges {
                lines_added: tool_usage.lines_added,
                lines_removed: tool_usage.lines_removed,
                lines_changed: tool_usage.lines_changed(),
                net_lines: tool_usage.lines_added as i64 - tool_usage.lines_removed as i64,
                files_created: tool_usage.files_created,
                files_edited: tool_usage.files_edited,
            },
            languages: OrderedMap(tool_usage.languages.top(TOP_LANGUAGES)),
            file_types: OrderedMap(tool_usage.extensions.top(TOP_EXTENSIONS)),
            tools: OrderedMap(tool_usage.tools.top(TOP_TOOLS)),
            models,
            time_patterns: TimePatternsSection {
                busiest_day_date: time_patterns
                    .busiest_day_date
                    .unwrap_or_else(|| "N/A".to_string()),
                busiest_day_messages: time_patterns.busiest_day_messages,
                weekday_distribution: OrderedMap(
                    time_patterns
                        .weekday_distribution
                        .iter()
                        .enumerate()
                        .map(|(day, &count)| (temporal::day_name(day).to_string(), count))
                        .collect(),
                ),
                hour_distribution: OrderedMap(
                    time_patterns
                        .hour_distribution
                        .iter()
                        .enumerate()
                        .map(|(hour, &count)| (hour.to_string(), count))
                        .collect(),
                ),
                peak_hours: time_patterns.peak_hours,
                longest_session_hours: time_patterns.longest_session_hours,
                longest_session_messages: time_patterns.longest_session_messages,
            },
            prompt_stats: PromptStatsSection {
                total_prompts: prompt_stats.total_prompts,
                avg_length_chars: prompt_stats.avg_prompt_length,
                with_code_blocks: prompt_stats.with_code_blocks,
                with_errors: prompt_stats.with_errors,
                distinct_projects: prompt_stats.projects.len(),
                top_words: OrderedMap(prompt_stats.action_words.top(TOP_ACTION_WORDS)),
            },
            sample_prompts,
        }
    }
}

/// Build the per-model token table with cleaned display names, plus
/// the favorite model (highest output-token count, "Unknown" when no
/// models were recorded).
fn model_breakdown(data: &LoadedData) -> (OrderedMap<ModelTokens>, String) {
    let mut models: Vec<(String, ModelTokens)> = Vec::new();

    for (raw_name, usage) in &data.stats.model_usage {
        let name = clean_model_name(raw_name);
        match models.iter_mut().find(|(n, _)| *n == name) {
            Some((_, tokens)) => {
                // Two raw identifiers can clean to the same display
                // name; their counts merge
                tokens.output_tokens += usage.output_tokens;
                tokens.input_tokens += usage.input_tokens;
            }
            None => {
                models.push((
                    name,
                    ModelTokens {
                        output_tokens: usage.output_tokens,
                        input_tokens: usage.input_tokens,
                    },
                ));
            }
        }
    }

    let mut favorite: Option<(&str, u64)> = None;
    for (name, tokens) in &models {
        if favorite
            .map(|(_, best)| tokens.output_tokens > best)
            .unwrap_or(true)
        {
            favorite = Some((name, tokens.output_tokens));
        }
    }
    let favorite = favorite
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    (OrderedMap(models), favorite)
}

/// Strip the vendor prefix and any trailing 8-digit version date from
/// a model identifier, producing a stable display name.
fn clean_model_name(raw: &str) -> String {
    let name = raw.strip_prefix("claude-").unwrap_or(raw);
    if let Some((stem, suffix)) = name.rsplit_once('-') {
        if suffix.len() == 8 && suffix.bytes().all(|b| b.is_ascii_digit()) {
            return stem.to_string();
        }
    }
    name.to_string()
}
