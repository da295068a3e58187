//! Prompt statistics over the history file.
//!
//! No semantic classification happens here: action words are a coarse
//! lexical proxy left for a downstream consumer to interpret.

use super::Counter;
use crate::types::HistoryEntry;

/// Substrings that mark a prompt as mentioning an error.
const ERROR_INDICATORS: [&str; 8] = [
    "error",
    "fail",
    "bug",
    "issue",
    "broken",
    "crash",
    "exception",
    "not working",
];

/// How many leading words of a prompt are considered action words.
const ACTION_WORD_WINDOW: usize = 5;

/// Aggregated prompt statistics.
#[derive(Debug, Default)]
pub struct PromptStats {
    /// Total history entries, including those with empty prompt text.
    pub total_prompts: usize,
    /// Mean character length of non-empty prompts, rounded; 0 when
    /// there are none.
    pub avg_prompt_length: u64,
    pub with_code_blocks: u64,
    pub with_errors: u64,
    /// Prompt count per project (keyed by last path segment).
    pub projects: Counter<String>,
    /// Leading-word frequencies.
    pub action_words: Counter<String>,
}

/// Scan every history entry for length, code-block, error-mention, and
/// action-word statistics.
pub fn analyze(history: &[HistoryEntry]) -> PromptStats {
    let mut stats = PromptStats {
        total_prompts: history.len(),
        ..Default::default()
    };

    let mut length_sum: u64 = 0;
    let mut measured: u64 = 0;

    for entry in history {
        let prompt = entry.display.as_str();
        if prompt.is_empty() {
            continue;
        }

        let prompt_lower = prompt.to_lowercase();
        length_sum += prompt.chars().count() as u64;
        measured += 1;

        if !entry.project.is_empty() {
            if let Some(project) = entry.project.rsplit('/').next() {
                stats.projects.increment(project.to_string());
            }
        }

        if prompt.contains("```") {
            stats.with_code_blocks += 1;
        }

        if ERROR_INDICATORS.iter().any(|kw| prompt_lower.contains(kw)) {
            stats.with_errors += 1;
        }

        for word in prompt_lower.split_whitespace().take(ACTION_WORD_WINDOW) {
            if word.chars().count() > 2 && word.chars().all(char::is_alphabetic) {
                stats.action_words.increment(word.to_string());
            }
        }
    }

    if measured > 0 {
        let mean = (length_sum as f64) / (measured as f64);
        // Half rounds to even: a mean of 2.5 reports as 2, 3.5 as 4
        stats.avg_prompt_length = mean.round_ties_even() as u64;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(display: &str, project: &str) -> HistoryEntry {
        HistoryEntry {
            display: display.to_string(),
            timestamp: 0,
            project: project.to_string(),
        }
    }

    #[test]
    fn test_empty_history() {
        let stats = analyze(&[]);
        assert_eq!(stats.total_prompts, 0);
        assert_eq!(stats.avg_prompt_length, 0);
    }

    #[test]
    fn test_empty_prompts_counted_but_not_measured() {
        let history = vec![entry("", "/p/a"), entry("add a test", "/p/a")];
        let stats = analyze(&history);
        assert_eq!(stats.total_prompts, 2);
        assert_eq!(stats.avg_prompt_length, 10);
        // Empty prompt contributes nothing, not even its project
        assert_eq!(stats.projects.len(), 1);
    }

    #[test]
    fn test_avg_length_half_rounds_to_even() {
        // mean of 2 and 3 is 2.5, which rounds down to the even 2
        let history = vec![entry("ab", ""), entry("abc", "")];
        assert_eq!(analyze(&history).avg_prompt_length, 2);

        // mean of 3 and 4 is 3.5, which rounds up to the even 4
        let history = vec![entry("abc", ""), entry("abcd", "")];
        assert_eq!(analyze(&history).avg_prompt_length, 4);
    }

    #[test]
    fn test_code_block_and_error_flags() {
        let history = vec![
            entry("why does this ```rust\npanic!()``` Crash?", "/p/x"),
            entry("rename the helper", "/p/x"),
        ];
        let stats = analyze(&history);
        assert_eq!(stats.with_code_blocks, 1);
        assert_eq!(stats.with_errors, 1);
    }

    #[test]
    fn test_error_indicator_is_substring_match() {
        // "failure" contains "fail"
        let stats = analyze(&[entry("investigate the failure", "")]);
        assert_eq!(stats.with_errors, 1);
    }

    #[test]
    fn test_projects_keyed_by_last_segment() {
        let history = vec![
            entry("do a thing", "/home/u/dev/alpha"),
            entry("do more", "/srv/other/alpha"),
            entry("do less", "/home/u/dev/beta"),
        ];
        let stats = analyze(&history);
        assert_eq!(stats.projects.get(&"alpha".to_string()), 2);
        assert_eq!(stats.projects.get(&"beta".to_string()), 1);
        assert_eq!(stats.projects.len(), 2);
    }

    #[test]
    fn test_action_words_first_five_alphabetic_only() {
        let stats = analyze(&[entry("Fix the 2nd bug in the parser module now", "")]);
        // window is "fix the 2nd bug in": "2nd" is not alphabetic
        // and "in" is too short
        assert_eq!(stats.action_words.get(&"fix".to_string()), 1);
        assert_eq!(stats.action_words.get(&"the".to_string()), 1);
        assert_eq!(stats.action_words.get(&"bug".to_string()), 1);
        assert_eq!(stats.action_words.get(&"2nd".to_string()), 0);
        assert_eq!(stats.action_words.get(&"in".to_string()), 0);
        // "parser" is word six, outside the window
        assert_eq!(stats.action_words.get(&"parser".to_string()), 0);
    }
}
