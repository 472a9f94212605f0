//! Completion-phrase matcher — bilingual regex patterns over message text.
//!
//! A message "means done" when any pattern hits:
//! - bare completion words (Spanish + English)
//! - reflexive phrasing ("ya lo hice")
//! - noun+verb phrasing ("task completed")
//! - reminder-specific phrasing ("recordatorio listo")
//!
//! Matching is case-insensitive and word-boundary-delimited. Negation is not
//! parsed: "no está listo" still matches the bare word "listo". That false
//! positive is a known limitation of word-level matching.

use regex::Regex;
use tracing::debug;

/// A single completion pattern with a compiled regex.
#[derive(Debug, Clone)]
pub struct CompletionPattern {
    /// Human-readable pattern description.
    pub label: String,
    /// Compiled regex for matching.
    pub regex: Regex,
}

/// Matcher deciding whether a message indicates task completion.
#[derive(Debug, Clone)]
pub struct CompletionMatcher {
    patterns: Vec<CompletionPattern>,
}

impl CompletionMatcher {
    /// Create a matcher with the default bilingual pattern set.
    pub fn new() -> Self {
        let patterns = vec![
            // Bare completion words, Spanish and English
            CompletionPattern {
                label: "completion word".into(),
                regex: Regex::new(
                    r"(?i)\b(listo|hecho|completado|terminé|cumplido|finished|done)\b",
                )
                .unwrap(),
            },
            // Reflexive phrasing: "ya lo hice", "ya terminé"
            CompletionPattern {
                label: "ya hice/terminé/completé".into(),
                regex: Regex::new(r"(?i)\bya\s+(lo\s+)?(hice|terminé|completé)\b").unwrap(),
            },
            // Noun+verb phrasing: "task completed", "tarea complete(d)"
            CompletionPattern {
                label: "task/tarea completed".into(),
                regex: Regex::new(r"(?i)\b(task|tarea)\s+completed?\b").unwrap(),
            },
            // Reminder-specific phrasing: "reminder done", "recordatorio listo"
            CompletionPattern {
                label: "reminder/recordatorio done".into(),
                regex: Regex::new(r"(?i)\b(reminder|recordatorio)\s+(done|listo)\b").unwrap(),
            },
        ];
        Self { patterns }
    }

    /// Whether `text` contains any completion phrase.
    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// The label of the first pattern that hits, if any.
    ///
    /// Patterns are checked in order and evaluation short-circuits on the
    /// first hit.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        for pattern in &self.patterns {
            if pattern.regex.is_match(text) {
                debug!(pattern = %pattern.label, "Message matched completion pattern");
                return Some(&pattern.label);
            }
        }
        None
    }
}

impl Default for CompletionMatcher {
    fn default() -> Self {
        Self::new()
    }
}
