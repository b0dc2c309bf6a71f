// Turns a free-text command into an Intent
//
// "add 2 milk", "remove bread", "find me almond milk", "suggest something".
// Rule cascade, checked in this order, first hit wins:
//   suggest trigger anywhere  -> Suggest
//   search trigger            -> Search (item = text after the trigger)
//   add trigger anywhere      -> Add
//   remove trigger anywhere   -> Remove
//   otherwise                 -> Unknown
//
// Keyword matching is plain substring matching, not word matching. Stripping
// "add" out of "paddle" leaves "ple". Known, kept on purpose for now.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Highest priority. Any of these anywhere means Suggest.
pub const SUGGEST_TRIGGERS: &[&str] = &["what should i buy", "suggest", "recommend"];

/// Longest phrases first so stripping "please add" wins over "add"
pub const ADD_TRIGGERS: &[&str] = &["please add", "i need", "i want", "add", "buy", "get"];

pub const REMOVE_TRIGGERS: &[&str] = &["take off", "remove", "delete", "drop"];

/// Removed as raw substrings after the triggers
pub const FILLER_PHRASES: &[&str] = &["from my list", "from my", "from", "please"];

static LEADING_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:find|search)\b(?:\s+(?:me|for)\b)?\s*(?P<rest>.*)$").expect("valid regex")
});

static INLINE_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\b(?:find me|search for|look for)\b\s*(?P<rest>.*)$").expect("valid regex")
});

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

static FILLER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:of|some|a|an|please)\b").expect("valid regex"));

/// What the user wants done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Add,
    Remove,
    Search,
    Suggest,
    Unknown,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IntentKind::Add => "add",
            IntentKind::Remove => "remove",
            IntentKind::Search => "search",
            IntentKind::Suggest => "suggest",
            IntentKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Result of interpreting one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    pub item: Option<String>,
    /// Always >= 1
    pub quantity: u32,
    /// Add/Remove trigger that fired but left no item behind.
    /// Only set when `kind` was degraded to Unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_from: Option<IntentKind>,
}

impl Intent {
    fn new(kind: IntentKind, item: Option<String>, quantity: u32) -> Self {
        Self {
            kind,
            item,
            quantity,
            degraded_from: None,
        }
    }

    /// A trigger matched but nothing was left to act on
    pub fn is_ambiguous(&self) -> bool {
        self.degraded_from.is_some()
    }
}

/// Interpret a command.
///
/// Pure and total: every input, including the empty string, yields an Intent.
/// Callers that consider blank text invalid should reject it before calling.
pub fn parse(text: &str) -> Intent {
    let lowered = text.trim().to_lowercase();

    if contains_any(&lowered, SUGGEST_TRIGGERS) {
        debug!(text = %lowered, "suggest trigger");
        return Intent::new(IntentKind::Suggest, None, 1);
    }

    if let Some(rest) = search_remainder(&lowered) {
        debug!(text = %lowered, "search trigger");
        return Intent::new(IntentKind::Search, non_empty(&collapse_whitespace(rest)), 1);
    }

    let kind = if contains_any(&lowered, ADD_TRIGGERS) {
        IntentKind::Add
    } else if contains_any(&lowered, REMOVE_TRIGGERS) {
        IntentKind::Remove
    } else {
        IntentKind::Unknown
    };

    let quantity = extract_quantity(&lowered);
    let item = extract_item(&lowered);

    if matches!(kind, IntentKind::Add | IntentKind::Remove) && item.is_none() {
        debug!(text = %lowered, %kind, "trigger matched but no item left");
        return Intent {
            kind: IntentKind::Unknown,
            item: None,
            quantity,
            degraded_from: Some(kind),
        };
    }

    debug!(text = %lowered, %kind, ?item, quantity, "classified");
    Intent::new(kind, item, quantity)
}

/// First run of digits, or 1 when absent, zero or too large
pub fn extract_quantity(text: &str) -> u32 {
    QUANTITY
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|q| *q >= 1)
        .unwrap_or(1)
}

/// Strip triggers, fillers and the quantity, leaving the item phrase
pub fn extract_item(lowered: &str) -> Option<String> {
    let mut text = lowered.to_string();

    for phrase in ADD_TRIGGERS
        .iter()
        .chain(REMOVE_TRIGGERS)
        .chain(FILLER_PHRASES)
    {
        text = text.replace(phrase, "");
    }

    // The digits that became the quantity are not part of the item
    let text = QUANTITY.replace(&text, " ");
    let text = FILLER_WORDS.replace_all(&text, " ");

    non_empty(&collapse_whitespace(&text))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn search_remainder(lowered: &str) -> Option<&str> {
    LEADING_SEARCH
        .captures(lowered)
        .or_else(|| INLINE_SEARCH.captures(lowered))
        .and_then(|caps| caps.name("rest"))
        .map(|m| m.as_str())
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
