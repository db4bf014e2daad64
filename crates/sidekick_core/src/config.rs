//! Configuration for the sidekick engine
//!
//! The classifier's phrase and word lists are deliberately configuration
//! data rather than code: they are English-only substring heuristics with
//! known false-positive risk, and deployments may need to replace them
//! without touching the rule engine.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SidekickError};

/// Top-level configuration for the sidekick engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SidekickConfig {
    /// Phrase and word lists driving classification and composition
    pub lexicon: Lexicon,

    /// How check-in values are persisted (see [`OverwhelmPersistence`])
    pub overwhelm_persistence: OverwhelmPersistence,

    /// Hours before a stored check-in (or skip) goes stale
    pub session_ttl_hours: u64,
}

impl SidekickConfig {
    /// Load configuration from a TOML file. Missing fields fall back to
    /// the built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|cause| SidekickError::ConfigReadFailed {
            path: path.to_path_buf(),
            cause,
        })?;
        toml::from_str(&raw).map_err(|cause| SidekickError::ConfigParseFailed {
            path: path.to_path_buf(),
            cause: Box::new(cause),
        })
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours as i64)
    }
}

impl Default for SidekickConfig {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::default(),
            overwhelm_persistence: OverwhelmPersistence::default(),
            session_ttl_hours: 12,
        }
    }
}

/// Policy for storing a completed check-in value.
///
/// Two variants shipped in earlier app builds: one stored the exact
/// slider value, the other snapped to steps of 25. `Exact` is the
/// default; snapping is opt-in rather than silently merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverwhelmPersistence {
    #[default]
    Exact,
    #[serde(rename = "snapped_to_25")]
    SnappedTo25,
}

/// Word and phrase lists for the rule-based classifier and composer.
///
/// All lists are matched as substrings of normalized text, except
/// `first_person_words`, which is matched at word boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Lexicon {
    pub self_attack_phrases: Vec<String>,
    pub self_attack_words: Vec<String>,
    pub first_person_words: Vec<String>,
    pub overload_phrases: Vec<String>,
    pub panic_words: Vec<String>,
    pub problem_markers: Vec<String>,
    pub intent_words: Vec<String>,
    pub delay_words: Vec<String>,
    pub avoidance_phrases: Vec<String>,
    pub fatigue_words: Vec<String>,
    pub emotional_markers: Vec<String>,
    pub action_markers: Vec<String>,
    pub creative_markers: Vec<String>,

    /// Imperative verbs that mark a directive sentence anywhere in the
    /// sentence (bounded-word match)
    pub directive_verbs: Vec<String>,
    /// Additional verbs that only count when they open a sentence
    pub directive_openers: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            self_attack_phrases: words(&[
                "i hate myself",
                "i am useless",
                "im useless",
                "i'm useless",
                "i am a failure",
                "i'm a failure",
                "im a failure",
                "i always fuck this up",
                "i always mess this up",
                "what's wrong with me",
                "what is wrong with me",
            ]),
            self_attack_words: words(&[
                "useless",
                "worthless",
                "failure",
                "broken",
                "stupid",
                "idiot",
                "garbage",
            ]),
            first_person_words: words(&["i", "im", "i'm", "i am", "me", "my"]),
            overload_phrases: words(&[
                "can't think",
                "cant think",
                "everything is too much",
                "too much",
                "overwhelmed",
                "overwhelm",
                "don't know where to start",
                "dont know where to start",
                "brain is melting",
                "i cannot think",
                "everything is happening at once",
                "can't handle today",
                "cant handle today",
                "i cant handle today",
                "drowning",
            ]),
            panic_words: words(&["panic", "panicking", "spinning", "melting"]),
            problem_markers: words(&[
                "can't",
                "cant",
                "too much",
                "overwhelmed",
                "don't know",
                "dont know",
                "no idea",
                "stuck",
                "melting",
                "panic",
                "spinning",
                "everything",
            ]),
            intent_words: words(&["should", "need to", "have to", "gotta", "must"]),
            delay_words: words(&[
                "later",
                "not now",
                "after",
                "before i",
                "once i",
                "about to start",
                "soon",
                "eventually",
                "maybe",
                "tomorrow",
                "first",
                "just not yet",
            ]),
            avoidance_phrases: words(&["i'll do it", "ill do it", "about to start", "just not yet"]),
            fatigue_words: words(&[
                "exhausted",
                "tired",
                "fried",
                "burnt",
                "burned out",
                "can't today",
                "cant today",
                "no energy",
                "drained",
                "sleepy",
                "done",
                "can't handle anything big",
                "cant handle anything big",
                "can't handle anything",
                "cant handle anything",
                "too tired",
            ]),
            emotional_markers: words(&[
                "overwhelmed",
                "panic",
                "hate",
                "frustrated",
                "anxious",
                "scared",
                "stressed",
                "tired",
                "exhausted",
                "angry",
                "sad",
                "depressed",
            ]),
            action_markers: words(&[
                "plan",
                "break this",
                "break this into steps",
                "steps",
                "next action",
                "schedule",
                "organize",
                "outline",
                "draft",
                "build",
                "finish",
                "ship",
                "make this smaller",
                "one step",
                "checklist",
            ]),
            creative_markers: words(&["brainstorm", "idea", "creative", "concept", "pitch"]),
            directive_verbs: words(&[
                "do", "pick", "choose", "write", "name", "start", "open", "pause", "rest", "set",
            ]),
            directive_openers: words(&["stop"]),
        }
    }
}
