//! Rule-based cognitive state classification
//!
//! One message in, exactly one [`CognitiveState`] out. Rules are an
//! ordered table evaluated in a single pass, so the priority encoding is
//! data rather than control flow: self-attack preempts overload, which
//! preempts avoidance, and so on down to the neutral default.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Lexicon;
use crate::text::{contains_any, count_matches, normalize, word_count};

/// The user's inferred emotional/executive state for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CognitiveState {
    SelfAttack,
    Overload,
    Avoidance,
    LowEnergy,
    Focused,
    Neutral,
}

impl CognitiveState {
    pub const ALL: [CognitiveState; 6] = [
        CognitiveState::SelfAttack,
        CognitiveState::Overload,
        CognitiveState::Avoidance,
        CognitiveState::LowEnergy,
        CognitiveState::Focused,
        CognitiveState::Neutral,
    ];

    /// Wire spelling, also used in composed replies ("State: OVERLOAD.")
    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveState::SelfAttack => "SELF_ATTACK",
            CognitiveState::Overload => "OVERLOAD",
            CognitiveState::Avoidance => "AVOIDANCE",
            CognitiveState::LowEnergy => "LOW_ENERGY",
            CognitiveState::Focused => "FOCUSED",
            CognitiveState::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for CognitiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-message evidence extracted once, then consumed by the rule table.
#[derive(Debug, Clone, Copy)]
struct Signals {
    self_attack: bool,
    overload: bool,
    avoidance: bool,
    low_energy: bool,
    focused: bool,
}

struct Rule {
    state: CognitiveState,
    matches: fn(&Signals) -> bool,
}

/// Ordered by priority; the first matching entry wins. [`classify`]
/// falls back to [`CognitiveState::Neutral`] when nothing matches,
/// making classification total.
///
/// [`classify`]: StateClassifier::classify
const RULES: &[Rule] = &[
    Rule {
        state: CognitiveState::SelfAttack,
        matches: |s| s.self_attack,
    },
    Rule {
        state: CognitiveState::Overload,
        matches: |s| s.overload,
    },
    Rule {
        state: CognitiveState::Avoidance,
        matches: |s| s.avoidance,
    },
    Rule {
        state: CognitiveState::LowEnergy,
        matches: |s| s.low_energy,
    },
    Rule {
        state: CognitiveState::Focused,
        matches: |s| s.focused,
    },
];

static AND_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\band\b").expect("valid literal regex"));

/// Classifies normalized text into a [`CognitiveState`] using the
/// lexicon it was built with.
#[derive(Debug, Clone)]
pub struct StateClassifier {
    lexicon: Lexicon,
    // None when the configured word list is empty: an empty alternation
    // would match at every word boundary, not nothing
    first_person: Option<Regex>,
}

impl StateClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        // First-person detection is the only boundary-aware match; all
        // other lists are substring-based.
        let first_person = (!lexicon.first_person_words.is_empty()).then(|| {
            let alternation = lexicon
                .first_person_words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"\b(?:{alternation})\b"))
                .expect("escaped alternation is a valid regex")
        });
        Self {
            lexicon,
            first_person,
        }
    }

    /// Assign exactly one state to the input. Total: every string,
    /// including the empty one, maps to a state.
    pub fn classify(&self, input: &str) -> CognitiveState {
        let text = normalize(input);
        let signals = self.signals(&text);
        let state = RULES
            .iter()
            .find(|rule| (rule.matches)(&signals))
            .map(|rule| rule.state)
            .unwrap_or(CognitiveState::Neutral);
        tracing::debug!(%state, words = word_count(&text), "classified input");
        state
    }

    /// Creative-intent signal for the handoff selector. Not part of the
    /// primary classification.
    pub fn detect_creative_intent(&self, input: &str) -> bool {
        contains_any(&normalize(input), &self.lexicon.creative_markers)
    }

    fn signals(&self, text: &str) -> Signals {
        let lex = &self.lexicon;
        let words = word_count(text);

        let has_first_person = self
            .first_person
            .as_ref()
            .is_some_and(|re| re.is_match(text));
        let self_attack = contains_any(text, &lex.self_attack_phrases)
            || (has_first_person && contains_any(text, &lex.self_attack_words));

        let problem_hits = count_matches(text, &lex.problem_markers);
        let and_count = AND_WORD.find_iter(text).count();
        let overload = contains_any(text, &lex.overload_phrases)
            || (words > 12 && problem_hits >= 2)
            || and_count >= 3;

        let avoidance = (contains_any(text, &lex.intent_words)
            && contains_any(text, &lex.delay_words))
            || contains_any(text, &lex.avoidance_phrases);

        let low_energy =
            contains_any(text, &lex.fatigue_words) && !contains_any(text, &lex.panic_words);

        let focused = contains_any(text, &lex.action_markers)
            && !contains_any(text, &lex.emotional_markers)
            && words < 20;

        Signals {
            self_attack,
            overload,
            avoidance,
            low_energy,
            focused,
        }
    }
}

impl Default for StateClassifier {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> StateClassifier {
        StateClassifier::default()
    }

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(classifier().classify(""), CognitiveState::Neutral);
        assert_eq!(classifier().classify("   "), CognitiveState::Neutral);
    }

    #[test]
    fn self_attack_preempts_overload() {
        // Satisfies both the self-attack and overload rules
        let text = "I'm useless and everything is too much and I can't and I can't and nothing works";
        assert_eq!(classifier().classify(text), CognitiveState::SelfAttack);
    }

    #[test]
    fn first_person_plus_descriptor_is_self_attack() {
        assert_eq!(
            classifier().classify("I'm such an idiot."),
            CognitiveState::SelfAttack
        );
        // Descriptor without a first-person word stays out of self-attack
        assert_eq!(
            classifier().classify("that meeting was garbage"),
            CognitiveState::Neutral
        );
    }

    #[test]
    fn empty_first_person_list_never_matches() {
        // A replaced lexicon may legitimately empty a list; that must
        // disable the rule, not make it fire on every word boundary
        let lexicon = Lexicon {
            first_person_words: Vec::new(),
            ..Lexicon::default()
        };
        let clf = StateClassifier::new(lexicon);
        assert_eq!(clf.classify("completely stupid"), CognitiveState::Neutral);
    }

    #[test]
    fn first_person_match_is_boundary_aware() {
        // "imp" must not count as "im"
        assert_eq!(
            classifier().classify("the imp was stupid"),
            CognitiveState::Neutral
        );
    }

    #[test]
    fn repeated_and_triggers_overload() {
        assert_eq!(
            classifier().classify("calls and emails and errands and laundry"),
            CognitiveState::Overload
        );
    }

    #[test]
    fn long_text_with_problem_markers_is_overload() {
        let text = "there is just no idea how this works because I am stuck on every part of the form today";
        assert_eq!(classifier().classify(text), CognitiveState::Overload);
    }

    #[test]
    fn intent_plus_delay_is_avoidance() {
        assert_eq!(
            classifier().classify("I should do it but I'll do it later."),
            CognitiveState::Avoidance
        );
    }

    #[test]
    fn fatigue_without_panic_is_low_energy() {
        assert_eq!(
            classifier().classify("I'm exhausted. I can't today."),
            CognitiveState::LowEnergy
        );
    }

    #[test]
    fn panic_word_blocks_low_energy() {
        // Fatigue plus a panic word falls through the low-energy rule
        assert_ne!(
            classifier().classify("so tired and panicking"),
            CognitiveState::LowEnergy
        );
    }

    #[test]
    fn short_action_request_is_focused() {
        assert_eq!(
            classifier().classify("Break this task into steps."),
            CognitiveState::Focused
        );
    }

    #[test]
    fn emotional_marker_blocks_focused() {
        assert_eq!(
            classifier().classify("plan my day, I'm so anxious"),
            CognitiveState::Neutral
        );
    }

    #[test]
    fn creative_intent_is_an_independent_signal() {
        let clf = classifier();
        assert!(clf.detect_creative_intent("help me brainstorm a pitch"));
        assert!(!clf.detect_creative_intent("help me do the dishes"));
        // Creative intent does not change the primary classification
        assert_eq!(
            clf.classify("draft a pitch outline"),
            CognitiveState::Focused
        );
    }
}
