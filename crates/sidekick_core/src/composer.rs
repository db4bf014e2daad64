//! Guarded response composition
//!
//! Every outgoing sidekick message passes through [`ResponseComposer::enforce_constraints`],
//! which applies the per-state response style: question suppression for
//! containment-type states, a hard cap of one directive sentence per
//! reply, and a five-sentence ceiling. The guard is idempotent and never
//! returns an empty string.

use regex::Regex;

use crate::classifier::CognitiveState;
use crate::config::Lexicon;
use crate::text::split_sentences;

/// How the sidekick is allowed to speak for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseStyle {
    pub label: &'static str,
    pub allow_questions: bool,
}

impl ResponseStyle {
    pub fn for_state(state: CognitiveState) -> ResponseStyle {
        match state {
            CognitiveState::SelfAttack => ResponseStyle {
                label: "INTERRUPT",
                allow_questions: false,
            },
            CognitiveState::Overload => ResponseStyle {
                label: "CONTAINMENT",
                allow_questions: false,
            },
            CognitiveState::Avoidance => ResponseStyle {
                label: "CHALLENGE",
                allow_questions: false,
            },
            CognitiveState::LowEnergy => ResponseStyle {
                label: "PERMISSION",
                allow_questions: false,
            },
            CognitiveState::Focused => ResponseStyle {
                label: "EXECUTION",
                allow_questions: true,
            },
            CognitiveState::Neutral => ResponseStyle {
                label: "ORIENTATION",
                allow_questions: true,
            },
        }
    }
}

/// Matches directive (imperative) sentences. Compiled from the lexicon's
/// verb lists: openers only count at sentence start, bounded verbs count
/// anywhere in the sentence.
#[derive(Debug, Clone)]
struct DirectiveMatcher {
    // None when the configured verb list is empty: an empty alternation
    // would match every sentence, not none
    opener: Option<Regex>,
    bounded: Option<Regex>,
}

impl DirectiveMatcher {
    fn new(lexicon: &Lexicon) -> Self {
        let escape_join = |list: &[String]| {
            list.iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|")
        };
        let openers = lexicon
            .directive_openers
            .iter()
            .chain(lexicon.directive_verbs.iter())
            .cloned()
            .collect::<Vec<_>>();
        let opener = (!openers.is_empty()).then(|| {
            Regex::new(&format!(r"(?i)^(?:{})\b", escape_join(&openers)))
                .expect("escaped alternation is a valid regex")
        });
        let bounded = (!lexicon.directive_verbs.is_empty()).then(|| {
            Regex::new(&format!(
                r"(?i)\b(?:{})\b",
                escape_join(&lexicon.directive_verbs)
            ))
            .expect("escaped alternation is a valid regex")
        });
        Self { opener, bounded }
    }

    fn is_directive(&self, sentence: &str) -> bool {
        self.opener.as_ref().is_some_and(|re| re.is_match(sentence))
            || self.bounded.as_ref().is_some_and(|re| re.is_match(sentence))
    }
}

/// Produces the per-state base messages and enforces output constraints.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    directives: DirectiveMatcher,
}

impl ResponseComposer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            directives: DirectiveMatcher::new(lexicon),
        }
    }

    /// Fixed template for a state. Always begins with `"State: <STATE>."`.
    pub fn base_message(&self, state: CognitiveState) -> &'static str {
        match state {
            CognitiveState::SelfAttack => {
                "State: SELF_ATTACK. Stop. That voice is not useful here. We move to one tiny action."
            }
            CognitiveState::Overload => {
                "State: OVERLOAD. Too much is happening. Choose one small thing."
            }
            CognitiveState::Avoidance => {
                "State: AVOIDANCE. This is avoidance. Do the smallest real step now."
            }
            CognitiveState::LowEnergy => {
                "State: LOW_ENERGY. You are low. Pick rest or one tiny action."
            }
            CognitiveState::Focused => {
                "State: FOCUSED. What is the exact outcome? Next step: write it in one line."
            }
            CognitiveState::Neutral => "State: NEUTRAL. What are you trying to get done?",
        }
    }

    /// Apply the state's style constraints to arbitrary reply text.
    ///
    /// Idempotent: re-applying to the output changes nothing. Never
    /// returns an empty string; if every sentence is filtered out the
    /// reply degrades to the bare `"State: <STATE>."` sentence, which
    /// already satisfies all constraints.
    pub fn enforce_constraints(&self, text: &str, state: CognitiveState) -> String {
        let style = ResponseStyle::for_state(state);
        let mut sentences = split_sentences(text);

        if !style.allow_questions {
            sentences.retain(|sentence| !sentence.contains('?'));
        }

        // At most one directive sentence per reply. The "State:" lead
        // sentence is structural and exempt.
        let mut directive_count = 0usize;
        sentences.retain(|sentence| {
            if sentence.starts_with("State:") {
                return true;
            }
            if self.directives.is_directive(sentence) {
                directive_count += 1;
                directive_count <= 1
            } else {
                true
            }
        });

        if sentences.is_empty() {
            sentences.push(format!("State: {state}."));
        }

        sentences.truncate(5);
        sentences.join(" ")
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}
