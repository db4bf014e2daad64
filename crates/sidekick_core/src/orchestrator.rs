//! Response orchestration
//!
//! Glues classifier, handoff selector, and composer into the ordered
//! conversation turns returned to the chat surface. This is the single
//! entry point for one user message; it never fails for any input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classifier::{CognitiveState, StateClassifier};
use crate::composer::ResponseComposer;
use crate::config::SidekickConfig;
use crate::handoff::{self, SidekickId};
use crate::text::normalize;

/// One persona message in reply order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConversationTurn {
    pub sidekick_id: SidekickId,
    pub content: String,
}

/// The full result for one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SidekickResponse {
    pub state: CognitiveState,
    pub turns: Vec<ConversationTurn>,
}

/// The sidekick decision engine: one of these per configured lexicon.
/// All methods are pure and take `&self`, so a shared instance can be
/// used from concurrent contexts without locking.
#[derive(Debug, Clone)]
pub struct SidekickEngine {
    classifier: StateClassifier,
    composer: ResponseComposer,
}

impl SidekickEngine {
    pub fn new(config: &SidekickConfig) -> Self {
        Self {
            classifier: StateClassifier::new(config.lexicon.clone()),
            composer: ResponseComposer::new(&config.lexicon),
        }
    }

    pub fn classifier(&self) -> &StateClassifier {
        &self.classifier
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    /// Produce the ordered reply turns for one user message.
    ///
    /// Without a handoff this is a single constraint-enforced turn from
    /// Takota. With a handoff it is two turns: Takota's announcement,
    /// then the target persona's opening reply, both passed through the
    /// same constraint guard for the detected state.
    pub fn build_response(&self, input: &str) -> SidekickResponse {
        let state = self.classifier.classify(input);
        let normalized = normalize(input);
        let creative = self.classifier.detect_creative_intent(input);

        if let Some(handoff) = handoff::detect_handoff(&normalized, state, creative) {
            tracing::debug!(to = %handoff.target, %state, "handing off");
            let announcement = handoff::announcement(handoff.target, state);
            let reply = handoff::target_reply(handoff.target, &normalized);
            return SidekickResponse {
                state,
                turns: vec![
                    ConversationTurn {
                        sidekick_id: SidekickId::Takota,
                        content: self.composer.enforce_constraints(&announcement, state),
                    },
                    ConversationTurn {
                        sidekick_id: handoff.target,
                        content: self.composer.enforce_constraints(reply, state),
                    },
                ],
            };
        }

        let base = self.composer.base_message(state);
        SidekickResponse {
            state,
            turns: vec![ConversationTurn {
                sidekick_id: SidekickId::Takota,
                content: self.composer.enforce_constraints(base, state),
            }],
        }
    }
}

impl Default for SidekickEngine {
    fn default() -> Self {
        Self::new(&SidekickConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn engine() -> SidekickEngine {
        SidekickEngine::default()
    }

    #[test]
    fn overload_reply_is_contained() {
        let response = engine().build_response("I can't think. Everything is too much.");
        assert_eq!(response.state, CognitiveState::Overload);
        assert_eq!(response.turns.len(), 1);
        let content = &response.turns[0].content;
        assert!(content.starts_with("State: OVERLOAD."));
        assert!(!content.contains('?'));
    }

    #[test]
    fn focused_reply_may_ask_questions() {
        let response = engine().build_response("Break this task into steps.");
        assert_eq!(response.state, CognitiveState::Focused);
        assert!(response.turns[0].content.contains('?'));
    }

    #[test]
    fn handoff_produces_announcement_then_target_turn() {
        let response = engine().build_response("switch to zen");
        assert_eq!(response.turns.len(), 2);
        assert_eq!(response.turns[0].sidekick_id, SidekickId::Takota);
        assert_eq!(response.turns[1].sidekick_id, SidekickId::Zen);
        assert!(response.turns[0].content.contains("Zen Mode"));
    }

    #[test]
    fn creative_focus_hands_off_to_courtney() {
        let response = engine().build_response("Draft a pitch for the new idea.");
        assert_eq!(response.state, CognitiveState::Focused);
        assert_eq!(response.turns.len(), 2);
        assert_eq!(response.turns[1].sidekick_id, SidekickId::Courtney);
        assert!(response.turns[1].content.contains("draft options"));
    }

    #[test]
    fn every_input_yields_a_non_empty_turn() {
        for input in ["", "???", "!!!", "a", "\n\t"] {
            let response = engine().build_response(input);
            assert!(!response.turns.is_empty());
            for turn in &response.turns {
                assert!(!turn.content.is_empty(), "input {input:?}");
            }
        }
    }
}
