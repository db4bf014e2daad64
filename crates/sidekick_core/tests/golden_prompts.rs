//! Golden prompt suite for the state classifier.
//!
//! Five representative prompts per state, kept in sync with the check-in
//! copy used by the apps. If a lexicon change breaks one of these, the
//! change needs a second look before shipping.

use pretty_assertions::assert_eq;
use sidekick_core::{CognitiveState, StateClassifier};

const GOLDEN_PROMPTS: &[(&str, CognitiveState)] = &[
    ("I'm a failure. I always screw this up.", CognitiveState::SelfAttack),
    ("I hate myself for letting this happen again.", CognitiveState::SelfAttack),
    ("What is wrong with me.", CognitiveState::SelfAttack),
    ("I'm useless. I can't do anything.", CognitiveState::SelfAttack),
    ("I'm such an idiot.", CognitiveState::SelfAttack),
    ("I can't think. Everything is too much.", CognitiveState::Overload),
    ("I have ten things to do and my brain is melting.", CognitiveState::Overload),
    ("I don't know where to start and I'm panicking.", CognitiveState::Overload),
    ("Everything is happening at once and I'm drowning.", CognitiveState::Overload),
    ("I can't handle today.", CognitiveState::Overload),
    ("I should do it but I'll do it later.", CognitiveState::Avoidance),
    ("I just need to research a bit more first.", CognitiveState::Avoidance),
    ("I'm about to start, just not yet.", CognitiveState::Avoidance),
    ("I need to get ready before I can do it.", CognitiveState::Avoidance),
    ("I'll do it tomorrow.", CognitiveState::Avoidance),
    ("I'm exhausted. I can't today.", CognitiveState::LowEnergy),
    ("I'm fried. I have nothing left.", CognitiveState::LowEnergy),
    ("My brain is done.", CognitiveState::LowEnergy),
    ("I can't handle anything big right now.", CognitiveState::LowEnergy),
    ("I'm too tired.", CognitiveState::LowEnergy),
    ("Break this task into steps.", CognitiveState::Focused),
    ("What's my next action for writing the email?", CognitiveState::Focused),
    ("Help me plan this in 20 minutes.", CognitiveState::Focused),
    ("Make this smaller. One step.", CognitiveState::Focused),
    ("Turn this into a checklist.", CognitiveState::Focused),
    ("Hey Takota.", CognitiveState::Neutral),
    ("I'm here.", CognitiveState::Neutral),
    ("What can you do?", CognitiveState::Neutral),
    ("Explain Stickys.", CognitiveState::Neutral),
    ("Where do I start?", CognitiveState::Neutral),
];

#[test]
fn golden_prompts_classify_as_expected() {
    let classifier = StateClassifier::default();
    for (prompt, expected) in GOLDEN_PROMPTS {
        assert_eq!(
            classifier.classify(prompt),
            *expected,
            "prompt: {prompt:?}"
        );
    }
}

#[test]
fn every_golden_prompt_yields_a_guarded_reply() {
    use sidekick_core::SidekickEngine;

    let engine = SidekickEngine::default();
    for (prompt, expected) in GOLDEN_PROMPTS {
        let response = engine.build_response(prompt);
        assert_eq!(response.state, *expected, "prompt: {prompt:?}");
        for turn in &response.turns {
            assert!(!turn.content.is_empty());
            assert!(
                turn.content
                    .starts_with(&format!("State: {}", expected.as_str()))
                    || !turn.content.contains("State:"),
                "reply either leads with the state tag or omits it: {:?}",
                turn.content
            );
        }
    }
}
