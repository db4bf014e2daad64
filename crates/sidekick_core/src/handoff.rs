//! Persona handoff selection
//!
//! The primary persona (Takota) can redirect a conversation to another
//! sidekick, either because the user asked for it by name or because the
//! detected state plus an intent signal suggests a better-fitting tone.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classifier::CognitiveState;

/// The fixed persona roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SidekickId {
    Takota,
    ChaosBuddy,
    Scholar,
    DrillCoach,
    Zen,
    Systems,
    Courtney,
}

impl SidekickId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidekickId::Takota => "takota",
            SidekickId::ChaosBuddy => "chaos_buddy",
            SidekickId::Scholar => "scholar",
            SidekickId::DrillCoach => "drill_coach",
            SidekickId::Zen => "zen",
            SidekickId::Systems => "systems",
            SidekickId::Courtney => "courtney",
        }
    }

    /// Name used when announcing a handoff to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            SidekickId::Takota => "Takota",
            SidekickId::ChaosBuddy => "Buddy",
            SidekickId::Scholar => "The Scholar",
            SidekickId::DrillCoach => "Drill Coach",
            SidekickId::Zen => "Zen Mode",
            SidekickId::Systems => "Systems",
            SidekickId::Courtney => "Courtney",
        }
    }
}

impl fmt::Display for SidekickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decided redirect to another persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Handoff {
    pub target: SidekickId,
}

/// Explicit user phrases, checked before any state-based rule.
const EXPLICIT_SWITCHES: &[(&str, SidekickId)] = &[
    ("switch to buddy", SidekickId::ChaosBuddy),
    ("be softer", SidekickId::ChaosBuddy),
    ("switch to scholar", SidekickId::Scholar),
    ("switch to drill", SidekickId::DrillCoach),
    ("switch to zen", SidekickId::Zen),
    ("switch to systems", SidekickId::Systems),
    ("switch to courtney", SidekickId::Courtney),
];

/// Decide whether this turn should redirect to another persona.
///
/// `normalized` is the normalizer's output for the user message;
/// `creative_intent` is the classifier's creative-intent signal.
/// Explicit switch phrases win over state-based rules, so a requested
/// persona is honored regardless of detected state.
pub fn detect_handoff(
    normalized: &str,
    state: CognitiveState,
    creative_intent: bool,
) -> Option<Handoff> {
    for (phrase, target) in EXPLICIT_SWITCHES {
        if normalized.contains(phrase) {
            return Some(Handoff { target: *target });
        }
    }

    if state == CognitiveState::LowEnergy && normalized.contains("encouragement") {
        return Some(Handoff {
            target: SidekickId::ChaosBuddy,
        });
    }
    if state == CognitiveState::Focused && creative_intent {
        return Some(Handoff {
            target: SidekickId::Courtney,
        });
    }
    None
}

/// Takota's announcement turn when handing off.
pub fn announcement(target: SidekickId, state: CognitiveState) -> String {
    format!(
        "State: {state}. This needs a different tone. I am handing you to {} for this part.",
        target.display_name()
    )
}

/// The target persona's opening reply. Courtney branches on whether the
/// user is already holding an idea to develop.
pub fn target_reply(target: SidekickId, normalized: &str) -> &'static str {
    match target {
        SidekickId::ChaosBuddy => "Buddy here. Do 60 seconds on the smallest real step.",
        SidekickId::Courtney => {
            if normalized.contains("idea") || normalized.contains("brainstorm") {
                "Courtney here. Give me one sentence of the goal and I will draft options."
            } else {
                "Courtney here. Describe the creative output in one line."
            }
        }
        _ => "Switching tone. Give me the next concrete step you want to take.",
    }
}
