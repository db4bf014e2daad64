use sidekick_core::{ResponseStyle, SidekickEngine};

use crate::output::Output;

/// One-shot classification: show the state, its response style, and the
/// creative-intent signal.
pub fn run(engine: &SidekickEngine, text: &str, output: &Output) {
    let state = engine.classifier().classify(text);
    let style = ResponseStyle::for_state(state);
    let creative = engine.classifier().detect_creative_intent(text);

    output.info("state:", state.as_str());
    output.info("style:", style.label);
    output.info(
        "questions:",
        if style.allow_questions {
            "allowed"
        } else {
            "suppressed"
        },
    );
    output.info("creative intent:", if creative { "yes" } else { "no" });
}
