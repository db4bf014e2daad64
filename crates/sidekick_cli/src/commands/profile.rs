use sidekick_core::{SessionManager, SessionStore, support_profile};

use crate::output::Output;

/// Print the support profile for an explicit value, or for the stored
/// session when no value is given.
pub fn run<S: SessionStore>(sessions: &SessionManager<S>, value: Option<f64>, output: &Output) {
    let overwhelm = match value {
        Some(v) => v,
        None => match sessions.session() {
            Some(state) => state.overwhelm as f64,
            None => {
                output.error("No stored check-in. Pass a value or run `checkin set`.");
                return;
            }
        },
    };

    let profile = support_profile(overwhelm);
    output.info("level:", profile.level.as_str());
    output.info("label:", profile.label);
    output.info(
        "focus default:",
        &format!("{} min", profile.focus_minutes_default),
    );
    output.info(
        "focus options:",
        &profile
            .focus_duration_options
            .iter()
            .map(|m| format!("{m} min"))
            .collect::<Vec<_>>()
            .join(", "),
    );
    output.info(
        "nudge interval:",
        &format!("{} s", profile.nudge_interval_seconds),
    );
    output.info(
        "low-stim shades:",
        if profile.auto_enable_shades { "auto" } else { "off" },
    );
    output.info(
        "reduce motion:",
        if profile.auto_reduce_motion { "auto" } else { "off" },
    );
}
