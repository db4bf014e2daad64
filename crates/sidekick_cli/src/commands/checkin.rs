use sidekick_core::{SessionManager, SessionStore};

use crate::output::Output;

pub fn set<S: SessionStore>(sessions: &SessionManager<S>, value: f64, output: &Output) {
    let state = sessions.set_overwhelm(value);
    output.success(&format!(
        "Check-in stored: overwhelm {} ({})",
        state.overwhelm,
        state.support_level()
    ));
}

pub fn skip<S: SessionStore>(sessions: &SessionManager<S>, output: &Output) {
    sessions.skip_check_in();
    output.success("Check-in skipped for this session window.");
}

pub fn clear<S: SessionStore>(sessions: &SessionManager<S>, output: &Output) {
    sessions.clear_session();
    output.success("Stored check-in cleared.");
}

pub fn status<S: SessionStore>(sessions: &SessionManager<S>, output: &Output) {
    match sessions.session() {
        Some(state) => {
            output.info("overwhelm:", &state.overwhelm.to_string());
            output.info("support:", state.support_level().as_str());
            output.info(
                "set at:",
                &state.set_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            );
        }
        None => output.status("No stored check-in."),
    }
    if sessions.is_check_in_required() {
        output.info("check-in:", "required");
    } else {
        output.info("check-in:", "fresh");
    }
}
