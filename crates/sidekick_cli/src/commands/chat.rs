use std::io::{BufRead, Write};

use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use sidekick_core::{SessionManager, SessionStore, SidekickEngine, support_profile};

use crate::output::Output;

/// Interactive line loop: each message is classified and answered with
/// the orchestrator's turns. Type `quit` or `exit` (or close stdin) to
/// leave.
pub fn run<S: SessionStore>(
    engine: &SidekickEngine,
    sessions: &SessionManager<S>,
    output: &Output,
) -> Result<()> {
    println!("{}", "Sidekick chat. Type 'quit' to leave.".bright_green());

    if sessions.is_check_in_required() {
        output.status("No fresh check-in. `sidekick-cli checkin set <0-100>` tunes support.");
    } else if let Some(state) = sessions.session() {
        let profile = support_profile(state.overwhelm as f64);
        output.info(
            "support:",
            &format!("{} ({})", state.support_level(), profile.label),
        );
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        print!("{} ", "you>".bright_yellow());
        stdout.flush().into_diagnostic()?;

        line.clear();
        let bytes = stdin.lock().read_line(&mut line).into_diagnostic()?;
        if bytes == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "quit" || message == "exit" {
            break;
        }

        let response = engine.build_response(message);
        tracing::debug!(state = %response.state, turns = response.turns.len(), "built reply");
        for turn in &response.turns {
            output.sidekick_message(turn.sidekick_id.display_name(), &turn.content);
        }
        println!();
    }

    Ok(())
}
