use owo_colors::OwoColorize;

/// Standard output formatting for the CLI
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Print one persona turn
    pub fn sidekick_message(&self, name: &str, content: &str) {
        println!();
        println!("{} {}", name.bright_cyan().bold(), "says:".dimmed());
        println!("  {content}");
    }

    /// Print a system/status message (indented)
    pub fn status(&self, message: &str) {
        println!("  {}", message.dimmed());
    }

    /// Print an info line (indented, labeled)
    pub fn info(&self, label: &str, value: &str) {
        println!("  {} {}", label.bright_blue(), value);
    }

    pub fn success(&self, message: &str) {
        println!("  {} {}", "✓".bright_green(), message);
    }

    pub fn error(&self, message: &str) {
        println!("  {} {}", "✗".bright_red(), message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
