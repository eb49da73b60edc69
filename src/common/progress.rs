use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Spinner shown while an installer runs. Hidden outside interactive text mode.
pub fn create_spinner(message: String) -> ProgressBar {
    if !ui::is_interactive() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
