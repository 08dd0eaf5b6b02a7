//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, ProbeTheme, UserInterface};

/// Terminal UI implementation.
///
/// Status output goes to stdout, errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ProbeTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI, colored when the terminal supports it.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ProbeTheme::new()
        } else {
            ProbeTheme::plain()
        };
        Self::with_theme(mode, theme)
    }

    /// Create a terminal UI without colors.
    pub fn plain(mode: OutputMode) -> Self {
        Self::with_theme(mode, ProbeTheme::plain())
    }

    fn with_theme(mode: OutputMode, theme: ProbeTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn show_detail(&mut self, key: &str, value: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", self.theme.format_detail(key, value)).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_keeps_mode() {
        let mut ui = TerminalUI::plain(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        ui.set_output_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn silent_terminal_ui_writes_without_panic() {
        let mut ui = TerminalUI::new(OutputMode::Silent);
        ui.message("hidden");
        ui.success("hidden");
        ui.show_detail("k", "v");
    }
}
