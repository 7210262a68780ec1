//! Non-interactive UI for CI/headless environments.

use super::theme::DotstrapTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Writes plain lines with no colors and no animation, so piped output and
/// CI logs stay readable. Spinners print only their final line.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: DotstrapTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: DotstrapTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_details() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner {
            visible: self.mode.shows_status(),
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_stage(&mut self, current: usize, total: usize, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_stage(current, total, title));
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", self.theme.format_hint(hint));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only prints its outcome.
struct LineSpinner {
    visible: bool,
    theme: DotstrapTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.visible {
            println!("{}", self.theme.format_skipped(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn spinner_in_silent_mode_is_invisible() {
        let mut ui = NonInteractiveUI::new(OutputMode::Silent);
        let mut spinner = ui.start_spinner("probing");
        spinner.set_message("still probing");
        spinner.finish_skipped("nothing");
    }

    #[test]
    fn line_spinner_methods_do_not_panic() {
        let mut ui = NonInteractiveUI::new(OutputMode::Normal);
        let mut spinner = ui.start_spinner("probing");
        spinner.finish_success("done");
        let mut spinner = ui.start_spinner("probing");
        spinner.finish_error("failed");
    }
}
