//! Command dispatch shared by the interactive prompt and one-shot mode

use std::fmt;
use tracing::{info, warn};

use crate::backend;
use crate::config::Config;
use crate::diagnostics::{self, Verdict};
use crate::env::EnvSignature;
use crate::error::Outcome;
use crate::platform::System;

pub const PROMPT: &str = "Enter command (D=Disable, E=Enable, C=Check, Q=Quit): ";
pub const INVALID_CHOICE: &str = "Invalid choice. Please enter D, E, C, or Q.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Disable,
    Enable,
    Check,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Disable => write!(f, "disable"),
            Command::Enable => write!(f, "enable"),
            Command::Check => write!(f, "check"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

impl Command {
    /// Parse a single-letter prompt answer; surrounding whitespace and case are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "D" => Some(Command::Disable),
            "E" => Some(Command::Enable),
            "C" => Some(Command::Check),
            "Q" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Parse a command-line argument, accepting the letter or the full word.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.trim().to_ascii_lowercase().as_str() {
            "disable" => Some(Command::Disable),
            "enable" => Some(Command::Enable),
            "check" => Some(Command::Check),
            _ => Self::parse(arg).filter(|c| *c != Command::Quit),
        }
    }
}

/// Text produced by one command, and whether it ended well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    pub success: bool,
}

pub struct App {
    system: Box<dyn System>,
    config: Config,
    should_exit: bool,
}

impl App {
    pub fn new(system: Box<dyn System>, config: Config) -> Self {
        info!("Using devices file {}", config.devices_file.display());
        Self {
            system,
            config,
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Handle one line typed at the prompt.
    pub fn handle_input(&mut self, input: &str) -> Response {
        match Command::parse(input) {
            Some(command) => {
                // Re-read on every command; the session may have changed.
                let signature = EnvSignature::from_env();
                self.run(command, &signature)
            }
            None => {
                warn!("Invalid input: '{}'", input.trim());
                Response {
                    lines: vec![INVALID_CHOICE.to_string()],
                    success: false,
                }
            }
        }
    }

    pub fn run(&mut self, command: Command, signature: &EnvSignature) -> Response {
        info!("Running command: {}", command);
        match command {
            Command::Disable => self.toggle(false, signature),
            Command::Enable => self.toggle(true, signature),
            Command::Check => {
                let report = diagnostics::diagnose(&*self.system, &self.config, signature);
                Response {
                    success: report.verdict == Verdict::Success,
                    lines: report.lines,
                }
            }
            Command::Quit => {
                self.should_exit = true;
                Response {
                    lines: vec!["Exiting.".to_string()],
                    success: true,
                }
            }
        }
    }

    fn toggle(&self, enabled: bool, signature: &EnvSignature) -> Response {
        let kind = signature.classify();
        let control = backend::create_control(&kind, &self.config);
        let verb = if enabled { "Enabling" } else { "Disabling" };

        let mut lines = vec![format!("[..] Detected {kind}. {verb} internal keyboard...")];
        let success = match control.set_enabled(&*self.system, enabled) {
            Ok(outcome) => {
                info!("{}", outcome);
                lines.push(format!("[OK] {outcome}"));
                if let Outcome::Changed { hint: Some(hint), .. } = outcome {
                    lines.push(format!("[..] Note: {hint}"));
                }
                true
            }
            Err(e) => {
                warn!("{} failed: {}", verb, e);
                lines.push(format!("[ERR] {e}"));
                false
            }
        };

        Response { lines, success }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakeSystem;

    fn app_with(sys: FakeSystem) -> App {
        App::new(Box::new(sys), Config::new_default())
    }

    #[test]
    fn parse_is_trimmed_and_case_insensitive() {
        assert_eq!(Command::parse(" d \n"), Some(Command::Disable));
        assert_eq!(Command::parse("E"), Some(Command::Enable));
        assert_eq!(Command::parse("c"), Some(Command::Check));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("x"), None);
        assert_eq!(Command::parse("disable"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn args_accept_words_but_not_quit() {
        assert_eq!(Command::from_arg("Disable"), Some(Command::Disable));
        assert_eq!(Command::from_arg("e"), Some(Command::Enable));
        assert_eq!(Command::from_arg("check"), Some(Command::Check));
        assert_eq!(Command::from_arg("q"), None);
        assert_eq!(Command::from_arg("reboot"), None);
    }

    #[test]
    fn invalid_input_keeps_running() {
        let mut app = app_with(FakeSystem::new());
        let response = app.handle_input("z");
        assert_eq!(response.lines, vec![INVALID_CHOICE.to_string()]);
        assert!(!response.success);
        assert!(!app.should_exit());
    }

    #[test]
    fn quit_sets_exit() {
        let mut app = app_with(FakeSystem::new());
        let response = app.handle_input("Q");
        assert_eq!(response.lines, vec!["Exiting.".to_string()]);
        assert!(app.should_exit());
    }

    #[test]
    fn disable_on_x11_reports_id() {
        let sys = FakeSystem::new().with_tool("xinput").respond_ok(
            "xinput list",
            "    ↳ AT Translated Set 2 keyboard   id=11   [slave  keyboard (3)]\n",
        );
        let mut app = app_with(sys);
        let response = app.run(Command::Disable, &EnvSignature::new("x11", "gnome"));
        assert!(response.success);
        assert_eq!(response.lines[1], "[OK] Internal keyboard (ID: 11) disabled.");
        assert!(!app.should_exit());
    }

    #[test]
    fn failures_are_reported_not_fatal() {
        let mut app = app_with(FakeSystem::new());
        let response = app.run(Command::Disable, &EnvSignature::new("wayland", "gnome"));
        assert!(!response.success);
        assert!(response.lines[1].starts_with("[ERR] "));
        assert!(response.lines[1].contains("sudo keebctl"));
        assert!(!app.should_exit());
    }

    #[test]
    fn unhandled_desktop_is_named() {
        let mut app = app_with(FakeSystem::new());
        let response = app.run(Command::Enable, &EnvSignature::new("wayland", "KDE"));
        assert!(!response.success);
        assert!(response.lines[1].contains("(kde)"));
    }

    #[test]
    fn check_uses_diagnostics() {
        let mut app = app_with(FakeSystem::new());
        let response = app.run(Command::Check, &EnvSignature::new("x11", ""));
        assert!(!response.success);
        assert!(response.lines.iter().any(|l| l == "Detected Session: x11"));
    }
}
