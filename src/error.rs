//! Outcomes and failures of a single enable/disable request

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("'{tool}' command not found")]
    ToolMissing { tool: String },

    #[error("{action} requires root privileges. Please run: {hint}")]
    PermissionDenied { action: String, hint: String },

    #[error("could not find internal keyboard in {searched}")]
    DeviceNotFound { searched: String },

    #[error("{context}: {detail}")]
    Backend { context: String, detail: String },

    #[error("Wayland session detected ({desktop}), but no specific handler found")]
    NoHandlerForEnvironment { desktop: String },
}

impl ToggleError {
    pub fn tool_missing(tool: &str) -> Self {
        ToggleError::ToolMissing {
            tool: tool.to_string(),
        }
    }

    pub fn backend(context: impl Into<String>, err: &anyhow::Error) -> Self {
        ToggleError::Backend {
            context: context.into(),
            detail: format!("{err:#}"),
        }
    }
}

/// Successful terminal state of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed {
        device: String,
        enabled: bool,
        hint: Option<String>,
    },
    AlreadyInDesiredState {
        device: String,
        enabled: bool,
    },
}

impl Outcome {
    pub fn changed(device: impl Into<String>, enabled: bool) -> Self {
        Outcome::Changed {
            device: device.into(),
            enabled,
            hint: None,
        }
    }

    pub fn with_hint(self, text: impl Into<String>) -> Self {
        match self {
            Outcome::Changed { device, enabled, .. } => Outcome::Changed {
                device,
                enabled,
                hint: Some(text.into()),
            },
            other => other,
        }
    }
}

fn state_word(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Changed { device, enabled, .. } => {
                write!(f, "Internal keyboard ({}) {}.", device, state_word(*enabled))
            }
            Outcome::AlreadyInDesiredState { device, enabled } => {
                write!(f, "Internal keyboard ({}) is already {}.", device, state_word(*enabled))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_messages() {
        assert_eq!(
            Outcome::changed("serio0", false).to_string(),
            "Internal keyboard (serio0) disabled."
        );
        let already = Outcome::AlreadyInDesiredState {
            device: "serio0".to_string(),
            enabled: true,
        };
        assert_eq!(already.to_string(), "Internal keyboard (serio0) is already enabled.");
    }

    #[test]
    fn hint_only_attaches_to_changes() {
        let already = Outcome::AlreadyInDesiredState {
            device: "serio0".to_string(),
            enabled: false,
        };
        assert_eq!(already.clone().with_hint("x"), already);

        match Outcome::changed("serio0", false).with_hint("bind it back") {
            Outcome::Changed { hint, .. } => assert_eq!(hint.as_deref(), Some("bind it back")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn backend_error_keeps_context_chain() {
        let err = anyhow::anyhow!("exit status 1").context("xinput failed");
        let err = ToggleError::backend("Error disabling keyboard", &err);
        let msg = err.to_string();
        assert!(msg.starts_with("Error disabling keyboard: "));
        assert!(msg.contains("xinput failed"));
        assert!(msg.contains("exit status 1"));
    }
}
