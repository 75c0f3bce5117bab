//! Keyboard control backends
//!
//! One backend per supported session: Hyprland IPC, atkbd driver rebinding
//! for GNOME on Wayland, and xinput for X11.

pub mod hyprland;
pub mod serio;
pub mod xinput;

use tracing::info;

use crate::config::Config;
use crate::env::BackendKind;
use crate::error::{Outcome, ToggleError};
use crate::platform::System;

/// Trait for keyboard control backends
pub trait KeyboardControl {
    /// Short human-readable description of the backend
    fn name(&self) -> &'static str;

    /// Drive the internal keyboard to the requested state.
    ///
    /// Every call re-probes privileges and tools and locates the device
    /// afresh; nothing is cached between calls.
    fn set_enabled(&self, sys: &dyn System, enabled: bool) -> Result<Outcome, ToggleError>;
}

/// Wayland desktop without a handler; refuses every request.
pub struct Unhandled {
    desktop: String,
}

impl KeyboardControl for Unhandled {
    fn name(&self) -> &'static str {
        "unhandled"
    }

    fn set_enabled(&self, _sys: &dyn System, _enabled: bool) -> Result<Outcome, ToggleError> {
        Err(ToggleError::NoHandlerForEnvironment {
            desktop: self.desktop.clone(),
        })
    }
}

/// Create the backend for a classified environment
pub fn create_control(kind: &BackendKind, config: &Config) -> Box<dyn KeyboardControl> {
    let control: Box<dyn KeyboardControl> = match kind {
        BackendKind::CompositorIpc => Box::new(hyprland::HyprlandControl),
        BackendKind::DriverRebind => Box::new(serio::SerioRebind::new(config.clone())),
        BackendKind::DeviceManager => Box::new(xinput::XinputControl),
        BackendKind::Unhandled { desktop } => Box::new(Unhandled {
            desktop: desktop.clone(),
        }),
    };
    info!("Selected backend: {}", control.name());
    control
}
