//! Session/desktop detection and backend classification

use std::fmt;

/// Session type and desktop as reported by the environment, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvSignature {
    pub session_type: String,
    pub desktop: String,
}

/// Which control strategy applies to an [`EnvSignature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Hyprland: `hyprctl keyword device:...:enabled`
    CompositorIpc,
    /// GNOME on Wayland: unbind/bind the atkbd driver through sysfs
    DriverRebind,
    /// X11 (or unknown session): `xinput enable|disable <id>`
    DeviceManager,
    /// Wayland with a desktop we have no handler for
    Unhandled { desktop: String },
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::CompositorIpc => write!(f, "Hyprland (hyprctl)"),
            BackendKind::DriverRebind => write!(f, "GNOME Wayland (atkbd sysfs)"),
            BackendKind::DeviceManager => write!(f, "X11 (xinput)"),
            BackendKind::Unhandled { desktop } => write!(f, "unhandled Wayland desktop '{}'", desktop),
        }
    }
}

impl EnvSignature {
    pub fn new(session_type: &str, desktop: &str) -> Self {
        Self {
            session_type: session_type.to_lowercase(),
            desktop: desktop.to_lowercase(),
        }
    }

    /// Read `XDG_SESSION_TYPE` and `XDG_CURRENT_DESKTOP`; unset counts as empty.
    pub fn from_env() -> Self {
        let session_type = std::env::var("XDG_SESSION_TYPE").unwrap_or_default();
        let desktop = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
        Self::new(&session_type, &desktop)
    }

    pub fn classify(&self) -> BackendKind {
        classify(&self.session_type, &self.desktop)
    }
}

pub fn classify(session_type: &str, desktop: &str) -> BackendKind {
    if !session_type.contains("wayland") {
        return BackendKind::DeviceManager;
    }

    if desktop.contains("hyprland") {
        BackendKind::CompositorIpc
    } else if desktop.contains("gnome") {
        BackendKind::DriverRebind
    } else {
        BackendKind::Unhandled {
            desktop: desktop.to_string(),
        }
    }
}
