//! GNOME on Wayland: unbind/bind the atkbd driver through sysfs
//!
//! The keyboard counts as enabled while `<atkbd>/<serioN>` exists. Writing the
//! port name to `unbind` detaches the driver; writing it to `bind` reattaches.
//! Both control files are root-only.
//!
//! The port located at the start of a call is the one written to; nothing
//! re-checks it between the lookup and the write.

use tracing::info;

use super::KeyboardControl;
use crate::config::Config;
use crate::error::{Outcome, ToggleError};
use crate::locate;
use crate::platform::System;

const SUDO_HINT: &str = "sudo keebctl";

pub struct SerioRebind {
    config: Config,
}

impl SerioRebind {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl KeyboardControl for SerioRebind {
    fn name(&self) -> &'static str {
        "atkbd-sysfs"
    }

    fn set_enabled(&self, sys: &dyn System, enabled: bool) -> Result<Outcome, ToggleError> {
        let verb = if enabled { "Enabling" } else { "Disabling" };

        // Must precede any filesystem access, including the lookup.
        if !sys.is_root() {
            return Err(ToggleError::PermissionDenied {
                action: format!("{verb} the internal keyboard on GNOME Wayland"),
                hint: SUDO_HINT.to_string(),
            });
        }

        let serio = locate::find_serio_port(sys, &self.config).ok_or_else(|| {
            ToggleError::DeviceNotFound {
                searched: self.config.devices_file.display().to_string(),
            }
        })?;

        let bound = sys.path_exists(&self.config.serio_device_dir(&serio));
        info!("{} is currently {}", serio, if bound { "bound" } else { "unbound" });

        if bound == enabled {
            return Ok(Outcome::AlreadyInDesiredState {
                device: serio,
                enabled,
            });
        }

        let control_file = if enabled {
            self.config.bind_file()
        } else {
            self.config.unbind_file()
        };
        info!("Writing {} to {}", serio, control_file.display());
        sys.write_file(&control_file, &serio)
            .map_err(|e| ToggleError::backend(format!("Error {} via sysfs", verb.to_lowercase()), &e))?;

        let outcome = Outcome::changed(serio.clone(), enabled);
        if enabled {
            Ok(outcome)
        } else {
            Ok(outcome.with_hint(format!(
                "To re-enable, you can manually write {} to {}",
                serio,
                self.config.bind_file().display()
            )))
        }
    }
}
