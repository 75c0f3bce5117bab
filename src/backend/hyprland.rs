//! Hyprland: toggle the device through `hyprctl keyword`

use tracing::info;

use super::KeyboardControl;
use crate::config::{HYPRCTL, HYPRLAND_DEVICE};
use crate::error::{Outcome, ToggleError};
use crate::platform::System;

pub struct HyprlandControl;

pub fn enabled_keyword() -> String {
    format!("device:{HYPRLAND_DEVICE}:enabled")
}

impl KeyboardControl for HyprlandControl {
    fn name(&self) -> &'static str {
        "hyprland"
    }

    fn set_enabled(&self, sys: &dyn System, enabled: bool) -> Result<Outcome, ToggleError> {
        if !sys.tool_available(HYPRCTL) {
            return Err(ToggleError::tool_missing(HYPRCTL));
        }

        let keyword = enabled_keyword();
        let value = if enabled { "true" } else { "false" };
        info!("Setting {} {}", keyword, value);

        sys.run_tool(HYPRCTL, &["keyword", &keyword, value])
            .and_then(|o| o.check(HYPRCTL))
            .map_err(|e| ToggleError::backend("Error running hyprctl", &e))?;

        Ok(Outcome::changed(HYPRLAND_DEVICE, enabled))
    }
}
