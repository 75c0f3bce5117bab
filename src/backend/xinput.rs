//! X11: toggle the device by id through xinput

use tracing::info;

use super::KeyboardControl;
use crate::config::XINPUT;
use crate::error::{Outcome, ToggleError};
use crate::locate;
use crate::platform::System;

pub struct XinputControl;

impl KeyboardControl for XinputControl {
    fn name(&self) -> &'static str {
        "xinput"
    }

    fn set_enabled(&self, sys: &dyn System, enabled: bool) -> Result<Outcome, ToggleError> {
        // find_xinput_id probes for the tool before listing anything.
        let id = locate::find_xinput_id(sys)?.ok_or_else(|| ToggleError::DeviceNotFound {
            searched: "xinput list".to_string(),
        })?;
        info!("Found internal keyboard (ID: {})", id);

        let (action, verb) = if enabled {
            ("enable", "enabling")
        } else {
            ("disable", "disabling")
        };
        let id_arg = id.to_string();
        sys.run_tool(XINPUT, &[action, &id_arg])
            .and_then(|o| o.check(XINPUT))
            .map_err(|e| ToggleError::backend(format!("Error {verb} keyboard"), &e))?;

        Ok(Outcome::changed(format!("ID: {id}"), enabled))
    }
}
