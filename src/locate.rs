//! Finding the internal keyboard in xinput's listing and in
//! `/proc/bus/input/devices`.
//!
//! Both lookups stop at the first matching record. A machine with several
//! devices carrying the marker gets the first one in listing order.

use tracing::{debug, warn};

use crate::config::{Config, KEYBOARD_MARKER, XINPUT};
use crate::error::ToggleError;
use crate::platform::System;

/// Run `xinput list` and return the internal keyboard's device id.
///
/// Fails only when xinput is not installed; a listing that cannot be
/// obtained or parsed is reported as `None`.
pub fn find_xinput_id(sys: &dyn System) -> Result<Option<u32>, ToggleError> {
    if !sys.tool_available(XINPUT) {
        return Err(ToggleError::tool_missing(XINPUT));
    }

    let listing = match sys.run_tool(XINPUT, &["list"]).and_then(|o| o.check(XINPUT)) {
        Ok(output) => output.stdout,
        Err(e) => {
            warn!("Error detecting internal keyboard: {:#}", e);
            return Ok(None);
        }
    };

    let id = parse_xinput_list(&listing);
    debug!("xinput keyboard id: {:?}", id);
    Ok(id)
}

/// Extract the `id=` of the first line naming the internal keyboard.
pub fn parse_xinput_list(listing: &str) -> Option<u32> {
    let line = listing
        .lines()
        .find(|line| line.to_lowercase().contains("keyboard") && line.contains(KEYBOARD_MARKER))?;

    let (_, after) = line.split_once("id=")?;
    after.split_whitespace().next()?.parse::<u32>().ok()
}

/// Read the devices file and return the keyboard's `serioN` port.
pub fn find_serio_port(sys: &dyn System, config: &Config) -> Option<String> {
    let contents = match sys.read_to_string(&config.devices_file) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("{:#}", e);
            return None;
        }
    };

    let port = parse_input_devices(&contents);
    debug!("atkbd serio port: {:?}", port);
    port
}

/// Find the first blank-line separated record mentioning the keyboard and
/// pull `serioN` out of its `Phys=` line.
pub fn parse_input_devices(contents: &str) -> Option<String> {
    let block = contents.split("\n\n").find(|block| block.contains(KEYBOARD_MARKER))?;

    let (_, phys) = block.split_once("Phys=")?;
    let phys = phys.lines().next().unwrap_or_default();
    find_serio_token(phys).map(str::to_string)
}

fn find_serio_token(text: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find("serio") {
        let start = offset + pos;
        let digits_at = start + "serio".len();
        let digits = text[digits_at..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 {
            return Some(&text[start..digits_at + digits]);
        }
        offset = digits_at;
    }
    None
}
