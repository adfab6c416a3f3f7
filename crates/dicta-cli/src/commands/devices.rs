//! List audio input devices.

use anyhow::Result;

use dicta_core::list_input_devices;

use crate::ui;

pub fn run() -> Result<()> {
    let settings = dicta_core::Settings::load();
    let configured = settings.ui.microphone_device.as_deref();

    for device in list_input_devices()? {
        let mut markers = Vec::new();
        if device.is_default {
            markers.push("system default");
        }
        if Some(device.name.as_str()) == configured {
            markers.push("configured");
        }

        if markers.is_empty() {
            println!("{}", device.name);
        } else {
            println!("{}  {}", device.name, ui::dim(&format!("[{}]", markers.join(", "))));
        }
    }

    Ok(())
}
