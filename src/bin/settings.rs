//! Dehydrated Crosshair - control panel process
//!
//! This process manages:
//! - The settings window and the raid reference tools
//! - app_settings.json (user preferences)
//! - overlay_settings.json and the lifetime of the overlay process

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use dehydrated_crosshair::gui::{self, GuiFlags};
use dehydrated_crosshair::StartupFlags;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Dehydrated Crosshair starting...");

    let flags = StartupFlags::parse(std::env::args().skip(1))?;
    tracing::info!("Startup flags: {:?}", flags);

    gui::run(GuiFlags {
        paths: flags.app_paths(),
    })
    .context("Failed to run the control panel window")?;

    Ok(())
}
