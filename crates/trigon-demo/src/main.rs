//! Opens a 512×512 window, draws the triangle or textured quad and overlays
//! the demo GUI.
//!
//! `TRIGON_VARIANT=triangle|quad` picks the scene, `TRIGON_RESOURCE_DIR`
//! points at the directory holding `quad.wgsl`.

mod config;
mod gui;

use std::process::ExitCode;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{LoggingConfig, init_logging};
use trigon_engine::window::{Runtime, RuntimeConfig};

use crate::config::DemoConfig;
use crate::gui::DemoApp;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // No-op if the configured logger is already installed.
            init_logging(LoggingConfig::default());
            log::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = DemoConfig::from_env()?;
    init_logging(config.logging.clone());

    log::info!(
        "starting {} demo (resources: {})",
        config.variant,
        config.resource_dir.display()
    );

    let runtime = RuntimeConfig {
        variant: config.variant,
        resource_dir: config.resource_dir,
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), DemoApp::default())
}
