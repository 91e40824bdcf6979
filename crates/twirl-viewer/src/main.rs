//! Rotating triangle viewer.
//!
//! Opens a 640x480 window and spins a colored triangle about the X axis until
//! the window is closed or Escape is pressed.

use std::process::ExitCode;

use anyhow::Result;
use twirl_engine::coords::ColorRgba;
use twirl_engine::core::{App, AppControl, FrameCtx};
use twirl_engine::device::GpuInit;
use twirl_engine::input::{close_on_escape, CloseFlag, KeyEvent};
use twirl_engine::logging::{init_logging, LoggingConfig};
use twirl_engine::window::{Runtime, RuntimeConfig};

const CLEAR_COLOR: ColorRgba = ColorRgba::black();

struct Viewer;

impl App for Viewer {
    fn on_key(&mut self, event: &KeyEvent, close: &mut CloseFlag) {
        if close_on_escape(event, close) {
            log::info!("escape pressed; closing");
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        ctx.render(CLEAR_COLOR)?;
        Ok(AppControl::Continue)
    }
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Rotating Triangle".to_string(),
        ..RuntimeConfig::default()
    };

    match Runtime::run(config, GpuInit::default(), Viewer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
