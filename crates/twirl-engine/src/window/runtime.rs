use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::core::{App as CoreApp, AppControl};
use crate::device::{GpuInit, HostErrorQueue};
use crate::input::{platform, CloseFlag};
use crate::time::FrameTime;

use super::setup::{self, Stage};

/// Frames between two frame-rate log lines.
const STATS_INTERVAL: u64 = 600;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "twirl".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Frame loop state.
///
/// The loop starts `Running` and ends `Terminated` once the close flag is
/// observed between frames. There is no way back.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Terminated,
}

impl LoopState {
    /// State for the next iteration given the window's close flag.
    pub fn advance(self, close: &CloseFlag) -> Self {
        match self {
            LoopState::Running if close.should_close() => LoopState::Terminated,
            state => state,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs setup, the frame loop and teardown for a single window.
    ///
    /// Returns `Err` if setup fails or a frame fails fatally.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let started = Instant::now();
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        // Poll: drain pending events and return immediately, every iteration.
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(config, gpu_init, app, started);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    started: Instant,

    host_errors: HostErrorQueue,
    stage: Option<Stage>,
    loop_state: LoopState,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A, started: Instant) -> Self {
        Self {
            config,
            gpu_init,
            app,
            started,
            host_errors: HostErrorQueue::new(),
            stage: None,
            loop_state: LoopState::Running,
            fatal: None,
        }
    }

    /// Records the first fatal error; `Runtime::run` returns it after teardown.
    fn fail(&mut self, err: anyhow::Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.loop_state = LoopState::Terminated;
    }

    fn dispatch_host_errors(&mut self) {
        for err in self.host_errors.drain() {
            self.app.on_host_error(&err);
        }
    }

    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(stage) = self.stage.take() {
            log::info!("closing window after {:.2}s", stage.clock.start().elapsed().as_secs_f32());
            drop(stage);
        }
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let Some(stage) = self.stage.as_mut() else {
            return;
        };

        let (time, result) = stage.frame(&mut self.app);
        log_frame_stats(&time);

        match result {
            Ok(AppControl::Continue) => {}
            Ok(AppControl::Exit) => stage.close.request_close(),
            Err(err) => self.fail(err.context("frame failed")),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.stage.is_some() || self.loop_state == LoopState::Terminated {
            return;
        }

        let gpu_init = self.gpu_init.clone();
        match setup::initialize(
            event_loop,
            &self.config,
            gpu_init,
            &self.host_errors,
            self.started,
        ) {
            Ok(stage) => {
                log::info!("setup complete; entering frame loop");
                stage.request_redraw();
                self.stage = Some(stage);
            }
            Err(err) => {
                self.fail(err.context("setup failed"));
                self.teardown(event_loop);
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        if stage.window_id() != window_id {
            return;
        }

        match &event {
            WindowEvent::KeyboardInput { .. } => {
                if let Some(key) = platform::translate_key_event(&event) {
                    stage.dispatch_key(&mut self.app, &key);
                }
            }

            WindowEvent::CloseRequested => stage.close.request_close(),

            WindowEvent::RedrawRequested => {
                if self.loop_state == LoopState::Running {
                    self.redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch_host_errors();

        if let Some(stage) = self.stage.as_ref() {
            self.loop_state = self.loop_state.advance(&stage.close);
        }

        match self.loop_state {
            LoopState::Running => {
                if let Some(stage) = self.stage.as_ref() {
                    stage.request_redraw();
                }
            }
            LoopState::Terminated => self.teardown(event_loop),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispatch_host_errors();
        self.stage = None;
    }
}

fn log_frame_stats(time: &FrameTime) {
    if time.frame_index == 0 || time.frame_index % STATS_INTERVAL != 0 {
        return;
    }
    log::debug!(
        "frame {}: {:.1} fps, t = {:.2}s",
        time.frame_index,
        1.0 / time.dt,
        time.seconds()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_until_close_requested() {
        let mut close = CloseFlag::new();
        let state = LoopState::Running.advance(&close);
        assert_eq!(state, LoopState::Running);

        close.request_close();
        assert_eq!(state.advance(&close), LoopState::Terminated);
    }

    #[test]
    fn terminated_is_final() {
        let close = CloseFlag::new();
        assert_eq!(LoopState::Terminated.advance(&close), LoopState::Terminated);
    }

    #[test]
    fn default_config_is_640_by_480() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(640.0, 480.0));
    }
}
