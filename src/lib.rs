// Three tiny wgpu programs sharing one window/render-loop runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

pub mod backend;
pub mod config;
pub mod gpu;
pub mod input;
pub mod logging;
pub mod model;
pub mod scene;

#[cfg(test)]
mod recording;

use crate::gpu::Gpu;
use crate::input::LoopState;
use crate::scene::{Scene, Session};

/// Event loop state. Field order matters: the session (and its GPU
/// resources) is dropped before the window.
struct App<S: Scene> {
    session: Option<Session<S, Gpu>>,
    window: Option<Arc<Window>>,
    error: Option<anyhow::Error>,
}

impl<S: Scene> App<S> {
    fn new() -> Self {
        Self {
            session: None,
            window: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = S::WINDOW;
        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(config.size());

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("Failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), &config))
            .context("Failed to initialize graphics context")?;
        log::info!(
            "{}: {}x{} window created",
            config.title,
            gpu.size().width,
            gpu.size().height
        );

        self.session = Some(Session::new(gpu));
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.shutdown();
        }
        self.window = None;
    }
}

impl<S: Scene> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(session), Some(window)) = (self.session.as_mut(), self.window.as_ref()) else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        if session.input(&event) == LoopState::Closing {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(physical_size) => {
                session.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => {
                window.request_redraw();

                match session.frame() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = session.backend().size();
                        session.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory | wgpu::SurfaceError::Other) => {
                        log::error!("OutOfMemory");
                        event_loop.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("Surface timeout")
                    }
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

/// Opens the scene's window and blocks until it is closed.
///
/// Initialization failures are returned; the caller decides the exit status.
pub fn run<S: Scene>() -> Result<()> {
    logging::init();

    let event_loop = EventLoop::new().context("Failed to initialize windowing")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::<S>::new();
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;
    app.teardown();

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
