use std::time::Instant;

use winit::event::WindowEvent;

use crate::backend::Backend;
use crate::config::WindowConfig;
use crate::input::{self, LoopState};

mod line;
mod rectangle;
mod triangle;

pub use line::GreenLine;
pub use rectangle::Rectangle;
pub use triangle::{ColorTriangle, color_multiplier};

/// A single program: the resources it creates once and the frame it draws.
pub trait Scene: Sized {
    const WINDOW: WindowConfig;

    fn setup<B: Backend>(gfx: &mut B) -> Self;

    /// Clears and draws one frame. Presenting is left to the caller.
    fn render<B: Backend>(&mut self, gfx: &mut B, elapsed: f32) -> Result<(), wgpu::SurfaceError>;

    /// Releases buffers before the program.
    fn teardown<B: Backend>(self, gfx: &mut B);
}

/// A scene bound to a backend for the lifetime of its window.
///
/// Dropping the session tears the scene down before the backend itself goes away.
pub struct Session<S: Scene, B: Backend> {
    scene: Option<S>,
    backend: B,
    state: LoopState,
    start_time: Instant,
}

impl<S: Scene, B: Backend> Session<S, B> {
    pub fn new(mut backend: B) -> Self {
        let scene = S::setup(&mut backend);
        log::info!("{} ready", S::WINDOW.title);

        Self {
            scene: Some(scene),
            backend,
            state: LoopState::default(),
            start_time: Instant::now(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn input(&mut self, event: &WindowEvent) -> LoopState {
        self.state = input::handle_input(self.state, event);
        self.state
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    /// Renders a frame at the wall-clock time since the session started.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        self.tick(elapsed)
    }

    /// One clear, draw and present at `elapsed` seconds.
    pub fn tick(&mut self, elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        if !self.state.is_running() {
            return Ok(());
        }
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };

        scene.render(&mut self.backend, elapsed)?;
        self.backend.present();
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.teardown(&mut self.backend);
            log::info!("{} released", S::WINDOW.title);
        }
    }
}

impl<S: Scene, B: Backend> Drop for Session<S, B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ShaderStage;
    use crate::recording::{Call, Recorder};

    fn assert_one_time_setup_then_frames<S: Scene>(buffers: usize, uniforms: bool) {
        let mut session = Session::<S, _>::new(Recorder::default());
        let setup = session.backend().calls.clone();

        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let compiles = setup
                .iter()
                .filter(|c| matches!(c, Call::CompileShader(s, _) if *s == stage))
                .count();
            assert_eq!(compiles, 1, "{} {stage:?}", S::WINDOW.title);
        }
        let links = setup
            .iter()
            .filter(|c| matches!(c, Call::LinkProgram { .. }))
            .count();
        assert_eq!(links, 1);
        assert_eq!(session.backend().uploads().len(), buffers);

        const TICKS: usize = 5;
        for tick in 0..TICKS {
            session.tick(tick as f32 * 0.5).unwrap();
        }

        let frames = &session.backend().calls[setup.len()..];
        let count = |f: fn(&Call) -> bool| frames.iter().filter(|&c| f(c)).count();
        assert_eq!(count(|c| matches!(c, Call::Clear(_))), TICKS);
        assert_eq!(count(|c| matches!(c, Call::Draw(_))), TICKS);
        assert_eq!(count(|c| matches!(c, Call::Present)), TICKS);
        assert_eq!(
            count(|c| matches!(c, Call::SetUniform(..))),
            if uniforms { TICKS } else { 0 }
        );
        assert_eq!(count(|c| matches!(c, Call::UploadBuffer(..))), 0);
        assert_eq!(count(|c| matches!(c, Call::CompileShader(..))), 0);
    }

    #[test]
    fn line_setup_and_frames() {
        assert_one_time_setup_then_frames::<GreenLine>(1, false);
    }

    #[test]
    fn rectangle_setup_and_frames() {
        assert_one_time_setup_then_frames::<Rectangle>(2, false);
    }

    #[test]
    fn triangle_setup_and_frames() {
        assert_one_time_setup_then_frames::<ColorTriangle>(1, true);
    }

    #[test]
    fn close_request_stops_rendering() {
        let mut session = Session::<Rectangle, _>::new(Recorder::default());
        session.tick(0.0).unwrap();
        assert_eq!(session.input(&WindowEvent::CloseRequested), LoopState::Closing);

        let presents = session.backend().count(|c| matches!(c, Call::Present));
        session.tick(1.0).unwrap();
        assert_eq!(
            session.backend().count(|c| matches!(c, Call::Present)),
            presents
        );
    }

    #[test]
    fn shutdown_runs_once() {
        let mut session = Session::<GreenLine, _>::new(Recorder::default());
        session.shutdown();
        session.shutdown();
        assert_eq!(
            session
                .backend()
                .count(|c| matches!(c, Call::ReleaseProgram(_))),
            1
        );
    }

    #[test]
    fn resize_reaches_backend() {
        let mut session = Session::<ColorTriangle, _>::new(Recorder::default());
        session.resize(1024, 768);
        assert_eq!(
            session
                .backend()
                .count(|c| matches!(c, Call::Resize(1024, 768))),
            1
        );
    }
}
