use winit::{
    event::*,
    keyboard::{KeyCode, PhysicalKey},
};

/// Render loop state. Once closing, the loop never resumes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Running,
    Closing,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }

    /// Escape is the only key that is read.
    pub fn on_key(self, key: KeyCode, key_state: ElementState) -> LoopState {
        match (key, key_state) {
            (KeyCode::Escape, ElementState::Pressed) => LoopState::Closing,
            _ => self,
        }
    }

    pub fn close(self) -> LoopState {
        LoopState::Closing
    }
}

pub fn handle_input(state: LoopState, event: &WindowEvent) -> LoopState {
    match event {
        WindowEvent::CloseRequested => state.close(),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state: key_state,
                    physical_key: PhysicalKey::Code(key),
                    ..
                },
            ..
        } => {
            let next = state.on_key(*key, *key_state);
            if next != state {
                log::info!("escape pressed, closing window");
            }
            next
        }
        _ => state,
    }
}
