//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns the transient pointer state the platform does
//! not report with every event (cursor position, held buttons). It is the
//! only thing that sits between raw window events and
//! [`ViewerEngine::execute`](crate::engine::ViewerEngine::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::ViewerCommand;

/// Converts raw window events into [`ViewerCommand`]s.
///
/// A pointer press anywhere starts a model drag; the left button
/// additionally orbits the camera and the right button pans it. Key names
/// are forwarded untouched and resolved against the key bindings by the
/// viewer state.
///
/// # Usage
///
/// ```ignore
/// for cmd in input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Last cursor position, `None` until the first move.
    cursor: Option<Vec2>,
    /// Whether the primary mouse button is currently held.
    left_pressed: bool,
    /// Whether the secondary mouse button is currently held.
    right_pressed: bool,
}

impl InputProcessor {
    /// Create a new processor with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a raw input event and return the commands it produces, in
    /// execution order.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => {
                vec![ViewerCommand::ZoomCamera { delta }]
            }
            InputEvent::KeyPressed { key } => {
                vec![ViewerCommand::KeyPressed { key }]
            }
        }
    }

    /// Cursor moved: forward the absolute position to the model drag and
    /// the relative movement to the camera.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Vec<ViewerCommand> {
        let pos = Vec2::new(x, y);
        let delta = self.cursor.map_or(Vec2::ZERO, |last| pos - last);
        self.cursor = Some(pos);

        let mut commands = vec![ViewerCommand::DragTo { x, y }];
        if delta != Vec2::ZERO {
            if self.left_pressed {
                commands.push(ViewerCommand::OrbitCamera { delta });
            }
            if self.right_pressed {
                commands.push(ViewerCommand::PanCamera { delta });
            }
        }
        commands
    }

    /// Mouse button press/release: any press starts a model drag at the
    /// current cursor position, any release ends it. A press before the
    /// cursor position is known starts nothing.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Vec<ViewerCommand> {
        match button {
            MouseButton::Left => self.left_pressed = pressed,
            MouseButton::Right => self.right_pressed = pressed,
            MouseButton::Middle => {}
        }

        match (pressed, self.cursor) {
            (true, Some(pos)) => {
                vec![ViewerCommand::BeginDrag { x: pos.x, y: pos.y }]
            }
            (true, None) => Vec::new(),
            (false, _) => vec![ViewerCommand::EndDrag],
        }
    }
}
