//! Input entry points for ViewerEngine

use super::ViewerEngine;
use crate::controller::ViewCommand;
use crate::input::InputEvent;
use crate::scene::ObjectId;

impl ViewerEngine {
    /// Process a platform-agnostic input event.
    ///
    /// This is the primary pointer entry point. Consumers forward raw
    /// window events as [`InputEvent`] variants; click-vs-drag detection
    /// happens here and the resulting command goes to the controller.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Dispatch a key press by its key string (e.g. `"Escape"`).
    /// Returns `true` if the key is bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        let Some(command) = self.input.handle_key_press(key) else {
            return false;
        };
        self.execute(command);
        true
    }

    /// Release any held pointer button (window lost focus mid-drag).
    pub fn release_pointer(&mut self) {
        self.input.release_mouse_state();
    }

    /// Route a click on the label of `object` (host-rendered labels).
    pub fn handle_label_click(&mut self, object: ObjectId) {
        self.controller.handle_label_click(&self.scene, object);
    }

    /// Execute one command against the controller.
    pub fn execute(&mut self, command: ViewCommand) {
        if let ViewCommand::Resize { width, height } = command {
            self.resize(width, height);
            return;
        }
        self.controller.execute(&self.scene, command);
    }
}
