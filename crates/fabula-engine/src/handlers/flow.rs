//! Labels, jumps and scene transitions.

use fabula_core::command::SceneMode;
use fabula_core::error::ScriptError;
use fabula_core::event::PresentationEvent;
use tracing::{info, warn};

use crate::interpreter::Interpreter;

impl Interpreter<'_> {
    pub(crate) fn label(&self, name: &str) {
        self.emit(PresentationEvent::info(format!("[Label: {name}]")));
    }

    pub(crate) fn jump(&mut self, target: &str) -> Result<(), ScriptError> {
        if self.state.jump_to(target) {
            Ok(())
        } else {
            Err(ScriptError::UnknownLabel(target.to_owned()))
        }
    }

    /// Loads the target before touching state, so a failed load leaves the
    /// current program running.
    pub(crate) fn change_scene(&mut self, name: &str, mode: SceneMode) -> Result<(), ScriptError> {
        let program = self.services.scenes.load(name)?;
        match mode {
            SceneMode::Call => {
                self.state.push_frame();
                self.emit(PresentationEvent::info(format!("[Calling scene: {name}]")));
            }
            SceneMode::Change => {
                self.emit(PresentationEvent::info(format!("[Changed to scene: {name}]")));
            }
        }
        self.state.install(name, program);
        info!(scene = name, %mode, depth = self.state.call_stack.len(), "scene entered");
        self.emit(PresentationEvent::SceneChanged {
            name: name.to_owned(),
            mode,
        });
        Ok(())
    }

    pub(crate) fn return_from_scene(&mut self) {
        if self.state.pop_frame() {
            self.emit(PresentationEvent::info("[Returned to previous scene]"));
        } else {
            warn!(scene = %self.state.current_scene, "return with empty call stack");
            self.emit(PresentationEvent::info("Warning: No scene to return to"));
        }
    }
}
