//! The interpreter loop.

use std::sync::Arc;

use fabula_core::clock::Clock;
use fabula_core::command::Command;
use fabula_core::error::{SceneError, ScriptError};
use fabula_core::event::PresentationEvent;
use fabula_core::port::{LoadRequest, PresentationPort, SaveRequest, Wake};
use fabula_core::rng::DeterministicRng;
use fabula_core::scene::SceneLoader;
use fabula_core::state::ExecutionState;
use fabula_core::store::SnapshotStore;
use tracing::{debug, info, instrument, warn};

use crate::saves;

/// Text of the `END` event.
pub const END_TEXT: &str = "Game finished!";

/// Collaborators the interpreter borrows for the length of a run.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Where events go and responses come from.
    pub port: &'a dyn PresentationPort,
    /// Resolves scene names to command sequences.
    pub scenes: &'a dyn SceneLoader,
    /// Save slot storage.
    pub saves: &'a dyn SnapshotStore,
    /// Timestamps save records.
    pub clock: &'a dyn Clock,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran off its end with an empty call stack.
    Finished,
    /// The client went away during a wait.
    Disconnected,
}

/// Whether the loop should keep dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Disconnected,
}

/// Result of a suspending wait after save/load servicing.
#[derive(Debug)]
pub(crate) enum Resume<T> {
    Reply(T),
    /// A load replaced the state the wait belonged to.
    Cancelled,
    Disconnected,
}

impl<T> Resume<T> {
    pub(crate) fn flow(&self) -> Flow {
        match self {
            Resume::Disconnected => Flow::Disconnected,
            Resume::Reply(_) | Resume::Cancelled => Flow::Continue,
        }
    }
}

/// Executes one script instance.
pub struct Interpreter<'a> {
    pub(crate) state: ExecutionState,
    pub(crate) services: Services<'a>,
    pub(crate) rng: &'a mut dyn DeterministicRng,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter over an existing state.
    pub fn new(
        state: ExecutionState,
        services: Services<'a>,
        rng: &'a mut dyn DeterministicRng,
    ) -> Self {
        Self {
            state,
            services,
            rng,
        }
    }

    /// Loads `entry` and creates an interpreter positioned at its first
    /// command.
    ///
    /// # Errors
    ///
    /// Returns `SceneError` if the entry scene cannot be loaded.
    pub fn start(
        entry: &str,
        services: Services<'a>,
        rng: &'a mut dyn DeterministicRng,
    ) -> Result<Self, SceneError> {
        let program = services.scenes.load(entry)?;
        Ok(Self::new(ExecutionState::new(entry, program), services, rng))
    }

    /// The current execution state.
    #[must_use]
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Consumes the interpreter, returning its final state.
    #[must_use]
    pub fn into_state(self) -> ExecutionState {
        self.state
    }

    /// Runs until the script finishes or the client disconnects.
    ///
    /// Emits `INIT` first and `END` once the program is exhausted with an
    /// empty call stack. A disconnect stops the loop without `END`.
    #[instrument(skip(self), fields(scene = %self.state.current_scene))]
    pub fn run(&mut self) -> Outcome {
        self.emit(PresentationEvent::Init {
            title: self.state.current_scene.clone(),
        });
        self.unwind_finished_calls();

        while !self.state.at_end() {
            if self.step() == Flow::Disconnected {
                info!("client disconnected, stopping script");
                return Outcome::Disconnected;
            }
        }

        self.emit(PresentationEvent::End {
            text: END_TEXT.to_owned(),
        });
        info!("script finished");
        Outcome::Finished
    }

    /// Dispatches the command under the cursor. Handler failures are
    /// reported as `INFO` and never stop the loop.
    pub(crate) fn step(&mut self) -> Flow {
        let program = Arc::clone(&self.state.program);
        let Some(command) = program.get(self.state.cursor) else {
            return Flow::Continue;
        };
        self.state.cursor += 1;
        debug!(
            scene = %self.state.current_scene,
            index = self.state.cursor - 1,
            kind = command.kind(),
            "dispatching command"
        );

        let flow = match self.dispatch(command) {
            Ok(flow) => flow,
            Err(err) => {
                warn!(kind = command.kind(), error = %err, "command failed");
                self.emit(PresentationEvent::info(format!("Error: {err}")));
                Flow::Continue
            }
        };
        self.unwind_finished_calls();
        flow
    }

    fn dispatch(&mut self, command: &Command) -> Result<Flow, ScriptError> {
        match command {
            Command::Say { text, speaker } => Ok(self.say(text, speaker.as_deref())),
            Command::SetVar { name, value } => {
                self.set_var(name, value);
                Ok(Flow::Continue)
            }
            Command::Input { var, prompt } => Ok(self.input(var, prompt.as_deref())),
            Command::Roll { expr, to } => {
                self.roll(expr, to.as_deref());
                Ok(Flow::Continue)
            }
            Command::Choose(menu) => self.choose(menu),
            Command::Label { name } => {
                self.label(name);
                Ok(Flow::Continue)
            }
            Command::Jump { target } => self.jump(target).map(|()| Flow::Continue),
            Command::Scene { name, mode } => {
                self.change_scene(name, *mode).map(|()| Flow::Continue)
            }
            Command::Return => {
                self.return_from_scene();
                Ok(Flow::Continue)
            }
            Command::ShowImage { path } => {
                self.show_image(path);
                Ok(Flow::Continue)
            }
            Command::HideImage => {
                self.hide_image();
                Ok(Flow::Continue)
            }
            Command::PlayBgm { path, looping } => {
                self.play_bgm(path, *looping);
                Ok(Flow::Continue)
            }
            Command::StopBgm => {
                self.stop_bgm();
                Ok(Flow::Continue)
            }
            Command::PlaySfx { path } => {
                self.play_sfx(path);
                Ok(Flow::Continue)
            }
            Command::PlayVoice { path } => {
                self.play_voice(path);
                Ok(Flow::Continue)
            }
            Command::StopVoice => {
                self.stop_voice();
                Ok(Flow::Continue)
            }
        }
    }

    /// Implicit return: a called scene that runs off its end resumes its
    /// caller. Repeats while the resumed caller is itself exhausted.
    fn unwind_finished_calls(&mut self) {
        while self.state.at_end() && self.state.pop_frame() {
            debug!(scene = %self.state.current_scene, "called scene finished");
            self.emit(PresentationEvent::info("[Scene returned]"));
        }
    }

    pub(crate) fn emit(&self, event: PresentationEvent) {
        self.services.port.emit(event);
    }

    pub(crate) fn await_continue(&mut self) -> Resume<()> {
        loop {
            match self.services.port.wait_continue() {
                Wake::Reply(()) => return Resume::Reply(()),
                Wake::Save(request) => self.service_save(&request),
                Wake::Load(request) => {
                    self.service_load(request);
                }
                Wake::Closed => return Resume::Disconnected,
            }
        }
    }

    pub(crate) fn await_text(&mut self, prompt: &str) -> Resume<String> {
        loop {
            match self.services.port.wait_text_input(prompt) {
                Wake::Reply(text) => return Resume::Reply(text),
                Wake::Save(request) => self.service_save(&request),
                Wake::Load(request) => {
                    self.service_load(request);
                }
                Wake::Closed => return Resume::Disconnected,
            }
        }
    }

    /// Unlike the other waits, a successful load ends a choice wait: the
    /// offered ids belong to the replaced state.
    pub(crate) fn await_choice(&mut self, valid_ids: &[String]) -> Resume<String> {
        loop {
            match self.services.port.wait_choice(valid_ids) {
                Wake::Reply(id) => return Resume::Reply(id),
                Wake::Save(request) => self.service_save(&request),
                Wake::Load(request) => {
                    if self.service_load(request) {
                        return Resume::Cancelled;
                    }
                }
                Wake::Closed => return Resume::Disconnected,
            }
        }
    }

    fn service_save(&self, request: &SaveRequest) {
        saves::handle_save_request(
            &self.state,
            request,
            self.services.saves,
            self.services.clock,
            self.services.port,
        );
    }

    fn service_load(&mut self, request: LoadRequest) -> bool {
        saves::handle_load_request(
            &mut self.state,
            request,
            self.services.saves,
            self.services.scenes,
            self.services.port,
        )
    }
}
