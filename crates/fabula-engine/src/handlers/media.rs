//! Media commands. Each forwards an event; images and background music
//! are also tracked in the overlay so snapshots can replay them.

use fabula_core::event::PresentationEvent;
use fabula_core::state::Track;

use crate::interpreter::Interpreter;

impl Interpreter<'_> {
    pub(crate) fn show_image(&mut self, path: &str) {
        self.state.overlay.image = Some(path.to_owned());
        self.emit(PresentationEvent::ShowImage {
            path: path.to_owned(),
        });
    }

    pub(crate) fn hide_image(&mut self) {
        self.state.overlay.image = None;
        self.emit(PresentationEvent::HideImage {});
    }

    /// A track already playing is stopped first.
    pub(crate) fn play_bgm(&mut self, path: &str, looping: bool) {
        if self.state.overlay.track.is_some() {
            self.emit(PresentationEvent::StopBgm {});
        }
        self.state.overlay.track = Some(Track {
            path: path.to_owned(),
            looping,
        });
        self.emit(PresentationEvent::PlayBgm {
            path: path.to_owned(),
            looping,
        });
    }

    pub(crate) fn stop_bgm(&mut self) {
        self.state.overlay.track = None;
        self.emit(PresentationEvent::StopBgm {});
    }

    pub(crate) fn play_sfx(&self, path: &str) {
        self.emit(PresentationEvent::PlaySfx {
            path: path.to_owned(),
        });
    }

    pub(crate) fn play_voice(&self, path: &str) {
        self.emit(PresentationEvent::PlayVoice {
            path: path.to_owned(),
        });
    }

    pub(crate) fn stop_voice(&self) {
        self.emit(PresentationEvent::StopVoice {});
    }
}
