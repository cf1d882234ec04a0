//! Test port — a `PresentationPort` driven by a queue of scripted client
//! responses that records everything the interpreter emits.

use std::collections::VecDeque;
use std::sync::Mutex;

use fabula_core::event::PresentationEvent;
use fabula_core::port::{LoadRequest, PresentationPort, SaveRequest, Wake};

/// A scripted client message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Answers a continue wait.
    Continue,
    /// Answers a choice wait.
    Choice(String),
    /// Answers a text-input wait.
    Text(String),
    /// A save request; wakes any wait.
    Save(SaveRequest),
    /// A load request; wakes any wait.
    Load(LoadRequest),
}

impl Response {
    /// Shorthand for a save request with the default name.
    #[must_use]
    pub fn save(slot: u32) -> Self {
        Response::Save(SaveRequest { slot, name: None })
    }

    /// Shorthand for a load request.
    #[must_use]
    pub fn load(slot: u32) -> Self {
        Response::Load(LoadRequest { slot })
    }

    /// Shorthand for a choice selection.
    #[must_use]
    pub fn choice(id: &str) -> Self {
        Response::Choice(id.to_owned())
    }
}

/// A presentation port that replays scripted responses in order.
///
/// Responses that do not fit the current wait (or choice ids outside the
/// offered set) are dropped, mirroring a transport that ignores unrelated
/// messages. Once the queue is empty every wait returns `Wake::Closed`.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    responses: Mutex<VecDeque<Response>>,
    events: Mutex<Vec<PresentationEvent>>,
    choice_waits: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPort {
    /// Create a port that will answer waits with `responses`, in order.
    #[must_use]
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// Returns a copy of every emitted event.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn events(&self) -> Vec<PresentationEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the wire type of every emitted event.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(PresentationEvent::event_type)
            .collect()
    }

    /// Returns the valid id set of every choice wait, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn choice_waits(&self) -> Vec<Vec<String>> {
        self.choice_waits.lock().unwrap().clone()
    }

    /// Number of scripted responses not yet consumed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn next_matching<T>(&self, mut accept: impl FnMut(Response) -> Option<T>) -> Wake<T> {
        let mut responses = self.responses.lock().unwrap();
        while let Some(response) = responses.pop_front() {
            match response {
                Response::Save(request) => return Wake::Save(request),
                Response::Load(request) => return Wake::Load(request),
                other => {
                    if let Some(reply) = accept(other) {
                        return Wake::Reply(reply);
                    }
                }
            }
        }
        Wake::Closed
    }
}

impl PresentationPort for ScriptedPort {
    fn emit(&self, event: PresentationEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn wait_continue(&self) -> Wake<()> {
        self.next_matching(|response| matches!(response, Response::Continue).then_some(()))
    }

    fn wait_choice(&self, valid_ids: &[String]) -> Wake<String> {
        self.choice_waits.lock().unwrap().push(valid_ids.to_vec());
        self.next_matching(|response| match response {
            Response::Choice(id) if valid_ids.contains(&id) => Some(id),
            _ => None,
        })
    }

    fn wait_text_input(&self, _prompt: &str) -> Wake<String> {
        self.next_matching(|response| match response {
            Response::Text(text) => Some(text),
            _ => None,
        })
    }
}
