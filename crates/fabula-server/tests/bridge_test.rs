//! Drives a real interpreter through `ChannelPort` on a blocking thread.

use std::thread;

use fabula_core::command::{ChoiceOption, Command, Menu};
use fabula_core::event::PresentationEvent;
use fabula_core::port::{LoadRequest, SaveRequest};
use fabula_engine::{Interpreter, Outcome, Services};
use fabula_save_store::MemorySnapshotStore;
use fabula_server::bridge::{ChannelPort, ClientMessage};
use fabula_test_support::{FixedClock, InMemorySceneLoader, MockRng};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

fn say(text: &str) -> Command {
    Command::Say {
        text: text.to_owned(),
        speaker: None,
    }
}

fn label(name: &str) -> Command {
    Command::Label {
        name: name.to_owned(),
    }
}

fn option(text: &str, target: &str) -> ChoiceOption {
    ChoiceOption {
        text: text.to_owned(),
        target: target.to_owned(),
        when: None,
        enable: None,
    }
}

fn crossroads() -> Vec<Command> {
    vec![
        say("A fork in the road."),
        Command::Choose(Menu {
            options: vec![option("Left", "left"), option("Right", "right")],
            when: None,
            enable: None,
        }),
        label("left"),
        say("You went left."),
        Command::Jump {
            target: "done".to_owned(),
        },
        label("right"),
        say("You went right."),
        label("done"),
    ]
}

/// Starts `main` on its own thread, returning the client's ends of the
/// channels and the thread handle.
fn spawn_script(
    main: Vec<Command>,
) -> (
    UnboundedSender<ClientMessage>,
    UnboundedReceiver<PresentationEvent>,
    thread::JoinHandle<Outcome>,
) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let handle = thread::spawn(move || {
        let port = ChannelPort::new(event_tx, message_rx);
        let scenes = InMemorySceneLoader::new().with_scene("main", main);
        let saves = MemorySnapshotStore::new();
        let clock = FixedClock::default();
        let mut rng = MockRng;
        let services = Services {
            port: &port,
            scenes: &scenes,
            saves: &saves,
            clock: &clock,
        };
        Interpreter::start("main", services, &mut rng)
            .unwrap()
            .run()
    });
    (message_tx, event_rx, handle)
}

/// Blocks until an event of `kind` arrives, returning it.
fn next_of(events: &mut UnboundedReceiver<PresentationEvent>, kind: &str) -> PresentationEvent {
    loop {
        let event = events.blocking_recv().expect("script ended early");
        if event.event_type() == kind {
            return event;
        }
    }
}

#[test]
fn test_full_session_over_channels() {
    // Arrange
    let (client, mut events, handle) = spawn_script(crossroads());

    // Act
    next_of(&mut events, "SHOW_TEXT");
    client.send(ClientMessage::Next).unwrap();
    next_of(&mut events, "CHOICES");
    client
        .send(ClientMessage::ChoiceSelected("right".to_owned()))
        .unwrap();
    let shown = next_of(&mut events, "SHOW_TEXT");
    client.send(ClientMessage::Next).unwrap();
    let end = next_of(&mut events, "END");

    // Assert
    assert_eq!(
        shown,
        PresentationEvent::ShowText {
            text: "You went right.".to_owned(),
            speaker: None
        }
    );
    assert_eq!(
        end,
        PresentationEvent::End {
            text: "Game finished!".to_owned()
        }
    );
    assert_eq!(handle.join().unwrap(), Outcome::Finished);
}

#[test]
fn test_save_during_choice_then_load_reoffers_choice() {
    // Arrange
    let (client, mut events, handle) = spawn_script(crossroads());
    next_of(&mut events, "SHOW_TEXT");
    client.send(ClientMessage::Next).unwrap();
    next_of(&mut events, "CHOICES");

    // Act
    client
        .send(ClientMessage::Save(SaveRequest {
            slot: 1,
            name: Some("Crossroads".to_owned()),
        }))
        .unwrap();
    let saved = next_of(&mut events, "SAVE_SUCCESS");
    client
        .send(ClientMessage::Load(LoadRequest { slot: 1 }))
        .unwrap();
    next_of(&mut events, "LOAD_SUCCESS");
    let reoffered = next_of(&mut events, "CHOICES");
    client
        .send(ClientMessage::ChoiceSelected("left".to_owned()))
        .unwrap();
    let shown = next_of(&mut events, "SHOW_TEXT");
    drop(client);

    // Assert
    assert_eq!(
        saved,
        PresentationEvent::SaveSuccess {
            slot: 1,
            name: "Crossroads".to_owned(),
            message: "Crossroads saved successfully".to_owned()
        }
    );
    let PresentationEvent::Choices { items } = reoffered else {
        panic!("expected CHOICES");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(
        shown,
        PresentationEvent::ShowText {
            text: "You went left.".to_owned(),
            speaker: None
        }
    );
    assert_eq!(handle.join().unwrap(), Outcome::Disconnected);
}

#[test]
fn test_disconnect_stops_script_without_end() {
    // Arrange
    let (client, mut events, handle) = spawn_script(crossroads());
    next_of(&mut events, "SHOW_TEXT");

    // Act
    drop(client);
    let outcome = handle.join().unwrap();

    // Assert
    assert_eq!(outcome, Outcome::Disconnected);
    let mut rest = Vec::new();
    while let Ok(event) = events.try_recv() {
        rest.push(event.event_type());
    }
    assert!(!rest.contains(&"END"));
}
