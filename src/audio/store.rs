use flume::{Receiver, Sender};
use tracing::trace;

use crate::audio::{
    commands::Intent,
    state::{PlaybackState, PlayerState},
};

#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub previous: PlaybackState,
    pub current: PlaybackState,
}

impl StateChange {
    pub fn track_changed(&self) -> bool {
        self.previous.current_track_id() != self.current.current_track_id()
    }

    pub fn volume_changed(&self) -> bool {
        self.previous.volume != self.current.volume
    }

    pub fn started(&self) -> bool {
        !self.previous.is_playing && self.current.is_playing
    }

    pub fn stopped(&self) -> bool {
        self.previous.is_playing && !self.current.is_playing
    }
}

/// Observable player state. Every successful dispatch that alters playback
/// state is announced to all subscribers in dispatch order.
pub struct Store {
    state: PlayerState,
    subscribers: Vec<Sender<StateChange>>,
}

impl Store {
    pub fn new(state: PlayerState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.state.playback
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn dispatch(&mut self, intent: Intent) -> bool {
        trace!(?intent, "dispatch");

        let previous = self.state.clone();
        self.state = previous.clone().reduce(intent);

        if self.state == previous {
            return false;
        }

        if self.state.playback != previous.playback {
            let change = StateChange {
                previous: previous.playback,
                current: self.state.playback.clone(),
            };
            self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        }

        true
    }

    pub fn is_first_track(&self) -> bool {
        self.state.queue.is_first()
    }

    pub fn is_last_track(&self) -> bool {
        self.state.queue.is_last()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(PlayerState::default())
    }
}
