use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::ApiError;
use crate::models::RecordSet;
use crate::ui::state::RequestToken;

const CHANNEL_CAPACITY: usize = 100;

/// Unified TUI events
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyCode),
    Resize(u16, u16),
    /// A spawned fetch settled
    FetchCompleted {
        token: RequestToken,
        result: Result<RecordSet, ApiError>,
    },
}

/// Event manager joining terminal input and background fetch completions
pub struct EventManager {
    event_sender: mpsc::Sender<TuiEvent>,
    event_receiver: mpsc::Receiver<TuiEvent>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    /// Create a new event manager
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::channel::<TuiEvent>(CHANNEL_CAPACITY);
        Self {
            event_sender,
            event_receiver,
        }
    }

    /// Get a clone of the event sender for use in async tasks
    pub fn sender(&self) -> mpsc::Sender<TuiEvent> {
        self.event_sender.clone()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_receive(&mut self) -> Option<TuiEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive an event, waiting for one
    pub async fn receive(&mut self) -> Option<TuiEvent> {
        self.event_receiver.recv().await
    }

    /// Wait up to `timeout` for terminal input and convert it to a TUI event
    pub fn poll_terminal(timeout: Duration) -> Result<Option<TuiEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match crossterm::event::read()? {
            Event::Key(key) => Self::convert_key(key),
            Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
            _ => None,
        })
    }

    /// Only key presses are forwarded; releases and repeats are dropped
    pub fn convert_key(key: KeyEvent) -> Option<TuiEvent> {
        (key.kind == KeyEventKind::Press).then_some(TuiEvent::Key(key.code))
    }
}
