//! Screen event stream types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::failure::Notice;
use super::state::UiState;

/// Concrete payloads broadcast by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenEventPayload {
    StateChanged { state: UiState },
    Notice { notice: Notice },
}

/// Envelope for broadcast screen events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenEvent {
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub payload: ScreenEventPayload,
}

/// Assigns sequence numbers and timestamps.
#[derive(Debug, Default)]
pub(crate) struct EventSequencer {
    next_seq: u64,
}

impl EventSequencer {
    pub(crate) fn wrap(&mut self, payload: ScreenEventPayload) -> ScreenEvent {
        let seq = self.next_seq;
        self.next_seq += 1;
        ScreenEvent {
            seq,
            timestamp: Utc::now(),
            payload,
        }
    }
}
