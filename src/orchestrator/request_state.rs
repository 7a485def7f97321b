use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, PlaygroundResult};

/// The two remote operations the workflow issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Ingest,
    Render,
}

impl RequestKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ingest => "ingest",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one async operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    InFlight,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestState<T> {
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        match self {
            Self::Idle => RequestStatus::Idle,
            Self::InFlight => RequestStatus::InFlight,
            Self::Succeeded(_) => RequestStatus::Succeeded,
            Self::Failed(_) => RequestStatus::Failed,
        }
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Payload-free tag of a [`RequestState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Proof that a request was admitted; required to settle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub seq: u64,
}

/// Single-flight state holder for one request kind.
///
/// `begin` refuses to admit a request while one is in flight, and `settle`
/// only accepts the ticket of the latest admitted request.
#[derive(Debug, Clone)]
pub struct RequestTracker<T> {
    kind: RequestKind,
    state: RequestState<T>,
    issued: u64,
}

impl<T> RequestTracker<T> {
    #[must_use]
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            state: RequestState::Idle,
            issued: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.state.status()
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Sequence number of the most recently admitted request (0 if none).
    #[must_use]
    pub fn last_issued(&self) -> u64 {
        self.issued
    }

    pub(crate) fn begin(&mut self) -> PlaygroundResult<RequestTicket> {
        if self.state.is_in_flight() {
            return Err(PlaygroundError::RequestInFlight { kind: self.kind });
        }
        self.issued += 1;
        self.state = RequestState::InFlight;
        Ok(RequestTicket {
            kind: self.kind,
            seq: self.issued,
        })
    }

    /// Returns `false` and leaves the state untouched for stale tickets.
    pub(crate) fn settle(&mut self, ticket: RequestTicket, outcome: Result<T, String>) -> bool {
        if ticket.kind != self.kind || ticket.seq != self.issued || !self.state.is_in_flight() {
            return false;
        }
        self.state = match outcome {
            Ok(payload) => RequestState::Succeeded(payload),
            Err(message) => RequestState::Failed(message),
        };
        true
    }
}
