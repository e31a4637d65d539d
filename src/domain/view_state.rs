//! View State Machine
//!
//! Loading/error/data lifecycle of a single view, independent of any
//! rendering. Every fetch is issued a ticket from a monotonically increasing
//! generation counter; only the completion carrying the latest ticket may
//! change the state, so a slow response cannot overwrite a newer one.

use serde::Serialize;

/// Lifecycle of a view's data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Errored(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Errored(_) => "errored",
        }
    }
}

/// Proof that a request was started; carries its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Owns a view's state and the generation counter guarding it
#[derive(Debug, Clone)]
pub struct ViewController<T> {
    state: ViewState<T>,
    latest: u64,
}

impl<T> Default for ViewController<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Idle,
            latest: 0,
        }
    }
}

impl<T> ViewController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Generation of the most recently issued ticket (0 before any request)
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Start a request: moves to `Loading` and supersedes all earlier tickets
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.state = ViewState::Loading;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a request outcome. Returns false when the ticket is stale and
    /// the outcome was discarded.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<T, E>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale response (generation {}, latest {})",
                ticket.0,
                self.latest
            );
            return false;
        }

        self.state = match outcome {
            Ok(data) => ViewState::Loaded(data),
            Err(e) => ViewState::Errored(e.to_string()),
        };
        true
    }

    /// Fail the current request without a network call (e.g. bad input)
    pub fn reject(&mut self, message: impl Into<String>) -> RequestTicket {
        let ticket = self.begin();
        self.state = ViewState::Errored(message.into());
        ticket
    }
}
