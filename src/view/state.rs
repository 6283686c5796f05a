//! Per-view transient state.
//!
//! Each feature view owns one [`ViewState`] per request it makes.  Starting a
//! request bumps the view's generation and hands back a [`RequestTicket`];
//! a completion carrying an older ticket is discarded, so a slow reply can
//! never overwrite a newer one.
//!
//! The views in [`super::views`] hold `&mut self` across each await, so they
//! never overlap two requests on one state; there the ticket check only
//! matters after [`ViewState::reset`].  A caller that keeps several requests
//! in flight (for example with `tokio::join!`) takes a ticket per request and
//! completes each with its own ticket.
//!
//! ```text
//! idle ──begin──▶ loading ──complete(current ticket)──▶ response | error
//!                         ──complete(stale ticket)────▶ (ignored)
//! ```

use crate::tutor::GatewayError;

/// Proof of which request a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

/// Input, last response, loading flag and error message of one view.
#[derive(Debug)]
pub struct ViewState<T> {
    /// What the learner typed (word, query, written answer).
    pub input: String,
    response: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            input: String::new(),
            response: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request: clears the previous response and error.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.loading = true;
        self.response = None;
        self.error = None;
        RequestTicket {
            generation: self.generation,
        }
    }

    /// Apply a request outcome.
    ///
    /// Returns `false` (state untouched) when `ticket` is not the latest.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<T, GatewayError>) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "view: discarding stale reply (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(response) => {
                self.response = Some(response);
                self.error = None;
            }
            Err(e) => {
                self.response = None;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Drop everything, invalidating any request in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.input.clear();
        self.response = None;
        self.loading = false;
        self.error = None;
    }

    pub fn response(&self) -> Option<&T> {
        self.response.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
