//! Application state owned by the session controller

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{FormatResponse, RenderedOutput};

/// Which format responses get applied when several are in flight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseOrdering {
    /// Every response is applied; whichever resolves last wins
    #[default]
    LastToResolve,
    /// Responses to anything but the newest request are discarded
    LatestDispatched,
}

/// Sequence number stamped on each dispatched format request
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestSeq(u64);

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    output: RenderedOutput,
    /// Format requests dispatched and not yet finished
    in_flight: usize,
    copying: bool,
    last_dispatched: u64,
    ordering: ResponseOrdering,
}

impl AppState {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    pub fn output(&self) -> &RenderedOutput {
        &self.output
    }

    pub fn is_formatting(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_copying(&self) -> bool {
        self.copying
    }

    /// Enter `Formatting` and stamp the new request
    pub fn begin_format(&mut self) -> RequestSeq {
        self.last_dispatched += 1;
        self.in_flight += 1;
        RequestSeq(self.last_dispatched)
    }

    /// One request finished, whatever the outcome. Returns `true` once no
    /// other request is still in flight.
    pub fn finish_format(&mut self) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.in_flight == 0
    }

    /// Replace the rendered output with a response, unless the ordering
    /// policy marks it stale. Returns the new output when applied.
    pub fn apply_response(&mut self, seq: RequestSeq, response: FormatResponse) -> Option<&RenderedOutput> {
        if self.ordering == ResponseOrdering::LatestDispatched && seq.0 < self.last_dispatched {
            return None;
        }
        self.output = RenderedOutput::from_response(response);
        Some(&self.output)
    }

    pub fn begin_copy(&mut self) {
        self.copying = true;
    }

    pub fn finish_copy(&mut self) {
        self.copying = false;
    }
}
