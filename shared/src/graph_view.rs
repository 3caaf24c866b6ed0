//! View state for the graph widget.
//!
//! The widget owns exactly one [`GraphView`]. Every fetch it starts is tagged
//! with a [`FetchTicket`]; only the outcome carrying the most recently issued
//! ticket may change the state; any other outcome is stale and dropped. This
//! keeps a slow response for an old period from overwriting a newer selection
//! without needing to cancel requests in flight.

use crate::{Period, Record, ServiceError};

/// Message shown to the user whenever a fetch fails
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

#[derive(Debug, Clone, PartialEq)]
pub enum GraphStatus {
    Loading,
    Error(String),
    Ready(Vec<Record>),
}

/// Identifies one fetch issued by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    period: Period,
    generation: u64,
}

impl FetchTicket {
    pub fn period(&self) -> Period {
        self.period
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of feeding a fetch result back into the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

/// What the widget should draw for the current state
#[derive(Debug, Clone, PartialEq)]
pub enum GraphDisplay<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Chart(&'a [Record]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    period: Period,
    status: GraphStatus,
    generation: u64,
}

impl GraphView {
    /// Create the view for its initial period together with the first fetch to run
    pub fn mount(period: Period) -> (Self, FetchTicket) {
        let mut view = Self {
            period,
            status: GraphStatus::Loading,
            generation: 0,
        };
        let ticket = view.begin_fetch();
        (view, ticket)
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn status(&self) -> &GraphStatus {
        &self.status
    }

    /// Ticket of the fetch whose outcome the view is waiting for (or last accepted)
    pub fn current_ticket(&self) -> FetchTicket {
        FetchTicket {
            period: self.period,
            generation: self.generation,
        }
    }

    /// Switch to another period. Re-selecting the current period does nothing.
    pub fn select_period(&mut self, period: Period) -> Option<FetchTicket> {
        if period == self.period {
            return None;
        }
        self.period = period;
        Some(self.begin_fetch())
    }

    /// Fetch the current period again, e.g. after an error
    pub fn retry(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Apply the outcome of a fetch if it belongs to the latest request
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Record>, ServiceError>,
    ) -> Resolution {
        if ticket != self.current_ticket() {
            return Resolution::Stale;
        }
        self.status = match outcome {
            Ok(records) => GraphStatus::Ready(records),
            Err(_) => GraphStatus::Error(FETCH_ERROR_MESSAGE.to_string()),
        };
        Resolution::Applied
    }

    pub fn display(&self) -> GraphDisplay<'_> {
        match &self.status {
            GraphStatus::Loading => GraphDisplay::Loading,
            GraphStatus::Error(message) => GraphDisplay::Error(message),
            GraphStatus::Ready(records) if records.is_empty() => GraphDisplay::Empty,
            GraphStatus::Ready(records) => GraphDisplay::Chart(records),
        }
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.status = GraphStatus::Loading;
        self.current_ticket()
    }
}
