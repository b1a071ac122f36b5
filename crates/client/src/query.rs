//! Dependent list loading with latest-wins semantics.
//!
//! Each list on a page is a [`ListQuery`] keyed by its filter. Issuing a
//! fetch hands out a [`Ticket`]; only the response carrying the most recent
//! ticket is applied, so a slow answer for an old filter can never overwrite
//! the rows of the current one.

use tracing::debug;

use crate::error::ApiError;

/// Identifies one issued fetch of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What happened to a response handed to [`ListQuery::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// A newer fetch was issued; the response was discarded.
    Stale,
    /// The fetch failed; previous rows are kept.
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct ListQuery<K, T> {
    name: &'static str,
    key: Option<K>,
    latest: u64,
    in_flight: bool,
    rows: Vec<T>,
    loaded: bool,
}

impl<K: Clone + PartialEq, T> ListQuery<K, T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, key: None, latest: 0, in_flight: false, rows: Vec::new(), loaded: false }
    }

    /// Issue a fetch for `key` unless it is already the current key.
    pub fn request(&mut self, key: K) -> Option<(Ticket, K)> {
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key.clone());
        Some((self.issue(), key))
    }

    /// Issue a fetch for the current key regardless of changes.
    pub fn reload(&mut self) -> Option<(Ticket, K)> {
        let key = self.key.clone()?;
        Some((self.issue(), key))
    }

    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight = true;
        debug!(list = self.name, ticket = self.latest, "fetch issued");
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<T>, ApiError>) -> Applied {
        if !self.is_latest(ticket) {
            debug!(list = self.name, ticket = ticket.0, latest = self.latest, "stale response dropped");
            return Applied::Stale;
        }
        self.in_flight = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.loaded = true;
                Applied::Updated
            }
            Err(err) => Applied::Failed(err),
        }
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// True while the latest issued fetch has not been applied.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// True once any fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
