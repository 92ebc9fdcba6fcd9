//! "Latest request wins" sequencing.
//!
//! The transforms are instantaneous and normally run inline. A caller
//! that moves them to another thread tags each request with a ticket
//! and drops any result whose ticket is no longer the newest.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one recompute request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Keep `result` only if no newer request was issued since `ticket`
    pub fn accept<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        self.is_current(ticket).then_some(result)
    }
}
