//! Generation counter for discarding stale refresh results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out increasing tickets; only the newest ticket may publish.
///
/// A refresh takes a ticket before it starts fetching and checks it before
/// storing the result. If a newer refresh began in the meantime, the older
/// result is dropped, so a slow response can never overwrite a newer one.
#[derive(Clone, Debug, Default)]
pub struct RefreshGate {
    generation: Arc<AtomicU64>,
}

/// Proof of when a refresh started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let gate = RefreshGate::new();
        let first = gate.begin();
        assert!(gate.is_current(first));
        let second = gate.begin();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn clones_share_generation() {
        let gate = RefreshGate::new();
        let other = gate.clone();
        let t = gate.begin();
        other.begin();
        assert!(!gate.is_current(t));
    }
}
