//! Display state shared by the two gift lists.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use birthday_chain::ChainError;

use crate::gate::{RefreshGate, Ticket};

#[derive(Debug)]
struct Inner<T> {
    items: Vec<T>,
    last_error: Option<String>,
}

/// Items of one list plus the error of the last failed load, if any.
///
/// A failed load still shows as an empty list; `last_error` lets a caller
/// tell "nothing there" from "could not ask".
#[derive(Debug)]
pub struct ListState<T> {
    inner: Arc<Mutex<Inner<T>>>,
    gate: RefreshGate,
    name: &'static str,
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            gate: self.gate.clone(),
            name: self.name,
        }
    }
}

impl<T: Clone> ListState<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                items: Vec::new(),
                last_error: None,
            })),
            gate: RefreshGate::new(),
            name,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        // A panic while holding this lock leaves a plain Vec behind; keep using it.
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn begin(&self) -> Ticket {
        self.gate.begin()
    }

    /// Store a load result if `ticket` is still the newest refresh.
    ///
    /// Errors are logged and stored as an empty list. Returns whether the
    /// result was applied.
    pub fn apply(&self, ticket: Ticket, result: Result<Vec<T>, ChainError>) -> bool {
        if !self.gate.is_current(ticket) {
            debug!(list = self.name, "discarding stale result");
            return false;
        }
        let mut inner = self.lock();
        match result {
            Ok(items) => {
                debug!(list = self.name, count = items.len(), "list loaded");
                inner.items = items;
                inner.last_error = None;
            }
            Err(e) => {
                warn!(list = self.name, "failed to load: {e}");
                inner.items.clear();
                inner.last_error = Some(e.to_string());
            }
        }
        true
    }

    /// Empty the list without recording an error.
    pub fn clear(&self, ticket: Ticket) -> bool {
        self.apply(ticket, Ok(Vec::new()))
    }

    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
