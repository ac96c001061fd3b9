use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Distinct error messages grouped by domain
pub type ErrorSnapshot = BTreeMap<String, BTreeSet<String>>;

/// Append-only, concurrency-safe log of fetch failures per domain
///
/// Identical messages for the same domain are stored once.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Mutex<ErrorSnapshot>,
}

impl ErrorLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error message under a domain
    ///
    /// # Returns
    ///
    /// `true` if the message was new for that domain
    pub fn record(&self, domain: &str, message: impl Into<String>) -> bool {
        self.lock()
            .entry(domain.to_string())
            .or_default()
            .insert(message.into())
    }

    /// Copies the current contents
    ///
    /// The copy is consistent and detached: later records do not show up in it.
    pub fn snapshot(&self) -> ErrorSnapshot {
        self.lock().clone()
    }

    /// Number of domains with errors
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, ErrorSnapshot> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
