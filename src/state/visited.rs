use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ledger of URLs already claimed for crawling
///
/// Shared by every task of a crawl through an `Arc`. The only way in is
/// [`VisitedSet::try_claim`], which checks and records under one lock, so two
/// tasks can never both win the same URL. Entries are never removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for crawling
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not in the ledger and now is; the caller owns the fetch
    /// * `false` - Another task already claimed it
    pub fn try_claim(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns true if the URL has been claimed
    ///
    /// Only a hint: a URL reported as unclaimed may be claimed by someone else
    /// before the caller gets to [`VisitedSet::try_claim`].
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the set half-updated, so
    // the data behind a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
