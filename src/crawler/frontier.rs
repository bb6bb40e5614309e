//! Frontier and visited-set bookkeeping
//!
//! Both structures are owned by the coordinator loop and are never shared
//! with workers, so neither needs internal locking.

use std::collections::HashSet;

/// URLs whose fetch and extraction have completed
///
/// Grows monotonically. Acceptance order is kept so the crawl summary can
/// list pages in the order the coordinator accepted them.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
    order: Vec<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as visited
    ///
    /// Returns false (and changes nothing) if the URL was already visited.
    pub fn mark(&mut self, url: &str) -> bool {
        if !self.urls.insert(url.to_string()) {
            return false;
        }
        self.order.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over visited URLs in acceptance order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Discovered URLs waiting for a worker
///
/// Last-discovered-first: `dequeue` returns the most recently enqueued URL.
#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<String>,
    queued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL unless it was already visited or is already waiting
    ///
    /// Returns true if the URL was added.
    pub fn enqueue(&mut self, url: String, visited: &VisitedSet) -> bool {
        if visited.contains(&url) || self.queued.contains(&url) {
            tracing::trace!("Frontier skipping {}", url);
            return false;
        }

        tracing::trace!("Frontier enqueue {}", url);
        self.queued.insert(url.clone());
        self.stack.push(url);
        true
    }

    /// Removes and returns the most recently enqueued URL
    pub fn dequeue(&mut self) -> Option<String> {
        let url = self.stack.pop()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
