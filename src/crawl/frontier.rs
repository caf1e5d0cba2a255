// src/crawl/frontier.rs
// =============================================================================
// The queue of pages waiting to be crawled.
//
// Breadth-first means first-in, first-out. Instead of a VecDeque we keep a
// growable Vec plus a head index: popping just moves the head forward, and
// the consumed prefix is dropped once it makes up most of the buffer.
//
// A URL that is already waiting is not queued a second time.
// =============================================================================

use std::collections::HashSet;

// Don't bother compacting tiny buffers
const COMPACT_THRESHOLD: usize = 1024;

#[derive(Debug, Default)]
pub struct Frontier {
    slots: Vec<String>,
    head: usize,
    pending: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: &str) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed.to_string());
        frontier
    }

    /// Adds `url` to the back. Returns false if it was already waiting.
    pub fn push(&mut self, url: String) -> bool {
        if !self.pending.insert(url.clone()) {
            return false;
        }
        self.slots.push(url);
        true
    }

    /// Takes the URL at the front
    pub fn pop(&mut self) -> Option<String> {
        if self.head >= self.slots.len() {
            return None;
        }

        let url = std::mem::take(&mut self.slots[self.head]);
        self.head += 1;
        self.pending.remove(&url);
        self.compact();
        Some(url)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len() - self.head
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compact(&mut self) {
        if self.head == self.slots.len() {
            self.slots.clear();
            self.head = 0;
        } else if self.head >= COMPACT_THRESHOLD && self.head * 2 >= self.slots.len() {
            self.slots.drain(..self.head);
            self.head = 0;
        }
    }
}
