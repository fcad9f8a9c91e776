/*! Corpus-wide identifier allocation.

Sentence and comment ids are drawn from two process-wide counters.
Workers are threads, so each counter is a single atomic integer:
the increment and the read happen in one compare-and-swap, which keeps
values unique and increasing whatever the interleaving of callers.
!*/
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::error::Error;

/// A named, monotonically increasing counter.
#[derive(Debug)]
pub struct Counter {
    name: &'static str,
    start: u64,
    next: AtomicU64,
}

impl Counter {
    pub fn new(name: &'static str) -> Self {
        Self::starting_at(name, 0)
    }

    pub fn starting_at(name: &'static str, start: u64) -> Self {
        Self {
            name,
            start,
            next: AtomicU64::new(start),
        }
    }

    /// Fetch the current value and increment the counter.
    ///
    /// Returns [Error::CounterOverflow] once every `u64` value has been handed out.
    pub fn next(&self) -> Result<u64, Error> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1))
            .map_err(|_| Error::CounterOverflow(self.name))
    }

    /// Number of values issued so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst) - self.start
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Holds the sentence and comment counters shared by every worker of a run.
#[derive(Debug)]
pub struct IdAllocator {
    sentences: Counter,
    comments: Counter,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(0, 0)
    }

    pub fn starting_at(sentence_start: u64, comment_start: u64) -> Self {
        debug!(
            "id allocator starting at s{} / c{}",
            sentence_start, comment_start
        );
        Self {
            sentences: Counter::starting_at("sentence", sentence_start),
            comments: Counter::starting_at("comment", comment_start),
        }
    }

    pub fn next_sentence_id(&self) -> Result<u64, Error> {
        self.sentences.next()
    }

    pub fn next_comment_id(&self) -> Result<u64, Error> {
        self.comments.next()
    }

    /// (sentence, comment) ids issued so far.
    pub fn issued(&self) -> (u64, u64) {
        (self.sentences.issued(), self.comments.issued())
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
