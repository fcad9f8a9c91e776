/*! Worker start tickets.

Every worker takes an ordinal ticket from a shared counter before loading its models,
and waits `ordinal × delay` before doing so.
!*/
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use log::debug;

/// Hands out start tickets.
#[derive(Debug)]
pub struct StartTickets {
    next: AtomicUsize,
    delay: Duration,
}

impl StartTickets {
    pub fn new(delay: Duration) -> Self {
        Self {
            next: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn acquire(&self) -> Ticket {
        let ordinal = self.next.fetch_add(1, Ordering::SeqCst);
        Ticket {
            ordinal,
            delay: self.delay.saturating_mul(ordinal as u32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    ordinal: usize,
    delay: Duration,
}

impl Ticket {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Block the calling thread until this ticket's turn.
    pub fn wait(&self) {
        if !self.delay.is_zero() {
            debug!("ticket {} waiting {:?}", self.ordinal, self.delay);
            thread::sleep(self.delay);
        }
    }
}
