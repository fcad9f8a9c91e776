/*! Shared counters

Holds the corpus-wide [IdAllocator] for sentence and comment ids,
and the [StartTickets] used to stagger worker initialization.

Both are the only state shared between workers.
!*/
mod allocator;
mod tickets;

pub use allocator::{Counter, IdAllocator};
pub use tickets::{StartTickets, Ticket};
