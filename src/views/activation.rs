//! Explicit cancellation for view fetches.
//!
//! A view owns one [`Activation`] for as long as it is shown. Each request
//! it starts is issued a [`Ticket`] on a [`Channel`]; starting a newer
//! request on the same channel, or deactivating the view, cancels the older
//! ticket. A result that comes back under a cancelled ticket is dropped
//! instead of being applied. Nothing is sent to the server on cancel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Independent request lanes within one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// The view's primary data fetch.
    Data,
    /// The AI suggestion request.
    Ai,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Self::Data => 0,
            Self::Ai => 1,
        }
    }
}

#[derive(Debug)]
struct Shared {
    active: AtomicBool,
    generations: [AtomicU64; 2],
}

/// Lifetime of one view instance.
#[derive(Debug, Clone)]
pub struct Activation {
    shared: Arc<Shared>,
}

impl Default for Activation {
    fn default() -> Self {
        Self::new()
    }
}

impl Activation {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                active: AtomicBool::new(true),
                generations: [AtomicU64::new(0), AtomicU64::new(0)],
            }),
        }
    }

    /// Issue a ticket on `channel`, cancelling any earlier one there.
    pub fn issue(&self, channel: Channel) -> Ticket {
        let generation = self.shared.generations[channel.index()]
            .fetch_add(1, Ordering::SeqCst)
            + 1;
        Ticket {
            shared: Arc::clone(&self.shared),
            channel,
            generation,
        }
    }

    /// Cancel every outstanding ticket; later results are discarded.
    pub fn deactivate(&self) {
        self.shared.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }
}

/// Permission to apply one request's result. `Send`, so a request may run
/// on another thread.
#[derive(Debug, Clone)]
pub struct Ticket {
    shared: Arc<Shared>,
    channel: Channel,
    generation: u64,
}

impl Ticket {
    /// Still the newest request on its channel, and the view still active.
    pub fn is_live(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
            && self.shared.generations[self.channel.index()].load(Ordering::SeqCst)
                == self.generation
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ticket_is_live() {
        let activation = Activation::new();
        let ticket = activation.issue(Channel::Data);
        assert!(ticket.is_live());
    }

    #[test]
    fn newer_ticket_supersedes_older_on_same_channel() {
        let activation = Activation::new();
        let first = activation.issue(Channel::Data);
        let ai = activation.issue(Channel::Ai);
        let second = activation.issue(Channel::Data);
        assert!(!first.is_live());
        assert!(second.is_live());
        assert!(ai.is_live(), "channels are independent");
    }

    #[test]
    fn deactivation_cancels_everything() {
        let activation = Activation::new();
        let data = activation.issue(Channel::Data);
        let ai = activation.issue(Channel::Ai);
        activation.deactivate();
        assert!(!activation.is_active());
        assert!(!data.is_live());
        assert!(!ai.is_live());
    }

    #[test]
    fn ticket_can_cross_threads() {
        let activation = Activation::new();
        let ticket = activation.issue(Channel::Data);
        let handle = std::thread::spawn(move || ticket.is_live());
        assert!(handle.join().unwrap());
    }
}
