use std::cell::Cell;
use std::time::Duration;

use async_trait::async_trait;

/// Platform timer the debouncer sleeps on.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Proof that the debouncer was armed at a given moment. It stays current
/// until the debouncer is armed again or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Cancellable quiet-period timer.
///
/// `arm` starts (or restarts) the period and hands out a ticket; `fire`
/// waits the period out and reports whether that ticket is still the latest
/// one. Arming again or calling `cancel` invalidates every earlier ticket, so
/// only the last caller in a burst goes through.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Cell<u64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Cell::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn arm(&self) -> DebounceTicket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        DebounceTicket(next)
    }

    pub fn cancel(&self) {
        self.arm();
    }

    pub fn is_current(&self, ticket: &DebounceTicket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Sleeps for the configured delay, then returns `true` if `ticket` was
    /// not superseded in the meantime.
    pub async fn fire<T: Timer + ?Sized>(&self, ticket: &DebounceTicket, timer: &T) -> bool {
        timer.sleep(self.delay).await;
        self.is_current(ticket)
    }
}
