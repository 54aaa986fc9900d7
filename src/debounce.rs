//! Keystroke debouncing.
//!
//! Each keystroke takes a new ticket, which invalidates every earlier one.
//! A delayed task holding a ticket only acts if it is still current once
//! its delay has elapsed, so only the settled input value gets applied.
//! Snapshot reloads use the same tickets so a slow, older fetch cannot
//! overwrite a newer one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the timer
    pub fn schedule(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Drop any pending ticket, e.g. when the input is cleared directly
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule();
        let second = debouncer.schedule();

        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn test_out_of_order_completion_keeps_latest() {
        let mut reloads = Debouncer::new();
        let older = reloads.schedule();
        let newer = reloads.schedule();

        // newer finishes first, older arrives afterwards
        let applied: Vec<_> = [newer, older]
            .into_iter()
            .filter(|ticket| reloads.is_current(*ticket))
            .collect();

        assert_eq!(applied, vec![newer]);
    }

    #[test]
    fn test_cancel_invalidates_pending_ticket() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule();
        debouncer.cancel();

        assert!(!debouncer.is_current(ticket));
    }
}
