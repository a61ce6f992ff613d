use std::time::{Duration, Instant};

use crate::walker::TypingTicket;

/// Deferred "typing finished" action for the current prompt.
///
/// At most one action is pending. Scheduling a new ticket supersedes the
/// previous one, so a stale prompt can never be revealed by its old timer.
#[derive(Debug, Clone)]
pub struct TypingTimer {
    delay: Duration,
    pending: Option<(TypingTicket, Instant)>,
}

impl TypingTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, ticket: TypingTicket, now: Instant) {
        self.pending = Some((ticket, now + self.delay));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the pending ticket if its deadline has passed.
    pub fn due(&mut self, now: Instant) -> Option<TypingTicket> {
        match self.pending {
            Some((ticket, deadline)) if now >= deadline => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }

    /// Time left until the pending deadline, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}
