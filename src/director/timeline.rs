use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// An action scheduled at an offset from the start of its timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent<A> {
    pub at: Duration,
    pub action: A,
}

impl<A> TimedEvent<A> {
    pub fn new(at: Duration, action: A) -> Self {
        Self { at, action }
    }
}

/// Plays a list of timed events against a clock. Dropping the timeline
/// discards whatever has not fired yet.
#[derive(Debug)]
pub struct Timeline<A> {
    pending: VecDeque<TimedEvent<A>>,
    started_at: Instant,
}

impl<A> Timeline<A> {
    pub fn start(mut events: Vec<TimedEvent<A>>, started_at: Instant) -> Self {
        events.sort_by_key(|e| e.at);
        Self {
            pending: events.into(),
            started_at,
        }
    }

    /// Pops every event whose offset has elapsed by `now`, in order.
    pub fn due(&mut self, now: Instant) -> Vec<A> {
        let elapsed = now.saturating_duration_since(self.started_at);
        let mut fired = Vec::new();
        while self.pending.front().is_some_and(|e| e.at <= elapsed) {
            if let Some(event) = self.pending.pop_front() {
                fired.push(event.action);
            }
        }
        fired
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
