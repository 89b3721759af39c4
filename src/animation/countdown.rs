//! Claim countdown shown alongside the result.

/// What a [`Countdown::poll`] observed since the previous poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A second elapsed; carries the seconds now remaining.
    Tick(u32),
    /// The timer reached zero and stopped.
    Expired,
}

/// One-per-second timer polled against wall-clock milliseconds.
///
/// At most one timer runs; starting again replaces it.
#[derive(Debug, Clone)]
pub struct Countdown {
    seconds: u32,
    remaining: Option<u32>,
    next_tick_ms: f64,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds,
            remaining: None,
            next_tick_ms: 0.0,
        }
    }

    /// Seconds left, or `None` when not running.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Start from the full duration at `now_ms`, replacing any running timer.
    pub fn start(&mut self, now_ms: f64) {
        if self.seconds == 0 {
            self.remaining = None;
            return;
        }
        self.remaining = Some(self.seconds);
        self.next_tick_ms = now_ms + 1000.0;
        log::debug!("Countdown started: {} s", self.seconds);
    }

    /// Stop without expiring. Safe to call when stopped.
    pub fn clear(&mut self) {
        if self.remaining.take().is_some() {
            log::debug!("Countdown cleared");
        }
    }

    /// Emit one event per whole second elapsed since the last poll.
    pub fn poll(&mut self, now_ms: f64) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        while let Some(remaining) = self.remaining {
            if now_ms < self.next_tick_ms {
                break;
            }
            if remaining <= 1 {
                self.remaining = None;
                events.push(CountdownEvent::Expired);
                log::info!("Claim countdown expired");
                break;
            }
            self.remaining = Some(remaining - 1);
            self.next_tick_ms += 1000.0;
            events.push(CountdownEvent::Tick(remaining - 1));
        }
        events
    }
}
