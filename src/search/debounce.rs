use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Defers query recomputation until input has been quiet for a fixed delay.
///
/// Last-query-wins: a keystroke arriving before the previous query was
/// taken replaces it and restarts the delay; nothing is queued. Polled
/// cooperatively from the thread that owns the hierarchy; the debouncer
/// itself never touches live nodes.
#[derive(Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<String>,
    last_input: Option<Instant>,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        QueryDebouncer {
            delay,
            pending: None,
            last_input: None,
        }
    }

    /// Record a keystroke's worth of query text, superseding any pending
    /// query and restarting the delay.
    pub fn input(&mut self, query: &str) {
        self.input_at(query, Instant::now());
    }

    pub fn input_at(&mut self, query: &str, now: Instant) {
        self.pending = Some(query.to_string());
        self.last_input = Some(now);
    }

    /// Take the pending query if the delay has elapsed since the last
    /// keystroke. Returns at most one query; the caller recomputes with it.
    pub fn poll(&mut self) -> Option<String> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<String> {
        let last = self.last_input?;
        if now.duration_since(last) < self.delay {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
