// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trailing-edge debounce with an explicit clock.
//!
//! Nothing here owns a timer. Callers pass the current time in and ask when the
//! next deadline is, which keeps the behavior identical under a browser
//! `setTimeout` and under a test that advances time by hand.

use std::time::Duration;

/// Holds the latest value until `delay` passes without a newer one.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the timer.
    pub fn call(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now + self.delay));
    }

    /// The pending value, if its quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

/// A function wrapped so it only runs after calls stop for `delay`.
pub struct Debounced<T, F> {
    inner: Debounce<T>,
    func: F,
}

/// Wrap `func` so that bursts of calls collapse into one, with the last argument.
pub fn debounce<T, F: FnMut(T)>(func: F, delay: Duration) -> Debounced<T, F> {
    Debounced {
        inner: Debounce::new(delay),
        func,
    }
}

impl<T, F: FnMut(T)> Debounced<T, F> {
    pub fn call(&mut self, value: T, now: Duration) {
        self.inner.call(value, now);
    }

    /// Run the function if the quiet period has elapsed. Returns whether it ran.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.inner.poll(now) {
            Some(value) => {
                (self.func)(value);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.inner.cancel().is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.inner.deadline()
    }
}
