//! Tick scheduler - deterministic automatic-fall timer
//!
//! The scheduler holds the installed interval and the time accumulated
//! towards the next tick. Installing a different interval replaces the
//! timer: accumulated time is discarded and the generation counter moves on,
//! which is how a pending tick gets canceled. A `None` interval never fires.

/// Fixed-interval timer fed with elapsed milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickScheduler {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
    generation: u64,
}

impl TickScheduler {
    pub fn new(interval_ms: Option<u32>) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
            generation: 0,
        }
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Bumped every time the timer is replaced or canceled
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time accumulated towards the next tick
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Install `interval_ms` if it differs from the current one
    ///
    /// Returns true when the timer was replaced.
    pub fn sync(&mut self, interval_ms: Option<u32>) -> bool {
        if self.interval_ms == interval_ms {
            return false;
        }
        self.interval_ms = interval_ms;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Install `interval_ms` unconditionally, discarding accumulated time
    pub fn restart(&mut self, interval_ms: Option<u32>) {
        self.interval_ms = interval_ms;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop the timer
    pub fn cancel(&mut self) {
        self.sync(None);
    }

    /// Consume time from `budget_ms`; returns true if a tick is due
    ///
    /// Call repeatedly until it returns false, re-syncing between ticks.
    pub fn poll(&mut self, budget_ms: &mut u32) -> bool {
        let Some(interval) = self.interval_ms else {
            *budget_ms = 0;
            return false;
        };
        let interval = interval.max(1);

        let needed = interval.saturating_sub(self.elapsed_ms);
        if *budget_ms >= needed {
            *budget_ms -= needed;
            self.elapsed_ms = 0;
            true
        } else {
            self.elapsed_ms += *budget_ms;
            *budget_ms = 0;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(s: &mut TickScheduler, mut budget: u32) -> u32 {
        let mut n = 0;
        while s.poll(&mut budget) {
            n += 1;
        }
        n
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut s = TickScheduler::new(Some(100));
        assert_eq!(ticks(&mut s, 99), 0);
        assert_eq!(ticks(&mut s, 1), 1);
        assert_eq!(ticks(&mut s, 350), 3);
        assert_eq!(s.elapsed_ms(), 50);
    }

    #[test]
    fn test_none_never_fires() {
        let mut s = TickScheduler::new(None);
        assert_eq!(ticks(&mut s, 1_000_000), 0);
        assert_eq!(s.elapsed_ms(), 0);
    }

    #[test]
    fn test_sync_replaces_timer_only_on_change() {
        let mut s = TickScheduler::new(Some(100));
        ticks(&mut s, 60);
        assert!(!s.sync(Some(100)));
        assert_eq!(s.elapsed_ms(), 60);

        let before = s.generation();
        assert!(s.sync(Some(80)));
        assert_eq!(s.elapsed_ms(), 0);
        assert_eq!(s.generation(), before + 1);
    }

    #[test]
    fn test_restart_with_same_interval_discards_pending_time() {
        let mut s = TickScheduler::new(Some(100));
        ticks(&mut s, 70);
        let before = s.generation();

        s.restart(Some(100));
        assert_eq!(s.generation(), before + 1);
        assert_eq!(ticks(&mut s, 70), 0);
        assert_eq!(ticks(&mut s, 30), 1);
    }

    #[test]
    fn test_cancel_discards_pending_time() {
        let mut s = TickScheduler::new(Some(100));
        ticks(&mut s, 90);
        s.cancel();
        assert_eq!(s.interval_ms(), None);
        s.sync(Some(100));
        assert_eq!(ticks(&mut s, 10), 0);
    }
}
