//! Time sources for the scheduler.
//!
//! The scheduler only ever asks "what time is it", through [`TimeSource`].
//! The firmware counts SysTick interrupts in an [`AtomicU32`] and reads it
//! through a [`FreeRunningClock`]; host code and tests use the logical or the
//! manual clock.

use crate::{Tick, Ticks};
use core::sync::atomic::{AtomicU32, Ordering};

/// A monotonic source of [`Tick`]s.
pub trait TimeSource {
    /// Current time. Never smaller than a previously returned value.
    fn now(&mut self) -> Tick;
}

/// Clock advancing by one tick every time it is read.
///
/// Time only moves when someone looks at it, so a scheduler driven by this
/// clock makes progress with every dispatch iteration.
#[derive(Debug, Default)]
pub struct LogicalClock {
    ticks: u64,
}

impl LogicalClock {
    pub const fn new() -> Self {
        LogicalClock { ticks: 0 }
    }

    /// Value the next read will return, without advancing.
    pub fn peek(&self) -> Tick {
        Tick(self.ticks)
    }
}

impl TimeSource for LogicalClock {
    fn now(&mut self) -> Tick {
        let l_now = Tick(self.ticks);
        self.ticks = self.ticks.saturating_add(1);
        l_now
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: u64,
}

impl ManualClock {
    pub const fn new() -> Self {
        ManualClock { ticks: 0 }
    }

    pub fn advance(&mut self, p_delay: Ticks) {
        self.ticks = self.ticks.saturating_add(p_delay.0 as u64);
    }

    /// Jumps to `p_tick`. Moving backwards is ignored.
    pub fn set(&mut self, p_tick: Tick) {
        self.ticks = self.ticks.max(p_tick.0);
    }
}

impl TimeSource for ManualClock {
    fn now(&mut self) -> Tick {
        Tick(self.ticks)
    }
}

/// Clock backed by a counter incremented from an interrupt handler.
///
/// The counter is 32 bits wide and wraps; the clock extends it to 64 bits by
/// accumulating the wrapping difference between consecutive reads. It must be
/// read at least once per counter period (about 49 days at 1 kHz).
#[derive(Debug)]
pub struct FreeRunningClock<'a> {
    counter: &'a AtomicU32,
    last_raw: u32,
    ticks: u64,
}

impl<'a> FreeRunningClock<'a> {
    /// Starts a clock at [`Tick`] zero, whatever the current counter value.
    pub fn new(p_counter: &'a AtomicU32) -> Self {
        FreeRunningClock {
            counter: p_counter,
            last_raw: p_counter.load(Ordering::Acquire),
            ticks: 0,
        }
    }
}

impl TimeSource for FreeRunningClock<'_> {
    fn now(&mut self) -> Tick {
        let l_raw = self.counter.load(Ordering::Acquire);
        let l_delta = l_raw.wrapping_sub(self.last_raw);
        self.last_raw = l_raw;
        self.ticks = self.ticks.saturating_add(l_delta as u64);
        Tick(self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_clock_advances_on_read() {
        let mut l_clock = LogicalClock::new();
        assert_eq!(l_clock.now(), Tick(0));
        assert_eq!(l_clock.now(), Tick(1));
        assert_eq!(l_clock.peek(), Tick(2));
        assert_eq!(l_clock.now(), Tick(2));
    }

    #[test]
    fn manual_clock_never_goes_back() {
        let mut l_clock = ManualClock::new();
        assert_eq!(l_clock.now(), Tick(0));
        assert_eq!(l_clock.now(), Tick(0));
        l_clock.advance(Ticks(10));
        assert_eq!(l_clock.now(), Tick(10));
        l_clock.set(Tick(4));
        assert_eq!(l_clock.now(), Tick(10));
        l_clock.set(Tick(12));
        assert_eq!(l_clock.now(), Tick(12));
    }

    #[test]
    fn free_running_clock_follows_counter() {
        let l_counter = AtomicU32::new(100);
        let mut l_clock = FreeRunningClock::new(&l_counter);
        assert_eq!(l_clock.now(), Tick(0));
        assert_eq!(l_clock.now(), Tick(0));
        l_counter.store(105, Ordering::Release);
        assert_eq!(l_clock.now(), Tick(5));
    }

    #[test]
    fn free_running_clock_survives_wraparound() {
        let l_counter = AtomicU32::new(u32::MAX - 1);
        let mut l_clock = FreeRunningClock::new(&l_counter);
        l_counter.store(3, Ordering::Release);
        assert_eq!(l_clock.now(), Tick(5));
        l_counter.store(u32::MAX, Ordering::Release);
        assert_eq!(l_clock.now(), Tick(5 + u32::MAX as u64 - 3));
    }
}
