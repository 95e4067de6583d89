use core::fmt::Display;

/// An absolute point on the scheduler's logical clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(pub u64);

impl Tick {
    /// The tick `p_delay` ticks after this one.
    pub fn after(self, p_delay: Ticks) -> Tick {
        Tick(self.0.saturating_add(p_delay.0 as u64))
    }

    /// Ticks elapsed from `p_earlier` to this tick, zero if `p_earlier` is later.
    pub fn since(self, p_earlier: Tick) -> u64 {
        self.0.saturating_sub(p_earlier.0)
    }
}

impl Display for Tick {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tick {}", self.0)
    }
}

/// A relative delay, in ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticks(pub u32);

impl Display for Ticks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ticks", self.0)
    }
}

/// A wrapper struct representing a duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milliseconds(pub u32);

impl Display for Milliseconds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

impl Milliseconds {
    pub fn to_u32(&self) -> u32 {
        self.0
    }

    /// Converts the duration into a number of ticks of `p_tick_period`.
    ///
    /// Rounds down, with a minimum of one tick so a non-zero duration never
    /// becomes an immediate deadline. A zero tick period is treated as 1 ms.
    pub fn to_ticks(&self, p_tick_period: Milliseconds) -> Ticks {
        if self.0 == 0 {
            return Ticks(0);
        }
        Ticks((self.0 / p_tick_period.0.max(1)).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_arithmetic_saturates() {
        assert_eq!(Tick(5).after(Ticks(3)), Tick(8));
        assert_eq!(Tick(u64::MAX).after(Ticks(1)), Tick(u64::MAX));
        assert_eq!(Tick(3).since(Tick(5)), 0);
        assert_eq!(Tick(9).since(Tick(5)), 4);
    }

    #[test]
    fn milliseconds_to_ticks() {
        assert_eq!(Milliseconds(250).to_ticks(Milliseconds(1)), Ticks(250));
        assert_eq!(Milliseconds(250).to_ticks(Milliseconds(100)), Ticks(2));
        assert_eq!(Milliseconds(5).to_ticks(Milliseconds(10)), Ticks(1));
        assert_eq!(Milliseconds(0).to_ticks(Milliseconds(10)), Ticks(0));
        assert_eq!(Milliseconds(7).to_ticks(Milliseconds(0)), Ticks(7));
    }
}
