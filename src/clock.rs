//! Time source and the per-frame sleep budget.

/// Monotonic millisecond clock with an async delay.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now_ms(&self) -> u64;
    async fn sleep_ms(&mut self, ms: u64);
}

/// Start of a frame. Work done during the frame counts against its period;
/// [`finish`](Self::finish) sleeps only what is left.
#[derive(Debug, Clone, Copy)]
pub struct FrameBudget {
    started_ms: u64,
}

impl FrameBudget {
    pub fn start<C: Clock>(clock: &C) -> Self {
        Self {
            started_ms: clock.now_ms(),
        }
    }

    pub fn elapsed_ms<C: Clock>(&self, clock: &C) -> u64 {
        clock.now_ms().saturating_sub(self.started_ms)
    }

    /// Returns the time slept. An overrun frame does not sleep at all.
    pub async fn finish<C: Clock>(self, clock: &mut C, period_ms: u64) -> u64 {
        let remaining = period_ms.saturating_sub(self.elapsed_ms(clock));
        if remaining > 0 {
            clock.sleep_ms(remaining).await;
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[derive(Default)]
    struct MockClock {
        now: u64,
        sleeps: Vec<u64>,
    }

    impl Clock for MockClock {
        fn now_ms(&self) -> u64 {
            self.now
        }

        async fn sleep_ms(&mut self, ms: u64) {
            self.sleeps.push(ms);
            self.now += ms;
        }
    }

    #[test]
    fn idle_frame_sleeps_full_period() {
        let mut clock = MockClock::default();
        let frame = FrameBudget::start(&clock);
        assert_eq!(block_on(frame.finish(&mut clock, 300)), 300);
        assert_eq!(clock.now, 300);
    }

    #[test]
    fn work_is_taken_out_of_the_period() {
        let mut clock = MockClock {
            now: 1_000,
            ..Default::default()
        };
        let frame = FrameBudget::start(&clock);
        clock.now += 120;
        assert_eq!(frame.elapsed_ms(&clock), 120);
        assert_eq!(block_on(frame.finish(&mut clock, 300)), 180);
        assert_eq!(clock.now, 1_300);
    }

    #[test]
    fn overrun_frame_does_not_sleep() {
        let mut clock = MockClock::default();
        let frame = FrameBudget::start(&clock);
        clock.now += 450;
        assert_eq!(block_on(frame.finish(&mut clock, 300)), 0);
        assert!(clock.sleeps.is_empty());
    }
}
