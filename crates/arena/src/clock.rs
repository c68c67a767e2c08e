use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use versus_search::Budget;

/// Time source for decision latency and search deadlines.
pub trait Clock {
    /// Time elapsed since some fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock, measured from construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Time never passes: searches always finish and every latency is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> Duration {
        Duration::ZERO
    }
}

/// Advances by a fixed tick every time it is read, so budget expiry happens
/// at the same candidate on every run.
#[derive(Clone, Debug, Default)]
pub struct TickingClock {
    tick: Duration,
    now: Cell<Duration>,
}

impl TickingClock {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            now: Cell::new(Duration::ZERO),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> Duration {
        let t = self.now.get();
        self.now.set(t + self.tick);
        t
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Search budget that expires once `clock` reaches `at`.
pub(crate) struct ClockDeadline<'a, C: ?Sized> {
    pub clock: &'a C,
    pub at: Duration,
}

impl<C: Clock + ?Sized> Budget for ClockDeadline<'_, C> {
    fn exhausted(&self) -> bool {
        self.clock.now() >= self.at
    }
}

/// Cooperative cancellation shared between an arena and whoever drives it.
/// Checked between turns; a raised signal ends the match at the next step.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
