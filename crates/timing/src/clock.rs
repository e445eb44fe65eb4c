use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" for a registry, in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Process clock anchored to the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        common::now_seconds()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and advance
/// the clock owned by a registry.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
