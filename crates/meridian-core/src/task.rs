// File: crates/meridian-core/src/task.rs
// Summary: Host event-loop seam: deferred task handles, a virtual-time queue and clocks.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Identifies one deferred continuation. Handles are never reused by a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub const fn new(id: u64) -> Self { Self(id) }
    pub fn id(&self) -> u64 { self.0 }
}

/// The host loop's deferred-callback mechanism.
///
/// `defer` only books a slot; when it comes due the host calls back into the
/// plot (e.g. `XYPlot::resume`) with the handle it got here.
pub trait TaskQueue {
    fn defer(&mut self, delay: Duration) -> TaskHandle;
    /// Drop a pending task. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Deterministic queue with virtual time; the host (or a test) pops due tasks explicitly.
#[derive(Debug, Default)]
pub struct ManualQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), TaskHandle>,
}

impl ManualQueue {
    pub fn new() -> Self { Self::default() }

    pub fn now(&self) -> Duration { self.now }
    pub fn pending_count(&self) -> usize { self.pending.len() }
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.pending.values().any(|h| *h == handle)
    }

    /// Remove the earliest task and advance virtual time to its due point.
    pub fn pop_next(&mut self) -> Option<TaskHandle> {
        let (&(due, id), _) = self.pending.iter().next()?;
        let handle = self.pending.remove(&(due, id))?;
        self.now = self.now.max(due);
        Some(handle)
    }
}

impl TaskQueue for ManualQueue {
    fn defer(&mut self, delay: Duration) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now + delay, handle.0), handle);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|_, h| *h != handle);
    }
}

/// Monotonic time source used to measure chunk durations.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock, measured from construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration { self.origin.elapsed() }
}

/// Clock advanced by hand. Clones share the same time, so a test keeps one
/// copy while the scheduler owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self { Self::default() }
    pub fn advance(&self, by: Duration) { self.now.set(self.now.get() + by); }
    pub fn set(&self, to: Duration) { self.now.set(to); }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration { self.now.get() }
}
