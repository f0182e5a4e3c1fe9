use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

/// Length of an exam attempt: 59 minutes.
pub const EXAM_DURATION_SECS: u32 = 3540;

const TICK: Duration = Duration::from_secs(1);

/// Remaining seconds of an attempt. Never goes below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(remaining_secs: u32) -> Self {
        Self {
            remaining: remaining_secs,
        }
    }

    /// A fresh full-length exam countdown.
    #[must_use]
    pub fn exam() -> Self {
        Self::new(EXAM_DURATION_SECS)
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one second, floored at zero. Returns the new remaining value.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// A running countdown task.
///
/// The task decrements once per second and publishes the remaining value on a
/// watch channel. It stops by itself at zero; dropping the handle (or calling
/// [`CountdownHandle::cancel`]) aborts it at any point.
#[derive(Debug)]
pub struct CountdownHandle {
    remaining: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Start ticking `countdown` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(countdown: Countdown) -> Self {
        let (tx, rx) = watch::channel(countdown.remaining());
        let task = tokio::spawn(run(countdown, tx));
        Self {
            remaining: rx,
            task,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    /// A receiver that wakes on every tick. Its sender closes when the task ends.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// Stop ticking and return the last published value.
    pub fn cancel(self) -> u32 {
        self.remaining()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(mut countdown: Countdown, tx: watch::Sender<u32>) {
    if countdown.is_elapsed() {
        return;
    }
    let mut ticks = interval_at(Instant::now() + TICK, TICK);
    loop {
        ticks.tick().await;
        let remaining = countdown.tick();
        if tx.send(remaining).is_err() || remaining == 0 {
            break;
        }
    }
}
