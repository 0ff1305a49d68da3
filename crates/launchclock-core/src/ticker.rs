//! Scheduled refresh task.
//!
//! [`CountdownTicker`] owns one [`CountdownDriver`] inside a tokio task and
//! ticks it at a fixed period, sending every resulting [`Event`] down an
//! unbounded channel. The first frame is computed and sent synchronously in
//! [`CountdownTicker::start`], before the recurring task is scheduled.
//!
//! Cancellation goes through a single [`CancellationToken`]. The task cancels
//! the token itself when the target is reached, so an explicit `cancel()`
//! afterwards (or on drop) is a no-op.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::countdown::{CountdownDriver, Target};
use crate::events::Event;

/// Source of "now" for the refresh task.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock. Counts every read so callers can tell whether a
/// computation happened.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    reads: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(at)),
            reads: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    /// Number of times `now()` has been called.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Channel end shared by the ticker and its task.
///
/// Every send happens under the lock after checking the token, so once
/// `CountdownCancelled` is sent no tick frame can follow it, whichever
/// runtime flavor drives the task.
type Frames = Arc<Mutex<UnboundedSender<Event>>>;

/// A running countdown refresh task.
///
/// Must be started from within a tokio runtime. Dropping the ticker cancels
/// the task.
pub struct CountdownTicker {
    target: Target,
    clock: Arc<dyn Clock>,
    period: Duration,
    frames: Frames,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Compute the first frame, send it, then schedule the recurring tick.
    ///
    /// A target that is already reached sends a single terminal
    /// `CountdownStarted` and schedules nothing.
    pub fn start(
        target: Target,
        clock: Arc<dyn Clock>,
        period: Duration,
        frames: UnboundedSender<Event>,
    ) -> Self {
        let mut ticker = Self {
            target,
            clock,
            period,
            frames: Arc::new(Mutex::new(frames)),
            token: CancellationToken::new(),
            handle: None,
        };
        ticker.spawn();
        ticker
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// True once the task has been cancelled or has stopped on reaching the
    /// target.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop the recurring tick and abort the task. Safe to call any number
    /// of times.
    ///
    /// Returns `true` only for the call that actually stopped a running
    /// countdown; that call also emits `CountdownCancelled`, which is always
    /// the last frame of this run.
    pub fn cancel(&self) -> bool {
        let frames = self.frames.lock().unwrap_or_else(|e| e.into_inner());
        if self.token.is_cancelled() {
            return false;
        }
        self.token.cancel();
        if let Some(handle) = &self.handle {
            handle.abort();
        }
        info!(deadline = %self.target, "countdown ticker cancelled");
        let _ = frames.send(Event::CountdownCancelled {
            target: self.target,
            at: self.clock.now(),
        });
        true
    }

    /// Tear down the current task and start over against `target`.
    pub fn retarget(&mut self, target: Target) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        info!(from = %self.target, to = %target, "countdown ticker retargeted");
        self.target = target;
        self.token = CancellationToken::new();
        self.spawn();
    }

    /// Wait for the task to finish (reached or cancelled).
    pub async fn finished(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    fn spawn(&mut self) {
        let now = self.clock.now();
        let mut driver = CountdownDriver::new(self.target, now);
        {
            let frames = self.frames.lock().unwrap_or_else(|e| e.into_inner());
            let _ = frames.send(driver.started_event(now));
        }

        if driver.is_reached() {
            self.token.cancel();
            return;
        }

        let clock = Arc::clone(&self.clock);
        let frames = Arc::clone(&self.frames);
        let token = self.token.clone();
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if !deliver(&mut driver, clock.as_ref(), &frames, &token) {
                            break;
                        }
                    }
                }
            }
        }));
    }
}

/// Run one tick and send its frame. Returns `false` once the task should stop.
fn deliver(
    driver: &mut CountdownDriver,
    clock: &dyn Clock,
    frames: &Frames,
    token: &CancellationToken,
) -> bool {
    let Some(event) = driver.tick(clock.now()) else {
        return false;
    };
    let frames = frames.lock().unwrap_or_else(|e| e.into_inner());
    if token.is_cancelled() {
        return false;
    }
    if driver.is_reached() {
        token.cancel();
    }
    if frames.send(event).is_err() {
        debug!("frame receiver dropped, stopping ticker");
        token.cancel();
        return false;
    }
    !driver.is_reached()
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tokio::sync::mpsc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 20, 12, 0, 0).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn first_frame_is_sent_before_any_tick() {
        let clock = ManualClock::new(t0());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let target = Target::new(t0() + chrono::Duration::hours(26));
        let _ticker = CountdownTicker::start(
            target,
            Arc::new(clock.clone()),
            Duration::from_secs(1),
            tx,
        );

        match rx.try_recv().unwrap() {
            Event::CountdownStarted { remaining, .. } => {
                let remaining = remaining.unwrap();
                assert_eq!(remaining.days, 1);
                assert_eq!(remaining.hours, 2);
            }
            other => panic!("Expected CountdownStarted, got {other:?}"),
        }
        assert_eq!(clock.reads(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn already_reached_schedules_nothing() {
        let clock = ManualClock::new(t0());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let target = Target::new(t0() - chrono::Duration::milliseconds(1));
        let ticker = CountdownTicker::start(
            target,
            Arc::new(clock.clone()),
            Duration::from_secs(1),
            tx,
        );

        assert!(rx.try_recv().unwrap().is_terminal());
        assert!(ticker.is_stopped());
        assert!(!ticker.cancel());

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(clock.reads(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn no_tick_follows_cancelled_on_multi_thread_runtime() {
        for _ in 0..20 {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let target = Target::new(Utc::now() + chrono::Duration::days(1));
            let mut ticker = CountdownTicker::start(
                target,
                Arc::new(SystemClock),
                Duration::from_millis(1),
                tx,
            );
            tokio::time::sleep(Duration::from_millis(5)).await;

            assert!(ticker.cancel());
            ticker.finished().await;
            drop(ticker);

            let mut frames = Vec::new();
            while let Some(event) = rx.recv().await {
                frames.push(event);
            }
            assert!(matches!(frames.last(), Some(Event::CountdownCancelled { .. })));
            let cancelled = frames
                .iter()
                .filter(|e| matches!(e, Event::CountdownCancelled { .. }))
                .count();
            assert_eq!(cancelled, 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let clock = ManualClock::new(t0());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let target = Target::new(t0() + chrono::Duration::seconds(30));
        let ticker = CountdownTicker::start(
            target,
            Arc::new(clock),
            CountdownTicker::DEFAULT_PERIOD,
            tx,
        );
        let _ = rx.try_recv();

        assert!(ticker.cancel());
        assert!(!ticker.cancel());
        assert!(!ticker.cancel());
        assert!(matches!(rx.try_recv(), Ok(Event::CountdownCancelled { .. })));
        assert!(rx.try_recv().is_err());
    }
}
