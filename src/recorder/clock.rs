//! Fixed-rate frame clock
//!
//! Drives the control loop on a dedicated OS thread so ticks keep firing
//! while the application window is minimized or occluded; nothing here
//! depends on a render surface or an async runtime being polled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub struct FrameClock {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FrameClock {
    /// Spawn the clock thread, invoking `tick` once per period.
    ///
    /// Each tick is independent: if a tick runs long the schedule restarts
    /// from "now" instead of firing catch-up ticks.
    pub fn start<F>(period: Duration, mut tick: F) -> std::io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = std::thread::Builder::new()
            .name("frame-clock".to_string())
            .spawn(move || {
                let mut next = Instant::now() + period;
                while flag.load(Ordering::SeqCst) {
                    tick();
                    let now = Instant::now();
                    if next > now {
                        std::thread::sleep(next - now);
                        next += period;
                    } else {
                        // Running behind; no catch-up, just reschedule
                        next = Instant::now() + period;
                    }
                }
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Request the thread to exit from inside a tick callback.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Stop the clock. No tick fires after this returns.
    pub fn stop(mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_clock_fires_repeatedly() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let clock = FrameClock::start(Duration::from_millis(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        std::thread::sleep(Duration::from_millis(100));
        clock.stop();

        // Generous lower bound; exact timing depends on the scheduler
        assert!(count.load(Ordering::SeqCst) >= 5);
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let clock = FrameClock::start(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        std::thread::sleep(Duration::from_millis(20));
        clock.stop();
        let after_stop = count.load(Ordering::SeqCst);

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_tick_can_halt_clock() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        let flag: Arc<parking_lot::Mutex<Option<Arc<AtomicBool>>>> =
            Arc::new(parking_lot::Mutex::new(None));
        let flag_in_tick = flag.clone();

        let clock = FrameClock::start(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(running) = flag_in_tick.lock().as_ref() {
                running.store(false, Ordering::SeqCst);
            }
        })
        .unwrap();
        *flag.lock() = Some(clock.running_flag());

        std::thread::sleep(Duration::from_millis(30));
        let halted = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), halted);
        clock.stop();
    }
}
