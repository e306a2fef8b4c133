//! Interview countdown: a one-second tick that stops at zero.
//! It runs independently of evaluation calls and never blocks them.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
pub struct Countdown {
    total_secs: u32,
    remaining: Arc<AtomicU32>,
    ticker: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining: Arc::new(AtomicU32::new(total_secs)),
            ticker: None,
        }
    }

    /// Restarts from the full duration. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.stop_and_reset();

        let remaining = Arc::clone(&self.remaining);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.tick().await; // first tick completes immediately
            loop {
                interval.tick().await;
                let left = remaining
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| s.checked_sub(1))
                    .map(|prev| prev - 1)
                    .unwrap_or(0);
                if left == 0 {
                    debug!("Interview countdown reached zero");
                    break;
                }
            }
        }));
    }

    /// Stops ticking and restores the full duration.
    pub fn stop_and_reset(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.remaining.store(self.total_secs, Ordering::SeqCst);
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// `M:SS`, e.g. `45:00` or `4:05`.
    pub fn display(&self) -> String {
        let secs = self.remaining_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_countdown_is_full_and_idle() {
        let countdown = Countdown::new(45 * 60);
        assert_eq!(countdown.remaining_secs(), 2700);
        assert_eq!(countdown.display(), "45:00");
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_display_pads_seconds() {
        let countdown = Countdown::new(245);
        assert_eq!(countdown.display(), "4:05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let mut countdown = Countdown::new(10);
        countdown.start();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(countdown.remaining_secs(), 7);
        assert!(countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_zero() {
        let mut countdown = Countdown::new(2);
        countdown.start();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(countdown.remaining_secs(), 0);
        assert!(!countdown.is_running());
        assert_eq!(countdown.display(), "0:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_full_duration() {
        let mut countdown = Countdown::new(60);
        countdown.start();
        tokio::time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(countdown.remaining_secs(), 55);

        countdown.stop_and_reset();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(countdown.remaining_secs(), 60);
        assert!(!countdown.is_running());
    }
}
