//! Debounce Scheduler
//!
//! Trailing-edge debounce for keystroke-driven suggestion runs. Every
//! submission records a new generation and starts a timer; when the timer
//! fires, the action runs only if no later submission superseded it. At most
//! one pending invocation exists at any time, and a fresh keystroke cancels
//! the pending one outright before any part of it executes.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Trailing-edge debounce policy. Pure scheduling: the debounced work is a
/// caller-supplied async closure receiving the submitted text.
pub struct DebounceScheduler {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceScheduler {
    /// Scheduler with the default 150 ms window.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Scheduler with an explicit window.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Scheduler with the window from configuration.
    pub fn from_config(config: &crate::config::SuggestConfig) -> Self {
        Self::with_delay(Duration::from_millis(config.debounce_ms))
    }

    /// Submit a keystroke. The action runs after the debounce window unless
    /// a later submission arrives first, in which case this one is dropped
    /// without executing at all.
    pub fn submit<F, Fut>(&self, text: String, action: F) -> JoinHandle<()>
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) == my_generation {
                action(text).await;
            } else {
                log::debug!("Debounced run superseded before firing");
            }
        })
    }

    /// Cancel any pending invocation without submitting new work.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn test_three_keystrokes_one_invocation() {
        let scheduler = DebounceScheduler::new();
        let fired: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for text in ["w", "wy", "wyclef"] {
            let fired = Arc::clone(&fired);
            handles.push(scheduler.submit(text.to_string(), move |text| async move {
                fired.lock().unwrap().push(text);
            }));
            // Keystrokes 50 ms apart, inside the 150 ms window
            tokio::time::advance(Duration::from_millis(50)).await;
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*fired.lock().unwrap(), vec!["wyclef".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_keystrokes_each_fire() {
        let scheduler = DebounceScheduler::new();
        let fired: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        for text in ["first", "second"] {
            let fired = Arc::clone(&fired);
            let handle = scheduler.submit(text.to_string(), move |text| async move {
                fired.lock().unwrap().push(text);
            });
            // Next keystroke arrives well outside the window
            handle.await.unwrap();
        }

        assert_eq!(
            *fired.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_run() {
        let scheduler = DebounceScheduler::new();
        let fired: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let fired_clone = Arc::clone(&fired);
        let handle = scheduler.submit("doomed".to_string(), move |text| async move {
            fired_clone.lock().unwrap().push(text);
        });
        scheduler.cancel();

        handle.await.unwrap();
        assert!(fired.lock().unwrap().is_empty());
    }
}
