//! Cancellable, keyed scheduling for "run after the user stops typing".
//!
//! Every call to [`Debouncer::schedule`] mints a new [`DebounceKey`] and aborts
//! the previously pending task. A task only runs if its key is still the latest
//! when the delay elapses, and it can re-check [`DebounceKey::is_current`]
//! after each await so a superseded result is never applied.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Identity of one scheduled request.
#[derive(Debug, Clone)]
pub struct DebounceKey {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl DebounceKey {
    /// False once a newer request has been scheduled or the debouncer cancelled.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Runs `task` after the delay unless another task is scheduled first.
    pub fn schedule<F, Fut>(&self, task: F) -> DebounceKey
    where
        F: FnOnce(DebounceKey) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let key = self.next_key();
        let task_key = key.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if task_key.is_current() {
                task(task_key).await;
            }
        });

        self.replace_pending(Some(handle));
        key
    }

    /// Drops any pending task and invalidates keys already handed out.
    pub fn cancel(&self) {
        self.next_key();
        self.replace_pending(None);
    }

    /// Waits for the currently pending task, if any, to run to completion.
    pub async fn flush(&self) {
        let handle = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        if let Some(handle) = handle {
            // An aborted task is not an error here; it was superseded.
            let _ = handle.await;
        }
    }

    fn next_key(&self) -> DebounceKey {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceKey {
            id,
            latest: self.latest.clone(),
        }
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) {
        let previous = {
            let mut pending = self
                .pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *pending, handle)
        };

        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn schedule_push(debouncer: &Debouncer, log: &Arc<Mutex<Vec<String>>>, value: &str) {
        let log = log.clone();
        let value = value.to_string();
        debouncer.schedule(move |_| async move {
            log.lock().unwrap().push(value);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_request_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let log = recorder();

        schedule_push(&debouncer, &log, "a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        schedule_push(&debouncer, &log, "ab");
        tokio::time::sleep(Duration::from_millis(100)).await;
        schedule_push(&debouncer, &log, "abc");

        debouncer.flush().await;

        assert_eq!(*log.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_spaced_beyond_delay_all_run() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let log = recorder();

        schedule_push(&debouncer, &log, "first");
        debouncer.flush().await;
        schedule_push(&debouncer, &log, "second");
        debouncer.flush().await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run_and_invalidates_key() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let log = recorder();

        let log_clone = log.clone();
        let key = debouncer.schedule(move |_| async move {
            log_clone.lock().unwrap().push("never".to_string());
        });
        assert!(key.is_current());

        debouncer.cancel();
        assert!(!key.is_current());

        tokio::time::sleep(Duration::from_secs(2)).await;
        debouncer.flush().await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_does_not_run_before_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let log = recorder();

        schedule_push(&debouncer, &log, "late");
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(log.lock().unwrap().is_empty());

        debouncer.flush().await;
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
