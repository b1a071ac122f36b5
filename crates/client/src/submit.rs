//! One in-flight submission per form.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a form has a request in flight.
///
/// Clones share state, so a permit can move into a spawned task while the
/// form keeps asking [`is_busy`](Self::is_busy).
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of one submission; dropping it frees the form.
#[derive(Debug)]
#[must_use = "the form is released as soon as the permit is dropped"]
pub struct SubmitPermit {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another submission holds the permit.
    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit { busy: Arc::clone(&self.busy) })
    }

    /// Drives the disabled state of the submit control.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_permit_is_refused_while_one_is_held() {
        let guard = SubmitGuard::new();
        let permit = guard.try_acquire().unwrap();
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());
        assert!(guard.clone().try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[tokio::test]
    async fn permit_released_when_task_finishes() {
        let guard = SubmitGuard::new();
        let permit = guard.try_acquire().unwrap();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            tokio::task::yield_now().await;
        });
        handle.await.unwrap();
        assert!(!guard.is_busy());
    }
}
