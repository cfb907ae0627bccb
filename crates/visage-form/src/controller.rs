//! Async wrapper that drives the saved-banner timer for a machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::machine::{FieldMachine, FieldState, TransitionError};
use crate::SAVED_BANNER_MS;

/// Shared handle to a [`FieldMachine`] that schedules the `Saved`
/// banner auto-revert on the tokio timer.
///
/// The timer task captures the machine generation at scheduling time;
/// if the machine transitions away before the timer fires (re-edit,
/// cancel), the callback is a no-op rather than a leaked revert.
#[derive(Debug, Clone)]
pub struct FieldController<T: Clone + Send + 'static> {
    machine: Arc<Mutex<FieldMachine<T>>>,
    banner: Duration,
}

impl<T: Clone + Send + 'static> FieldController<T> {
    pub fn new(persisted: T) -> Self {
        Self {
            machine: Arc::new(Mutex::new(FieldMachine::new(persisted))),
            banner: Duration::from_millis(SAVED_BANNER_MS),
        }
    }

    /// Override the banner delay (tests, non-default variants).
    pub fn with_banner_duration(mut self, banner: Duration) -> Self {
        self.banner = banner;
        self
    }

    /// Lock the underlying machine for inspection.
    pub async fn machine(&self) -> MutexGuard<'_, FieldMachine<T>> {
        self.machine.lock().await
    }

    pub async fn state(&self) -> FieldState {
        self.machine.lock().await.state()
    }

    pub async fn persisted(&self) -> T {
        self.machine.lock().await.persisted().clone()
    }

    pub async fn begin_edit(&self) -> Result<(), TransitionError> {
        self.machine.lock().await.begin_edit()
    }

    pub async fn set_draft(&self, value: T) -> Result<(), TransitionError> {
        self.machine.lock().await.set_draft(value)
    }

    pub async fn cancel(&self) -> Result<(), TransitionError> {
        self.machine.lock().await.cancel()
    }

    pub async fn submit(&self) -> Result<T, TransitionError> {
        self.machine.lock().await.submit()
    }

    /// Complete the in-flight save and, on success, schedule the
    /// banner revert.
    pub async fn resolve(&self, result: Result<T, String>) -> Result<(), TransitionError> {
        let mut machine = self.machine.lock().await;
        machine.resolve(result)?;

        if machine.state() == FieldState::Saved {
            let generation = machine.generation();
            let shared = Arc::clone(&self.machine);
            let banner = self.banner;
            tokio::spawn(async move {
                tokio::time::sleep(banner).await;
                if shared.lock().await.banner_elapsed(generation) {
                    tracing::debug!("saved banner reverted to idle");
                }
            });
        }
        Ok(())
    }
}
