use std::{future::Future, time::Duration};

use tokio::{
    sync::{Mutex, MutexGuard},
    time::{sleep_until, Instant},
};
use tracing::trace;

/// Enforces a minimum interval between the end of one upstream call and the
/// start of the next. Calls through the same gate are serialized.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_finished: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_finished: Mutex::new(None),
        }
    }

    pub async fn run<F, T>(&self, call: F) -> T
    where
        F: Future<Output = T>,
    {
        let last_finished = self.last_finished.lock().await;
        if let Some(finished) = *last_finished {
            let ready_at = finished + self.min_interval;
            if ready_at > Instant::now() {
                trace!(wait_ms = ?(ready_at - Instant::now()).as_millis(), "waiting on rate gate");
                sleep_until(ready_at).await;
            }
        }
        let _stamp = FinishStamp(last_finished);
        call.await
    }
}

/// Records when a call ended, including calls whose future was dropped
/// part way through.
struct FinishStamp<'a>(MutexGuard<'a, Option<Instant>>);

impl Drop for FinishStamp<'_> {
    fn drop(&mut self) {
        *self.0 = Some(Instant::now());
    }
}
