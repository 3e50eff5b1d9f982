//! Request pacing for the crawl
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - A minimum delay between the starts of two requests
//!
//! With one permit and a one second delay the crawl behaves exactly like a
//! sequential loop that sleeps between pages.

use crate::config::CrawlerConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Scheduler hands out fetch slots
///
/// The scheduler coordinates:
/// - Global concurrency limits (max concurrent fetches)
/// - Global request spacing (minimum delay between request starts)
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    semaphore: Arc<Semaphore>,

    /// Earliest instant the next request may start
    next_slot: Arc<Mutex<Option<Instant>>>,

    /// Minimum spacing between request starts
    delay: Duration,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Number of pages that may be in flight at once
    /// * `delay` - Minimum time between two request starts
    pub fn new(max_concurrent: usize, delay: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            next_slot: Arc::new(Mutex::new(None)),
            delay,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            config.max_concurrent_fetches as usize,
            config.request_delay(),
        )
    }

    /// Waits for a free concurrency slot
    ///
    /// The permit is released when dropped, normally when the page task ends.
    pub async fn acquire_slot(&self) -> Option<OwnedSemaphorePermit> {
        self.semaphore.clone().acquire_owned().await.ok()
    }

    /// Waits until a request may start
    ///
    /// Calls are serialized, so request starts are at least `delay` apart no
    /// matter how many tasks are waiting.
    pub async fn wait_turn(&self) {
        let mut next_slot = self.next_slot.lock().await;

        if let Some(at) = *next_slot {
            if at > Instant::now() {
                tracing::trace!("Throttling for {:?}", at - Instant::now());
                tokio::time::sleep_until(at).await;
            }
        }

        *next_slot = Some(Instant::now() + self.delay);
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
