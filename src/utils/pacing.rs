//! Delay between consecutive page requests.
//!
//! The Starter API enforces per-key rate limits, so pages are fetched one at a
//! time with a pause in between. The pause goes through [`Pacer`] so tests can
//! run the paging loop without sleeping.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Waits between page requests
#[async_trait]
pub trait Pacer: Send + Sync + std::fmt::Debug {
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self, _delay: Duration) {}
}

/// Records requested pauses without sleeping
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pauses requested so far, in order
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_pacer() {
        let pacer = RecordingPacer::new();
        pacer.pause(Duration::from_secs(10)).await;
        pacer.pause(Duration::from_secs(5)).await;
        assert_eq!(
            pacer.pauses(),
            vec![Duration::from_secs(10), Duration::from_secs(5)]
        );
    }

    #[tokio::test]
    async fn test_tokio_pacer_zero_delay() {
        TokioPacer.pause(Duration::ZERO).await;
    }
}
