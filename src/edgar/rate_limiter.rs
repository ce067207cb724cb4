use std::sync::Arc;
use tokio::sync::Semaphore;

/// Bounds concurrent outbound requests to stay inside SEC's fair-access
/// policy. Permits are released when the guard drops.
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    pub fn new(max_concurrent: usize) -> Self {
        RateLimiter {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    pub async fn acquire(&self) -> tokio::sync::SemaphorePermit<'_> {
        self.semaphore.acquire().await.expect("Semaphore closed")
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(10) // SEC allows 10 requests per second
    }
}
