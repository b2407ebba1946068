use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use linkquote_core::config::SearchConfig;
use tracing::debug;

/// Trailing-edge debounce for the location search box. Every keystroke
/// supersedes the pending one; only the query still current after the
/// quiet period is released to the caller.
#[derive(Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    min_query_len: usize,
    generation: Arc<AtomicU64>,
}

impl SearchDebouncer {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.debounce_ms),
            min_query_len: config.min_query_len,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Waits out the quiet period and returns the query if no newer call
    /// arrived meanwhile. Queries below the minimum length never fire, but
    /// still cancel whatever was pending.
    pub async fn debounce(&self, query: &str) -> Option<String> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            debug!(query, "query below minimum length, not searching");
            return None;
        }

        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(query.to_string())
        } else {
            debug!(query, "query superseded during debounce window");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> SearchDebouncer {
        SearchDebouncer::new(&linkquote_core::AppConfig::default().search)
    }

    #[tokio::test(start_paused = true)]
    async fn query_fires_after_quiet_period() {
        let debouncer = debouncer();
        assert_eq!(debouncer.debounce("PAR").await, Some("PAR".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn single_character_never_fires() {
        let debouncer = debouncer();
        assert_eq!(debouncer.debounce("P").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_query_supersedes_pending_one() {
        let debouncer = debouncer();
        let first = debouncer.clone();
        let pending = tokio::spawn(async move { first.debounce("PA").await });
        tokio::task::yield_now().await;

        assert_eq!(debouncer.debounce("PAR").await, Some("PAR".to_string()));
        assert_eq!(pending.await.expect("task"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_cancels_pending_one() {
        let debouncer = debouncer();
        let first = debouncer.clone();
        let pending = tokio::spawn(async move { first.debounce("PAR").await });
        tokio::task::yield_now().await;

        assert_eq!(debouncer.debounce("P").await, None);
        assert_eq!(pending.await.expect("task"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn leading_whitespace_does_not_count() {
        let debouncer = debouncer();
        assert_eq!(debouncer.debounce("  P ").await, None);
    }
}
