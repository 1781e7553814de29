//! Database metrics collection.
//!
//! Provides functions for recording database-related metrics.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record database query duration.
///
/// Call this function after executing a query to record its duration.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Record a failed database query.
pub fn record_query_error(query_name: &str) {
    counter!(
        "database_query_errors_total",
        "query" => query_name.to_string()
    )
    .increment(1);
}

/// A helper to time database operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("find_client");
/// let result = sqlx::query_scalar::<_, i32>(...).fetch_all(&mut conn).await;
/// timer.finish(&result);
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    /// Create a new timer for the given query name.
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(self.query_name, duration);
    }

    /// Record the elapsed duration, and an error count when the query failed.
    pub fn finish<T, E>(self, result: &Result<T, E>) {
        if result.is_err() {
            record_query_error(self.query_name);
        }
        self.record();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_creation() {
        let timer = QueryTimer::new("find_client");
        assert_eq!(timer.query_name, "find_client");
    }

    #[test]
    fn test_query_timer_finish_without_recorder() {
        // No recorder installed: recording is a no-op and must not panic
        let ok: Result<(), ()> = Ok(());
        QueryTimer::new("add_phone").finish(&ok);
        let err: Result<(), ()> = Err(());
        QueryTimer::new("add_phone").finish(&err);
    }
}
