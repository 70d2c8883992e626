//! Bulk operation fan-out
//!
//! Runs one independent remote call per item concurrently and reports the
//! union of failures. Partial success is expected: every item is attempted
//! no matter how early the first failure lands.

use std::fmt;
use std::future::Future;

use futures_util::future;
use tracing::warn;

/// The combined failure of a bulk operation.
///
/// `total` is the number of items attempted; `causes` holds one rendered
/// error per failed item, in item order.
#[derive(Debug)]
pub struct AggregateError {
    pub total: usize,
    pub causes: Vec<String>,
}

impl std::error::Error for AggregateError {}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} of {} operations failed:",
            self.causes.len(),
            self.total
        )?;
        for cause in &self.causes {
            writeln!(f, "  {cause}")?;
        }
        Ok(())
    }
}

/// Runs `op` once per item, all items concurrently, and collects every
/// failure.
///
/// There is no concurrency cap beyond the item count: N items means N
/// in-flight calls. Dropping the returned future cancels whatever has not
/// completed, but an individual remote call is not aborted mid-request.
pub async fn run_all<T, F, Fut, E>(items: Vec<T>, op: F) -> Result<(), AggregateError>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    let total = items.len();
    let results = future::join_all(items.into_iter().map(op)).await;

    let causes: Vec<String> = results
        .into_iter()
        .filter_map(|r| r.err())
        .map(|e| e.to_string())
        .collect();

    if causes.is_empty() {
        Ok(())
    } else {
        warn!(failed = causes.len(), total, "bulk operation partially failed");
        Err(AggregateError { total, causes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_all_succeed() {
        let got = run_all(vec![1, 2, 3], |_| async { Ok::<(), String>(()) }).await;
        assert!(got.is_ok());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let got = run_all(Vec::<u32>::new(), |_| async { Ok::<(), String>(()) }).await;
        assert!(got.is_ok());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_other_items() {
        let attempted = Mutex::new(Vec::new());
        let err = run_all(vec![1, 2, 3, 4, 5], |n| {
            let attempted = &attempted;
            async move {
                attempted.lock().unwrap().push(n);
                if n == 3 {
                    Err(format!("item {n} exploded"))
                } else {
                    Ok(())
                }
            }
        })
        .await
        .unwrap_err();

        let mut seen = attempted.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(err.total, 5);
        assert_eq!(err.causes, vec!["item 3 exploded"]);
    }

    #[tokio::test]
    async fn test_every_failure_is_reported() {
        let err = run_all(vec![1, 2, 3], |n| async move {
            Err::<(), String>(format!("boom {n}"))
        })
        .await
        .unwrap_err();

        assert_eq!(err.causes.len(), 3);
        let rendered = err.to_string();
        assert!(rendered.starts_with("3 of 3 operations failed:"));
        assert!(rendered.contains("boom 2"));
    }
}
