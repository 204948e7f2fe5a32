//! Bounded concurrent task runner
//!
//! Executes a batch of independent course-fetch tasks under a shared
//! concurrency gate. Results come back in submission order regardless of
//! completion order, a progress bar advances on every completion, and a
//! panicking task is recorded as a failed outcome instead of taking its
//! siblings down.

use crate::scrape::course::FetchOutcome;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs all tasks under the shared concurrency gate
///
/// The gate is acquired before a task's work begins and released when it
/// completes, on every exit path; the permit is a scoped guard, so even a
/// panic releases it. The same gate instance is shared across every level
/// batch in a run, which is what actually enforces the global ceiling.
///
/// # Arguments
///
/// * `tasks` - Independent futures, one per course
/// * `gate` - The run-wide concurrency gate
/// * `label` - Progress bar label, e.g. the level's display name
///
/// # Returns
///
/// One [`FetchOutcome`] per task, index-aligned with `tasks`.
pub async fn run_all<F>(tasks: Vec<F>, gate: Arc<Semaphore>, label: &str) -> Vec<FetchOutcome>
where
    F: Future<Output = FetchOutcome> + Send + 'static,
{
    let bar = progress_bar(tasks.len() as u64, label);

    let handles: Vec<_> = tasks
        .into_iter()
        .map(|task| {
            let gate = Arc::clone(&gate);
            let bar = bar.clone();
            tokio::spawn(async move {
                let outcome = match gate.acquire_owned().await {
                    Ok(_permit) => task.await,
                    // Only happens if the semaphore is closed, which we never do
                    Err(e) => FetchOutcome::Failed(format!("concurrency gate closed: {}", e)),
                };
                bar.inc(1);
                outcome
            })
        })
        .collect();

    // join_all preserves submission order, whatever order tasks finish in
    let joined = join_all(handles).await;
    bar.finish_and_clear();

    joined
        .into_iter()
        .map(|result| match result {
            Ok(outcome) => outcome,
            Err(e) => FetchOutcome::Failed(format!("task panicked: {}", e)),
        })
        .collect()
}

fn progress_bar(total: u64, label: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{msg} {bar:40.cyan/blue} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(label.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_batch() {
        let gate = Arc::new(Semaphore::new(4));
        let tasks: Vec<std::pin::Pin<Box<dyn Future<Output = FetchOutcome> + Send>>> = vec![];
        let outcomes = run_all(tasks, gate, "empty").await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_outcomes_preserve_submission_order() {
        let gate = Arc::new(Semaphore::new(8));

        // Later tasks sleep less, so they finish first
        let tasks: Vec<_> = (0..8u64)
            .map(|i| async move {
                tokio::time::sleep(Duration::from_millis(80 - i * 10)).await;
                FetchOutcome::Failed(format!("task-{}", i))
            })
            .collect();

        let outcomes = run_all(tasks, gate, "order").await;
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(*outcome, FetchOutcome::Failed(format!("task-{}", i)));
        }
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_gate_capacity() {
        let limit = 3;
        let gate = Arc::new(Semaphore::new(limit));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    FetchOutcome::NoData
                }
            })
            .collect();

        let outcomes = run_all(tasks, gate, "ceiling").await;
        assert_eq!(outcomes.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= limit);
    }

    #[tokio::test]
    async fn test_panicking_task_does_not_abort_siblings() {
        let gate = Arc::new(Semaphore::new(2));

        let tasks: Vec<std::pin::Pin<Box<dyn Future<Output = FetchOutcome> + Send>>> = vec![
            Box::pin(async { FetchOutcome::NoData }),
            Box::pin(async { panic!("boom") }),
            Box::pin(async { FetchOutcome::Failed("plain failure".to_string()) }),
        ];

        let outcomes = run_all(tasks, gate, "panic").await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], FetchOutcome::NoData);
        assert!(matches!(&outcomes[1], FetchOutcome::Failed(msg) if msg.contains("panicked")));
        assert_eq!(outcomes[2], FetchOutcome::Failed("plain failure".to_string()));
    }

    #[tokio::test]
    async fn test_gate_is_reusable_across_batches() {
        let gate = Arc::new(Semaphore::new(2));

        for _ in 0..3 {
            let tasks: Vec<_> = (0..4).map(|_| async { FetchOutcome::NoData }).collect();
            let outcomes = run_all(tasks, Arc::clone(&gate), "reuse").await;
            assert_eq!(outcomes.len(), 4);
        }

        // All permits returned
        assert_eq!(gate.available_permits(), 2);
    }
}
