use crate::batch::purge::{PurgeReport, purge_completed_todos};
use crate::port::TodoRepository;
use std::future::Future;
use std::sync::Arc;
use time::{Duration, OffsetDateTime, Time, UtcOffset};

/// Runs the completed-todo purge once a day at a fixed UTC time.
pub struct PurgeScheduler {
    repository: Arc<dyn TodoRepository>,
    run_at: Time,
}

impl PurgeScheduler {
    pub fn new(repository: Arc<dyn TodoRepository>, run_at: Time) -> Self {
        Self {
            repository,
            run_at,
        }
    }

    /// Loops until `shutdown` resolves. Job failures are logged and the loop
    /// waits for the next day.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut next = next_run_after(OffsetDateTime::now_utc(), self.run_at);
        loop {
            let wait = std::time::Duration::try_from(next - OffsetDateTime::now_utc())
                .unwrap_or_default();
            tracing::info!(next_run = %next, "scheduled purge of completed todos");

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("purge scheduler stopped");
                    return;
                }
                _ = tokio::time::sleep(wait) => {
                    self.trigger().await;
                    next = run_after_fired(next, OffsetDateTime::now_utc(), self.run_at);
                }
            }
        }
    }

    /// Runs the purge once, swallowing and logging any failure.
    pub async fn trigger(&self) -> Option<PurgeReport> {
        tracing::info!("triggering scheduled purge of completed todos");
        match purge_completed_todos(self.repository.as_ref()).await {
            Ok(report) => {
                tracing::info!(deleted = report.deleted, "completed scheduled purge");
                Some(report)
            }
            Err(err) => {
                tracing::error!(error = %err, "scheduled purge of completed todos failed");
                None
            }
        }
    }
}

/// First instant strictly after `now` whose UTC time of day is `at`.
pub fn next_run_after(now: OffsetDateTime, at: Time) -> OffsetDateTime {
    let now = now.to_offset(UtcOffset::UTC);
    let candidate = now.replace_time(at);
    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Next slot after one that just fired. Counted from the fired slot so a
/// wall clock still short of it cannot schedule the same slot twice.
fn run_after_fired(fired: OffsetDateTime, now: OffsetDateTime, at: Time) -> OffsetDateTime {
    next_run_after(now.max(fired), at)
}

#[cfg(test)]
mod tests {
    use super::{PurgeScheduler, next_run_after, run_after_fired};
    use crate::error::AppError;
    use crate::model::Todo;
    use crate::port::MockTodoRepository;
    use std::sync::Arc;
    use time::macros::{datetime, time};

    #[test]
    fn next_run_is_later_today_when_time_not_reached() {
        let now = datetime!(2025-01-15 01:30 UTC);

        assert_eq!(next_run_after(now, time!(02:00)), datetime!(2025-01-15 02:00 UTC));
    }

    #[test]
    fn next_run_rolls_to_tomorrow_once_time_passed() {
        let now = datetime!(2025-01-15 02:00 UTC);

        assert_eq!(next_run_after(now, time!(02:00)), datetime!(2025-01-16 02:00 UTC));
        assert_eq!(
            next_run_after(datetime!(2025-12-31 23:59 UTC), time!(02:00)),
            datetime!(2026-01-01 02:00 UTC)
        );
    }

    #[test]
    fn next_run_normalizes_offsets_to_utc() {
        // 01:30 UTC: still before today's slot.
        let before = datetime!(2025-01-15 03:30 +2);
        assert_eq!(next_run_after(before, time!(02:00)), datetime!(2025-01-15 02:00 UTC));

        // 02:30 UTC: today's slot already passed.
        let after = datetime!(2025-01-15 04:30 +2);
        assert_eq!(next_run_after(after, time!(02:00)), datetime!(2025-01-16 02:00 UTC));
    }

    #[test]
    fn run_after_fired_skips_the_slot_when_clock_lags() {
        let fired = datetime!(2025-01-15 02:00 UTC);
        let lagging_now = datetime!(2025-01-15 01:59:59.999 UTC);

        assert_eq!(
            run_after_fired(fired, lagging_now, time!(02:00)),
            datetime!(2025-01-16 02:00 UTC)
        );
    }

    #[test]
    fn run_after_fired_does_not_replay_missed_days() {
        let fired = datetime!(2025-01-15 02:00 UTC);
        let resumed_now = datetime!(2025-01-18 10:00 UTC);

        assert_eq!(
            run_after_fired(fired, resumed_now, time!(02:00)),
            datetime!(2025-01-19 02:00 UTC)
        );
    }

    #[tokio::test]
    async fn trigger_swallows_failures() {
        let mut repo = MockTodoRepository::new();
        repo.expect_find_completed_todos()
            .returning(|| Err(AppError::storage("database is locked")));
        let scheduler = PurgeScheduler::new(Arc::new(repo), time!(02:00));

        assert_eq!(scheduler.trigger().await, None);
    }

    #[tokio::test]
    async fn trigger_reports_deleted_count() {
        let mut done = Todo::new("done", None);
        done.mark_as_completed();
        let mut repo = MockTodoRepository::new();
        repo.expect_find_completed_todos()
            .returning(move || Ok(vec![done.clone()]));
        repo.expect_delete_all().times(1).returning(|_| Ok(()));
        let scheduler = PurgeScheduler::new(Arc::new(repo), time!(02:00));

        let report = scheduler.trigger().await.unwrap();

        assert_eq!(report.deleted, 1);
    }

    #[tokio::test]
    async fn run_until_returns_when_shutdown_fires() {
        let mut repo = MockTodoRepository::new();
        repo.expect_find_completed_todos().never();
        let scheduler = PurgeScheduler::new(Arc::new(repo), time!(02:00));

        scheduler.run_until(async {}).await;
    }
}
