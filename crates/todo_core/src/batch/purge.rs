use crate::error::AppError;
use crate::port::TodoRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub deleted: usize,
}

/// Deletes every completed todo and reports how many were removed.
pub async fn purge_completed_todos(
    repository: &dyn TodoRepository,
) -> Result<PurgeReport, AppError> {
    tracing::info!("starting purge of completed todos");

    let completed = repository.find_completed_todos().await?;
    if completed.is_empty() {
        tracing::info!("no completed todos found to delete");
        return Ok(PurgeReport { deleted: 0 });
    }

    let count = completed.len();
    tracing::info!(count, "found completed todos to delete");
    repository.delete_all(&completed).await?;
    tracing::info!(count, "deleted completed todos");

    Ok(PurgeReport { deleted: count })
}
