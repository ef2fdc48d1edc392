use crate::web;
use std::sync::Arc;
use todo_core::batch::{PurgeReport, PurgeScheduler, purge_completed_todos};
use todo_core::config::ServerConfig;
use todo_core::error::AppError;
use todo_core::port::TodoRepository;
use todo_core::service::TodoService;
use todo_core::storage::{self, SqliteTodoRepository};
use tokio::net::TcpListener;
use tokio::sync::watch;

pub async fn open_repository(database_url: &str) -> Result<Arc<dyn TodoRepository>, AppError> {
    let pool = storage::connect(database_url).await?;
    Ok(Arc::new(SqliteTodoRepository::new(pool)))
}

/// Serves the API until Ctrl-C, with the purge scheduler running alongside.
pub async fn serve(config: &ServerConfig) -> Result<(), AppError> {
    let run_at = config.purge_time()?;
    let repository = open_repository(&config.database_url).await?;
    let service = TodoService::new(Arc::clone(&repository));
    let router = web::router(service, &config.cors_origin)?;

    let (stop_tx, mut stop_rx) = watch::channel(());
    let scheduler = PurgeScheduler::new(repository, run_at);
    let scheduler_task = tokio::spawn(scheduler.run_until(async move {
        let _ = stop_rx.changed().await;
    }));

    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|err| AppError::io(format!("{}: {}", config.bind, err)))?;
    tracing::info!(bind = %config.bind, purge_at = %config.purge_at, "todo server listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::io(err.to_string()));

    drop(stop_tx);
    if let Err(err) = scheduler_task.await {
        tracing::warn!(error = %err, "purge scheduler task ended abnormally");
    }
    served
}

pub async fn purge_once(config: &ServerConfig) -> Result<PurgeReport, AppError> {
    let repository = open_repository(&config.database_url).await?;
    purge_completed_todos(repository.as_ref()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
