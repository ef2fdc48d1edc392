pub mod controller;
pub mod dto;
pub mod error;
mod mapper;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch};
use todo_core::error::AppError;
use todo_core::service::TodoService;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
}

/// Builds the HTTP surface: `/api/todos` routes plus `/health`.
pub fn router(service: TodoService, cors_origin: &str) -> Result<Router, AppError> {
    let origin = HeaderValue::from_str(cors_origin)
        .map_err(|_| AppError::invalid_input(format!("invalid CORS origin '{cors_origin}'")))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]);

    let todos = Router::new()
        .route(
            "/",
            get(controller::get_all_todos).post(controller::create_todo),
        )
        .route(
            "/:id",
            get(controller::get_todo_by_id)
                .put(controller::update_todo)
                .delete(controller::delete_todo),
        )
        .route("/:id/toggle", patch(controller::toggle_todo_completion));

    Ok(Router::new()
        .nest("/api/todos", todos)
        .route("/health", get(controller::health))
        .with_state(AppState { service })
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
