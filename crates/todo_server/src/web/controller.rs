use crate::web::AppState;
use crate::web::dto::{CreateTodoRequest, TodoDto};
use crate::web::error::ApiError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use uuid::Uuid;

pub async fn get_all_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoDto>>, ApiError> {
    let todos = state.service.get_all_todos().await?;
    Ok(Json(todos.iter().map(TodoDto::from).collect()))
}

pub async fn get_todo_by_id(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<TodoDto>, ApiError> {
    let todo = state.service.get_todo_by_id(id).await?;
    Ok(Json(todo.into()))
}

pub async fn create_todo(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateTodoRequest>, ApiError>,
) -> Result<(StatusCode, Json<TodoDto>), ApiError> {
    let todo = state
        .service
        .create_todo(&request.title, request.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

pub async fn update_todo(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(request), _): WithRejection<Json<CreateTodoRequest>, ApiError>,
) -> Result<Json<TodoDto>, ApiError> {
    let todo = state
        .service
        .update_todo(id, &request.title, request.description.as_deref())
        .await?;
    Ok(Json(todo.into()))
}

pub async fn toggle_todo_completion(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<TodoDto>, ApiError> {
    let todo = state.service.toggle_todo_completion(id).await?;
    Ok(Json(todo.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
