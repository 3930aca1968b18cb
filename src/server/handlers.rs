use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::ApiContext;
use crate::domain::{CategoryKey, NewTask, Task, TaskPatch};
use crate::planner::{CategoryUpdate, PlannerError};

#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    date: Option<String>,
}

/// GET /api/tasks — the full date-to-tasks mapping, or one date's list
/// with `?date=`.
pub async fn all_tasks(
    State(ctx): State<ApiContext>,
    Query(query): Query<TasksQuery>,
) -> Result<Json<Value>, ApiError> {
    if let Some(date) = query.date {
        let tasks = ctx.planner.tasks_for(&date)?;
        return Ok(Json(json!({ "tasks": tasks })));
    }
    let tasks_by_date = ctx.planner.all_tasks()?;
    Ok(Json(json!({ "tasksByDate": tasks_by_date })))
}

/// GET /api/tasks/:date
pub async fn tasks_for_date(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let tasks = ctx.planner.tasks_for(&date)?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// POST /api/tasks/:date
pub async fn create_task(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
    Json(body): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = ctx.planner.create_task(&date, body)?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
    id: Option<String>,
    #[serde(flatten)]
    patch: TaskPatch,
}

/// PATCH /api/tasks/:date — body carries the task id plus partial fields.
pub async fn update_task(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let id = body.id.ok_or_else(|| ApiError::bad_request("id required"))?;
    let task = ctx.planner.update_task(&date, &id, body.patch)?;
    Ok(Json(task))
}

#[derive(Debug, Deserialize)]
pub struct DeleteTaskQuery {
    id: Option<String>,
}

/// DELETE /api/tasks/:date?id=… — responds `{"ok": bool}` either way.
pub async fn delete_task(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
    Query(query): Query<DeleteTaskQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = query.id.ok_or_else(|| ApiError::bad_request("id required"))?;
    let ok = match ctx.planner.delete_task(&date, &id) {
        Ok(()) => true,
        Err(PlannerError::NotFound { .. }) => false,
        Err(err) => return Err(err.into()),
    };
    Ok(Json(json!({ "ok": ok })))
}

/// GET /api/categories/:date — all-false when the date has no record.
pub async fn categories_for_date(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let categories = ctx.planner.categories_for(&date)?;
    Ok(Json(json!({ "categories": categories })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryBody {
    key: Option<CategoryKey>,
    value: Option<bool>,
}

/// PATCH /api/categories/:date
pub async fn update_category(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
    Json(body): Json<UpdateCategoryBody>,
) -> Result<Json<CategoryUpdate>, ApiError> {
    let (Some(key), Some(value)) = (body.key, body.value) else {
        return Err(ApiError::bad_request("key and boolean value required"));
    };
    let update = ctx.planner.update_category(&date, key, value)?;
    Ok(Json(update))
}
