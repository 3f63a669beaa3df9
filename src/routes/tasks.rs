use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskDetailsUpdate, TaskInput, TaskStatusUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Confirms that a task exists and belongs to the caller.
///
/// Every mutation goes through this lookup first. A missing task and a task
/// owned by someone else both come back as `NotFoundOrDenied`, so a caller
/// can never probe for the existence of another user's tasks. Once the
/// lookup succeeds the mutation may address the row by id alone.
async fn find_owned_task(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<(), AppError> {
    let owned = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match owned {
        Some(_) => Ok(()),
        None => Err(AppError::NotFoundOrDenied),
    }
}

/// Retrieves all tasks owned by the authenticated user.
///
/// The query is always filtered by the caller's identity; another user's
/// tasks are never returned. Tasks are ordered by creation date, newest
/// first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects (empty for a fresh account).
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For store failures.
#[get("/tasks")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, due_date, status, created_at, user_id \
         FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The task's owner is set to the authenticated subject unconditionally;
/// nothing in the request body can assign it to anyone else.
///
/// ## Request Body:
/// - `title`: 1-200 characters (required).
/// - `description`: 1-1000 characters (required).
/// - `due_date`: `YYYY-MM-DD` (required).
/// - `status`: free-form non-empty string (required).
///
/// ## Responses:
/// - `201 Created`: `{"message", "id"}` with the new task's UUID.
/// - `400 Bad Request`: If validation fails.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For store failures.
#[post("/postTask")]
pub async fn post_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0);

    sqlx::query(
        "INSERT INTO tasks (id, title, description, due_date, status, created_at, user_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.due_date)
    .bind(&task.status)
    .bind(task.created_at)
    .bind(task.user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "task added successfully",
        "id": task.id
    })))
}

/// Updates the status of a task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: `{"message"}` on success.
/// - `400 Bad Request`: If `status` is missing or empty.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `500 Internal Server Error`: For store failures.
#[patch("/updateTaskStatus/{id}")]
pub async fn update_task_status(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    update: web::Json<TaskStatusUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if update.status.is_empty() {
        return Err(AppError::Validation("new status is required".into()));
    }

    let task_uuid = task_id.into_inner();
    find_owned_task(&pool, task_uuid, user.0).await?;

    sqlx::query("UPDATE tasks SET status = $1 WHERE id = $2")
        .bind(&update.status)
        .bind(task_uuid)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "task status updated successfully"
    })))
}

/// Partially updates the details of a task owned by the authenticated user.
///
/// Only the supplied fields are written; absent fields keep their prior
/// values. Supplying none of `title`, `description`, `due_date` is rejected.
///
/// ## Responses:
/// - `200 OK`: `{"message"}` on success.
/// - `400 Bad Request`: If no updatable field is present or a field fails validation.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `500 Internal Server Error`: For store failures.
#[patch("/updateTaskDetails/{id}")]
pub async fn update_task_details(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    update: web::Json<TaskDetailsUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if update.is_empty() {
        return Err(AppError::Validation(
            "at least one of title, description, or due_date must be provided".into(),
        ));
    }
    update.validate()?;

    let task_uuid = task_id.into_inner();
    find_owned_task(&pool, task_uuid, user.0).await?;

    // Assemble the SET clause from the fields that are actually present.
    let mut assignments: Vec<String> = Vec::new();
    let mut param_count = 1;

    if update.title.is_some() {
        assignments.push(format!("title = ${}", param_count));
        param_count += 1;
    }
    if update.description.is_some() {
        assignments.push(format!("description = ${}", param_count));
        param_count += 1;
    }
    if update.due_date.is_some() {
        assignments.push(format!("due_date = ${}", param_count));
        param_count += 1;
    }

    let sql = format!(
        "UPDATE tasks SET {} WHERE id = ${}",
        assignments.join(", "),
        param_count
    );

    let mut query = sqlx::query(&sql);
    if let Some(title) = &update.title {
        query = query.bind(title);
    }
    if let Some(description) = &update.description {
        query = query.bind(description);
    }
    if let Some(due_date) = update.due_date {
        query = query.bind(due_date);
    }
    query = query.bind(task_uuid);

    query.execute(&**pool).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "task details updated successfully"
    })))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: `{"message"}` on success.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `500 Internal Server Error`: For store failures.
#[delete("/deleteTask/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();
    find_owned_task(&pool, task_uuid, user.0).await?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_uuid)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "task deleted successfully"
    })))
}
