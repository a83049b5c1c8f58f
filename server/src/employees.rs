use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use platform_api::{ApiError, ApiResult, EmployeeInput, EmployeeView};
use platform_db::{DbError, Employee};
use tracing::{Span, field, instrument};

use crate::http::AppState;

fn to_view(employee: Employee) -> ApiResult<EmployeeView> {
    let id = employee
        .id
        .ok_or_else(|| ApiError::internal(anyhow::anyhow!("stored employee without id")))?;
    Ok(EmployeeView {
        id,
        first_name: employee.first_name,
        last_name: employee.last_name,
        mail: employee.mail,
    })
}

fn db_error(err: DbError) -> ApiError {
    match err {
        DbError::NotFound(_) => ApiError::NotFound,
        other => ApiError::internal(other),
    }
}

fn member_id(path: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    let Path(id) = path?;
    Span::current().record("id", id);
    Ok(id)
}

fn hash(plain: &str) -> ApiResult<String> {
    platform_authn::hash_password(plain).map_err(ApiError::internal)
}

#[instrument(name = "http.employees.list", skip_all)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeView>>> {
    let employees = state.repo.list_all().await.map_err(db_error)?;
    let views = employees
        .into_iter()
        .map(to_view)
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(views))
}

#[instrument(name = "http.employees.get", skip_all, fields(id = field::Empty))]
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let id = member_id(path)?;
    let employee = state
        .repo
        .get(id)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_view(employee)?))
}

#[instrument(name = "http.employees.create", skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeView>)> {
    let Json(input) = body?;
    let password = input.password.as_deref().map(hash).transpose()?;
    let saved = state
        .repo
        .save(Employee {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            mail: input.mail,
            password,
        })
        .await
        .map_err(db_error)?;
    tracing::info!(id = ?saved.id, "employee created");
    Ok((StatusCode::CREATED, Json(to_view(saved)?)))
}

/// Replace the fields of an existing employee. An omitted password keeps the
/// stored hash.
#[instrument(name = "http.employees.update", skip_all, fields(id = field::Empty))]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let id = member_id(path)?;
    let Json(input) = body?;
    let current = state
        .repo
        .get(id)
        .await
        .map_err(db_error)?
        .ok_or(ApiError::NotFound)?;
    let password = match input.password.as_deref() {
        Some(plain) => Some(hash(plain)?),
        None => current.password,
    };
    let saved = state
        .repo
        .save(Employee {
            id: Some(id),
            first_name: input.first_name,
            last_name: input.last_name,
            mail: input.mail,
            password,
        })
        .await
        .map_err(db_error)?;
    Ok(Json(to_view(saved)?))
}

#[instrument(name = "http.employees.delete", skip_all, fields(id = field::Empty))]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = member_id(path)?;
    if state.repo.delete(id).await.map_err(db_error)? {
        tracing::info!(id, "employee deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
