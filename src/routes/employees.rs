use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    enums::EmployeeRole,
    error::{AppError, AppResult},
    models::Employee,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone_number: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeList {
    pub items: Vec<Employee>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

#[utoipa::path(get, path = "/employees", tag = "Employees")]
pub async fn list_employees(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<EmployeeList>>> {
    let items = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Employees",
        EmployeeList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/employees/{id}", tag = "Employees")]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let employee = match employee {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Employee", employee, None)))
}

#[utoipa::path(
    post,
    path = "/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee created", body = ApiResponse<ResourceId>),
        (status = 400, description = "Invalid role"),
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<EmployeeRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let role = EmployeeRole::parse(&payload.role)?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO employees (first_name, last_name, role, phone_number, email, hire_date, salary)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(role.as_str())
    .bind(&payload.phone_number)
    .bind(&payload.email)
    .bind(payload.hire_date)
    .bind(payload.salary)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Employee added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/employees/{id}", request_body = EmployeeRequest, tag = "Employees")]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeeRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let role = EmployeeRole::parse(&payload.role)?;

    let result = sqlx::query(
        r#"
        UPDATE employees
        SET first_name = $2, last_name = $3, role = $4, phone_number = $5,
            email = $6, hire_date = $7, salary = $8
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(role.as_str())
    .bind(&payload.phone_number)
    .bind(&payload.email)
    .bind(payload.hire_date)
    .bind(payload.salary)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Employee updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/employees/{id}", tag = "Employees")]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Employee deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
