use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::DiningTable,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct DiningTableRequest {
    pub reservation_id: Option<i32>,
    pub table_number: String,
    pub capacity: i32,
    pub location: String,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiningTableList {
    pub items: Vec<DiningTable>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tables).post(create_table))
        .route(
            "/{id}",
            get(get_table).put(update_table).delete(delete_table),
        )
}

#[utoipa::path(get, path = "/tabless", tag = "Tables")]
pub async fn list_tables(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DiningTableList>>> {
    let items = sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_tables ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Tables",
        DiningTableList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/tabless/{id}", tag = "Tables")]
pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_tables WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let table = match table {
        Some(t) => t,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Table", table, None)))
}

#[utoipa::path(post, path = "/tabless", request_body = DiningTableRequest, tag = "Tables")]
pub async fn create_table(
    State(state): State<AppState>,
    Json(payload): Json<DiningTableRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    if payload.capacity <= 0 {
        return Err(AppError::BadRequest("Capacity must be positive".into()));
    }

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO dining_tables (reservation_id, table_number, capacity, location, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(payload.reservation_id)
    .bind(&payload.table_number)
    .bind(payload.capacity)
    .bind(&payload.location)
    .bind(payload.status.as_deref().unwrap_or("available"))
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Table added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/tabless/{id}", request_body = DiningTableRequest, tag = "Tables")]
pub async fn update_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DiningTableRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    if payload.capacity <= 0 {
        return Err(AppError::BadRequest("Capacity must be positive".into()));
    }

    let result = sqlx::query(
        r#"
        UPDATE dining_tables
        SET reservation_id = $2, table_number = $3, capacity = $4, location = $5, status = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.reservation_id)
    .bind(&payload.table_number)
    .bind(payload.capacity)
    .bind(&payload.location)
    .bind(payload.status.as_deref().unwrap_or("available"))
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Table updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/tabless/{id}", tag = "Tables")]
pub async fn delete_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM dining_tables WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Table deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
