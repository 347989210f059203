use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    enums::DeliveryStatus,
    error::{AppError, AppResult},
    models::Delivery,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeliveryRequest {
    pub order_id: i32,
    pub delivery_agent_id: i32,
    pub estimated_time: DateTime<Utc>,
    pub delivered_time: Option<DateTime<Utc>>,
    pub delivery_status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryList {
    pub items: Vec<Delivery>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deliveries).post(create_delivery))
        .route(
            "/{id}",
            get(get_delivery).put(update_delivery).delete(delete_delivery),
        )
}

fn validate_status(raw: Option<&str>) -> AppResult<&'static str> {
    match raw {
        Some(value) => Ok(DeliveryStatus::parse(value)?.as_str()),
        None => Ok(DeliveryStatus::Pending.as_str()),
    }
}

#[utoipa::path(get, path = "/deliveries", tag = "Deliveries")]
pub async fn list_deliveries(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DeliveryList>>> {
    let items = sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Deliveries",
        DeliveryList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/deliveries/{id}", tag = "Deliveries")]
pub async fn get_delivery(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Delivery>>> {
    let delivery = sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let delivery = match delivery {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Delivery", delivery, None)))
}

#[utoipa::path(post, path = "/deliveries", request_body = DeliveryRequest, tag = "Deliveries")]
pub async fn create_delivery(
    State(state): State<AppState>,
    Json(payload): Json<DeliveryRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let status = validate_status(payload.delivery_status.as_deref())?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO deliveries (order_id, delivery_agent_id, estimated_time, delivered_time, delivery_status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(payload.order_id)
    .bind(payload.delivery_agent_id)
    .bind(payload.estimated_time)
    .bind(payload.delivered_time)
    .bind(status)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Delivery added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/deliveries/{id}", request_body = DeliveryRequest, tag = "Deliveries")]
pub async fn update_delivery(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DeliveryRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let status = validate_status(payload.delivery_status.as_deref())?;

    let result = sqlx::query(
        r#"
        UPDATE deliveries
        SET order_id = $2, delivery_agent_id = $3, estimated_time = $4,
            delivered_time = $5, delivery_status = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.order_id)
    .bind(payload.delivery_agent_id)
    .bind(payload.estimated_time)
    .bind(payload.delivered_time)
    .bind(status)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Delivery updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/deliveries/{id}", tag = "Deliveries")]
pub async fn delete_delivery(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM deliveries WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Delivery deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
