use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Payment,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentRequest {
    pub order_id: i32,
    pub payment_method: String,
    pub amount: i64,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentList {
    pub items: Vec<Payment>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route(
            "/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

#[utoipa::path(get, path = "/payments", tag = "Payments")]
pub async fn list_payments(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PaymentList>>> {
    let items = sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Payments",
        PaymentList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/payments/{id}", tag = "Payments")]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let payment = match payment {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Payment", payment, None)))
}

#[utoipa::path(post, path = "/payments", request_body = PaymentRequest, tag = "Payments")]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO payments (order_id, payment_method, amount, status)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(payload.order_id)
    .bind(&payload.payment_method)
    .bind(payload.amount)
    .bind(payload.status.as_deref().unwrap_or("pending"))
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Payment added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/payments/{id}", request_body = PaymentRequest, tag = "Payments")]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query(
        r#"
        UPDATE payments
        SET order_id = $2, payment_method = $3, amount = $4, status = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.order_id)
    .bind(&payload.payment_method)
    .bind(payload.amount)
    .bind(payload.status.as_deref().unwrap_or("pending"))
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Payment updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/payments/{id}", tag = "Payments")]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM payments WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Payment deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
