use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Review,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub customer_id: i32,
    pub order_id: Option<i32>,
    pub reservation_id: Option<i32>,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub items: Vec<Review>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

#[utoipa::path(get, path = "/reviews", tag = "Reviews")]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let items = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Reviews",
        ReviewList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/reviews/{id}", tag = "Reviews")]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let review = match review {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Review", review, None)))
}

#[utoipa::path(post, path = "/reviews", request_body = ReviewRequest, tag = "Reviews")]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO reviews (customer_id, order_id, reservation_id, rating, comment)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(payload.customer_id)
    .bind(payload.order_id)
    .bind(payload.reservation_id)
    .bind(payload.rating)
    .bind(payload.comment.as_deref().unwrap_or(""))
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Review added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/reviews/{id}", request_body = ReviewRequest, tag = "Reviews")]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query(
        r#"
        UPDATE reviews
        SET customer_id = $2, order_id = $3, reservation_id = $4, rating = $5, comment = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.customer_id)
    .bind(payload.order_id)
    .bind(payload.reservation_id)
    .bind(payload.rating)
    .bind(payload.comment.as_deref().unwrap_or(""))
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Review updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/reviews/{id}", tag = "Reviews")]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Review deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
