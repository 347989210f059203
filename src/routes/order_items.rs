use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::OrderItem,
    response::{ApiResponse, Meta, ResourceId},
    services::order_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub order_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemList {
    pub items: Vec<OrderItem>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_items).post(create_order_item))
        .route(
            "/{id}",
            get(get_order_item)
                .put(update_order_item)
                .delete(delete_order_item),
        )
}

#[utoipa::path(get, path = "/orderitems", tag = "OrderItems")]
pub async fn list_order_items(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OrderItemList>>> {
    let items = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Order items",
        OrderItemList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/orderitems/{id}", tag = "OrderItems")]
pub async fn get_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderItem>>> {
    let item = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Order item", item, None)))
}

#[utoipa::path(post, path = "/orderitems", request_body = OrderItemRequest, tag = "OrderItems")]
pub async fn create_order_item(
    State(state): State<AppState>,
    Json(payload): Json<OrderItemRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "All fields are required: order_id, menu_id, quantity, price".into(),
        ));
    }

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO order_items (order_id, menu_id, quantity, price)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(payload.order_id)
    .bind(payload.menu_id)
    .bind(payload.quantity)
    .bind(payload.price)
    .fetch_one(&state.pool)
    .await?;

    order_service::recompute_order_total(&state.orm, payload.order_id).await?;

    Ok(Json(ApiResponse::success(
        "Order item added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/orderitems/{id}", request_body = OrderItemRequest, tag = "OrderItems")]
pub async fn update_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OrderItemRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "All fields are required: order_id, menu_id, quantity, price".into(),
        ));
    }

    // The item may be moving to another order; both totals need recomputing.
    let current: Option<(i32,)> =
        sqlx::query_as("SELECT order_id FROM order_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;
    let (current_order_id,) = match current {
        Some(row) => row,
        None => return Err(AppError::NotFound),
    };

    sqlx::query(
        r#"
        UPDATE order_items
        SET order_id = $2, menu_id = $3, quantity = $4, price = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.order_id)
    .bind(payload.menu_id)
    .bind(payload.quantity)
    .bind(payload.price)
    .execute(&state.pool)
    .await?;

    order_service::recompute_order_total(&state.orm, payload.order_id).await?;
    if current_order_id != payload.order_id {
        order_service::recompute_order_total(&state.orm, current_order_id).await?;
    }

    Ok(Json(ApiResponse::success(
        "Order item updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/orderitems/{id}", tag = "OrderItems")]
pub async fn delete_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let current: Option<(i32,)> =
        sqlx::query_as("SELECT order_id FROM order_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;
    let (order_id,) = match current {
        Some(row) => row,
        None => return Err(AppError::NotFound),
    };

    sqlx::query("DELETE FROM order_items WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    order_service::recompute_order_total(&state.orm, order_id).await?;

    Ok(Json(ApiResponse::success(
        "Order item deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
