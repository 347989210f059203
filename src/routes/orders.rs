use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::orders::{
        CreateOrderRequest, NewOrderItem, OrderItemsCreated, PatchOrderStatusRequest,
        UpdateOrderRequest,
    },
    error::{AppError, AppResult},
    models::{Order, OrderItemDetail},
    response::{ApiResponse, Meta, ResourceId},
    services::order_service,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemDetailList {
    pub items: Vec<OrderItemDetail>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order)
                .put(update_order)
                .patch(patch_order_status)
                .delete(delete_order),
        )
        .route(
            "/{id}/items",
            get(list_order_items).post(add_order_items),
        )
}

#[utoipa::path(get, path = "/orders", tag = "Orders")]
pub async fn list_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let items =
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&state.pool)
            .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/orders/{id}", tag = "Orders")]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Order", order, None)))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = ApiResponse<ResourceId>),
        (status = 400, description = "Missing or single-word customer name"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let response = order_service::create_order(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(put, path = "/orders/{id}", request_body = UpdateOrderRequest, tag = "Orders")]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let response = order_service::update_order(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(patch, path = "/orders/{id}", request_body = PatchOrderStatusRequest, tag = "Orders")]
pub async fn patch_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PatchOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let response = order_service::patch_order_status(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(delete, path = "/orders/{id}", tag = "Orders")]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Order deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(get, path = "/orders/{id}/items", tag = "Orders")]
pub async fn list_order_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderItemDetailList>>> {
    let items = sqlx::query_as::<_, OrderItemDetail>(
        r#"
        SELECT oi.id, oi.order_id, oi.menu_id, oi.quantity, oi.price, m.name, m.category
        FROM order_items oi
        JOIN menu m ON oi.menu_id = m.id
        WHERE oi.order_id = $1
        ORDER BY oi.id
        "#,
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Order items",
        OrderItemDetailList { items },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/items",
    request_body = Vec<NewOrderItem>,
    responses(
        (status = 200, description = "Items added in one transaction", body = ApiResponse<OrderItemsCreated>),
        (status = 400, description = "Empty batch or invalid item; nothing persisted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn add_order_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(items): Json<Vec<NewOrderItem>>,
) -> AppResult<Json<ApiResponse<OrderItemsCreated>>> {
    let response = order_service::add_order_items(&state, id, items).await?;
    Ok(Json(response))
}
