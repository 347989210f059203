use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::MenuItem,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub availability: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuList {
    pub items: Vec<MenuItem>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu).post(create_menu_item))
        .route(
            "/{id}",
            get(get_menu_item).put(update_menu_item).delete(delete_menu_item),
        )
}

#[utoipa::path(get, path = "/menu", tag = "Menu")]
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<ApiResponse<MenuList>>> {
    let items = sqlx::query_as::<_, MenuItem>("SELECT * FROM menu ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Menu",
        MenuList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/menu/{id}", tag = "Menu")]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let item = sqlx::query_as::<_, MenuItem>("SELECT * FROM menu WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let item = match item {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Menu item", item, None)))
}

#[utoipa::path(post, path = "/menu", request_body = MenuItemRequest, tag = "Menu")]
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO menu (name, description, price, category, availability)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(&payload.category)
    .bind(payload.availability.unwrap_or(true))
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Menu item added",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/menu/{id}", request_body = MenuItemRequest, tag = "Menu")]
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuItemRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query(
        r#"
        UPDATE menu
        SET name = $2, description = $3, price = $4, category = $5, availability = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(&payload.category)
    .bind(payload.availability.unwrap_or(true))
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Menu item updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/menu/{id}", tag = "Menu")]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM menu WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Menu item deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
