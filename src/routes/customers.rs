use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// POST is find-or-create on (first_name, last_name); `exists` tells the
/// caller which case it hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerCreated {
    pub exists: bool,
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerList {
    pub items: Vec<Customer>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(get, path = "/customers", tag = "Customers")]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let items = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/customers/{id}", tag = "Customers")]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let customer = match customer {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Customer", customer, None)))
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Created, or the id of the existing customer", body = ApiResponse<CustomerCreated>),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerRequest>,
) -> AppResult<Json<ApiResponse<CustomerCreated>>> {
    let existing: Option<(i32,)> = sqlx::query_as(
        "SELECT id FROM customers WHERE first_name = $1 AND last_name = $2",
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .fetch_optional(&state.pool)
    .await?;

    if let Some((id,)) = existing {
        return Ok(Json(ApiResponse::success(
            "Customer already exists.",
            CustomerCreated { exists: true, id },
            Some(Meta::empty()),
        )));
    }

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO customers (first_name, last_name, phone_number, email)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.phone_number)
    .bind(&payload.email)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Customer added successfully.",
        CustomerCreated { exists: false, id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(put, path = "/customers/{id}", request_body = CustomerRequest, tag = "Customers")]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query(
        r#"
        UPDATE customers
        SET first_name = $2, last_name = $3, phone_number = $4, email = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.phone_number)
    .bind(&payload.email)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Customer updated",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(delete, path = "/customers/{id}", tag = "Customers")]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Customer deleted",
        ResourceId { id },
        Some(Meta::empty()),
    )))
}
