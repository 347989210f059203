use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::reservations::{CreateReservationRequest, UpdateReservationRequest},
    error::{AppError, AppResult},
    models::Reservation,
    response::{ApiResponse, Meta, ResourceId},
    services::reservation_service,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationList {
    pub items: Vec<Reservation>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route(
            "/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
}

#[utoipa::path(get, path = "/reservations", tag = "Reservations")]
pub async fn list_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ReservationList>>> {
    let items = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Reservations",
        ReservationList { items },
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(get, path = "/reservations/{id}", tag = "Reservations")]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation =
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;
    let reservation = match reservation {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    Ok(Json(ApiResponse::success("Reservation", reservation, None)))
}

#[utoipa::path(
    post,
    path = "/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created", body = ApiResponse<ResourceId>),
        (status = 400, description = "Invalid time or no table available"),
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let response = reservation_service::create_reservation(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(put, path = "/reservations/{id}", request_body = UpdateReservationRequest, tag = "Reservations")]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReservationRequest>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let response = reservation_service::update_reservation(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(delete, path = "/reservations/{id}", tag = "Reservations")]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ResourceId>>> {
    let response = reservation_service::delete_reservation(&state, id).await?;
    Ok(Json(response))
}
