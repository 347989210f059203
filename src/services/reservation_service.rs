use chrono::{NaiveTime, Timelike};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::reservations::{CreateReservationRequest, UpdateReservationRequest},
    entity::{
        dining_tables::{Column as TableCol, Entity as DiningTables, Model as TableModel},
        reservations::{
            ActiveModel as ReservationActive, Column as ResCol, Entity as Reservations,
        },
    },
    enums::RESERVATION_CONFIRMED,
    error::{AppError, AppResult},
    response::{ApiResponse, Meta, ResourceId},
    state::{AppState, OperatingHours},
};

/// Accepts "HH:MM" and "HH:MM:SS", the two shapes the frontend sends.
pub fn parse_reservation_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

pub fn validate_operating_hours(raw: &str, hours: OperatingHours) -> AppResult<NaiveTime> {
    let time = parse_reservation_time(raw)
        .ok_or_else(|| AppError::BadRequest("Invalid time format. Please use HH:MM".into()))?;
    if time.hour() < hours.opening || time.hour() >= hours.closing {
        return Err(AppError::InvalidTime(hours.opening, hours.closing));
    }
    Ok(time)
}

/// Finds the lowest-id table that seats the party at the requested slot.
///
/// Candidate rows are locked for the rest of the transaction and the
/// confirmed-slot conflict is re-checked after each lock is held, so two
/// concurrent requests for the same slot cannot both claim one table.
async fn find_available_table<C: ConnectionTrait>(
    conn: &C,
    date: chrono::NaiveDate,
    time: NaiveTime,
    guest_count: i32,
    location: &str,
) -> AppResult<Option<TableModel>> {
    let candidates = DiningTables::find()
        .filter(TableCol::Capacity.gte(guest_count))
        .filter(TableCol::Location.eq(location))
        .order_by_asc(TableCol::Id)
        .lock(LockType::Update)
        .all(conn)
        .await?;

    for table in candidates {
        let conflicts = Reservations::find()
            .filter(ResCol::TableId.eq(table.id))
            .filter(ResCol::ReservationDate.eq(date))
            .filter(ResCol::ReservationTime.eq(time))
            .filter(ResCol::Status.eq(RESERVATION_CONFIRMED))
            .count(conn)
            .await?;
        if conflicts == 0 {
            return Ok(Some(table));
        }
    }

    Ok(None)
}

pub async fn create_reservation(
    state: &AppState,
    payload: CreateReservationRequest,
) -> AppResult<ApiResponse<ResourceId>> {
    let time = validate_operating_hours(&payload.reservation_time, state.hours)?;

    let txn = state.orm.begin().await?;

    let table = find_available_table(
        &txn,
        payload.reservation_date,
        time,
        payload.guest_count,
        &payload.location,
    )
    .await?
    .ok_or_else(|| AppError::NoAvailability(payload.location.clone()))?;

    let reservation = ReservationActive {
        customer_id: Set(payload.customer_id),
        table_id: Set(table.id),
        reservation_date: Set(payload.reservation_date),
        reservation_time: Set(time),
        guest_count: Set(payload.guest_count),
        location: Set(payload.location),
        status: Set(payload.status.unwrap_or_else(|| "pending".into())),
        special_requests: Set(payload.special_requests.unwrap_or_default()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        reservation_id = reservation.id,
        table_id = table.id,
        "reservation created"
    );

    Ok(ApiResponse::success(
        "Reservation created successfully",
        ResourceId { id: reservation.id },
        Some(Meta::empty()),
    ))
}

/// Full replace. The matcher is not re-run; the caller-supplied table_id is
/// persisted verbatim.
pub async fn update_reservation(
    state: &AppState,
    id: i32,
    payload: UpdateReservationRequest,
) -> AppResult<ApiResponse<ResourceId>> {
    let time = validate_operating_hours(&payload.reservation_time, state.hours)?;

    let existing = Reservations::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ReservationActive = existing.into();
    active.customer_id = Set(payload.customer_id);
    active.table_id = Set(payload.table_id);
    active.reservation_date = Set(payload.reservation_date);
    active.reservation_time = Set(time);
    active.guest_count = Set(payload.guest_count);
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    active.status = Set(payload.status);
    active.special_requests = Set(payload.special_requests.unwrap_or_default());
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Reservation updated",
        ResourceId { id: updated.id },
        Some(Meta::empty()),
    ))
}

pub async fn delete_reservation(state: &AppState, id: i32) -> AppResult<ApiResponse<ResourceId>> {
    let result = Reservations::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Reservation deleted",
        ResourceId { id },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURS: OperatingHours = OperatingHours {
        opening: 10,
        closing: 22,
    };

    #[test]
    fn accepts_times_within_the_window() {
        assert!(validate_operating_hours("10:00", HOURS).is_ok());
        assert!(validate_operating_hours("18:30", HOURS).is_ok());
        assert!(validate_operating_hours("21:59", HOURS).is_ok());
        assert!(validate_operating_hours("12:15:30", HOURS).is_ok());
    }

    #[test]
    fn rejects_times_outside_the_window() {
        assert!(matches!(
            validate_operating_hours("09:59", HOURS),
            Err(AppError::InvalidTime(10, 22))
        ));
        assert!(matches!(
            validate_operating_hours("22:00", HOURS),
            Err(AppError::InvalidTime(10, 22))
        ));
        assert!(matches!(
            validate_operating_hours("23:30", HOURS),
            Err(AppError::InvalidTime(10, 22))
        ));
    }

    #[test]
    fn rejects_malformed_times() {
        for raw in ["", "noon", "25:00", "10", "10:"] {
            assert!(
                matches!(
                    validate_operating_hours(raw, HOURS),
                    Err(AppError::BadRequest(_))
                ),
                "expected bad request for {raw:?}"
            );
        }
    }
}
