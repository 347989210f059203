use axum_restaurant_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::reservations::{CreateReservationRequest, UpdateReservationRequest},
    error::AppError,
    services::reservation_service,
    state::{AppState, OperatingHours},
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Statement};

// Integration flow: table matching, operating-hours validation, and the
// confirmed-slot exclusion. Requires a database; skipped otherwise.
#[tokio::test]
async fn table_matching_and_time_validation_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let customer_id = ensure_customer(&state, "Reza", "Tabrizi").await?;

    // Two four-seat tables in the same spot; the lower id must win.
    let small_table = create_table(&state, "R1", 4, "test-indoor").await?;
    let big_table = create_table(&state, "R2", 4, "test-indoor").await?;
    assert!(small_table < big_table);

    let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    let first = reservation_service::create_reservation(
        &state,
        request(customer_id, date, "12:00", 2, "test-indoor", Some("confirmed")),
    )
    .await?;
    let first_id = first.data.unwrap().id;
    assert_eq!(table_of(&state, first_id).await?, small_table);

    // Same slot again: the first table is taken, the second is assigned.
    let second = reservation_service::create_reservation(
        &state,
        request(customer_id, date, "12:00", 2, "test-indoor", Some("confirmed")),
    )
    .await?;
    let second_id = second.data.unwrap().id;
    assert_eq!(table_of(&state, second_id).await?, big_table);

    // Both tables confirmed for the slot: nothing left.
    let exhausted = reservation_service::create_reservation(
        &state,
        request(customer_id, date, "12:00", 2, "test-indoor", None),
    )
    .await;
    assert!(matches!(exhausted, Err(AppError::NoAvailability(_))));

    // A different time on the same day is free again.
    let later = reservation_service::create_reservation(
        &state,
        request(customer_id, date, "19:30", 2, "test-indoor", None),
    )
    .await?;
    assert_eq!(table_of(&state, later.data.unwrap().id).await?, small_table);

    // Party too large for any table.
    let oversized = reservation_service::create_reservation(
        &state,
        request(customer_id, date, "15:00", 10, "test-indoor", None),
    )
    .await;
    assert!(matches!(oversized, Err(AppError::NoAvailability(_))));

    // Unknown location.
    let nowhere = reservation_service::create_reservation(
        &state,
        request(customer_id, date, "15:00", 2, "test-rooftop", None),
    )
    .await;
    assert!(matches!(nowhere, Err(AppError::NoAvailability(_))));

    // Out of operating hours: rejected before anything is written.
    let before_count = reservation_count(&state).await?;
    for time in ["09:59", "22:00", "23:30"] {
        let out_of_hours = reservation_service::create_reservation(
            &state,
            request(customer_id, date, time, 2, "test-indoor", None),
        )
        .await;
        assert!(
            matches!(out_of_hours, Err(AppError::InvalidTime(10, 22))),
            "expected InvalidTime for {time}"
        );
    }
    assert_eq!(reservation_count(&state).await?, before_count);

    // Update re-validates the time window.
    let bad_update = reservation_service::update_reservation(
        &state,
        first_id,
        update_request(customer_id, small_table, date, "23:00"),
    )
    .await;
    assert!(matches!(bad_update, Err(AppError::InvalidTime(10, 22))));

    // Update of a missing reservation is a 404.
    let missing = reservation_service::update_reservation(
        &state,
        i32::MAX,
        update_request(customer_id, small_table, date, "12:00"),
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // Delete works once, then 404s.
    reservation_service::delete_reservation(&state, second_id).await?;
    let gone = reservation_service::delete_reservation(&state, second_id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}

fn request(
    customer_id: i32,
    date: NaiveDate,
    time: &str,
    guest_count: i32,
    location: &str,
    status: Option<&str>,
) -> CreateReservationRequest {
    CreateReservationRequest {
        customer_id,
        reservation_date: date,
        reservation_time: time.to_string(),
        guest_count,
        location: location.to_string(),
        special_requests: None,
        status: status.map(|s| s.to_string()),
    }
}

fn update_request(
    customer_id: i32,
    table_id: i32,
    date: NaiveDate,
    time: &str,
) -> UpdateReservationRequest {
    UpdateReservationRequest {
        customer_id,
        table_id,
        reservation_date: date,
        reservation_time: time.to_string(),
        guest_count: 2,
        location: None,
        status: "confirmed".to_string(),
        special_requests: None,
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clear reservation state between runs; customer rows are reused.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE reviews, reservations, dining_tables RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState {
        pool,
        orm,
        hours: OperatingHours {
            opening: 10,
            closing: 22,
        },
    })
}

async fn ensure_customer(state: &AppState, first: &str, last: &str) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> =
        sqlx::query_as("SELECT id FROM customers WHERE first_name = $1 AND last_name = $2")
            .bind(first)
            .bind(last)
            .fetch_optional(&state.pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO customers (first_name, last_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(first)
    .bind(last)
    .fetch_one(&state.pool)
    .await?;
    Ok(id)
}

async fn create_table(
    state: &AppState,
    number: &str,
    capacity: i32,
    location: &str,
) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO dining_tables (table_number, capacity, location, status) VALUES ($1, $2, $3, 'available') RETURNING id",
    )
    .bind(number)
    .bind(capacity)
    .bind(location)
    .fetch_one(&state.pool)
    .await?;
    Ok(id)
}

async fn table_of(state: &AppState, reservation_id: i32) -> anyhow::Result<i32> {
    let (table_id,): (i32,) =
        sqlx::query_as("SELECT table_id FROM reservations WHERE id = $1")
            .bind(reservation_id)
            .fetch_one(&state.pool)
            .await?;
    Ok(table_id)
}

async fn reservation_count(state: &AppState) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM reservations")
        .fetch_one(&state.pool)
        .await?;
    Ok(count)
}
