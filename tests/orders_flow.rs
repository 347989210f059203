use axum_restaurant_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{
        CreateOrderRequest, NewOrderItem, PatchOrderStatusRequest, UpdateOrderRequest,
    },
    error::AppError,
    services::{order_service, sweep},
    state::{AppState, OperatingHours},
};
use chrono::Utc;
use sea_orm::{ConnectionTrait, Statement};

// Integration flow: order creation by customer name, the transactional batch
// item writer, and the timed status sweep. Requires a database; skipped
// otherwise.
#[tokio::test]
async fn order_items_and_status_sweep_flow() -> anyhow::Result<()> {
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

    ensure_customer(&state, "Taha", "Rehman").await?;
    let agent_id = ensure_agent(&state).await?;
    let pizza = ensure_menu_item(&state, "Flow Test Pizza", 10).await?;
    let salad = ensure_menu_item(&state, "Flow Test Salad", 5).await?;

    // Name lookup: unknown customers are a 404, one-word names a 400.
    let unknown = order_service::create_order(&state, order_request("Nobody Known")).await;
    assert!(matches!(unknown, Err(AppError::NotFound)));
    let one_word = order_service::create_order(&state, order_request("Taha")).await;
    assert!(matches!(one_word, Err(AppError::BadRequest(_))));

    let created = order_service::create_order(&state, order_request("Taha Rehman")).await?;
    let order_id = created.data.unwrap().id;
    assert_eq!(order_status(&state, order_id).await?, "pending");

    // Batch writer: both items land and the total is recomputed.
    let batch = order_service::add_order_items(
        &state,
        order_id,
        vec![
            NewOrderItem {
                menu_id: pizza,
                quantity: 2,
                price: 10,
            },
            NewOrderItem {
                menu_id: salad,
                quantity: 1,
                price: 5,
            },
        ],
    )
    .await?;
    assert_eq!(batch.data.unwrap().items.len(), 2);
    assert_eq!(order_total(&state, order_id).await?, 25);

    // A bad item anywhere in the batch rolls the whole batch back.
    let bad_batch = order_service::add_order_items(
        &state,
        order_id,
        vec![
            NewOrderItem {
                menu_id: pizza,
                quantity: 1,
                price: 10,
            },
            NewOrderItem {
                menu_id: salad,
                quantity: 0,
                price: 5,
            },
        ],
    )
    .await;
    assert!(matches!(bad_batch, Err(AppError::BadRequest(_))));
    assert_eq!(item_count(&state, order_id).await?, 2);
    assert_eq!(order_total(&state, order_id).await?, 25);

    // Empty batches and missing orders are rejected up front.
    let empty = order_service::add_order_items(&state, order_id, vec![]).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));
    let no_order = order_service::add_order_items(
        &state,
        i32::MAX,
        vec![NewOrderItem {
            menu_id: pizza,
            quantity: 1,
            price: 10,
        }],
    )
    .await;
    assert!(matches!(no_order, Err(AppError::NotFound)));

    // PUT rejects anything but home-delivery and falls back to pending on an
    // unknown status.
    let wrong_type = order_service::update_order(
        &state,
        order_id,
        UpdateOrderRequest {
            customer_id: customer_id_of(&state, order_id).await?,
            order_type: "dine-in".into(),
            delivery_address: "12 Fig St".into(),
            total_amount: 25,
            order_status: Some("pending".into()),
        },
    )
    .await;
    assert!(matches!(wrong_type, Err(AppError::BadRequest(_))));

    order_service::update_order(
        &state,
        order_id,
        UpdateOrderRequest {
            customer_id: customer_id_of(&state, order_id).await?,
            order_type: "home-delivery".into(),
            delivery_address: "12 Fig St".into(),
            total_amount: 25,
            order_status: Some("no-such-status".into()),
        },
    )
    .await?;
    assert_eq!(order_status(&state, order_id).await?, "pending");

    // PATCH validates the status vocabulary.
    let bad_patch = order_service::patch_order_status(
        &state,
        order_id,
        PatchOrderStatusRequest {
            order_status: "shipped".into(),
        },
    )
    .await;
    assert!(matches!(bad_patch, Err(AppError::BadRequest(_))));

    // Attach a delivery so the sweep has a row to trail.
    let delivery_id = create_delivery(&state, order_id, agent_id).await?;

    // Fresh order: the first tick must not move it.
    sweep::run_tick(&state.orm, Utc::now()).await?;
    assert_eq!(order_status(&state, order_id).await?, "pending");

    // Aged past the dwell time, it goes out for delivery and the delivery
    // row follows.
    backdate_created_at(&state, order_id, 3).await?;
    sweep::run_tick(&state.orm, Utc::now()).await?;
    assert_eq!(order_status(&state, order_id).await?, "out-for-delivery");
    assert_eq!(delivery_status(&state, delivery_id).await?, "out-for-delivery");
    assert!(delivered_time(&state, delivery_id).await?.is_none());

    // Still within the second dwell: no change.
    sweep::run_tick(&state.orm, Utc::now()).await?;
    assert_eq!(order_status(&state, order_id).await?, "out-for-delivery");

    // Aged again: delivered, and delivered_time is stamped.
    backdate_status_updated_at(&state, order_id, 3).await?;
    sweep::run_tick(&state.orm, Utc::now()).await?;
    assert_eq!(order_status(&state, order_id).await?, "delivered");
    assert_eq!(delivery_status(&state, delivery_id).await?, "delivered");
    assert!(delivered_time(&state, delivery_id).await?.is_some());

    // A cancelled order is never advanced, no matter how old.
    let cancelled = order_service::create_order(&state, order_request("Taha Rehman")).await?;
    let cancelled_id = cancelled.data.unwrap().id;
    order_service::patch_order_status(
        &state,
        cancelled_id,
        PatchOrderStatusRequest {
            order_status: "cancelled".into(),
        },
    )
    .await?;
    backdate_created_at(&state, cancelled_id, 10).await?;
    sweep::run_tick(&state.orm, Utc::now()).await?;
    assert_eq!(order_status(&state, cancelled_id).await?, "cancelled");

    Ok(())
}

// The wire contract requires every batch item to carry all three fields; a
// missing one fails deserialization before any handler runs.
#[test]
fn batch_item_requires_all_fields() {
    let missing_price = r#"[{"menu_id": 1, "quantity": 2}]"#;
    assert!(serde_json::from_str::<Vec<NewOrderItem>>(missing_price).is_err());

    let complete = r#"[{"menu_id": 1, "quantity": 2, "price": 10}]"#;
    let items = serde_json::from_str::<Vec<NewOrderItem>>(complete).unwrap();
    assert_eq!(items.len(), 1);
}

fn order_request(customer_name: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: customer_name.to_string(),
        delivery_address: "42 Elm Street".to_string(),
        total_amount: 0,
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clear order state between runs; customer/menu/employee rows are reused.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, deliveries, payments, reviews, orders RESTART IDENTITY CASCADE",
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

async fn ensure_agent(state: &AppState) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> =
        sqlx::query_as("SELECT id FROM employees WHERE email = 'sweep-agent@example.com'")
            .fetch_optional(&state.pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO employees (first_name, last_name, role, phone_number, email, hire_date, salary)
        VALUES ('Sweep', 'Agent', 'delivery agent', '+1-555-0000', 'sweep-agent@example.com', '2024-01-01'::date, 300000)
        RETURNING id
        "#,
    )
    .fetch_one(&state.pool)
    .await?;
    Ok(id)
}

async fn ensure_menu_item(state: &AppState, name: &str, price: i64) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM menu WHERE name = $1")
        .bind(name)
        .fetch_optional(&state.pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO menu (name, description, price, category) VALUES ($1, NULL, $2, 'test') RETURNING id",
    )
    .bind(name)
    .bind(price)
    .fetch_one(&state.pool)
    .await?;
    Ok(id)
}

async fn create_delivery(state: &AppState, order_id: i32, agent_id: i32) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO deliveries (order_id, delivery_agent_id, estimated_time, delivery_status)
        VALUES ($1, $2, now() + interval '30 minutes', 'pending')
        RETURNING id
        "#,
    )
    .bind(order_id)
    .bind(agent_id)
    .fetch_one(&state.pool)
    .await?;
    Ok(id)
}

async fn backdate_created_at(state: &AppState, order_id: i32, minutes: i32) -> anyhow::Result<()> {
    sqlx::query("UPDATE orders SET created_at = now() - ($2 * interval '1 minute') WHERE id = $1")
        .bind(order_id)
        .bind(minutes)
        .execute(&state.pool)
        .await?;
    Ok(())
}

async fn backdate_status_updated_at(
    state: &AppState,
    order_id: i32,
    minutes: i32,
) -> anyhow::Result<()> {
    sqlx::query(
        "UPDATE orders SET status_updated_at = now() - ($2 * interval '1 minute') WHERE id = $1",
    )
    .bind(order_id)
    .bind(minutes)
    .execute(&state.pool)
    .await?;
    Ok(())
}

async fn order_status(state: &AppState, order_id: i32) -> anyhow::Result<String> {
    let (status,): (String,) = sqlx::query_as("SELECT order_status FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_one(&state.pool)
        .await?;
    Ok(status)
}

async fn order_total(state: &AppState, order_id: i32) -> anyhow::Result<i64> {
    let (total,): (i64,) = sqlx::query_as("SELECT total_amount FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_one(&state.pool)
        .await?;
    Ok(total)
}

async fn customer_id_of(state: &AppState, order_id: i32) -> anyhow::Result<i32> {
    let (customer_id,): (i32,) =
        sqlx::query_as("SELECT customer_id FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_one(&state.pool)
            .await?;
    Ok(customer_id)
}

async fn item_count(state: &AppState, order_id: i32) -> anyhow::Result<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT count(*) FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(&state.pool)
            .await?;
    Ok(count)
}

async fn delivery_status(state: &AppState, delivery_id: i32) -> anyhow::Result<String> {
    let (status,): (String,) =
        sqlx::query_as("SELECT delivery_status FROM deliveries WHERE id = $1")
            .bind(delivery_id)
            .fetch_one(&state.pool)
            .await?;
    Ok(status)
}

async fn delivered_time(
    state: &AppState,
    delivery_id: i32,
) -> anyhow::Result<Option<chrono::DateTime<Utc>>> {
    let (time,): (Option<chrono::DateTime<Utc>>,) =
        sqlx::query_as("SELECT delivered_time FROM deliveries WHERE id = $1")
            .bind(delivery_id)
            .fetch_one(&state.pool)
            .await?;
    Ok(time)
}
