//! Periodic status sweep: pending -> out-for-delivery -> delivered, each leg
//! after a fixed dwell time, with delivery rows trailing their orders.

use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::{
    db::OrmConn,
    entity::{
        deliveries::{Column as DeliveryCol, Entity as Deliveries},
        orders::{Column as OrderCol, Entity as Orders},
    },
    enums::{DeliveryStatus, OrderStatus},
    error::AppResult,
};

/// Dwell time before an order advances to the next stage.
pub const STATUS_ADVANCE_MINUTES: i64 = 2;

#[derive(Debug, Default)]
pub struct SweepOutcome {
    pub orders_dispatched: u64,
    pub deliveries_dispatched: u64,
    pub orders_delivered: u64,
    pub deliveries_delivered: u64,
}

impl SweepOutcome {
    pub fn total(&self) -> u64 {
        self.orders_dispatched
            + self.deliveries_dispatched
            + self.orders_delivered
            + self.deliveries_delivered
    }
}

/// One sweep pass. `now` is injected so tests can drive the state machine
/// without waiting on wall-clock timers. Reapplying a pass is a no-op: rows
/// stop matching their predicate once updated.
pub async fn run_tick<C: ConnectionTrait>(conn: &C, now: DateTime<Utc>) -> AppResult<SweepOutcome> {
    let cutoff = now - Duration::minutes(STATUS_ADVANCE_MINUTES);
    let mut outcome = SweepOutcome::default();

    // Stage 1: pending orders past the dwell time go out for delivery.
    // Cancelled orders never advance.
    let dispatched = Orders::update_many()
        .col_expr(
            OrderCol::OrderStatus,
            Expr::value(OrderStatus::OutForDelivery.as_str()),
        )
        .col_expr(OrderCol::StatusUpdatedAt, Expr::value(now))
        .filter(OrderCol::OrderStatus.is_not_in([
            OrderStatus::OutForDelivery.as_str(),
            OrderStatus::Delivered.as_str(),
            OrderStatus::Cancelled.as_str(),
        ]))
        .filter(OrderCol::CreatedAt.lte(cutoff))
        .exec(conn)
        .await?;
    outcome.orders_dispatched = dispatched.rows_affected;

    // Stage 2: deliveries follow their now-dispatched orders.
    let dispatched_orders = Query::select()
        .column(OrderCol::Id)
        .from(Orders)
        .and_where(
            Expr::col(OrderCol::OrderStatus).eq(OrderStatus::OutForDelivery.as_str()),
        )
        .to_owned();
    let deliveries_dispatched = Deliveries::update_many()
        .col_expr(
            DeliveryCol::DeliveryStatus,
            Expr::value(DeliveryStatus::OutForDelivery.as_str()),
        )
        .filter(DeliveryCol::DeliveryStatus.ne(DeliveryStatus::OutForDelivery.as_str()))
        .filter(DeliveryCol::OrderId.in_subquery(dispatched_orders))
        .exec(conn)
        .await?;
    outcome.deliveries_dispatched = deliveries_dispatched.rows_affected;

    // Stage 3: orders out for delivery past the dwell time are delivered.
    // An order dispatched in stage 1 of this same tick has status_updated_at
    // == now and cannot skip a stage.
    let delivered = Orders::update_many()
        .col_expr(
            OrderCol::OrderStatus,
            Expr::value(OrderStatus::Delivered.as_str()),
        )
        .col_expr(OrderCol::StatusUpdatedAt, Expr::value(now))
        .filter(OrderCol::OrderStatus.eq(OrderStatus::OutForDelivery.as_str()))
        .filter(OrderCol::StatusUpdatedAt.lte(cutoff))
        .exec(conn)
        .await?;
    outcome.orders_delivered = delivered.rows_affected;

    // Stage 4: deliveries follow, stamping delivered_time exactly once.
    let delivered_orders = Query::select()
        .column(OrderCol::Id)
        .from(Orders)
        .and_where(Expr::col(OrderCol::OrderStatus).eq(OrderStatus::Delivered.as_str()))
        .to_owned();
    let deliveries_delivered = Deliveries::update_many()
        .col_expr(
            DeliveryCol::DeliveryStatus,
            Expr::value(DeliveryStatus::Delivered.as_str()),
        )
        .col_expr(DeliveryCol::DeliveredTime, Expr::value(now))
        .filter(DeliveryCol::DeliveryStatus.ne(DeliveryStatus::Delivered.as_str()))
        .filter(DeliveryCol::OrderId.in_subquery(delivered_orders))
        .exec(conn)
        .await?;
    outcome.deliveries_delivered = deliveries_delivered.rows_affected;

    Ok(outcome)
}

/// Spawns the sweep loop. Tick failures are logged and the next tick retries.
pub fn spawn(orm: OrmConn, period: std::time::Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match run_tick(&orm, Utc::now()).await {
                Ok(outcome) if outcome.total() > 0 => {
                    tracing::info!(
                        orders_dispatched = outcome.orders_dispatched,
                        deliveries_dispatched = outcome.deliveries_dispatched,
                        orders_delivered = outcome.orders_delivered,
                        deliveries_delivered = outcome.deliveries_delivered,
                        "status sweep advanced rows"
                    );
                }
                Ok(_) => {
                    tracing::debug!("status sweep: nothing to advance");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "status sweep tick failed");
                }
            }
        }
    })
}
