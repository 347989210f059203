use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, Statement,
    TransactionTrait,
};

use crate::{
    dto::orders::{
        CreateOrderRequest, NewOrderItem, OrderItemsCreated, PatchOrderStatusRequest,
        UpdateOrderRequest,
    },
    entity::{
        customers::{Column as CustomerCol, Entity as Customers},
        order_items::{ActiveModel as OrderItemActive, Model as OrderItemModel},
        orders::{ActiveModel as OrderActive, Entity as Orders},
    },
    enums::{ORDER_TYPE_HOME_DELIVERY, OrderStatus},
    error::{AppError, AppResult},
    models::OrderItem,
    response::{ApiResponse, Meta, ResourceId},
    state::AppState,
};

/// Splits a free-form "First Last" name. The lookup is an exact match on both
/// parts; duplicate names resolve to whichever row the database returns first.
fn split_customer_name(raw: &str) -> AppResult<(String, String)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Customer name is required.".into()));
    }
    let mut parts = trimmed.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return Err(AppError::BadRequest(
            "Please enter both first and last name.".into(),
        ));
    }
    Ok((first, rest.join(" ")))
}

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<ResourceId>> {
    let (first_name, last_name) = split_customer_name(&payload.customer_name)?;

    let customer = Customers::find()
        .filter(CustomerCol::FirstName.eq(first_name))
        .filter(CustomerCol::LastName.eq(last_name))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let order = OrderActive {
        customer_id: Set(customer.id),
        order_type: Set(ORDER_TYPE_HOME_DELIVERY.into()),
        delivery_address: Set(payload.delivery_address),
        total_amount: Set(payload.total_amount),
        order_status: Set(OrderStatus::Pending.as_str().into()),
        status_updated_at: Set(None),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(order_id = order.id, customer_id = customer.id, "order created");

    Ok(ApiResponse::success(
        "Order added",
        ResourceId { id: order.id },
        Some(Meta::empty()),
    ))
}

/// Full replace. Only 'home-delivery' orders exist; an absent or unknown
/// status silently falls back to 'pending', matching the frontend contract.
pub async fn update_order(
    state: &AppState,
    id: i32,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<ResourceId>> {
    if payload.order_type != ORDER_TYPE_HOME_DELIVERY {
        return Err(AppError::BadRequest(
            "Invalid order type. Only 'home-delivery' is allowed.".into(),
        ));
    }

    let status = payload
        .order_status
        .as_deref()
        .and_then(|s| OrderStatus::parse(s).ok())
        .unwrap_or(OrderStatus::Pending);

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.customer_id = Set(payload.customer_id);
    active.order_type = Set(payload.order_type);
    active.delivery_address = Set(payload.delivery_address);
    active.total_amount = Set(payload.total_amount);
    active.order_status = Set(status.as_str().into());
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Order updated successfully!",
        ResourceId { id: updated.id },
        Some(Meta::empty()),
    ))
}

/// Status-only transition. Any valid status may follow any other here; only
/// the sweep is constrained to move forward.
pub async fn patch_order_status(
    state: &AppState,
    id: i32,
    payload: PatchOrderStatusRequest,
) -> AppResult<ApiResponse<ResourceId>> {
    let status = OrderStatus::parse(&payload.order_status)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.order_status = Set(status.as_str().into());
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Order status updated successfully!",
        ResourceId { id: updated.id },
        Some(Meta::empty()),
    ))
}

/// Sets `total_amount` to the sum of the order's current line items.
pub async fn recompute_order_total<C: ConnectionTrait>(conn: &C, order_id: i32) -> AppResult<()> {
    let backend = conn.get_database_backend();
    conn.execute(Statement::from_sql_and_values(
        backend,
        r#"
        UPDATE orders
        SET total_amount = COALESCE((
            SELECT SUM(price * quantity)
            FROM order_items
            WHERE order_id = $1
        ), 0)
        WHERE id = $1
        "#,
        [order_id.into()],
    ))
    .await?;
    Ok(())
}

/// Batch insert of order line items. Every insert and the trailing total
/// recomputation run in one transaction; any failure rolls all of it back.
pub async fn add_order_items(
    state: &AppState,
    order_id: i32,
    items: Vec<NewOrderItem>,
) -> AppResult<ApiResponse<OrderItemsCreated>> {
    if items.is_empty() {
        return Err(AppError::BadRequest(
            "Request body must be an array of order items".into(),
        ));
    }

    let txn = state.orm.begin().await?;

    Orders::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut created: Vec<OrderItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity <= 0 {
            return Err(AppError::BadRequest(
                "Each item must contain menu_id, quantity, and price".into(),
            ));
        }

        let inserted = OrderItemActive {
            order_id: Set(order_id),
            menu_id: Set(item.menu_id),
            quantity: Set(item.quantity),
            price: Set(item.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        created.push(order_item_from_entity(inserted));
    }

    recompute_order_total(&txn, order_id).await?;

    txn.commit().await?;

    tracing::info!(order_id, count = created.len(), "order items added");

    let count = created.len();
    Ok(ApiResponse::success(
        format!("Added {count} items to order {order_id}"),
        OrderItemsCreated { items: created },
        Some(Meta::empty()),
    ))
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        menu_id: model.menu_id,
        quantity: model.quantity,
        price: model.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_first_and_last_name() {
        let (first, last) = split_customer_name("Ada Lovelace").unwrap();
        assert_eq!(first, "Ada");
        assert_eq!(last, "Lovelace");
    }

    #[test]
    fn middle_names_fold_into_the_last_name() {
        let (first, last) = split_customer_name("  Anne Marie  O'Neill ").unwrap();
        assert_eq!(first, "Anne");
        assert_eq!(last, "Marie O'Neill");
    }

    #[test]
    fn rejects_missing_or_single_word_names() {
        assert!(split_customer_name("").is_err());
        assert!(split_customer_name("   ").is_err());
        assert!(split_customer_name("Plato").is_err());
    }
}
