use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::OrderItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Full customer name, "First Last"; resolved against the customers table.
    pub customer_name: String,
    pub delivery_address: String,
    #[serde(default)]
    pub total_amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub customer_id: i32,
    pub order_type: String,
    pub delivery_address: String,
    pub total_amount: i64,
    pub order_status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchOrderStatusRequest {
    pub order_status: String,
}

/// One line of a batch insert. All three fields are required; a missing field
/// fails deserialization before anything touches the database.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrderItem {
    pub menu_id: i32,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemsCreated {
    pub items: Vec<OrderItem>,
}
