use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub customer_id: i32,
    pub table_id: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guest_count: i32,
    pub location: String,
    pub status: String,
    pub special_requests: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DiningTable {
    pub id: i32,
    pub reservation_id: Option<i32>,
    pub table_number: String,
    pub capacity: i32,
    pub location: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub availability: bool,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub order_type: String,
    pub delivery_address: String,
    pub total_amount: i64,
    pub order_status: String,
    pub status_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub price: i64,
}

/// Order item joined with its menu row, for the nested items listing.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItemDetail {
    pub id: i32,
    pub order_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub price: i64,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone_number: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: i64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Delivery {
    pub id: i32,
    pub order_id: i32,
    pub delivery_agent_id: i32,
    pub estimated_time: DateTime<Utc>,
    pub delivered_time: Option<DateTime<Utc>>,
    pub delivery_status: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    pub payment_method: String,
    pub amount: i64,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub customer_id: i32,
    pub order_id: Option<i32>,
    pub reservation_id: Option<i32>,
    pub rating: i32,
    pub comment: String,
}
