use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub customer_id: i32,
    pub reservation_date: NaiveDate,
    /// "HH:MM" wall-clock time within operating hours.
    pub reservation_time: String,
    pub guest_count: i32,
    pub location: String,
    pub special_requests: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    pub customer_id: i32,
    pub table_id: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    pub guest_count: i32,
    pub location: Option<String>,
    pub status: String,
    pub special_requests: Option<String>,
}
