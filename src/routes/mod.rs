use axum::Router;

use crate::state::AppState;

pub mod customers;
pub mod deliveries;
pub mod doc;
pub mod employees;
pub mod health;
pub mod menu;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod reservations;
pub mod reviews;
pub mod tables;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/reservations", reservations::router())
        .nest("/orders", orders::router())
        .nest("/customers", customers::router())
        .nest("/menu", menu::router())
        // Kept under the legacy "tabless" path the frontend calls.
        .nest("/tabless", tables::router())
        .nest("/employees", employees::router())
        .nest("/deliveries", deliveries::router())
        .nest("/orderitems", order_items::router())
        .nest("/payments", payments::router())
        .nest("/reviews", reviews::router())
}
