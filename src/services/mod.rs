pub mod order_service;
pub mod reservation_service;
pub mod sweep;
