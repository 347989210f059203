//! Status and role vocabularies shared by every validation site.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "out-for-delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(AppError::BadRequest(format!(
                "Invalid order status '{other}'. Must be one of: pending, out-for-delivery, delivered, cancelled"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    OutForDelivery,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::OutForDelivery => "out-for-delivery",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "pending" => Ok(DeliveryStatus::Pending),
            "out-for-delivery" => Ok(DeliveryStatus::OutForDelivery),
            "delivered" => Ok(DeliveryStatus::Delivered),
            "failed" => Ok(DeliveryStatus::Failed),
            other => Err(AppError::BadRequest(format!(
                "Invalid delivery status '{other}'. Must be one of: pending, out-for-delivery, delivered, failed"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeRole {
    Manager,
    Waiter,
    Chef,
    DeliveryAgent,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Manager => "manager",
            EmployeeRole::Waiter => "waiter",
            EmployeeRole::Chef => "chef",
            EmployeeRole::DeliveryAgent => "delivery agent",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "manager" => Ok(EmployeeRole::Manager),
            "waiter" => Ok(EmployeeRole::Waiter),
            "chef" => Ok(EmployeeRole::Chef),
            "delivery agent" => Ok(EmployeeRole::DeliveryAgent),
            other => Err(AppError::BadRequest(format!(
                "Invalid role '{other}'. Must be one of: manager, waiter, chef, delivery agent"
            ))),
        }
    }
}

/// The only order type the kitchen currently accepts.
pub const ORDER_TYPE_HOME_DELIVERY: &str = "home-delivery";

/// Reservation status that blocks a (date, time, table) slot for the matcher.
pub const RESERVATION_CONFIRMED: &str = "confirmed";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips() {
        for s in ["pending", "out-for-delivery", "delivered", "cancelled"] {
            assert_eq!(OrderStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(OrderStatus::parse("shipped").is_err());
    }

    #[test]
    fn employee_role_accepts_two_word_role() {
        assert_eq!(
            EmployeeRole::parse("delivery agent").unwrap(),
            EmployeeRole::DeliveryAgent
        );
        assert!(EmployeeRole::parse("driver").is_err());
    }
}
