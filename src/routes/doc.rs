use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{
            CreateOrderRequest, NewOrderItem, OrderItemsCreated, PatchOrderStatusRequest,
            UpdateOrderRequest,
        },
        reservations::{CreateReservationRequest, UpdateReservationRequest},
    },
    models::{
        Customer, Delivery, DiningTable, Employee, MenuItem, Order, OrderItem, OrderItemDetail,
        Payment, Reservation, Review,
    },
    response::{ApiResponse, Meta, ResourceId},
    routes::{
        customers, deliveries, employees, health, menu, order_items, orders, payments,
        reservations, reviews, tables,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::patch_order_status,
        orders::delete_order,
        orders::list_order_items,
        orders::add_order_items,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        menu::list_menu,
        menu::get_menu_item,
        menu::create_menu_item,
        menu::update_menu_item,
        menu::delete_menu_item,
        tables::list_tables,
        tables::get_table,
        tables::create_table,
        tables::update_table,
        tables::delete_table,
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        deliveries::list_deliveries,
        deliveries::get_delivery,
        deliveries::create_delivery,
        deliveries::update_delivery,
        deliveries::delete_delivery,
        order_items::list_order_items,
        order_items::get_order_item,
        order_items::create_order_item,
        order_items::update_order_item,
        order_items::delete_order_item,
        payments::list_payments,
        payments::get_payment,
        payments::create_payment,
        payments::update_payment,
        payments::delete_payment,
        reviews::list_reviews,
        reviews::get_review,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
    ),
    components(
        schemas(
            Customer,
            Reservation,
            DiningTable,
            MenuItem,
            Order,
            OrderItem,
            OrderItemDetail,
            Employee,
            Delivery,
            Payment,
            Review,
            CreateReservationRequest,
            UpdateReservationRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            PatchOrderStatusRequest,
            NewOrderItem,
            OrderItemsCreated,
            customers::CustomerRequest,
            customers::CustomerCreated,
            customers::CustomerList,
            reservations::ReservationList,
            orders::OrderList,
            orders::OrderItemDetailList,
            menu::MenuItemRequest,
            menu::MenuList,
            tables::DiningTableRequest,
            tables::DiningTableList,
            employees::EmployeeRequest,
            employees::EmployeeList,
            deliveries::DeliveryRequest,
            deliveries::DeliveryList,
            order_items::OrderItemRequest,
            order_items::OrderItemList,
            payments::PaymentRequest,
            payments::PaymentList,
            reviews::ReviewRequest,
            reviews::ReviewList,
            Meta,
            ResourceId,
            ApiResponse<ResourceId>,
            ApiResponse<Reservation>,
            ApiResponse<Order>,
            ApiResponse<OrderItemsCreated>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Reservations", description = "Reservation booking and table assignment"),
        (name = "Orders", description = "Order lifecycle and line items"),
        (name = "Customers", description = "Customer records"),
        (name = "Menu", description = "Menu items"),
        (name = "Tables", description = "Dining tables"),
        (name = "Employees", description = "Staff records"),
        (name = "Deliveries", description = "Delivery tracking"),
        (name = "OrderItems", description = "Individual order line items"),
        (name = "Payments", description = "Payment records"),
        (name = "Reviews", description = "Customer reviews"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
