pub mod customers;
pub mod deliveries;
pub mod dining_tables;
pub mod order_items;
pub mod orders;
pub mod reservations;

pub use customers::Entity as Customers;
pub use deliveries::Entity as Deliveries;
pub use dining_tables::Entity as DiningTables;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use reservations::Entity as Reservations;
