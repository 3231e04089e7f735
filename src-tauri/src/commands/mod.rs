pub mod categories;
pub mod products;
pub mod purchase_orders;
pub mod sales;
pub mod stock;
pub mod suppliers;
