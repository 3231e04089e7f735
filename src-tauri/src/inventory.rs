use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{CreateStockMovement, MovementType, Product, ProductStatus};

const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Normal,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        if self.quantity <= 0 {
            StockLevel::OutOfStock
        } else if self.quantity <= self.min_quantity {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }

    pub fn is_sellable(&self) -> bool {
        self.status == ProductStatus::Active && self.quantity > 0
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.sku.to_lowercase().contains(needle)
            || self
                .barcode
                .as_ref()
                .is_some_and(|b| b.to_lowercase().contains(needle))
    }
}

/// Products that can be put in a cart.
pub fn sellable(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(Product::is_sellable).collect()
}

/// Case-insensitive match on name, SKU or barcode; first ten hits.
/// A blank query returns the first ten products.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.matches(&needle))
        .take(SEARCH_LIMIT)
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StockSummary {
    pub total_value: Decimal,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub normal_stock: usize,
}

impl StockSummary {
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut summary, product| {
            summary.total_value += product.unit_price * Decimal::from(product.quantity);
            match product.stock_level() {
                StockLevel::OutOfStock => summary.out_of_stock += 1,
                StockLevel::Low => summary.low_stock += 1,
                StockLevel::Normal => summary.normal_stock += 1,
            }
            summary
        })
    }
}

/// Checks a movement before it is sent. `on_hand` is the last fetched quantity,
/// if known; the backend does the authoritative check.
pub fn validate_movement(movement: &CreateStockMovement, on_hand: Option<i32>) -> AppResult<()> {
    if movement.quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    if movement.movement_type == MovementType::Out {
        if let Some(available) = on_hand {
            if movement.quantity > available {
                return Err(AppError::InsufficientStock {
                    product: format!("product {}", movement.product_id),
                    available,
                });
            }
        }
    }
    Ok(())
}
