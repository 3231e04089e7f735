//! Sale checkout
//!
//! The cart is keyed by product and lives only for one checkout. Prices and
//! stock are snapshots taken when a product is first added; the backend
//! re-prices and re-checks stock when the sale is created.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::api::SaleService;
use crate::error::{AppError, AppResult};
use crate::models::{CreateSale, CreateSaleItem, PaymentMethod, PaymentStatus, Product, Sale};
use crate::money::percentage;

/// Classify a payment against the sale total.
pub fn payment_status(paid: Decimal, total: Decimal) -> PaymentStatus {
    if paid >= total {
        PaymentStatus::Paid
    } else if paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

pub fn item_profit(unit_price: Decimal, cost_price: Decimal, quantity: i32) -> Decimal {
    (unit_price - cost_price) * Decimal::from(quantity)
}

/// Margin over the selling price, in percent. Negative when sold below cost.
pub fn item_margin(unit_price: Decimal, cost_price: Decimal) -> Decimal {
    percentage(unit_price - cost_price, unit_price)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartItem {
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub available_stock: i32,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl CartItem {
    fn from_product(product: &Product) -> Self {
        let mut item = Self {
            product_id: product.id,
            product_name: product.name.clone(),
            product_sku: product.sku.clone(),
            unit_price: product.unit_price,
            cost_price: product.cost_price,
            available_stock: product.quantity,
            quantity: 1,
            subtotal: Decimal::ZERO,
        };
        item.recompute();
        item
    }

    fn recompute(&mut self) {
        self.subtotal = self.unit_price * Decimal::from(self.quantity);
    }

    fn insufficient_stock(&self) -> AppError {
        AppError::InsufficientStock {
            product: self.product_name.clone(),
            available: self.available_stock,
        }
    }

    pub fn profit(&self) -> Decimal {
        item_profit(self.unit_price, self.cost_price, self.quantity)
    }

    pub fn margin(&self) -> Decimal {
        item_margin(self.unit_price, self.cost_price)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Add one unit of `product`, appending a line the first time it is seen.
    pub fn add_product(&mut self, product: &Product) -> AppResult<&CartItem> {
        if let Some(index) = self.position(product.id) {
            let item = &mut self.items[index];
            if item.quantity + 1 > item.available_stock {
                tracing::warn!(product_id = product.id, "Add rejected: insufficient stock");
                return Err(item.insufficient_stock());
            }
            item.quantity += 1;
            item.recompute();
            return Ok(&self.items[index]);
        }

        let item = CartItem::from_product(product);
        if item.available_stock < 1 {
            return Err(item.insufficient_stock());
        }
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Set a line's quantity. Anything below 1 removes the line.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i32) -> AppResult<()> {
        if quantity < 1 {
            self.remove(product_id);
            return Ok(());
        }
        let Some(index) = self.position(product_id) else {
            return Ok(());
        };
        let item = &mut self.items[index];
        if quantity > item.available_stock {
            tracing::warn!(product_id, quantity, "Update rejected: insufficient stock");
            return Err(item.insufficient_stock());
        }
        item.quantity = quantity;
        item.recompute();
        Ok(())
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, product_id: i64) -> bool {
        match self.position(product_id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(|item| item.subtotal).sum()
    }

    pub fn amount_due(&self, paid: Decimal) -> Decimal {
        (self.total_amount() - paid).max(Decimal::ZERO)
    }

    pub fn change(&self, paid: Decimal) -> Decimal {
        (paid - self.total_amount()).max(Decimal::ZERO)
    }

    pub fn total_profit(&self) -> Decimal {
        self.items.iter().map(CartItem::profit).sum()
    }

    fn position(&self, product_id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.product_id == product_id)
    }
}

/// Payment and customer fields entered alongside the cart.
#[derive(Debug, Clone, Serialize, serde::Deserialize, PartialEq)]
pub struct SaleForm {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self {
            customer_name: None,
            customer_phone: None,
            payment_method: Some(PaymentMethod::Cash),
            amount_paid: Decimal::ZERO,
            notes: None,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Derived figures shown next to the cart. Recomputed on every read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutTotals {
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub amount_due: Decimal,
    pub change: Decimal,
    pub payment_status: PaymentStatus,
    pub total_profit: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Checkout {
    cart: Cart,
    form: SaleForm,
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &SaleForm {
        &self.form
    }

    pub fn set_form(&mut self, form: SaleForm) {
        self.form = form;
    }

    /// Adds to the cart; an untouched amount paid follows the new total.
    pub fn add_product(&mut self, product: &Product) -> AppResult<()> {
        self.cart.add_product(product)?;
        if self.form.amount_paid.is_zero() {
            self.form.amount_paid = self.cart.total_amount();
        }
        Ok(())
    }

    pub fn update_quantity(&mut self, product_id: i64, quantity: i32) -> AppResult<()> {
        self.cart.update_quantity(product_id, quantity)
    }

    pub fn remove(&mut self, product_id: i64) -> bool {
        self.cart.remove(product_id)
    }

    pub fn payment_status(&self) -> PaymentStatus {
        payment_status(self.form.amount_paid, self.cart.total_amount())
    }

    pub fn totals(&self) -> CheckoutTotals {
        let paid = self.form.amount_paid;
        CheckoutTotals {
            total_amount: self.cart.total_amount(),
            amount_paid: paid,
            amount_due: self.cart.amount_due(paid),
            change: self.cart.change(paid),
            payment_status: self.payment_status(),
            total_profit: self.cart.total_profit(),
        }
    }

    /// Build the sale request. Prices and costs are left to the backend.
    pub fn build_request(&self) -> AppResult<CreateSale> {
        if self.cart.is_empty() {
            return Err(AppError::validation("Add at least one product"));
        }
        let Some(payment_method) = self.form.payment_method else {
            return Err(AppError::validation("Payment method is required"));
        };
        if self.form.amount_paid < Decimal::ZERO {
            return Err(AppError::validation("Amount paid cannot be negative"));
        }

        Ok(CreateSale {
            customer_name: non_blank(&self.form.customer_name),
            customer_phone: non_blank(&self.form.customer_phone),
            payment_method,
            payment_status: self.payment_status(),
            amount_paid: self.form.amount_paid,
            notes: non_blank(&self.form.notes),
            items: self
                .cart
                .items()
                .iter()
                .map(|item| CreateSaleItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        })
    }

    /// Create the sale. The cart is cleared only once the backend accepts it.
    pub async fn submit<S>(&mut self, service: &S) -> AppResult<Sale>
    where
        S: SaleService + ?Sized,
    {
        let request = self.build_request()?;
        tracing::info!(
            lines = request.items.len(),
            status = ?request.payment_status,
            "Submitting sale"
        );
        let sale = service.create_sale(&request).await?;
        self.cart.clear();
        self.form = SaleForm::default();
        Ok(sale)
    }
}

/// Profit figures for a recorded sale.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaleSummary {
    pub total_profit: Decimal,
    pub margin_percentage: Decimal,
    pub item_count: i32,
}

pub fn sale_summary(sale: &Sale) -> SaleSummary {
    let total_profit: Decimal = sale
        .items
        .iter()
        .map(|item| item_profit(item.unit_price, item.cost_price, item.quantity))
        .sum();
    let revenue: Decimal = sale.items.iter().map(|item| item.subtotal).sum();
    SaleSummary {
        total_profit,
        margin_percentage: percentage(total_profit, revenue),
        item_count: sale.items.iter().map(|item| item.quantity).sum(),
    }
}
