use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============ Envelopes ============

/// Paged listing as returned by the backend (`{ data, total }`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Page<T> {
    #[serde(rename = "data", alias = "items")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: i64,
}

/// Wrapper used by the order and sale endpoints (`{ success, data, message }`).
#[derive(Debug, Deserialize, Clone)]
pub struct Envelope<T> {
    #[serde(default = "default_true")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

/// Paging and search for the category and supplier listings.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

// ============ Catalog ============

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub status: RecordStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub contact_person: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SupplierInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Discontinued,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub barcode: Option<String>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    /// Quantity on hand.
    pub quantity: i32,
    #[serde(default)]
    pub min_quantity: i32,
    pub max_quantity: Option<i32>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: ProductStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

// ============ Stock movements ============

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StockMovement {
    pub id: i64,
    pub product_id: i64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateStockMovement {
    pub product_id: i64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MovementFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub movement_type: Option<MovementType>,
}

// ============ Purchase orders ============

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Pending,
    Confirmed,
    PartiallyReceived,
    Received,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrderItem {
    pub id: i64,
    pub product_id: i64,
    pub product: Option<Product>,
    pub quantity_ordered: i32,
    pub quantity_received: i32,
    pub unit_price: Decimal,
}

impl PurchaseOrderItem {
    pub fn remaining(&self) -> i32 {
        self.quantity_ordered - self.quantity_received
    }

    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity_ordered)
    }

    pub fn product_name(&self) -> &str {
        self.product.as_ref().map(|p| p.name.as_str()).unwrap_or("N/A")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrder {
    pub id: i64,
    pub reference: String,
    pub supplier_id: i64,
    pub supplier: Option<Supplier>,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub actual_delivery_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub items: Vec<PurchaseOrderItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrderLineInput {
    pub product_id: i64,
    pub quantity_ordered: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrderInput {
    pub reference: String,
    pub supplier_id: Option<i64>,
    pub order_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<PurchaseOrderLineInput>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PurchaseOrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReceiveItemData {
    pub item_id: i64,
    pub quantity_received: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReceivePurchaseOrderRequest {
    pub items: Vec<ReceiveItemData>,
    pub actual_delivery_date: NaiveDate,
}

// ============ Sales ============

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    MobileMoney,
    Card,
    Credit,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Pending,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Sale {
    pub id: i64,
    pub sale_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount_paid: Decimal,
    pub amount_due: Decimal,
    pub notes: Option<String>,
    pub sale_date: Option<String>,
    pub status: SaleStatus,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateSaleItem {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateSale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount_paid: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<CreateSaleItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Week,
    Month,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SaleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleStatistics {
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub average_sale: Decimal,
}
