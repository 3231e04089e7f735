//! Backend services
//!
//! `ApiClient` speaks to the REST backend. The service traits are the seams the
//! checkout and receiving workflows depend on.

mod catalog;
mod client;
mod purchase_orders;
mod sales;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{
    CreateSale, Page, Product, ProductFilter, PurchaseOrder, ReceivePurchaseOrderRequest, Sale,
};

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_products(&self, filter: &ProductFilter) -> ApiResult<Page<Product>>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn purchase_order(&self, id: i64) -> ApiResult<PurchaseOrder>;

    async fn receive(
        &self,
        order_id: i64,
        request: &ReceivePurchaseOrderRequest,
    ) -> ApiResult<PurchaseOrder>;
}

#[async_trait]
pub trait SaleService: Send + Sync {
    async fn create_sale(&self, request: &CreateSale) -> ApiResult<Sale>;
}
