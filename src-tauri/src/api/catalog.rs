use async_trait::async_trait;

use super::{ApiClient, CatalogService};
use crate::error::ApiResult;
use crate::models::{
    Category, CategoryInput, CreateStockMovement, ListFilter, MovementFilter, Page, Product, ProductFilter,
    ProductInput, StockMovement, Supplier, SupplierInput,
};

impl ApiClient {
    // ============ Products ============

    pub async fn product(&self, id: i64) -> ApiResult<Product> {
        self.get(&format!("products/{}", id)).await
    }

    pub async fn create_product(&self, product: &ProductInput) -> ApiResult<Product> {
        self.post("products", product).await
    }

    pub async fn update_product(&self, id: i64, product: &ProductInput) -> ApiResult<Product> {
        self.put(&format!("products/{}", id), product).await
    }

    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("products/{}", id)).await
    }

    pub async fn low_stock_products(&self) -> ApiResult<Vec<Product>> {
        self.get("products/low-stock").await
    }

    // ============ Categories ============

    pub async fn list_categories(&self, filter: &ListFilter) -> ApiResult<Page<Category>> {
        self.get_query("categories", filter).await
    }

    pub async fn category(&self, id: i64) -> ApiResult<Category> {
        self.get(&format!("categories/{}", id)).await
    }

    pub async fn create_category(&self, category: &CategoryInput) -> ApiResult<Category> {
        self.post("categories", category).await
    }

    pub async fn update_category(&self, id: i64, category: &CategoryInput) -> ApiResult<Category> {
        self.put(&format!("categories/{}", id), category).await
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("categories/{}", id)).await
    }

    // ============ Suppliers ============

    pub async fn list_suppliers(&self, filter: &ListFilter) -> ApiResult<Page<Supplier>> {
        self.get_query("suppliers", filter).await
    }

    pub async fn supplier(&self, id: i64) -> ApiResult<Supplier> {
        self.get(&format!("suppliers/{}", id)).await
    }

    pub async fn create_supplier(&self, supplier: &SupplierInput) -> ApiResult<Supplier> {
        self.post("suppliers", supplier).await
    }

    pub async fn update_supplier(&self, id: i64, supplier: &SupplierInput) -> ApiResult<Supplier> {
        self.put(&format!("suppliers/{}", id), supplier).await
    }

    pub async fn delete_supplier(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("suppliers/{}", id)).await
    }

    // ============ Stock movements ============

    pub async fn list_movements(&self, filter: &MovementFilter) -> ApiResult<Page<StockMovement>> {
        self.get_query("stock-movements", filter).await
    }

    pub async fn movement(&self, id: i64) -> ApiResult<StockMovement> {
        self.get(&format!("stock-movements/{}", id)).await
    }

    pub async fn create_movement(&self, movement: &CreateStockMovement) -> ApiResult<StockMovement> {
        self.post("stock-movements", movement).await
    }

    pub async fn movements_for_product(&self, product_id: i64) -> ApiResult<Vec<StockMovement>> {
        self.get(&format!("stock-movements/product/{}", product_id))
            .await
    }
}

#[async_trait]
impl CatalogService for ApiClient {
    async fn list_products(&self, filter: &ProductFilter) -> ApiResult<Page<Product>> {
        self.get_query("products", filter).await
    }
}
