use crate::api::CatalogService;
use crate::models::{Page, Product, ProductFilter, ProductInput};
use crate::state::StateExt;
use tauri::AppHandle;

#[tauri::command(rename_all = "snake_case")]
pub async fn get_products(app: AppHandle, filter: Option<ProductFilter>) -> Result<Page<Product>, String> {
    let filter = filter.unwrap_or_default();
    app.app_state()
        .api
        .list_products(&filter)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_product(app: AppHandle, id: i64) -> Result<Product, String> {
    app.app_state().api.product(id).await.map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn create_product(app: AppHandle, product: ProductInput) -> Result<Product, String> {
    app.app_state()
        .api
        .create_product(&product)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_product(app: AppHandle, id: i64, product: ProductInput) -> Result<Product, String> {
    app.app_state()
        .api
        .update_product(id, &product)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_product(app: AppHandle, id: i64) -> Result<(), String> {
    app.app_state()
        .api
        .delete_product(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_low_stock(app: AppHandle) -> Result<Vec<Product>, String> {
    app.app_state()
        .api
        .low_stock_products()
        .await
        .map_err(|e| e.to_string())
}
