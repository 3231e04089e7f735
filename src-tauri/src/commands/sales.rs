use crate::cart::SaleForm;
use crate::models::{Page, Period, Product, Sale, SaleFilter, SaleStatistics};
use crate::state::{CheckoutView, SaleDetail, StateExt};
use tauri::AppHandle;

#[tauri::command(rename_all = "snake_case")]
pub async fn get_sales(app: AppHandle, filter: Option<SaleFilter>) -> Result<Page<Sale>, String> {
    let filter = filter.unwrap_or_default();
    app.app_state()
        .api
        .list_sales(&filter)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_sale(app: AppHandle, id: i64) -> Result<SaleDetail, String> {
    app.app_state()
        .sale_detail(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn cancel_sale(app: AppHandle, id: i64) -> Result<SaleDetail, String> {
    app.app_state()
        .cancel_sale(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_sale_statistics(app: AppHandle, period: Option<Period>) -> Result<SaleStatistics, String> {
    app.app_state()
        .api
        .sale_statistics(period.unwrap_or(Period::Today))
        .await
        .map_err(|e| e.to_string())
}

// ============ Checkout ============

#[tauri::command(rename_all = "snake_case")]
pub async fn start_checkout(app: AppHandle) -> Result<CheckoutView, String> {
    app.app_state()
        .start_checkout()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_checkout(app: AppHandle) -> Result<CheckoutView, String> {
    app.app_state()
        .checkout_view()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn search_sale_products(app: AppHandle, query: String) -> Result<Vec<Product>, String> {
    app.app_state()
        .search_products(&query)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_to_cart(app: AppHandle, product_id: i64) -> Result<CheckoutView, String> {
    app.app_state()
        .cart_add(product_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_cart_quantity(app: AppHandle, product_id: i64, quantity: i32) -> Result<CheckoutView, String> {
    app.app_state()
        .cart_update_quantity(product_id, quantity)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn remove_from_cart(app: AppHandle, product_id: i64) -> Result<CheckoutView, String> {
    app.app_state()
        .cart_remove(product_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_sale_form(app: AppHandle, form: SaleForm) -> Result<CheckoutView, String> {
    app.app_state()
        .set_sale_form(form)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn submit_sale(app: AppHandle) -> Result<SaleDetail, String> {
    app.app_state()
        .submit_sale()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn abandon_checkout(app: AppHandle) -> Result<(), String> {
    app.app_state().abandon_checkout().await;
    Ok(())
}
