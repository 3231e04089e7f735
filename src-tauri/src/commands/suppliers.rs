use crate::models::{ListFilter, Page, Supplier, SupplierInput};
use crate::state::StateExt;
use tauri::AppHandle;

#[tauri::command(rename_all = "snake_case")]
pub async fn get_suppliers(
    app: AppHandle,
    filter: Option<ListFilter>,
) -> Result<Page<Supplier>, String> {
    let filter = filter.unwrap_or_default();
    app.app_state()
        .api
        .list_suppliers(&filter)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_supplier(app: AppHandle, id: i64) -> Result<Supplier, String> {
    app.app_state().api.supplier(id).await.map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn create_supplier(app: AppHandle, supplier: SupplierInput) -> Result<Supplier, String> {
    if supplier.name.trim().is_empty() {
        return Err("Supplier name is required".to_string());
    }
    app.app_state()
        .api
        .create_supplier(&supplier)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_supplier(app: AppHandle, id: i64, supplier: SupplierInput) -> Result<Supplier, String> {
    if supplier.name.trim().is_empty() {
        return Err("Supplier name is required".to_string());
    }
    app.app_state()
        .api
        .update_supplier(id, &supplier)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_supplier(app: AppHandle, id: i64) -> Result<(), String> {
    app.app_state()
        .api
        .delete_supplier(id)
        .await
        .map_err(|e| e.to_string())
}
