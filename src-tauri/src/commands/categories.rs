use crate::models::{Category, CategoryInput, ListFilter, Page};
use crate::state::StateExt;
use tauri::AppHandle;

#[tauri::command(rename_all = "snake_case")]
pub async fn get_categories(
    app: AppHandle,
    filter: Option<ListFilter>,
) -> Result<Page<Category>, String> {
    let filter = filter.unwrap_or_default();
    app.app_state()
        .api
        .list_categories(&filter)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_category(app: AppHandle, id: i64) -> Result<Category, String> {
    app.app_state().api.category(id).await.map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn create_category(app: AppHandle, category: CategoryInput) -> Result<Category, String> {
    if category.name.trim().is_empty() {
        return Err("Category name is required".to_string());
    }
    app.app_state()
        .api
        .create_category(&category)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_category(app: AppHandle, id: i64, category: CategoryInput) -> Result<Category, String> {
    if category.name.trim().is_empty() {
        return Err("Category name is required".to_string());
    }
    app.app_state()
        .api
        .update_category(id, &category)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_category(app: AppHandle, id: i64) -> Result<(), String> {
    app.app_state()
        .api
        .delete_category(id)
        .await
        .map_err(|e| e.to_string())
}
