use crate::models::{CreateStockMovement, MovementFilter, Page, Period, StockMovement};
use crate::state::{DashboardSummary, StateExt};
use tauri::AppHandle;

#[tauri::command(rename_all = "snake_case")]
pub async fn get_stock_movements(
    app: AppHandle,
    filter: Option<MovementFilter>,
) -> Result<Page<StockMovement>, String> {
    let filter = filter.unwrap_or_default();
    app.app_state()
        .api
        .list_movements(&filter)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_product_movements(app: AppHandle, product_id: i64) -> Result<Vec<StockMovement>, String> {
    app.app_state()
        .api
        .movements_for_product(product_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn create_stock_movement(
    app: AppHandle,
    movement: CreateStockMovement,
) -> Result<StockMovement, String> {
    app.app_state()
        .create_movement(&movement)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_dashboard(app: AppHandle, period: Option<Period>) -> Result<DashboardSummary, String> {
    app.app_state()
        .dashboard(period.unwrap_or(Period::Today))
        .await
        .map_err(|e| e.to_string())
}
