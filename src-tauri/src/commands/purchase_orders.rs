use crate::models::{Page, PurchaseOrder, PurchaseOrderFilter, PurchaseOrderInput};
use crate::purchasing::draft_total;
use crate::receiving::{ReceiveOutcome, ReceiveSession};
use crate::state::{PurchaseOrderDetail, StateExt};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tauri::AppHandle;

#[tauri::command(rename_all = "snake_case")]
pub async fn get_purchase_orders(
    app: AppHandle,
    filter: Option<PurchaseOrderFilter>,
) -> Result<Page<PurchaseOrder>, String> {
    let filter = filter.unwrap_or_default();
    app.app_state()
        .api
        .list_purchase_orders(&filter)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_purchase_order(app: AppHandle, id: i64) -> Result<PurchaseOrderDetail, String> {
    app.app_state()
        .purchase_order_detail(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn create_purchase_order(app: AppHandle, order: PurchaseOrderInput) -> Result<PurchaseOrder, String> {
    app.app_state()
        .create_purchase_order(&order)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_purchase_order(
    app: AppHandle,
    id: i64,
    order: PurchaseOrderInput,
) -> Result<PurchaseOrder, String> {
    app.app_state()
        .update_purchase_order(id, &order)
        .await
        .map_err(|e| e.to_string())
}

/// Running total shown while a draft order is edited.
#[tauri::command(rename_all = "snake_case")]
pub fn get_draft_total(order: PurchaseOrderInput) -> Decimal {
    draft_total(&order)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_purchase_order(app: AppHandle, id: i64) -> Result<(), String> {
    app.app_state()
        .delete_purchase_order(id)
        .await
        .map_err(|e| e.to_string())
}

// ============ Receiving ============

/// Opens a receive session; the delivery date defaults to today.
#[tauri::command(rename_all = "snake_case")]
pub async fn start_receive(
    app: AppHandle,
    order_id: i64,
    actual_delivery_date: Option<NaiveDate>,
) -> Result<ReceiveSession, String> {
    let date = actual_delivery_date.unwrap_or_else(|| chrono::Local::now().date_naive());
    app.app_state()
        .start_receive(order_id, date)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_receive_session(app: AppHandle) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_session()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn receive_select_all(app: AppHandle) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_select_all()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn receive_unselect_all(app: AppHandle) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_unselect_all()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn receive_all_remaining(app: AppHandle) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_all_remaining()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn receive_set_selected(app: AppHandle, item_id: i64, selected: bool) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_set_selected(item_id, selected)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn receive_set_quantity(app: AppHandle, item_id: i64, quantity: i32) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_set_quantity(item_id, quantity)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn receive_set_date(app: AppHandle, actual_delivery_date: NaiveDate) -> Result<ReceiveSession, String> {
    app.app_state()
        .receive_set_date(actual_delivery_date)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn submit_receive(app: AppHandle) -> Result<ReceiveOutcome, String> {
    app.app_state()
        .submit_receive()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn cancel_receive(app: AppHandle) -> Result<ReceiveOutcome, String> {
    Ok(app.app_state().cancel_receive().await)
}
