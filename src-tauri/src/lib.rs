pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod money;
pub mod purchasing;
pub mod receiving;
pub mod state;

#[cfg(feature = "desktop")]
mod commands;


#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{categories, products, purchase_orders, sales, stock, suppliers};
    use config::AppConfig;
    use state::AppState;
    use tauri::{
        menu::{Menu, MenuItem},
        tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
        Manager,
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            std::fs::create_dir_all(&data_dir)?;

            let guard = logging::init(&data_dir.join("logs"))?;
            app.manage(guard);

            // Backend connection
            let config = AppConfig::resolve(&data_dir.join("config.json"))?;
            tracing::info!(api_url = %config.api_url, "Stock Desk starting");
            app.manage(AppState::new(config)?);

            // Create tray menu
            let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
            let menu = Menu::with_items(app, &[&quit])?;

            let mut tray = TrayIconBuilder::new()
                .menu(&menu)
                .show_menu_on_left_click(false)
                .on_tray_icon_event(|tray, event| {
                    if let TrayIconEvent::Click {
                        button: MouseButton::Left,
                        button_state: MouseButtonState::Up,
                        ..
                    } = event
                    {
                        let app = tray.app_handle();
                        if let Some(window) = app.get_webview_window("main") {
                            if window.is_visible().unwrap_or(false) {
                                let _ = window.hide();
                            } else {
                                let _ = window.show();
                                let _ = window.set_focus();
                            }
                        }
                    }
                })
                .on_menu_event(|app, event| {
                    if event.id == "quit" {
                        app.exit(0);
                    }
                });
            if let Some(icon) = app.default_window_icon() {
                tray = tray.icon(icon.clone());
            }
            let _tray = tray.build(app)?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Categories
            categories::get_categories,
            categories::get_category,
            categories::create_category,
            categories::update_category,
            categories::delete_category,
            // Suppliers
            suppliers::get_suppliers,
            suppliers::get_supplier,
            suppliers::create_supplier,
            suppliers::update_supplier,
            suppliers::delete_supplier,
            // Products
            products::get_products,
            products::get_product,
            products::create_product,
            products::update_product,
            products::delete_product,
            products::get_low_stock,
            // Stock
            stock::get_stock_movements,
            stock::get_product_movements,
            stock::create_stock_movement,
            stock::get_dashboard,
            // Purchase orders
            purchase_orders::get_purchase_orders,
            purchase_orders::get_purchase_order,
            purchase_orders::create_purchase_order,
            purchase_orders::update_purchase_order,
            purchase_orders::delete_purchase_order,
            purchase_orders::get_draft_total,
            // Receiving
            purchase_orders::start_receive,
            purchase_orders::get_receive_session,
            purchase_orders::receive_select_all,
            purchase_orders::receive_unselect_all,
            purchase_orders::receive_all_remaining,
            purchase_orders::receive_set_selected,
            purchase_orders::receive_set_quantity,
            purchase_orders::receive_set_date,
            purchase_orders::submit_receive,
            purchase_orders::cancel_receive,
            // Sales
            sales::get_sales,
            sales::get_sale,
            sales::cancel_sale,
            sales::get_sale_statistics,
            // Checkout
            sales::start_checkout,
            sales::get_checkout,
            sales::search_sale_products,
            sales::add_to_cart,
            sales::update_cart_quantity,
            sales::remove_from_cart,
            sales::update_sale_form,
            sales::submit_sale,
            sales::abandon_checkout,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
