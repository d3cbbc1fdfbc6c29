pub mod api;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod session;
pub mod stores;
pub mod views;
pub mod workflows;


pub use api::GatewayClient;
pub use config::ApiConfig;
pub use db::TokenStore;
pub use error::{ApiError, ApiResult, WorkflowError};
pub use session::Session;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{auth, categories, dashboard, parts, sales, suppliers, AppState};
    use std::sync::Arc;
    use tauri::Manager;
    use tracing::{info, warn};

    logging::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let config = ApiConfig::from_env();
            info!("Using backend at {}", config.base_url);

            // Restore the previous login, if any
            let token_db = match config.token_db.clone() {
                Some(path) => path,
                None => app.path().app_data_dir()?.join("session.db"),
            };
            let session = match TokenStore::open(&token_db) {
                Ok(store) => Session::restore(Arc::new(store)),
                Err(e) => {
                    warn!("Session store unavailable at {}: {}", token_db.display(), e);
                    Session::new()
                }
            };

            let state = AppState::new(config, session)?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Auth
            auth::login,
            auth::logout,
            auth::session_status,
            // Dashboard
            dashboard::load_dashboard,
            // Parts
            parts::load_parts,
            parts::search_parts,
            parts::save_part,
            parts::delete_part,
            parts::adjust_stock,
            parts::pick_part_image,
            parts::open_part_image,
            // Categories
            categories::load_categories,
            categories::search_categories,
            categories::save_category,
            categories::delete_category,
            // Suppliers
            suppliers::load_suppliers,
            suppliers::search_suppliers,
            suppliers::save_supplier,
            suppliers::delete_supplier,
            // Sales
            sales::load_sales,
            sales::search_sales,
            sales::save_sale,
            sales::delete_sale,
            // Navigation
            commands::unmount_screen,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
