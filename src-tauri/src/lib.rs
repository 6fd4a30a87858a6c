pub mod commands;
pub mod core;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;

    use tauri::Manager;

    use crate::core::config::ViewerConfig;
    use crate::core::session::ViewerSession;

    let crate_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .level_for("profile_viewer_lib", crate_level)
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config = ViewerConfig::from_env();
            log::info!(
                "[setup] api_base={} language_concurrency={} page_count={:?}",
                config.api_base,
                config.language_concurrency,
                config.page_count
            );
            let session = ViewerSession::from_config(config)?;
            app.manage(Arc::new(session));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::lookup_user,
            commands::request_page,
            commands::filter_repositories,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
