#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eyre::Result;

mod commands;
mod state;

use lattepad_desktop::config;
use lattepad_render::client::RenderClient;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::load_or_default();
    let client = RenderClient::with_timeout(config.endpoint.clone(), config.timeout());

    tauri::Builder::default()
        .manage(state::DesktopState::new(client))
        .invoke_handler(tauri::generate_handler![
            commands::editor_snapshot,
            commands::edit_tex,
            commands::edit_json,
            commands::clear_tex,
            commands::clear_json,
            commands::submit,
            commands::rendered_document,
            commands::save_document,
            commands::endpoint_info,
            commands::configure_endpoint,
        ])
        .run(tauri::generate_context!())
        .map_err(|e| eyre::eyre!("tauri error: {e}"))?;

    Ok(())
}
