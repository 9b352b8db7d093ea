use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use specta::Type;
use tauri::State;
use tracing::warn;

use lattepad_core::document::RenderedDocument;
use lattepad_core::editor::{Action, EditorState};
use lattepad_desktop::config::{self, EndpointInfo, LattepadConfig};
use lattepad_render::client::RenderClient;
use lattepad_render::error::RenderError;
use lattepad_render::request::RenderRequest;

use crate::state::DesktopState;

/// Editor state as the frontend sees it. The document itself travels
/// separately (base64, via [`rendered_document`]).
#[derive(Debug, Clone, Serialize, Type)]
pub struct EditorSnapshot {
    pub tex_source: String,
    pub json_source: String,
    pub submitting: bool,
    pub has_document: bool,
    pub document_len: usize,
    pub last_error: Option<String>,
}

fn snapshot(editor: &EditorState) -> EditorSnapshot {
    EditorSnapshot {
        tex_source: editor.tex_source().to_string(),
        json_source: editor.json_source().to_string(),
        submitting: editor.is_submitting(),
        has_document: editor.document().is_some(),
        document_len: editor.document().map(|d| d.len()).unwrap_or(0),
        last_error: editor.last_error().map(str::to_string),
    }
}

#[tauri::command]
pub async fn editor_snapshot(state: State<'_, DesktopState>) -> Result<EditorSnapshot, String> {
    Ok(snapshot(&*state.editor.lock().await))
}

#[tauri::command]
pub async fn edit_tex(state: State<'_, DesktopState>, value: String) -> Result<(), String> {
    let mut editor = state.editor.lock().await;
    *editor = editor.apply(Action::EditTex(value));
    Ok(())
}

#[tauri::command]
pub async fn edit_json(state: State<'_, DesktopState>, value: String) -> Result<(), String> {
    let mut editor = state.editor.lock().await;
    *editor = editor.apply(Action::EditJson(value));
    Ok(())
}

#[tauri::command]
pub async fn clear_tex(state: State<'_, DesktopState>) -> Result<(), String> {
    let mut editor = state.editor.lock().await;
    *editor = editor.apply(Action::ClearTex);
    Ok(())
}

#[tauri::command]
pub async fn clear_json(state: State<'_, DesktopState>) -> Result<(), String> {
    let mut editor = state.editor.lock().await;
    *editor = editor.apply(Action::ClearJson);
    Ok(())
}

/// Submit the current buffers to the rendering service.
///
/// The request is built before anything touches the network, so malformed
/// details fail fast without a request being issued. The render itself runs
/// on a blocking worker; its outcome is applied back to state tagged with the
/// submission's generation, so a response to a superseded submission changes
/// nothing.
#[tauri::command]
pub async fn submit(state: State<'_, DesktopState>) -> Result<EditorSnapshot, String> {
    let client = state.client.lock().await.clone();

    let (generation, request) = {
        let mut editor = state.editor.lock().await;
        *editor = editor.apply(Action::SubmitStarted);
        let generation = editor
            .in_flight()
            .ok_or_else(|| "no submission in flight".to_string())?;

        match RenderRequest::from_sources(editor.tex_source(), editor.json_source()) {
            Ok(request) => (generation, request),
            Err(e) => {
                let message = e.to_string();
                *editor = editor.apply(Action::SubmitFailed {
                    generation,
                    message: message.clone(),
                });
                return Err(message);
            }
        }
    };

    let outcome = match tokio::task::spawn_blocking(move || client.render(&request)).await {
        Ok(result) => result,
        Err(join_error) => Err(RenderError::Transport(format!(
            "render task failed: {join_error}"
        ))),
    };

    let mut editor = state.editor.lock().await;
    match outcome {
        Ok(bytes) => {
            *editor = editor.apply(Action::SubmitSucceeded {
                generation,
                document: RenderedDocument::new(bytes),
            });
            Ok(snapshot(&editor))
        }
        Err(e) => {
            let message = e.to_string();
            let superseded = editor.in_flight() != Some(generation);
            *editor = editor.apply(Action::SubmitFailed {
                generation,
                message: message.clone(),
            });
            if superseded {
                warn!(generation, %message, "dropping outcome of superseded submission");
                Ok(snapshot(&editor))
            } else {
                Err(message)
            }
        }
    }
}

/// The rendered document as base64, for the preview pane.
#[tauri::command]
pub async fn rendered_document(state: State<'_, DesktopState>) -> Result<Option<String>, String> {
    let editor = state.editor.lock().await;
    Ok(editor.document().map(|doc| BASE64.encode(&doc.bytes)))
}

/// Write the rendered document to a user-chosen path. Returns the chosen
/// file name, or `None` when the dialog was dismissed.
#[tauri::command]
pub async fn save_document(state: State<'_, DesktopState>) -> Result<Option<String>, String> {
    let document = state
        .editor
        .lock()
        .await
        .document()
        .cloned()
        .ok_or_else(|| "no rendered document to save".to_string())?;

    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_file_name("document.pdf")
        .add_filter("PDF document", &["pdf"])
        .save_file()
        .await
    else {
        return Ok(None);
    };

    handle
        .write(&document.bytes)
        .await
        .map_err(|e| e.to_string())?;
    Ok(Some(handle.file_name()))
}

#[tauri::command]
pub async fn endpoint_info() -> Result<EndpointInfo, String> {
    Ok(config::endpoint_info(&config::load_or_default()))
}

/// Persist new endpoint settings and swap the live client.
#[tauri::command]
pub async fn configure_endpoint(
    state: State<'_, DesktopState>,
    endpoint: String,
    timeout_secs: Option<u64>,
) -> Result<EndpointInfo, String> {
    let config = LattepadConfig {
        endpoint,
        timeout_secs,
        ..config::load_or_default()
    };
    config::save_config(&config).map_err(|e| e.to_string())?;

    let mut client = state.client.lock().await;
    *client = RenderClient::with_timeout(config.endpoint.clone(), config.timeout());

    Ok(config::endpoint_info(&config))
}
