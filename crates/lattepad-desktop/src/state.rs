use std::sync::Arc;

use tokio::sync::Mutex;

use lattepad_core::editor::EditorState;
use lattepad_render::client::RenderClient;

pub struct DesktopState {
    pub editor: Arc<Mutex<EditorState>>,
    pub client: Arc<Mutex<RenderClient>>,
}

impl DesktopState {
    pub fn new(client: RenderClient) -> Self {
        Self {
            editor: Arc::new(Mutex::new(EditorState::new())),
            client: Arc::new(Mutex::new(client)),
        }
    }
}
