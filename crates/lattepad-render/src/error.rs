use thiserror::Error;

use lattepad_core::error::CoreError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid details: {0}")]
    Details(#[from] CoreError),

    #[error("rendering service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}
