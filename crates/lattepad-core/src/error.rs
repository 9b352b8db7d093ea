use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("details are not valid JSON: {0}")]
    InvalidDetails(#[from] serde_json::Error),

    #[error("details must be a JSON object, got {0}")]
    DetailsNotObject(&'static str),
}
