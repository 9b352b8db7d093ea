use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A rendered document as returned by the rendering service.
///
/// The bytes are opaque: the service replies with the PDF body and nothing
/// else the client needs to understand. No content validation happens here —
/// an empty or malformed body is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub received_at: Timestamp,
}

impl RenderedDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            received_at: Timestamp::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
