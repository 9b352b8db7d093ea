use std::sync::Arc;

use crate::document::RenderedDocument;
use crate::samples;

/// One transition of the editor state machine.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the template buffer in full.
    EditTex(String),
    /// Replace the details buffer in full.
    EditJson(String),
    /// Reset the template buffer to empty.
    ClearTex,
    /// Reset the details buffer to empty.
    ClearJson,
    /// A new submission is leaving for the rendering service.
    SubmitStarted,
    /// The submission with this generation came back with a document.
    SubmitSucceeded {
        generation: u64,
        document: RenderedDocument,
    },
    /// The submission with this generation failed.
    SubmitFailed { generation: u64, message: String },
}

/// Editor state: two text buffers, the last rendered document, and the
/// bookkeeping for the submission currently in flight.
///
/// State only changes through [`EditorState::apply`], one transition per
/// [`Action`]. Submissions are numbered: starting a new one supersedes
/// whatever was in flight, and outcomes carrying a superseded generation are
/// dropped, so the document shown always belongs to the most recent request
/// regardless of response arrival order.
#[derive(Debug, Clone)]
pub struct EditorState {
    tex_source: String,
    json_source: String,
    document: Option<Arc<RenderedDocument>>,
    last_error: Option<String>,
    submissions: u64,
    in_flight: Option<u64>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A fresh editor seeded with the sample template and details.
    pub fn new() -> Self {
        Self {
            tex_source: samples::SAMPLE_TEX.to_string(),
            json_source: samples::SAMPLE_JSON.to_string(),
            document: None,
            last_error: None,
            submissions: 0,
            in_flight: None,
        }
    }

    pub fn tex_source(&self) -> &str {
        &self.tex_source
    }

    pub fn json_source(&self) -> &str {
        &self.json_source
    }

    /// The most recently rendered document, if any.
    pub fn document(&self) -> Option<&Arc<RenderedDocument>> {
        self.document.as_ref()
    }

    /// The error from the most recent completed submission. Cleared when a
    /// new submission starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Generation of the submission currently in flight, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply one transition, returning the next state.
    #[must_use]
    pub fn apply(&self, action: Action) -> EditorState {
        let mut next = self.clone();
        match action {
            Action::EditTex(value) => next.tex_source = value,
            Action::EditJson(value) => next.json_source = value,
            Action::ClearTex => next.tex_source.clear(),
            Action::ClearJson => next.json_source.clear(),
            Action::SubmitStarted => {
                next.submissions += 1;
                next.in_flight = Some(next.submissions);
                next.last_error = None;
            }
            Action::SubmitSucceeded {
                generation,
                document,
            } => {
                if next.in_flight == Some(generation) {
                    next.document = Some(Arc::new(document));
                    next.in_flight = None;
                }
            }
            Action::SubmitFailed {
                generation,
                message,
            } => {
                if next.in_flight == Some(generation) {
                    next.last_error = Some(message);
                    next.in_flight = None;
                }
            }
        }
        next
    }
}
