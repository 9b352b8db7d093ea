use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::Value;

use lattepad_core::details::parse_details;

use crate::error::RenderError;

/// Placeholder delimiters the service falls back to when none are sent.
pub const DEFAULT_DELIMITERS: (&str, &str) = ("#!", "!#");

/// What the service does when the template references a key missing from the
/// details object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Fail the render.
    Error,
    /// Substitute the type's zero value.
    Zero,
    /// Substitute nothing.
    Nothing,
}

/// LaTeX engine the service compiles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    Pdflatex,
    Latexmk,
}

/// Custom placeholder delimiters. The service requires both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            left: DEFAULT_DELIMITERS.0.to_string(),
            right: DEFAULT_DELIMITERS.1.to_string(),
        }
    }
}

/// One render request, built fresh per submission and never persisted.
///
/// `template` is the base64-encoded LaTeX source; `details` is the JSON
/// object substituted into it. The remaining fields are optional knobs the
/// service accepts and are left out of the body entirely when unset.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    pub template: String,
    pub details: Value,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<Delimiters>,
    #[serde(rename = "onMissingKey", skip_serializing_if = "Option::is_none")]
    pub on_missing_key: Option<MissingKeyPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<Compiler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RenderRequest {
    /// Build a request from the raw editor buffers.
    ///
    /// Fails without touching the network when the details buffer does not
    /// hold a JSON object.
    pub fn from_sources(tex_source: &str, json_source: &str) -> Result<Self, RenderError> {
        let details = parse_details(json_source)?;
        Ok(Self {
            template: BASE64.encode(tex_source),
            details,
            resources: BTreeMap::new(),
            delimiters: None,
            on_missing_key: None,
            compiler: None,
            count: None,
        })
    }

    /// Attach a support file (image, class file, ...) the template needs at
    /// compile time.
    pub fn with_resource(mut self, name: impl Into<String>, contents: &[u8]) -> Self {
        self.resources.insert(name.into(), BASE64.encode(contents));
        self
    }

    pub fn with_delimiters(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.delimiters = Some(Delimiters {
            left: left.into(),
            right: right.into(),
        });
        self
    }

    pub fn with_missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.on_missing_key = Some(policy);
        self
    }

    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = Some(compiler);
        self
    }

    /// Number of compile passes to run (for documents with references).
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}
