//! Seed content for a fresh editor.

/// Sample template shown on first launch. `#! ... !#` are the rendering
/// service's default placeholder delimiters.
pub const SAMPLE_TEX: &str = r"\documentclass{article}
\title{LattePad Sample Document}
\begin{document}
\maketitle
Hello #! .name !#!
\end{document}";

/// Sample details matching [`SAMPLE_TEX`].
pub const SAMPLE_JSON: &str = r#"{"name": "world"}"#;
