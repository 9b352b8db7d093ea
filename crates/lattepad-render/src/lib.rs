//! lattepad-render
//!
//! Client for the remote template-rendering service. Thin wrapper around one
//! HTTP POST: a JSON request carrying the base64 template and its details,
//! a PDF body coming back.

pub mod client;
pub mod error;
pub mod request;
