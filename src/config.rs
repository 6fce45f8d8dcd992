//! Plugin options
//!
//! Options are read from a JSON document of the form:
//!
//! ```json
//! {
//!   "headers": {
//!     "name": "My script",
//!     "namespace": "https://example.com",
//!     "version": "1.0.0",
//!     "match": ["https://example.com/*"],
//!     "noframes": true
//!   }
//! }
//! ```
//!
//! Key order inside `headers` is kept and becomes the directive order.

use crate::error::Result;
use crate::types::HeaderOptions;
use serde::Deserialize;
use std::path::Path;

/// Options accepted by [`UserScriptPlugin`](crate::UserScriptPlugin)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserScriptPluginOptions {
    /// Header directives, in output order
    pub headers: HeaderOptions,
}

impl UserScriptPluginOptions {
    pub fn new(headers: HeaderOptions) -> Self {
        Self { headers }
    }

    /// Parse options from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse an options file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
