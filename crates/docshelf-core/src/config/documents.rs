//! Document API and frontend configuration.

use serde::{Deserialize, Serialize};

/// Document API behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Allow unauthenticated callers to list and read published documents.
    /// Off unless configured: reads require a session.
    #[serde(default)]
    pub allow_anonymous_read: bool,
}

/// Single-page frontend served for unmatched GET routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Entry document returned by the SPA fallback.
    #[serde(default = "default_index_path")]
    pub index_path: String,
    /// Directory mounted under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_index_path() -> String {
    "static/frontend/index.html".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}
