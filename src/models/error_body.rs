//! Error envelope returned by the personnel backend.

use serde::Deserialize;

/// Body of a non-2xx response. Every field is optional so partial envelopes still parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl ApiErrorBody {
    /// Parse a raw response body, returning the server message when one is present.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}
