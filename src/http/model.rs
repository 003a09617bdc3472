//! Non-CCIP response envelope.
//!
//! Grounded on the original gateway's `internal/api/model.go`
//! (`OKResponse`/`ErrResponse`), flattened here into a single generic type.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(description: impl Into<String>, result: T) -> Self {
        Self {
            ok: true,
            description: description.into(),
            result: Some(result),
        }
    }
}

impl ApiResponse<()> {
    pub fn err(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: description.into(),
            result: None,
        }
    }
}
