//! Project token decoding
//!
//! A project token is `<base64url payload>.<signature>`. The payload is a
//! JSON document carrying the project ID, which the CLI needs to scope
//! every directory call. The signature is only verified server-side.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::{CloudError, Result};

#[derive(Deserialize)]
struct TokenPayload {
    project_id: String,
}

/// Extracts the project ID from a project token without verifying the
/// signature.
pub fn project_id_from_token(token: &str) -> Result<String> {
    let payload = token
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CloudError::InvalidToken("empty payload".to_string()))?;

    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| CloudError::InvalidToken(e.to_string()))?;

    let decoded: TokenPayload =
        serde_json::from_slice(&raw).map_err(|e| CloudError::InvalidToken(e.to_string()))?;

    Ok(decoded.project_id)
}
