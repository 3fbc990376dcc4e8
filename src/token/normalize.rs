//! Response Normalizer
//!
//! Turns heterogeneous token endpoint payloads into a [`TokenResponse`].

use chrono::Utc;
use serde_json::Value;

use crate::error::{OidcError, OidcResult};
use crate::types::{TokenResponse, DEFAULT_TOKEN_TYPE};

/// Decode a token endpoint body.
///
/// Only a JSON object is accepted. Missing fields stay `None`; `expires_in`
/// may be a number or a numeric string.
pub fn normalize_token_response(body: &str) -> OidcResult<TokenResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        OidcError::AuthFailure(format!(
            "Failed to decode token response: {}; payload: {}",
            e, body
        ))
    })?;

    let raw = match value {
        Value::Object(map) => map,
        other => {
            return Err(OidcError::AuthFailure(format!(
                "Failed to decode token response: expected a JSON object; payload: {}",
                other
            )))
        }
    };

    let string_field = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(TokenResponse {
        access_token: string_field("access_token"),
        id_token: string_field("id_token"),
        refresh_token: string_field("refresh_token"),
        expires_in: raw.get("expires_in").and_then(decode_expires_in),
        token_type: string_field("token_type").unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
        scope: string_field("scope"),
        received_at: Utc::now(),
        raw,
    })
}

/// Integer first, then numeric string. Fractional numbers are truncated.
pub fn decode_expires_in(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}
