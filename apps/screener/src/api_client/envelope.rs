//! Result envelope decoding: `RawResponse` → payload or typed `ClientError`.
//!
//! Rules, applied in order:
//! 1. 204 → `Ok(None)`, body is never touched.
//! 2. JSON content type → decode the body; failure is a `Decode` error,
//!    even on a non-2xx status.
//! 3. Non-2xx → `Api` error carrying the payload's `message` field, or the
//!    generic fallback.
//! 4. 2xx with any other content type → `Ok(None)`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api_client::transport::RawResponse;
use crate::errors::{ClientError, DEFAULT_API_ERROR_MESSAGE, MALFORMED_BODY_MESSAGE};

pub fn decode_envelope(raw: &RawResponse) -> Result<Option<Value>, ClientError> {
    if raw.status == 204 {
        return Ok(None);
    }

    let payload = if is_json(raw.content_type.as_deref()) {
        let value: Value = serde_json::from_slice(&raw.body)
            .map_err(|_| ClientError::Decode(MALFORMED_BODY_MESSAGE.to_string()))?;
        Some(value)
    } else {
        None
    };

    if !(200..300).contains(&raw.status) {
        let message = payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or(DEFAULT_API_ERROR_MESSAGE)
            .to_string();
        return Err(ClientError::Api {
            status: raw.status,
            message,
        });
    }

    Ok(payload)
}

/// Decodes the envelope and maps the payload into `T`.
/// A null JSON payload is treated the same as no payload.
pub fn decode_payload<T: DeserializeOwned>(raw: &RawResponse) -> Result<Option<T>, ClientError> {
    match decode_envelope(raw)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ClientError::Decode(format!("{MALFORMED_BODY_MESSAGE}: {e}"))),
    }
}

/// Like `decode_payload`, for operations that must return an entity.
pub fn expect_payload<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, ClientError> {
    decode_payload(raw)?.ok_or_else(|| ClientError::Decode("empty response body".to_string()))
}

/// Lists answer "nothing" with an empty collection.
pub fn decode_list<T: DeserializeOwned>(raw: &RawResponse) -> Result<Vec<T>, ClientError> {
    Ok(decode_payload::<Vec<T>>(raw)?.unwrap_or_default())
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}
