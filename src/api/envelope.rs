//! Response Envelope
//!
//! Every response from the task store is wrapped as `{success, data, error, message}`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult, DEFAULT_FAILURE_MESSAGE};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    /// Usually a string, but the server may serialize its error object as `{}` or null
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Text reported to the caller when the envelope is a failure
    pub fn failure_message(&self) -> String {
        let error = match &self.error {
            Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        };
        let message = self.message.as_deref().filter(|m| !m.is_empty());
        error
            .or(message)
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
            .to_string()
    }

    /// Treat a non-2xx status the same as `success=false`
    pub fn into_result(self, status_ok: bool) -> ClientResult<Option<T>> {
        if status_ok && self.success {
            Ok(self.data)
        } else {
            Err(ClientError::Remote(self.failure_message()))
        }
    }
}

/// Parse a raw response body into an envelope
pub fn decode<T>(body: &str) -> ClientResult<Envelope<T>>
where
    T: for<'de> Deserialize<'de>,
{
    Ok(serde_json::from_str(body)?)
}
