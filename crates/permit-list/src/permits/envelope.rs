use serde::Serialize;
use serde_json::Value;

/// JSend-style response body, discriminated by `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Error { message: String },
}

pub fn success<T: Serialize>(data: T) -> Envelope<T> {
    Envelope::Success { data }
}

pub fn error(message: impl Into<String>) -> Envelope<Value> {
    Envelope::Error {
        message: message.into(),
    }
}
