use serde::{Deserialize, Serialize};

pub mod mapping;
pub mod naming;
pub mod printflow;
pub mod stomp;
pub mod validate;

/// One uploaded document as the file service reports it. The binary
/// payload is fetched separately by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub id: u64,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

/// Failure of any call against the remote file service. Pages collapse
/// these to one inline message; the variants exist so the owner pages
/// can tell "token rejected" apart from everything else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("server returned status {code}")]
    Status { code: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not decode server response: {0}")]
    Decode(String),
    #[error("not authorized")]
    Unauthorized,
}

#[cfg(feature = "frontend")]
pub mod frontend;

#[cfg(feature = "frontend")]
pub use frontend::run;
