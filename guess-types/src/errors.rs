use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKind {
    Validation,
    IllegalState,
    LimitExceeded,
    NoWordsAvailable,
    NotFound,
    Forbidden,
    AuthenticationRequired,
    Internal,
}

/// Body of every non-2xx reply from the server
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub error: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
        }
    }
}
