//! Error body shared by the backend and its clients

use serde::{Deserialize, Serialize};

/// JSON body returned with every non-2xx backend response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
