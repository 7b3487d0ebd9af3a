//! Common types for the WeCom API.

use crate::errors::{WecomError, WecomResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response envelope returned by every WeCom endpoint
///
/// `errcode` is 0 on success. Fields beyond `errcode`/`errmsg` are kept in
/// `extra` so callers see the provider's response unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Error code (0 = success)
    pub errcode: i64,
    /// Error message
    #[serde(default)]
    pub errmsg: String,
    /// Remaining response fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// Whether the provider accepted the request
    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }

    /// Look up an additional response field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.extra.get(field)
    }

    /// Convert a non-zero errcode into [`WecomError::Api`]
    pub fn into_result(self) -> WecomResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(WecomError::Api {
                errcode: self.errcode,
                errmsg: self.errmsg,
            })
        }
    }
}
