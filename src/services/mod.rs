//! Service implementations for WeCom API endpoints.
//!
//! - [`robot`]: group robot webhook messages
//! - [`app`]: application messages addressed to users

pub mod app;
pub mod robot;

pub use app::{AppClient, AppClientTrait};
pub use robot::{GroupRobotClient, GroupRobotClientTrait};

use crate::errors::{ResponseError, WecomError, WecomResult};
use crate::types::ApiResponse;
use serde_json::Value;
use tracing::error;

/// Parse a send response and log provider-side failures.
///
/// A non-zero `errcode` is logged and handed back unchanged.
pub(crate) fn inspect_send_response(endpoint: &str, body: Value) -> WecomResult<ApiResponse> {
    let response: ApiResponse = serde_json::from_value(body)
        .map_err(|e| WecomError::Response(ResponseError::from(e)))?;

    if !response.is_success() {
        error!(
            endpoint,
            errcode = response.errcode,
            errmsg = %response.errmsg,
            response = %serde_json::to_string(&response).unwrap_or_default(),
            "WeCom rejected message"
        );
    }

    Ok(response)
}
