//! Application message service.
//!
//! Sends text messages to named users on behalf of a WeCom application,
//! managing the access token the endpoint requires.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
