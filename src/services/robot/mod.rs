//! Group robot service.
//!
//! Posts text and markdown messages to a group chat through its webhook key.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
