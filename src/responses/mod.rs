pub mod html;
pub mod json;

pub use crate::errors::ResultResp;
pub use html::{html_response, redirect_response};
pub use json::{empty_response, json_response, json_status_response};
