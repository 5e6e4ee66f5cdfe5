// responses/json.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    json_status_response(200, value)
}

pub fn json_status_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.to_string())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// Bodiless response, e.g. 204 after a delete.
pub fn empty_response(status: u16) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
