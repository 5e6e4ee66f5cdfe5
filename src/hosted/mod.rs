//! Operator-side access to the hosted auth/database service.

pub mod admin;
pub mod migration;

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostedError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("request failed: {0}")]
    Request(String),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("database error: {0}")]
    Database(String),
}

pub use admin::{AdminClient, CreatedUser};
pub use migration::apply_migration;
