pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod hosted;
pub mod logging;
pub mod policy;
pub mod responses;
pub mod router;
pub mod templates;
