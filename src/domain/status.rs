// src/domain/status.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sales status of an apartment. Closed set: no other states exist, and no
/// transition rules apply between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown apartment status: {0:?}")]
pub struct UnknownStatus(pub String);

impl ApartmentStatus {
    pub const ALL: [ApartmentStatus; 3] = [
        ApartmentStatus::Available,
        ApartmentStatus::Reserved,
        ApartmentStatus::Sold,
    ];

    /// Literal stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ApartmentStatus::Available => "available",
            ApartmentStatus::Reserved => "reserved",
            ApartmentStatus::Sold => "sold",
        }
    }

    /// Human-readable name shown to users.
    pub fn label(self) -> &'static str {
        match self {
            ApartmentStatus::Available => "Available",
            ApartmentStatus::Reserved => "Reserved",
            ApartmentStatus::Sold => "Sold",
        }
    }
}

impl fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApartmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ApartmentStatus::Available),
            "reserved" => Ok(ApartmentStatus::Reserved),
            "sold" => Ok(ApartmentStatus::Sold),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
