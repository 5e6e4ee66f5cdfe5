// src/domain/apartment.rs

use super::status::ApartmentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// One row of the `apartments` table, as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: Uuid,
    pub floor: i32,
    /// Short label such as "A" or "12B". Unique per floor by convention only.
    pub unit: String,
    pub size_sqm: f64,
    pub status: ApartmentStatus,
    pub notes: Option<String>,
    /// Set by the persistence layer on every mutation.
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

/// Insert shape. `id` and `updated_at` are assigned by storage, so they are
/// not fields here and cannot be supplied:
///
/// ```
/// use apartment_tracker::domain::{ApartmentStatus, NewApartment};
///
/// let row = NewApartment {
///     floor: 3,
///     unit: "3B".into(),
///     size_sqm: 71.5,
///     status: ApartmentStatus::Available,
///     notes: None,
///     updated_by: None,
/// };
/// assert_eq!(row.floor, 3);
/// ```
///
/// ```compile_fail
/// use apartment_tracker::domain::{ApartmentStatus, NewApartment};
///
/// let row = NewApartment {
///     id: uuid::Uuid::nil(),
///     floor: 3,
///     unit: "3B".into(),
///     size_sqm: 71.5,
///     status: ApartmentStatus::Available,
///     notes: None,
///     updated_by: None,
/// };
/// ```
///
/// ```compile_fail
/// use apartment_tracker::domain::{ApartmentStatus, NewApartment};
///
/// let row = NewApartment {
///     floor: 3,
///     unit: "3B".into(),
///     size_sqm: 71.5,
///     status: ApartmentStatus::Available,
///     notes: None,
///     updated_at: chrono::Utc::now(),
///     updated_by: None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewApartment {
    pub floor: i32,
    pub unit: String,
    pub size_sqm: f64,
    #[serde(default)]
    pub status: ApartmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Update shape: a partial patch where every field is optional.
///
/// For the nullable columns the outer `Option` means "touch this field" and
/// the inner one is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApartmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_sqm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApartmentStatus>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_by: Option<Option<String>>,
}

// A key that is present (even as `null`) becomes `Some(..)`; `default`
// covers the absent case.
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

impl ApartmentPatch {
    pub fn status(status: ApartmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when applying the patch would change nothing but `updated_at`.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `row` with every present field of the patch applied.
    /// `updated_at` is left to the caller (storage owns it).
    pub fn apply_to(&self, row: &Apartment) -> Apartment {
        let mut next = row.clone();
        if let Some(floor) = self.floor {
            next.floor = floor;
        }
        if let Some(unit) = &self.unit {
            next.unit = unit.clone();
        }
        if let Some(size) = self.size_sqm {
            next.size_sqm = size;
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(notes) = &self.notes {
            next.notes = notes.clone();
        }
        if let Some(by) = &self.updated_by {
            next.updated_by = by.clone();
        }
        next
    }
}

/// Narrow a full row to the patch that would reproduce all of its mutable
/// fields.
impl From<&Apartment> for ApartmentPatch {
    fn from(row: &Apartment) -> Self {
        Self {
            floor: Some(row.floor),
            unit: Some(row.unit.clone()),
            size_sqm: Some(row.size_sqm),
            status: Some(row.status),
            notes: Some(row.notes.clone()),
            updated_by: Some(row.updated_by.clone()),
        }
    }
}
