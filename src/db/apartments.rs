// src/db/apartments.rs
use crate::domain::{Apartment, ApartmentPatch, ApartmentStatus, NewApartment};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql, TransactionBehavior};
use tracing::debug;
use uuid::Uuid;

const COLUMNS: &str = "id, floor, unit, size_sqm, status, notes, updated_at, updated_by";

impl ToSql for ApartmentStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ApartmentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Number of apartments per status. Every status is present, zero if unused.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
}

impl StatusCounts {
    pub fn get(&self, status: ApartmentStatus) -> i64 {
        match status {
            ApartmentStatus::Available => self.available,
            ApartmentStatus::Reserved => self.reserved,
            ApartmentStatus::Sold => self.sold,
        }
    }

    pub fn total(&self) -> i64 {
        self.available + self.reserved + self.sold
    }
}

fn row_to_apartment(row: &Row<'_>) -> rusqlite::Result<Apartment> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(Apartment {
        id,
        floor: row.get(1)?,
        unit: row.get(2)?,
        size_sqm: row.get(3)?,
        status: row.get(4)?,
        notes: row.get(5)?,
        updated_at: row.get(6)?,
        updated_by: row.get(7)?,
    })
}

/// Insert a new row. Storage assigns the id and `updated_at`.
pub fn insert_apartment(
    conn: &Connection,
    new: &NewApartment,
    now: DateTime<Utc>,
) -> Result<Apartment, ServerError> {
    let row = Apartment {
        id: Uuid::new_v4(),
        floor: new.floor,
        unit: new.unit.clone(),
        size_sqm: new.size_sqm,
        status: new.status,
        notes: new.notes.clone(),
        updated_at: now,
        updated_by: new.updated_by.clone(),
    };

    conn.execute(
        &format!("insert into apartments ({COLUMNS}) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        params![
            row.id.to_string(),
            row.floor,
            row.unit,
            row.size_sqm,
            row.status,
            row.notes,
            row.updated_at,
            row.updated_by,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert apartment failed: {e}")))?;

    debug!(id = %row.id, floor = row.floor, unit = %row.unit, "apartment inserted");
    Ok(row)
}

pub fn get_apartment(conn: &Connection, id: Uuid) -> Result<Option<Apartment>, ServerError> {
    conn.query_row(
        &format!("select {COLUMNS} from apartments where id = ?1"),
        params![id.to_string()],
        row_to_apartment,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("load apartment failed: {e}")))
}

/// All apartments, ordered by floor then unit.
pub fn list_apartments(conn: &Connection) -> Result<Vec<Apartment>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {COLUMNS} from apartments order by floor asc, unit asc"
        ))
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map([], row_to_apartment)
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("Row read failed: {e}")))
}

/// Apply a partial patch. Only present fields change; `updated_at` is always
/// set to `now`. Returns `None` when no row has this id.
///
/// The read and write run in an IMMEDIATE transaction so concurrent writers
/// queue on the busy timeout instead of deadlocking on a lock upgrade.
pub fn update_apartment(
    conn: &mut Connection,
    id: Uuid,
    patch: &ApartmentPatch,
    now: DateTime<Utc>,
) -> Result<Option<Apartment>, ServerError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let Some(current) = get_apartment(&tx, id)? else {
        return Ok(None);
    };

    let mut next = patch.apply_to(&current);
    next.updated_at = now;

    tx.execute(
        r#"
        update apartments
        set floor = ?2,
            unit = ?3,
            size_sqm = ?4,
            status = ?5,
            notes = ?6,
            updated_at = ?7,
            updated_by = ?8
        where id = ?1
        "#,
        params![
            id.to_string(),
            next.floor,
            next.unit,
            next.size_sqm,
            next.status,
            next.notes,
            next.updated_at,
            next.updated_by,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("update apartment failed: {e}")))?;

    tx.commit()?;

    debug!(%id, from = %current.status, to = %next.status, "apartment updated");
    Ok(Some(next))
}

/// Returns whether a row was removed.
pub fn delete_apartment(conn: &Connection, id: Uuid) -> Result<bool, ServerError> {
    let removed = conn
        .execute("delete from apartments where id = ?1", params![id.to_string()])
        .map_err(|e| ServerError::DbError(format!("delete apartment failed: {e}")))?;
    Ok(removed > 0)
}

pub fn status_counts(conn: &Connection) -> Result<StatusCounts, ServerError> {
    let mut stmt = conn
        .prepare("select status, count(*) from apartments group by status")
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, ApartmentStatus>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    let mut counts = StatusCounts::default();
    for row in rows {
        let (status, n) = row?;
        match status {
            ApartmentStatus::Available => counts.available = n,
            ApartmentStatus::Reserved => counts.reserved = n,
            ApartmentStatus::Sold => counts.sold = n,
        }
    }
    Ok(counts)
}
