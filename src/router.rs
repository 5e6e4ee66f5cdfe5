use crate::db::apartments::{
    delete_apartment, get_apartment, insert_apartment, list_apartments, status_counts,
    update_apartment,
};
use crate::db::Database;
use crate::domain::{ApartmentPatch, ApartmentStatus, NewApartment};
use crate::errors::ServerError;
use crate::policy::EditorAllowList;
use crate::responses::{
    empty_response, html_response, json_response, json_status_response, redirect_response,
    ResultResp,
};
use crate::templates::components::{status_badge, BadgeSize};
use crate::templates::pages::{apartment_page, apartments_page, ApartmentVm, ApartmentsVm};
use astra::Request;
use chrono::Utc;
use std::collections::HashMap;
use std::io::Read;
use tracing::info;
use uuid::Uuid;

/// Header set by the fronting auth proxy with the signed-in user's email.
pub const IDENTITY_HEADER: &str = "X-Forwarded-Email";

/// Upper bound for form and JSON request bodies.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

pub struct AppState {
    pub db: Database,
    pub editors: EditorAllowList,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => list(&req, state),
        ("GET", ["api", "apartments"]) => {
            let apartments = state.db.with_conn(|conn| list_apartments(conn))?;
            json_response(&apartments)
        }
        ("POST", ["api", "apartments"]) => create(req, state),
        ("DELETE", ["api", "apartments", id]) => {
            let id = parse_id(id)?;
            delete(&req, state, id)
        }
        ("GET", ["apartments", id]) => show(&req, state, parse_id(id)?),
        ("GET", ["apartments", id, "badge"]) => badge(&req, state, parse_id(id)?),
        ("POST", ["apartments", id]) => {
            let id = parse_id(id)?;
            update(req, state, id)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn list(req: &Request, state: &AppState) -> ResultResp {
    let (apartments, counts) = state
        .db
        .with_conn(|conn| Ok((list_apartments(conn)?, status_counts(conn)?)))?;

    html_response(apartments_page(&ApartmentsVm {
        apartments,
        counts,
        signed_in_as: caller_email(req),
    }))
}

fn show(req: &Request, state: &AppState, id: Uuid) -> ResultResp {
    let apartment = state
        .db
        .with_conn(|conn| get_apartment(conn, id))?
        .ok_or(ServerError::NotFound)?;

    let caller = caller_email(req);
    let can_edit = caller
        .as_deref()
        .map(|email| state.editors.permits(email))
        .unwrap_or(false);

    html_response(apartment_page(&ApartmentVm {
        apartment,
        can_edit,
        signed_in_as: caller,
    }))
}

/// Badge partial for one apartment. `?size=compact` selects the small variant.
fn badge(req: &Request, state: &AppState, id: Uuid) -> ResultResp {
    let apartment = state
        .db
        .with_conn(|conn| get_apartment(conn, id))?
        .ok_or(ServerError::NotFound)?;

    let query: HashMap<String, String> = req
        .uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let size = BadgeSize::from_param(query.get("size").map(String::as_str));

    html_response(status_badge(apartment.status, size))
}

fn create(req: Request, state: &AppState) -> ResultResp {
    let caller = require_editor(&req, state)?;

    let raw = read_body(req)?;
    let mut new: NewApartment = serde_json::from_slice(&raw)
        .map_err(|e| ServerError::BadRequest(format!("Invalid apartment: {e}")))?;
    new.updated_by = Some(caller.clone());

    let created = state
        .db
        .with_conn(|conn| insert_apartment(conn, &new, Utc::now()))?;

    info!(id = %created.id, floor = created.floor, unit = %created.unit, by = %caller, "apartment created");
    json_status_response(201, &created)
}

fn delete(req: &Request, state: &AppState, id: Uuid) -> ResultResp {
    let caller = require_editor(req, state)?;

    if !state.db.with_conn(|conn| delete_apartment(conn, id))? {
        return Err(ServerError::NotFound);
    }

    info!(%id, by = %caller, "apartment deleted");
    empty_response(204)
}

fn update(req: Request, state: &AppState, id: Uuid) -> ResultResp {
    let caller = require_editor(&req, state)?;

    let form = parse_form(req)?;
    let patch = patch_from_form(&form, &caller)?;

    let updated = state
        .db
        .with_conn(|conn| update_apartment(conn, id, &patch, Utc::now()))?
        .ok_or(ServerError::NotFound)?;

    info!(%id, status = %updated.status, by = %caller, "apartment updated via form");
    redirect_response(&format!("/apartments/{id}"))
}

fn patch_from_form(
    form: &HashMap<String, String>,
    caller: &str,
) -> Result<ApartmentPatch, ServerError> {
    let status = form
        .get("status")
        .map(|raw| {
            raw.parse::<ApartmentStatus>()
                .map_err(|e| ServerError::BadRequest(e.to_string()))
        })
        .transpose()?;

    let notes = form.get("notes").map(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    Ok(ApartmentPatch {
        status,
        notes,
        updated_by: Some(Some(caller.to_string())),
        ..ApartmentPatch::default()
    })
}

/// The caller's email, if they are on the editor allow-list.
fn require_editor(req: &Request, state: &AppState) -> Result<String, ServerError> {
    let caller = caller_email(req)
        .ok_or_else(|| ServerError::Forbidden("Sign in to change apartments".into()))?;
    if !state.editors.permits(&caller) {
        return Err(ServerError::Forbidden(format!(
            "{caller} is not allowed to change apartments"
        )));
    }
    Ok(caller)
}

fn caller_email(req: &Request) -> Option<String> {
    req.headers()
        .get(IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::NotFound)
}

/// Read the whole body, refusing anything over `MAX_BODY_BYTES` rather than
/// truncating it.
fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut raw = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("Could not read body: {e}")))?;

    if raw.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }
    Ok(raw)
}

fn parse_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let raw = read_body(req)?;
    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}
