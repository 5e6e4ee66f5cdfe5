use crate::db::apartments::get_apartment;
use crate::domain::{Apartment, ApartmentStatus};
use crate::errors::{ResultResp, ServerError};
use crate::router::{handle, AppState, IDENTITY_HEADER};
use crate::tests::utils::{body_string, init_test_state, seed, EDITOR};
use astra::Body;
use http::{Method, Request};

fn post_json(state: &AppState, who: Option<&str>, json: &str) -> ResultResp {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/apartments")
        .header("Content-Type", "application/json");
    if let Some(email) = who {
        builder = builder.header(IDENTITY_HEADER, email);
    }
    handle(builder.body(Body::from(json.as_bytes().to_vec())).unwrap(), state)
}

fn delete(state: &AppState, apt: &Apartment, who: &str) -> ResultResp {
    let req = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/apartments/{}", apt.id))
        .header(IDENTITY_HEADER, who)
        .body(Body::empty())
        .unwrap();
    handle(req, state)
}

#[test]
fn editor_creates_apartment_and_it_shows_on_the_list() {
    let (_dir, state) = init_test_state();

    let resp = post_json(
        &state,
        Some(EDITOR),
        r#"{"floor":3,"unit":"3B","size_sqm":71.5,"notes":"Balcony"}"#,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 201);

    let created: Apartment = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(created.status, ApartmentStatus::Available);
    assert_eq!(created.updated_by.as_deref(), Some(EDITOR));

    let stored = state
        .db
        .with_conn(|conn| get_apartment(conn, created.id))
        .unwrap()
        .unwrap();
    assert_eq!(stored, created);

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let body = body_string(handle(req, &state).unwrap());
    assert!(body.contains("3B"));
    assert!(!body.contains("No apartments yet."));
}

#[test]
fn create_rejects_server_assigned_fields() {
    let (_dir, state) = init_test_state();

    let with_id = r#"{"id":"7d0f4c1e-3f55-4a4e-9c52-4f0a1f6f5d11","floor":1,"unit":"1A","size_sqm":40}"#;
    let err = post_json(&state, Some(EDITOR), with_id).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let with_ts = r#"{"floor":1,"unit":"1A","size_sqm":40,"updated_at":"2024-01-01T00:00:00Z"}"#;
    let err = post_json(&state, Some(EDITOR), with_ts).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn create_requires_editor() {
    let (_dir, state) = init_test_state();
    let json = r#"{"floor":1,"unit":"1A","size_sqm":40}"#;

    let err = post_json(&state, Some("visitor@example.com"), json).unwrap_err();
    assert!(matches!(err, ServerError::Forbidden(_)));
    let err = post_json(&state, None, json).unwrap_err();
    assert!(matches!(err, ServerError::Forbidden(_)));
}

#[test]
fn editor_deletes_apartment() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 8, "8A", ApartmentStatus::Sold);

    let err = delete(&state, &apt, "visitor@example.com").unwrap_err();
    assert!(matches!(err, ServerError::Forbidden(_)));

    let resp = delete(&state, &apt, EDITOR).expect("Handler failed");
    assert_eq!(resp.status(), 204);
    assert!(state
        .db
        .with_conn(|conn| get_apartment(conn, apt.id))
        .unwrap()
        .is_none());

    let err = delete(&state, &apt, EDITOR).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn badge_partial_honours_size_query() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 9, "9A", ApartmentStatus::Reserved);

    let badge = |query: &str| {
        let req = Request::builder()
            .uri(format!("/apartments/{}/badge{query}", apt.id))
            .body(Body::empty())
            .unwrap();
        body_string(handle(req, &state).unwrap())
    };

    let compact = badge("?size=compact");
    assert!(compact.contains("px-2 py-0.5 text-xs"));
    assert!(compact.contains("aria-label=\"Status: Reserved\""));
    assert!(!compact.contains("<html"));

    assert!(badge("").contains("px-3 py-1 text-sm"));
    assert!(badge("?size=huge").contains("px-3 py-1 text-sm"));
}
