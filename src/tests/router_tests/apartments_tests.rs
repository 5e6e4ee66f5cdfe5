use crate::domain::{Apartment, ApartmentStatus};
use crate::errors::ServerError;
use crate::router::{handle, IDENTITY_HEADER};
use crate::tests::utils::{body_string, init_test_state, seed, EDITOR};
use astra::Body;
use http::{Method, Request};

#[test]
fn list_page_shows_summary_and_compact_badges() {
    let (_dir, state) = init_test_state();
    seed(&state, 1, "1A", ApartmentStatus::Available);
    seed(&state, 1, "1B", ApartmentStatus::Sold);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("id=\"status-summary\""));
    assert!(body.contains("1A"));
    assert!(body.contains("1B"));
    assert!(body.contains("aria-label=\"Status: Available\""));
    assert!(body.contains("aria-label=\"Status: Sold\""));
    // Summary uses normal badges, the table compact ones.
    assert!(body.contains("px-3 py-1 text-sm"));
    assert!(body.contains("px-2 py-0.5 text-xs"));
}

#[test]
fn list_page_renders_with_no_rows() {
    let (_dir, state) = init_test_state();

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let body = body_string(handle(req, &state).unwrap());

    assert!(body.contains("No apartments yet."));
    assert!(body.contains("Total: 0"));
}

#[test]
fn detail_page_hides_form_from_non_editors() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 2, "2C", ApartmentStatus::Reserved);

    let req = Request::builder()
        .uri(format!("/apartments/{}", apt.id))
        .header(IDENTITY_HEADER, "visitor@example.com")
        .body(Body::empty())
        .unwrap();

    let body = body_string(handle(req, &state).unwrap());
    assert!(body.contains("Floor 2 · 2C"));
    assert!(body.contains("aria-label=\"Status: Reserved\""));
    assert!(body.contains("visitor@example.com"));
    assert!(!body.contains("id=\"edit-apartment\""));
}

#[test]
fn detail_page_shows_form_to_editors() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 2, "2C", ApartmentStatus::Reserved);

    let req = Request::builder()
        .uri(format!("/apartments/{}", apt.id))
        .header(IDENTITY_HEADER, EDITOR.to_uppercase())
        .body(Body::empty())
        .unwrap();

    let body = body_string(handle(req, &state).unwrap());
    assert!(body.contains("id=\"edit-apartment\""));
    assert!(body.contains("<option value=\"reserved\" selected>Reserved</option>"));
}

#[test]
fn unknown_or_malformed_ids_are_not_found() {
    let (_dir, state) = init_test_state();

    for uri in [
        "/apartments/not-a-uuid".to_string(),
        format!("/apartments/{}", uuid::Uuid::new_v4()),
        "/nowhere".to_string(),
    ] {
        let req = Request::builder().uri(uri.as_str()).body(Body::empty()).unwrap();
        let err = handle(req, &state).unwrap_err();
        assert!(matches!(err, ServerError::NotFound), "{uri}");
    }
}

#[test]
fn api_lists_rows_as_json() {
    let (_dir, state) = init_test_state();
    let a = seed(&state, 3, "3A", ApartmentStatus::Sold);

    let req = Request::builder()
        .uri("/api/apartments")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &state).unwrap();
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let rows: Vec<Apartment> = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, a.id);
    assert_eq!(rows[0].status, ApartmentStatus::Sold);
}
