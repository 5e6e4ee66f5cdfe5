use crate::db::apartments::get_apartment;
use crate::domain::{Apartment, ApartmentStatus};
use crate::errors::{ResultResp, ServerError};
use crate::router::{handle, AppState, IDENTITY_HEADER};
use crate::tests::utils::{init_test_state, seed, EDITOR};
use astra::Body;
use http::{Method, Request};

fn post_form(state: &AppState, apt: &Apartment, who: Option<&str>, form: &str) -> ResultResp {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(format!("/apartments/{}", apt.id))
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(email) = who {
        builder = builder.header(IDENTITY_HEADER, email);
    }
    let req = builder.body(Body::from(form.as_bytes().to_vec())).unwrap();
    handle(req, state)
}

fn reload(state: &AppState, apt: &Apartment) -> Apartment {
    state
        .db
        .with_conn(|conn| get_apartment(conn, apt.id))
        .unwrap()
        .unwrap()
}

#[test]
fn editor_can_update_status_and_notes() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 4, "4A", ApartmentStatus::Available);

    let resp = post_form(&state, &apt, Some(EDITOR), "status=reserved&notes=Deposit+received")
        .expect("Handler failed");

    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        format!("/apartments/{}", apt.id)
    );

    let after = reload(&state, &apt);
    assert_eq!(after.status, ApartmentStatus::Reserved);
    assert_eq!(after.notes.as_deref(), Some("Deposit received"));
    assert_eq!(after.updated_by.as_deref(), Some(EDITOR));
    assert!(after.updated_at >= apt.updated_at);
    assert_eq!(after.unit, apt.unit);
}

#[test]
fn sold_can_go_back_to_available() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 4, "4B", ApartmentStatus::Sold);

    post_form(&state, &apt, Some(EDITOR), "status=available").unwrap();

    assert_eq!(reload(&state, &apt).status, ApartmentStatus::Available);
}

#[test]
fn non_editor_is_forbidden_and_row_unchanged() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 5, "5A", ApartmentStatus::Available);

    let err = post_form(&state, &apt, Some("visitor@example.com"), "status=sold").unwrap_err();
    assert!(matches!(err, ServerError::Forbidden(_)));

    let err = post_form(&state, &apt, None, "status=sold").unwrap_err();
    assert!(matches!(err, ServerError::Forbidden(_)));

    assert_eq!(reload(&state, &apt), apt);
}

#[test]
fn invalid_status_is_rejected() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 5, "5B", ApartmentStatus::Available);

    let err = post_form(&state, &apt, Some(EDITOR), "status=pending").unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(reload(&state, &apt).status, ApartmentStatus::Available);
}

#[test]
fn blank_notes_clear_existing_notes() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 6, "6A", ApartmentStatus::Available);

    post_form(&state, &apt, Some(EDITOR), "notes=Corner+unit").unwrap();
    assert_eq!(reload(&state, &apt).notes.as_deref(), Some("Corner unit"));

    post_form(&state, &apt, Some(EDITOR), "status=available&notes=").unwrap();
    assert_eq!(reload(&state, &apt).notes, None);
}

#[test]
fn oversized_form_is_rejected_without_saving() {
    let (_dir, state) = init_test_state();
    let apt = seed(&state, 6, "6B", ApartmentStatus::Available);

    let form = format!("status=sold&notes={}", "x".repeat(20_000));
    let err = post_form(&state, &apt, Some(EDITOR), &form).unwrap_err();

    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(reload(&state, &apt), apt);
}
