//! End-to-end coverage for OTP verification and the contact form.

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use cleit_backend::inbound::http::state::{FixtureHandles, HttpState};
use cleit_backend::inbound::http::{contact, otp};

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(
        web::scope("/api/v1")
            .service(otp::verify_otp)
            .service(contact::submit_contact),
    )
}

fn fixture_state() -> (web::Data<HttpState>, FixtureHandles) {
    let (state, handles) = HttpState::with_fixtures();
    (web::Data::new(state), handles)
}

#[actix_web::test]
async fn matching_code_verifies_once_only() {
    let (state, handles) = fixture_state();
    handles.otp_store.seed("drama@x.edu", "482913");
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "email": "drama@x.edu", "otp": "482913" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["verified"], true);

    // The code was consumed on the successful match.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "email": "drama@x.edu", "otp": "482913" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["verified"], false);
}

#[actix_web::test]
async fn mismatched_code_is_rejected_and_kept() {
    let (state, handles) = fixture_state();
    handles.otp_store.seed("drama@x.edu", "482913");
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "email": "drama@x.edu", "otp": "000000" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // The stored code survives a failed attempt.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "email": "drama@x.edu", "otp": "482913" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn contact_form_sends_acknowledgement_and_admin_copy() {
    let (state, handles) = fixture_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(json!({
                "name": "Asha",
                "email": "asha@x.edu",
                "subject": "Stall booking",
                "body": "First line\nSecond line"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Support message sent to user and admin");

    let sent = handles.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "asha@x.edu");
    assert!(sent[0].html.contains("First line<br>Second line"));
    assert_eq!(sent[1].subject, "New Contact Form Submission from Asha");
}

#[actix_web::test]
async fn contact_form_requires_every_field() {
    let (state, handles) = fixture_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(json!({
                "name": "Asha",
                "email": "asha@x.edu",
                "subject": "",
                "body": "Hello"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(handles.mailer.sent().is_empty());
}

#[actix_web::test]
async fn mailer_outage_surfaces_as_server_error() {
    let (state, handles) = fixture_state();
    handles.mailer.set_failing(true);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(json!({
                "name": "Asha",
                "email": "asha@x.edu",
                "subject": "Stall booking",
                "body": "Hello"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
