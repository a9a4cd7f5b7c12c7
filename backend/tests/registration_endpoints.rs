//! End-to-end coverage for registration and availability endpoints.

use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use cleit_backend::inbound::http::state::HttpState;
use cleit_backend::inbound::http::{registration, society};

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
            .service(registration::check_availability)
            .service(registration::register)
            .service(society::get_society),
    )
}

fn fixture_state() -> web::Data<HttpState> {
    let (state, _) = HttpState::with_fixtures();
    web::Data::new(state)
}

fn register_body() -> Value {
    json!({
        "name": "Drama Club",
        "username": "drama",
        "email": "drama@x.edu",
        "password": "Aa1!aaaa"
    })
}

#[actix_web::test]
async fn registering_creates_an_empty_society() {
    let app = actix_test::init_service(test_app(fixture_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["ok"], true);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society?email=drama@x.edu")
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
    let body: Value = actix_test::read_body_json(res).await;
    let society = &body["society"];
    assert_eq!(society["team"], json!([]));
    assert_eq!(society["events"], json!([]));
    assert_eq!(society["auditionOpen"], false);
    assert_eq!(society["centralized"], false);
    assert!(society.get("password").is_none());
}

#[actix_web::test]
async fn availability_flips_after_registration() {
    let app = actix_test::init_service(test_app(fixture_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/registration/availability?username=drama")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["usernameExists"], false);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/registration/availability?username=drama")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["usernameExists"], true);

    // Emails are matched case-insensitively.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/registration/availability?email=Drama@X.edu")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["emailExists"], true);
}

#[actix_web::test]
async fn availability_requires_a_parameter() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/registration/availability")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn duplicate_username_cannot_register_twice() {
    let app = actix_test::init_service(test_app(fixture_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());

    let mut second = register_body();
    second["email"] = json!("other@x.edu");
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(second)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CONFLICT);

    // The losing registration must not have created a society.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society?email=other@x.edu")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn missing_fields_are_rejected() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let mut body = register_body();
    body["password"] = json!("");
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid Entry");
}

#[actix_web::test]
async fn malformed_email_is_rejected() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let mut body = register_body();
    body["email"] = json!("not-an-email");
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid Email Format!");
}
