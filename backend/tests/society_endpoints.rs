//! End-to-end coverage for society profile reads, updates, and deletion.

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use cleit_backend::domain::ports::FixtureTokenVerifier;
use cleit_backend::inbound::http::state::HttpState;
use cleit_backend::inbound::http::{registration, society, team};

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
            .service(registration::register)
            .service(society::get_society)
            .service(society::update_profile)
            .service(society::delete_account)
            .service(team::add_member),
    )
}

fn fixture_state() -> web::Data<HttpState> {
    let (state, _) = HttpState::with_fixtures();
    web::Data::new(state)
}

fn bearer(email: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        AUTHORIZATION,
        format!("Bearer {}", FixtureTokenVerifier::token_for(email)),
    )
}

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
    username: &str,
) {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registration")
            .set_json(json!({
                "name": "Drama Club",
                "username": username,
                "email": email,
                "password": "Aa1!aaaa"
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
}

#[actix_web::test]
async fn unknown_society_is_not_found() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society?email=ghost@x.edu")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Society not found");
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn lookup_requires_an_email() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn partial_update_keeps_roster_and_lists() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    register(&app, "drama@x.edu", "drama").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/society/team")
            .insert_header(bearer("drama@x.edu"))
            .set_json(json!({ "newMember": { "name": "Asha", "designation": "President" } }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/society")
            .insert_header(bearer("drama@x.edu"))
            .set_json(json!({
                "updates": {
                    "about": "We act",
                    "auditionOpen": true,
                    "social": [{ "name": "instagram", "handle": "@drama" }]
                }
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["society"]["about"], "We act");
    assert_eq!(body["society"]["auditionOpen"], true);
    assert_eq!(body["society"]["team"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["society"]["social"][0]["handle"], "@drama");
}

#[actix_web::test]
async fn update_without_header_changes_nothing() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    register(&app, "drama@x.edu", "drama").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/society")
            .set_json(json!({ "updates": { "about": "hijacked" } }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society?email=drama@x.edu")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["society"]["about"], "");
}

#[actix_web::test]
async fn update_with_unknown_token_is_unauthorized() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    register(&app, "drama@x.edu", "drama").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/society")
            .insert_header((AUTHORIZATION, "Bearer not-a-known-token"))
            .set_json(json!({ "updates": { "about": "hijacked" } }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn delete_account_removes_the_society() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    register(&app, "drama@x.edu", "drama").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/society")
            .insert_header(bearer("drama@x.edu"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["success"], true);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society?email=drama@x.edu")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_for_principal_without_society_is_not_found() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    register(&app, "drama@x.edu", "drama").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/society")
            .insert_header(bearer("stranger@x.edu"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The existing society is untouched.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/society?email=drama@x.edu")
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
}
