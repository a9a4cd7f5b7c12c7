//! Server construction: adapter selection, state assembly, and app wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use tracing::warn;

use cleit_backend::domain::ports::{
    FixtureMailer, FixtureOtpStore, FixtureSocietyStore, FixtureTokenVerifier, Mailer, OtpStore,
    SocietyStore, TokenVerifier,
};
use cleit_backend::domain::{
    OtpVerificationService, RegistrationService, SocietyProfileService, SupportDesk,
};
use cleit_backend::inbound::http::health::{live, ready, HealthState};
use cleit_backend::inbound::http::state::HttpState;
use cleit_backend::inbound::http::{contact, events, otp, registration, society, team};
use cleit_backend::outbound::email::ResendMailer;
use cleit_backend::outbound::otp::RedisOtpStore;
use cleit_backend::outbound::persistence::{DieselSocietyStore, StorePool};
use cleit_backend::outbound::token::FirebaseTokenVerifier;
use cleit_backend::Correlate;

#[cfg(debug_assertions)]
use cleit_backend::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn io_other(message: String) -> std::io::Error {
    std::io::Error::other(message)
}

/// Build the HTTP state, choosing real adapters where configuration allows
/// and in-memory fixtures otherwise.
pub async fn build_http_state(config: &AppConfig) -> std::io::Result<HttpState> {
    let society_store: Arc<dyn SocietyStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = StorePool::connect(url, config.db_pool_size)
                .await
                .map_err(|err| io_other(format!("database pool: {err}")))?;
            Arc::new(DieselSocietyStore::new(pool))
        }
        None => {
            warn!("CLEIT_DATABASE_URL not set; using in-memory society store");
            Arc::new(FixtureSocietyStore::new())
        }
    };

    let otp_store: Arc<dyn OtpStore> = match config.redis_url.as_deref() {
        Some(url) => Arc::new(
            RedisOtpStore::connect(url)
                .await
                .map_err(|err| io_other(format!("redis pool: {err}")))?,
        ),
        None => {
            warn!("CLEIT_REDIS_URL not set; using in-memory OTP store");
            Arc::new(FixtureOtpStore::new())
        }
    };

    let mailer: Arc<dyn Mailer> = match config.resend_api_key.as_deref() {
        Some(key) => Arc::new(
            ResendMailer::new(key).map_err(|err| io_other(format!("mailer: {err}")))?,
        ),
        None => {
            warn!("CLEIT_RESEND_API_KEY not set; outbound mail is recorded in memory");
            Arc::new(FixtureMailer::new())
        }
    };

    let verifier: Arc<dyn TokenVerifier> = match config.firebase_api_key.as_deref() {
        Some(key) => Arc::new(
            FirebaseTokenVerifier::new(key)
                .map_err(|err| io_other(format!("token verifier: {err}")))?,
        ),
        None => {
            warn!("CLEIT_FIREBASE_API_KEY not set; using fixture token verifier");
            Arc::new(FixtureTokenVerifier)
        }
    };

    Ok(HttpState {
        registration: RegistrationService::new(society_store.clone()),
        society: SocietyProfileService::new(society_store),
        otp: OtpVerificationService::new(otp_store),
        support: SupportDesk::new(mailer, config.mail_sender(), config.admin_email()),
        verifier,
    })
}

/// Assemble the actix app: API scope, health probes, middleware, and (in
/// debug builds) Swagger UI.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(registration::check_availability)
        .service(registration::register)
        .service(society::get_society)
        .service(society::update_profile)
        .service(society::delete_account)
        .service(team::add_member)
        .service(team::update_member)
        .service(team::remove_member)
        .service(events::list_events)
        .service(events::add_event)
        .service(events::update_event)
        .service(events::remove_event)
        .service(otp::verify_otp)
        .service(contact::submit_contact);

    #[cfg_attr(not(debug_assertions), expect(unused_mut, reason = "mutated in debug builds only"))]
    let mut app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(Correlate)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
