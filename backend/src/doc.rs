//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every REST path and schema. Swagger UI serves the
//! generated document in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cleit backend API",
        description = "HTTP interface for society registration, profiles, rosters, and events."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::registration::check_availability,
        crate::inbound::http::registration::register,
        crate::inbound::http::society::get_society,
        crate::inbound::http::society::update_profile,
        crate::inbound::http::society::delete_account,
        crate::inbound::http::team::add_member,
        crate::inbound::http::team::update_member,
        crate::inbound::http::team::remove_member,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::add_event,
        crate::inbound::http::events::update_event,
        crate::inbound::http::events::remove_event,
        crate::inbound::http::otp::verify_otp,
        crate::inbound::http::contact::submit_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Society,
        crate::domain::SocialLink,
        crate::domain::EligibilityCriterion,
        crate::domain::ProfileUpdate,
        crate::domain::TeamMember,
        crate::domain::TeamMemberDraft,
        crate::domain::TeamMemberUpdate,
        crate::domain::Event,
        crate::domain::EventContact,
        crate::domain::EventDraft,
        crate::domain::EventUpdate,
        crate::domain::User,
        crate::domain::SocietyRef,
        crate::inbound::http::registration::AvailabilityResponse,
        crate::inbound::http::registration::RegisterBody,
        crate::inbound::http::registration::RegisterResponse,
        crate::inbound::http::society::SocietyEnvelope,
        crate::inbound::http::society::UpdatedSocietyEnvelope,
        crate::inbound::http::society::DeletedResponse,
        crate::inbound::http::society::UpdateProfileBody,
        crate::inbound::http::team::AddMemberBody,
        crate::inbound::http::team::UpdateMemberBody,
        crate::inbound::http::team::RemoveMemberBody,
        crate::inbound::http::events::EventsEnvelope,
        crate::inbound::http::events::AddEventBody,
        crate::inbound::http::events::UpdateEventBody,
        crate::inbound::http::events::RemoveEventBody,
        crate::inbound::http::otp::VerifyOtpBody,
        crate::inbound::http::otp::VerifyOtpResponse,
        crate::inbound::http::contact::ContactBody,
        crate::inbound::http::contact::ContactResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/v1/registration/availability",
            "/api/v1/registration",
            "/api/v1/society",
            "/api/v1/society/team",
            "/api/v1/society/events",
            "/api/v1/otp/verify",
            "/api/v1/contact",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }
}
