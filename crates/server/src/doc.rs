use crate::routes::{auth, export, health, requests};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "coordinator_session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("id"))),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::login,
        auth::check_auth,
        auth::logout,
        requests::submit_request,
        requests::list_requests,
        requests::decide_request,
        export::export_approved,
        export::email_report,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Coordinator session endpoints"),
        (name = "Requests", description = "OD request submission and decisions"),
        (name = "Export", description = "Approved-request reports"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "OD Automation API",
        version = "1.0.0",
        description = "On-Duty request approval API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
