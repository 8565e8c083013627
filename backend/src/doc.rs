//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the `/auth` handlers and health probes, the
//! request/response DTOs, the domain error wrappers ([`ErrorSchema`],
//! [`ErrorCodeSchema`]), and the session cookie security scheme.
//!
//! Swagger UI serves the document in debug builds; `cargo run --bin
//! openapi-dump` prints it for external tooling.

use crate::inbound::http::auth::{CredentialsRequest, UserResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/signup or POST /auth/signin.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "carvalue auth API",
        description = "Email/password signup, signin, and session-bound user lookup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::signin,
        crate::inbound::http::auth::signout,
        crate::inbound::http::auth::whoami,
        crate::inbound::http::auth::find_user,
        crate::inbound::http::auth::find_users_by_email,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CredentialsRequest, UserResponse, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "auth", description = "Account creation and session binding"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn user_response_exposes_only_public_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserResponse").expect("UserResponse schema");

        assert_object_schema_has_field(user, "id");
        assert_object_schema_has_field(user, "email");
        match user {
            RefOr::T(Schema::Object(obj)) => assert_eq!(obj.properties.len(), 2),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/auth/signup")]
    #[case("/auth/signin")]
    #[case("/auth/signout")]
    #[case("/auth/whoami")]
    #[case("/auth/{id}")]
    #[case("/auth")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
