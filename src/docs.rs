use gatehouse_core::{ErrorResponse, UserRole};
use gatehouse_models::{
    AuthorityDto, CheckResponse, SignRequest, SignResponse, SignUpRequest, SignUpResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::sign_up,
        crate::modules::users::controller::sign,
        crate::modules::users::controller::check,
    ),
    components(
        schemas(
            UserRole,
            SignUpRequest,
            SignUpResponse,
            AuthorityDto,
            SignRequest,
            SignResponse,
            CheckResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Sign-up, sign-in and session check")
    ),
    info(
        title = "Gatehouse API",
        version = "0.1.0",
        description = "Stateless bearer-token authentication built with Rust and Axum.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
