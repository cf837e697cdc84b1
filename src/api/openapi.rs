//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::{ChangePasswordRequest, SignUpRequest, UserResponse, UserRole};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the user manager service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Manager API",
        version = "0.1.0",
        description = "User management service with JWT role-based access",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::sign_up,
        auth_handler::sign_in,
        // Manager endpoints
        user_handler::update_user,
        user_handler::change_password,
        user_handler::delete_user,
        user_handler::get_by_username,
        user_handler::get_by_id,
        user_handler::list_all,
        user_handler::get_info,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            SignUpRequest,
            ChangePasswordRequest,
            // Auth types
            auth_handler::SignInRequest,
            TokenResponse,
            // Shared response types
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and sign-in"),
        (name = "Manager", description = "User management operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
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
                        .description(Some("JWT token obtained from /api/auth/signin"))
                        .build(),
                ),
            );
        }
    }
}
