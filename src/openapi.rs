/// OpenAPI documentation for the blog service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::TokenPair;
use crate::handlers;
use crate::handlers::comments::CommentPayload;
use crate::handlers::follows::FollowPayload;
use crate::handlers::jwt::{
    AccessTokenResponse, CreateTokenRequest, RefreshTokenRequest, VerifyTokenRequest,
};
use crate::handlers::posts::PostPayload;
use crate::models::{Comment, Follow, Group, Post};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Platform API",
        version = "0.1.0",
        description = "Blog platform API managing posts, groups, comments, and follows. Reads are public; writes require a JWT and content may only be changed by its author.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    paths(
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::create_post,
        handlers::posts::update_post,
        handlers::posts::partial_update_post,
        handlers::posts::delete_post,
        handlers::groups::list_groups,
        handlers::groups::get_group,
        handlers::comments::list_comments,
        handlers::comments::get_comment,
        handlers::comments::create_comment,
        handlers::comments::update_comment,
        handlers::comments::partial_update_comment,
        handlers::comments::delete_comment,
        handlers::follows::list_follows,
        handlers::follows::create_follow,
        handlers::jwt::create_token,
        handlers::jwt::refresh_token,
        handlers::jwt::verify_token,
    ),
    components(
        schemas(
            Post,
            Group,
            Comment,
            Follow,
            PostPayload,
            CommentPayload,
            FollowPayload,
            CreateTokenRequest,
            RefreshTokenRequest,
            VerifyTokenRequest,
            AccessTokenResponse,
            TokenPair,
        )
    ),
    tags(
        (name = "posts", description = "Post creation, retrieval, updates, and deletion"),
        (name = "groups", description = "Read-only group catalog"),
        (name = "comments", description = "Comment management on posts"),
        (name = "follows", description = "Subscriptions of the requesting user"),
        (name = "jwt", description = "Token issuance and verification"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /v1/jwt/create/"))
                        .build(),
                ),
            )
        }
    }
}
