/// HTTP handlers for the blog API
///
/// This module contains handlers for:
/// - Posts: full CRUD, author-or-read-only
/// - Groups: read-only listing and detail
/// - Comments: full CRUD nested under a post
/// - Follows: list and create subscriptions for the requester
/// - JWT: token create/refresh/verify
pub mod comments;
pub mod follows;
pub mod groups;
pub mod jwt;
pub mod posts;

// Re-export handler functions at module level
pub use comments::{
    create_comment, delete_comment, get_comment, list_comments, partial_update_comment,
    update_comment,
};
pub use follows::{create_follow, list_follows};
pub use groups::{get_group, list_groups};
pub use jwt::{create_token, refresh_token, verify_token};
pub use posts::{
    create_post, delete_post, get_post, list_posts, partial_update_post, update_post,
};

use actix_web::web;

use crate::auth::TokenKeys;
use crate::error::AppError;
use crate::middleware::{JwtAuth, RequestTimer};

/// Mount the versioned API surface onto an application.
///
/// The whole `/v1` scope runs behind the JWT middleware; read endpoints
/// stay public because the middleware only rejects credentials that are
/// present and unusable.
pub fn configure(keys: TokenKeys) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(keys.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Malformed JSON body: {err}")).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Malformed query string: {err}")).into()
            }))
            .service(
                web::scope("/v1")
                    .wrap(JwtAuth::new(keys))
                    .wrap(RequestTimer)
                    .service(
                        web::scope("/jwt")
                            .route("/create/", web::post().to(create_token))
                            .route("/refresh/", web::post().to(refresh_token))
                            .route("/verify/", web::post().to(verify_token)),
                    )
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("/")
                                    .route(web::get().to(list_posts))
                                    .route(web::post().to(create_post)),
                            )
                            .service(
                                web::resource("/{post_id}/")
                                    .route(web::get().to(get_post))
                                    .route(web::put().to(update_post))
                                    .route(web::patch().to(partial_update_post))
                                    .route(web::delete().to(delete_post)),
                            )
                            .service(
                                web::resource("/{post_id}/comments/")
                                    .route(web::get().to(list_comments))
                                    .route(web::post().to(create_comment)),
                            )
                            .service(
                                web::resource("/{post_id}/comments/{comment_id}/")
                                    .route(web::get().to(get_comment))
                                    .route(web::put().to(update_comment))
                                    .route(web::patch().to(partial_update_comment))
                                    .route(web::delete().to(delete_comment)),
                            ),
                    )
                    .service(
                        web::scope("/groups")
                            .route("/", web::get().to(list_groups))
                            .route("/{group_id}/", web::get().to(get_group)),
                    )
                    .service(
                        web::scope("/follow").service(
                            web::resource("/")
                                .route(web::get().to(list_follows))
                                .route(web::post().to(create_follow)),
                        ),
                    ),
            );
    }
}
