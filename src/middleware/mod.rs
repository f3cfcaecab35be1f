/// HTTP middleware for the blog service
///
/// Provides JWT authentication and request timing. Authentication here is
/// optional by design: read endpoints are public, so a request without an
/// Authorization header passes through anonymously and write handlers
/// demand identity via the `UserId` extractor. A header that is present
/// but unusable is rejected outright.
pub mod permissions;

pub use permissions::*;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;
use uuid::Uuid;

use crate::auth::{TokenKeys, TOKEN_TYPE_ACCESS};
use crate::error::AppError;

// =====================================================================
// JWT Authentication
// =====================================================================

/// Extracted user identifier stored in request extensions after auth.
///
/// As an extractor it requires authentication: handlers that take a
/// `UserId` argument respond 401 when the request carried no valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// Actix middleware that validates a Bearer token when one is supplied.
pub struct JwtAuth {
    keys: TokenKeys,
}

impl JwtAuth {
    pub fn new(keys: TokenKeys) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
            keys: self.keys.clone(),
        }))
    }
}

pub struct JwtAuthService<S> {
    service: Rc<S>,
    keys: TokenKeys,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let keys = self.keys.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .map(|h| {
                    h.to_str().map_err(|_| {
                        AppError::Unauthorized("Invalid Authorization header".to_string())
                    })
                })
                .transpose()?;

            if let Some(header) = auth_header {
                let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Unauthorized("Invalid Authorization scheme".to_string())
                })?;

                let data = keys.validate_token(token).map_err(|_| {
                    AppError::Unauthorized("Invalid or expired token".to_string())
                })?;

                if data.claims.token_type != TOKEN_TYPE_ACCESS {
                    return Err(AppError::Unauthorized(
                        "Token is not an access token".to_string(),
                    )
                    .into());
                }

                let user_id = Uuid::parse_str(&data.claims.sub)
                    .map_err(|_| AppError::Unauthorized("Invalid user ID".to_string()))?;

                req.extensions_mut().insert(UserId(user_id));
            }

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(req.extensions().get::<UserId>().copied().ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided.".to_string())
        }))
    }
}

// =====================================================================
// Request timing
// =====================================================================

pub struct RequestTimer;

impl<S, B> Transform<S, ServiceRequest> for RequestTimer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTimerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimerService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTimerService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTimerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let path = req.path().to_string();
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed().as_millis();
            tracing::debug!(%method, %path, %elapsed, "request completed");
            res
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    fn keys() -> TokenKeys {
        TokenKeys::from_secret("middleware-test-secret")
    }

    async fn public(user: Option<UserId>) -> HttpResponse {
        match user {
            Some(id) => HttpResponse::Ok().body(id.0.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn private(user: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user.0.to_string())
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new().service(
                    web::scope("")
                        .wrap(JwtAuth::new(keys()))
                        .route("/public", web::get().to(public))
                        .route("/private", web::get().to(private)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_anonymous_passes_public_route() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/public").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_anonymous_rejected_on_private_route() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/private").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_invalid_token_rejected_even_on_public_route() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/public")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_valid_token_attaches_identity() {
        let app = test_app!();
        let user_id = Uuid::new_v4();
        let token = keys().generate_access_token(user_id, "leo").unwrap();

        let req = test::TestRequest::get()
            .uri("/private")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn test_refresh_token_rejected_as_credential() {
        let app = test_app!();
        let token = keys()
            .generate_refresh_token(Uuid::new_v4(), "leo")
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/private")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }
}
