/// Token handlers - login, refresh, and verification
///
/// Login failures are deliberately vague: the response never says whether
/// the username or the password was wrong.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{self, TokenKeys, TOKEN_TYPE_REFRESH};
use crate::db::user_repo;
use crate::error::{AppError, FieldErrors, Result};

const LOGIN_FAILED: &str = "No active account found with the given credentials";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTokenRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: Option<String>,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyTokenRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[utoipa::path(
    post,
    path = "/v1/jwt/create/",
    tag = "jwt",
    request_body = CreateTokenRequest,
    responses(
        (status = 200, description = "Token pair issued", body = crate::auth::TokenPair),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn create_token(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    payload: web::Json<CreateTokenRequest>,
) -> Result<HttpResponse> {
    let req = CreateTokenRequest {
        username: payload.username.as_deref().map(|u| u.trim().to_string()),
        password: payload.password.clone(),
    };
    req.validate()?;

    let mut fields = FieldErrors::new();
    if req.username.is_none() {
        fields.push("username", "This field is required.");
    }
    if req.password.is_none() {
        fields.push("password", "This field is required.");
    }
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::Validation(fields));
    };

    let user = user_repo::find_user_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(LOGIN_FAILED.to_string()))?;

    let verified = auth::verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verified {
        return Err(AppError::Unauthorized(LOGIN_FAILED.to_string()));
    }

    let pair = keys
        .generate_token_pair(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(pair))
}

#[utoipa::path(
    post,
    path = "/v1/jwt/refresh/",
    tag = "jwt",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Refresh token invalid or expired")
    )
)]
pub async fn refresh_token(
    keys: web::Data<TokenKeys>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;
    let refresh = payload
        .refresh
        .as_deref()
        .ok_or_else(|| AppError::field("refresh", "This field is required."))?;

    let data = keys
        .validate_token(refresh)
        .map_err(|_| AppError::Unauthorized("Token is invalid or expired".to_string()))?;

    if data.claims.token_type != TOKEN_TYPE_REFRESH {
        return Err(AppError::Unauthorized(
            "Token is not a refresh token".to_string(),
        ));
    }

    let user_id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID".to_string()))?;

    let access = keys
        .generate_access_token(user_id, &data.claims.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse { access }))
}

#[utoipa::path(
    post,
    path = "/v1/jwt/verify/",
    tag = "jwt",
    request_body = VerifyTokenRequest,
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Token invalid or expired")
    )
)]
pub async fn verify_token(
    keys: web::Data<TokenKeys>,
    payload: web::Json<VerifyTokenRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;
    let token = payload
        .token
        .as_deref()
        .ok_or_else(|| AppError::field("token", "This field is required."))?;

    keys.validate_token(token)
        .map_err(|_| AppError::Unauthorized("Token is invalid or expired".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}
