use std::str::FromStr;
use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::Actor;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Identity attached to requests that passed token verification.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            role: self.role,
        }
    }
}

/// Middleware that validates JWT tokens and adds user info to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        reject(StatusCode::UNAUTHORIZED, "invalid or expired token")
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Failed to parse user ID from token: {}", e);
        reject(StatusCode::UNAUTHORIZED, "invalid token format")
    })?;

    let role = Role::from_str(&claims.role).map_err(|_| {
        tracing::warn!(user_id = %user_id, "Token carries an unknown role");
        reject(StatusCode::UNAUTHORIZED, "invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role,
    });

    Ok(next.run(req).await)
}

/// Middleware that admits only admins. Must run after [`authenticate`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let Some(user) = req.extensions().get::<AuthenticatedUser>() else {
        return Err(reject(StatusCode::UNAUTHORIZED, "authentication required"));
    };

    if user.role != Role::Admin {
        tracing::warn!(user_id = %user.user_id, email = %user.email, "Admin route rejected");
        return Err(reject(StatusCode::FORBIDDEN, "admin access required"));
    }

    Ok(next.run(req).await)
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "missing authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| reject(StatusCode::UNAUTHORIZED, "invalid authorization header"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(reject(
            StatusCode::UNAUTHORIZED,
            "invalid authorization header format, expected: Bearer <token>",
        )),
    }
}
