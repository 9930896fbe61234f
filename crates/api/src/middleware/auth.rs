//! Authentication middleware for protected routes.
//!
//! Only the presence and shape of a bearer credential are checked.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use leasebook_shared::{AppError, BearerCredential, Principal};

use crate::error::ApiError;

/// Authentication middleware that requires a bearer credential.
///
/// This middleware:
/// 1. Reads the Authorization header
/// 2. Parses it as `Bearer <token>`
/// 3. Stores the resulting `Principal` in request extensions
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|h| h.to_str().map_err(|_| AppError::Unauthorized("non-ASCII authorization header".into())));

    let credential = match header {
        None => Err(AppError::Unauthorized(
            "Authorization header with Bearer token is required".into(),
        )),
        Some(Err(e)) => Err(e),
        Some(Ok(value)) => BearerCredential::parse(value),
    };

    match credential {
        Ok(credential) => {
            request
                .extensions_mut()
                .insert(Principal::from_credential(&credential));
            next.run(request).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Extractor for the authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Returns a loggable fingerprint of the caller's token.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.0.fingerprint
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".into())))
    }
}
