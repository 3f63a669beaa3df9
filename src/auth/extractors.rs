use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated user's ID from request extensions.
///
/// This extractor is intended for routes protected by `AuthMiddleware`, which
/// validates the bearer token and inserts the verified `Claims` into request
/// extensions.
///
/// If no claims are present (e.g. `AuthMiddleware` did not run), this
/// extractor returns an `AppError::Unauthenticated` error.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUserId(pub i32);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUserId(claims.sub))),
            None => {
                // Unreachable when AuthMiddleware is correctly applied; if the
                // claims are missing the safe answer is still a 401.
                let err = AppError::Unauthenticated("authorization token required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
