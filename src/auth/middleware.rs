use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{TokenError, TokenService};
use crate::error::AppError;

/// Request-intercepting guard for every protected route.
///
/// Wrapped around the protected scope, it extracts and verifies the bearer
/// token before any handler runs, and injects the verified [`Claims`] into
/// request extensions on success. Applied uniformly; there is no
/// route-specific variation.
///
/// [`Claims`]: crate::auth::token::Claims
pub struct AuthMiddleware {
    tokens: TokenService,
}

impl AuthMiddleware {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let header_value = match header_value {
            Some(value) => value,
            None => {
                let app_err = AppError::Unauthenticated("authorization token required".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        // Expect exactly "Bearer <token>"; the scheme match is
        // case-insensitive.
        let parts: Vec<&str> = header_value.split_whitespace().collect();
        let token = match parts.as_slice() {
            [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => *token,
            _ => {
                let app_err = AppError::Unauthenticated("invalid authorization format".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        match self.tokens.verify(token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(TokenError::Expired) => {
                let app_err = AppError::Unauthenticated("token has expired".into());
                Box::pin(async move { Err(app_err.into()) })
            }
            Err(TokenError::Invalid) => {
                let app_err = AppError::Unauthenticated("invalid token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
