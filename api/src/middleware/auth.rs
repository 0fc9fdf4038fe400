//! Session guard middleware for protecting API endpoints.
//!
//! The guard reads the access token from the `Authorization: Bearer` header
//! and the refresh token from `X-Refresh-Token`, runs the refresh protocol,
//! and injects a [`SessionContext`] into the request. The tokens the client
//! should keep using are written back on the same two response headers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue, AUTHORIZATION},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use insapp_core::domain::entities::token::{Claims, SessionRenewal};
use insapp_core::errors::DomainError;
use insapp_core::repositories::RevocationStore;
use insapp_core::services::token::TokenService;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;

use crate::handlers::error::ApiError;

/// Header carrying the refresh token in both directions
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Identity of the caller, injected into guarded requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub username: String,
    pub role: String,
    /// Whether the guard minted a new access token for this request
    pub renewed: bool,
}

impl SessionContext {
    pub fn from_claims(claims: Claims, renewed: bool) -> Self {
        Self {
            username: claims.username,
            role: claims.role,
            renewed,
        }
    }
}

/// Session guard middleware factory
pub struct SessionGuard<S: RevocationStore> {
    token_service: Arc<TokenService<S>>,
}

impl<S: RevocationStore> SessionGuard<S> {
    pub fn new(token_service: Arc<TokenService<S>>) -> Self {
        Self { token_service }
    }
}

impl<St, B, S> Transform<St, ServiceRequest> for SessionGuard<S>
where
    St: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    St::Future: 'static,
    B: 'static,
    S: RevocationStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<St, S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: St) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// Session guard middleware service
pub struct SessionGuardMiddleware<St, S: RevocationStore> {
    service: Rc<St>,
    token_service: Arc<TokenService<S>>,
}

impl<St, B, S> Service<ServiceRequest> for SessionGuardMiddleware<St, S>
where
    St: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    St::Future: 'static,
    B: 'static,
    S: RevocationStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let session = authenticate(&req, &token_service).await;
            let (renewal, authorization, refresh) = match session {
                Ok(session) => session,
                Err(err) => {
                    // Rejected before reaching the handler
                    let response = err.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if renewal.renewed {
                debug!(username = %renewal.claims.username, "Access token renewed by session guard");
            }

            req.extensions_mut()
                .insert(SessionContext::from_claims(renewal.claims, renewal.renewed));

            let mut res = service.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(AUTHORIZATION, authorization);
            headers.insert(HeaderName::from_static(REFRESH_TOKEN_HEADER), refresh);

            Ok(res.map_into_left_body())
        })
    }
}

/// Runs the refresh protocol on the credentials carried by `req`
///
/// Returns the renewal together with the response header values to send back.
async fn authenticate<S: RevocationStore>(
    req: &ServiceRequest,
    token_service: &TokenService<S>,
) -> Result<(SessionRenewal, HeaderValue, HeaderValue), ApiError> {
    let access_token = extract_bearer_token(req)
        .ok_or(ApiError::MissingCredentials("Authorization bearer token"))?;
    let refresh_token = extract_refresh_token(req)
        .ok_or(ApiError::MissingCredentials("X-Refresh-Token header"))?;

    let renewal = token_service
        .check_and_refresh(&access_token, &refresh_token)
        .await?;

    let authorization = header_value(&format!("Bearer {}", renewal.access_token))?;
    let refresh = header_value(&renewal.refresh_token)?;

    Ok((renewal, authorization, refresh))
}

/// Extracts Bearer token from Authorization header
///
/// The scheme name is matched case-insensitively.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token.trim().to_string()).filter(|t| !t.is_empty())
}

/// Extracts the refresh token from its dedicated header
fn extract_refresh_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(REFRESH_TOKEN_HEADER)?
        .to_str()
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| {
        ApiError::Domain(DomainError::Internal {
            message: format!("Token is not a valid header value: {}", e),
        })
    })
}

/// Extractor for the session established by [`SessionGuard`]
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| ApiError::MissingCredentials("session").into());

        ready(result)
    }
}
