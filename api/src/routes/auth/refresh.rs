use actix_web::{web, HttpResponse};
use validator::Validate;

use insapp_core::repositories::RevocationStore;

use crate::app::AppState;
use crate::dto::auth::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/refresh
///
/// Runs the refresh protocol on the presented token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "renewed": true
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty token fields
/// - 401 Unauthorized: Malformed access token, or refresh token revoked or expired
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh<S>(
    state: web::Data<AppState<S>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: RevocationStore + 'static,
{
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let renewal = state
        .token_service
        .check_and_refresh(&request.access_token, &request.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(RefreshTokenResponse::from(renewal)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_rejects_empty_tokens() {
        let request = RefreshTokenRequest {
            access_token: String::new(),
            refresh_token: "eyJ".to_string(),
        };

        assert!(request.validate().is_err());
    }
}
