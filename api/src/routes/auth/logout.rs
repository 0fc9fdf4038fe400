use actix_web::{web, HttpResponse};
use validator::Validate;

use insapp_core::repositories::RevocationStore;

use crate::app::AppState;
use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the session behind the presented refresh token. An already
/// revoked or expired refresh token is accepted.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: The string is not a refresh token signed by this server
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout<S>(
    state: web::Data<AppState<S>>,
    request: web::Json<LogoutRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: RevocationStore + 'static,
{
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    state.token_service.revoke(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
