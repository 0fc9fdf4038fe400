use actix_web::HttpResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::auth::SessionContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the identity of the current session and whether the guard had to
/// renew its access token on the way in. Guarded by the session
/// middleware, which also writes the tokens to keep using on the
/// `Authorization` and `X-Refresh-Token` response headers.
pub async fn me(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        username: session.username,
        role: session.role,
        renewed: session.renewed,
    })
}
