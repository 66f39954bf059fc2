use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use roster_core::user::Identity;

use crate::infra::app_state::AppState;

/// Resolve the request's bearer credential into an [`Identity`] extension
/// before any handler runs.
///
/// Resolution never fails the request: a missing, malformed, expired, or
/// badly signed token resolves to `Identity::Anonymous`, and the policy
/// layer decides what an anonymous caller may do. An invalid credential is
/// never upgraded to partial trust. Resolution works from claims alone and
/// never consults the store.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(&state, &request);
    request.extensions_mut().insert(identity);
    next.run(request).await
}

fn resolve_identity(state: &AppState, request: &Request) -> Identity {
    match extract_bearer_token(request) {
        Some(token) => match state.tokens.validate(&token) {
            Ok(claims) => claims.identity(),
            Err(_) => Identity::Anonymous,
        },
        None => Identity::Anonymous,
    }
}

fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
