use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;
use crate::users::auth::identity_middleware;
use crate::users::handlers;

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        // Public authentication endpoints
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        // Merge identity-resolved user routes
        .merge(create_user_routes(state))
}

/// User routes run behind the identity resolver; the policy engine in each
/// handler decides what the resolved identity may do.
fn create_user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route(
            "/users/{username}",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(middleware::from_fn_with_state(state, identity_middleware))
}
