/*
 * Responsibility
 * - v1 URL structure
 * - which routes need a principal / a role (route_layer guards)
 *
 * The access middleware (token → AuthCtx) is applied over the whole app in
 * app.rs; the guards here only read what it left behind.
 */
use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::v1::handlers::{admin, auth, users};
use crate::middleware::auth::guard::{require_authenticated, require_role};
use crate::services::auth::role::Role;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new().route("/auth/login", post(auth::login));

    let authenticated = Router::new()
        .route("/users/me", get(users::me))
        .route("/users/me/id", get(users::my_id))
        .route_layer(middleware::from_fn(require_authenticated));

    let admin = Router::new()
        .route("/admin/users/{user_id}", get(admin::get_user))
        .route_layer(middleware::from_fn_with_state(Role::Admin, require_role));

    public.merge(authenticated).merge(admin)
}
