use axum::{routing::get, Router};

use crate::features::pages::handlers::{self, PageState};

/// Create routes for the HTML pages
pub fn routes(state: PageState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/anonymous", get(handlers::anonymous))
        .route("/user/{user_id}", get(handlers::user).post(handlers::user))
        .route("/admin", get(handlers::admin).post(handlers::admin))
        .with_state(state)
}
