//! Platform API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

/// Platform router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/platforms", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route("/github/orgs/{org}/repos", get(handler::list_org_repos))
}
