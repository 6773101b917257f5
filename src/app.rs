use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes;

/// Path of the token endpoint, relative to the context path.
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Build the application router, mounted under `server.context_path` when one is set.
pub fn router(config: &Config) -> Router {
    let grant = Arc::new(config.grant.clone());

    let oauth = Router::new()
        .route(TOKEN_PATH, post(routes::token::token))
        .with_state(grant);

    let app = if config.server.context_path.is_empty() {
        oauth
    } else {
        Router::new().nest(&config.server.context_path, oauth)
    };

    app.layer(TraceLayer::new_for_http())
}
