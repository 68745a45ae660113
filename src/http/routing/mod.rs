use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::middleware::handle_unexpected_errors;
use crate::config::Environment;

/// Wraps the resource routers with the health probe, request tracing and the
/// unexpected-error handler.
pub fn app(routers: impl IntoIterator<Item = Router>, environment: Environment) -> Router {
    let router = routers
        .into_iter()
        .fold(Router::new().route("/health", get(|| async { "ok" })), |acc, r| acc.merge(r));

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn_with_state(environment, handle_unexpected_errors)),
    )
}
