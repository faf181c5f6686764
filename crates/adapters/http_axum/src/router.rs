//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use mudstore_app::ports::{ItemStorage, LinkStorage, PlayerStorage, RoomStorage, UserStorage};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api` and serves `/health`. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG`
/// level using the `tracing` ecosystem.
pub fn build<RS, LS, IS, PS, US>(state: AppState<RS, LS, IS, PS, US>) -> Router
where
    RS: RoomStorage + Send + Sync + 'static,
    LS: LinkStorage + Send + Sync + 'static,
    IS: ItemStorage + Send + Sync + 'static,
    PS: PlayerStorage + Send + Sync + 'static,
    US: UserStorage + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
