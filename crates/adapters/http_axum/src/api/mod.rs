//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod items;
#[allow(clippy::missing_errors_doc)]
pub mod links;
#[allow(clippy::missing_errors_doc)]
pub mod players;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use mudstore_app::ports::{ItemStorage, LinkStorage, PlayerStorage, RoomStorage, UserStorage};
use mudstore_domain::error::MudError;
use mudstore_domain::location::LocationId;

use crate::error::ApiError;
use crate::state::AppState;

/// Successful responses shared by every resource.
pub enum ApiResponse<T> {
    Ok(Json<T>),
    Created(Json<T>),
    NoContent,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Combine the `location_kind` and `location_id` query parameters.
fn location_param(kind: Option<&str>, id: Option<Uuid>) -> Result<Option<LocationId>, ApiError> {
    match (kind, id) {
        (None, None) => Ok(None),
        (Some(kind), Some(id)) => Ok(Some(LocationId::new(kind, id).map_err(MudError::from)?)),
        _ => Err(ApiError::BadRequest(
            "location_kind and location_id must be given together".to_string(),
        )),
    }
}

/// Build the `/api` sub-router.
pub fn routes<RS, LS, IS, PS, US>() -> Router<AppState<RS, LS, IS, PS, US>>
where
    RS: RoomStorage + Send + Sync + 'static,
    LS: LinkStorage + Send + Sync + 'static,
    IS: ItemStorage + Send + Sync + 'static,
    PS: PlayerStorage + Send + Sync + 'static,
    US: UserStorage + Send + Sync + 'static,
{
    Router::new()
        // Rooms
        .route("/rooms", get(rooms::list::<RS>).post(rooms::create::<RS>))
        .route(
            "/rooms/{id}",
            get(rooms::get::<RS>)
                .put(rooms::update::<RS>)
                .delete(rooms::remove::<RS>),
        )
        // Links
        .route("/links", get(links::list::<LS>).post(links::create::<LS>))
        .route(
            "/links/{id}",
            get(links::get::<LS>)
                .put(links::update::<LS>)
                .delete(links::remove::<LS>),
        )
        // Items
        .route("/items", get(items::list::<IS>).post(items::create::<IS>))
        .route(
            "/items/{id}",
            get(items::get::<IS>)
                .put(items::update::<IS>)
                .delete(items::remove::<IS>),
        )
        // Players
        .route(
            "/players",
            get(players::list::<PS>).post(players::create::<PS>),
        )
        .route(
            "/players/{id}",
            get(players::get::<PS>)
                .put(players::update::<PS>)
                .delete(players::remove::<PS>),
        )
        // Users
        .route("/users", get(users::list::<US>).post(users::create::<US>))
        .route(
            "/users/{id}",
            get(users::get::<US>)
                .put(users::update::<US>)
                .delete(users::remove::<US>),
        )
}
