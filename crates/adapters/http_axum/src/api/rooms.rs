//! JSON REST handlers for rooms.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use mudstore_app::ports::RoomStorage;
use mudstore_app::services::room_service::RoomService;
use mudstore_domain::id::{PlayerId, RoomId};
use mudstore_domain::page::Page;
use mudstore_domain::room::{Room, RoomChange, RoomFilter};

use super::ApiResponse;
use crate::error::ApiError;

/// Query string of `GET /api/rooms`.
#[derive(Debug, Default, Deserialize)]
pub struct RoomQuery {
    pub owner_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

impl From<RoomQuery> for RoomFilter {
    fn from(query: RoomQuery) -> Self {
        Self {
            owner_id: query.owner_id.map(PlayerId::from_uuid),
            parent_id: query.parent_id.map(RoomId::from_uuid),
            page: Page::new(query.offset, query.limit),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<S>(
    State(service): State<Arc<RoomService<S>>>,
    Query(query): Query<RoomQuery>,
) -> Result<ApiResponse<Vec<Room>>, ApiError>
where
    S: RoomStorage + Send + Sync + 'static,
{
    let rooms = service.list_rooms(query.into()).await?;
    Ok(ApiResponse::Ok(Json(rooms)))
}

/// `GET /api/rooms/{id}`
pub async fn get<S>(
    State(service): State<Arc<RoomService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Room>, ApiError>
where
    S: RoomStorage + Send + Sync + 'static,
{
    let room = service.get_room(RoomId::from_uuid(id)).await?;
    Ok(ApiResponse::Ok(Json(room)))
}

/// `POST /api/rooms`
pub async fn create<S>(
    State(service): State<Arc<RoomService<S>>>,
    Json(change): Json<RoomChange>,
) -> Result<ApiResponse<Room>, ApiError>
where
    S: RoomStorage + Send + Sync + 'static,
{
    let room = service.create_room(change).await?;
    Ok(ApiResponse::Created(Json(room)))
}

/// `PUT /api/rooms/{id}`
pub async fn update<S>(
    State(service): State<Arc<RoomService<S>>>,
    Path(id): Path<Uuid>,
    Json(change): Json<RoomChange>,
) -> Result<ApiResponse<Room>, ApiError>
where
    S: RoomStorage + Send + Sync + 'static,
{
    let room = service.update_room(RoomId::from_uuid(id), change).await?;
    Ok(ApiResponse::Ok(Json(room)))
}

/// `DELETE /api/rooms/{id}`
pub async fn remove<S>(
    State(service): State<Arc<RoomService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: RoomStorage + Send + Sync + 'static,
{
    service.remove_room(RoomId::from_uuid(id)).await?;
    Ok(ApiResponse::NoContent)
}
