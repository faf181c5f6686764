//! JSON REST handlers for players.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use mudstore_app::ports::PlayerStorage;
use mudstore_app::services::player_service::PlayerService;
use mudstore_domain::id::PlayerId;
use mudstore_domain::page::Page;
use mudstore_domain::player::{Player, PlayerChange, PlayerFilter};

use super::{ApiResponse, location_param};
use crate::error::ApiError;

/// Query string of `GET /api/players`.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    pub location_kind: Option<String>,
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

impl TryFrom<PlayerQuery> for PlayerFilter {
    type Error = ApiError;

    fn try_from(query: PlayerQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            location_id: location_param(query.location_kind.as_deref(), query.location_id)?,
            page: Page::new(query.offset, query.limit),
        })
    }
}

/// `GET /api/players`
pub async fn list<S>(
    State(service): State<Arc<PlayerService<S>>>,
    Query(query): Query<PlayerQuery>,
) -> Result<ApiResponse<Vec<Player>>, ApiError>
where
    S: PlayerStorage + Send + Sync + 'static,
{
    let players = service.list_players(query.try_into()?).await?;
    Ok(ApiResponse::Ok(Json(players)))
}

/// `GET /api/players/{id}`
pub async fn get<S>(
    State(service): State<Arc<PlayerService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Player>, ApiError>
where
    S: PlayerStorage + Send + Sync + 'static,
{
    let player = service.get_player(PlayerId::from_uuid(id)).await?;
    Ok(ApiResponse::Ok(Json(player)))
}

/// `POST /api/players`
pub async fn create<S>(
    State(service): State<Arc<PlayerService<S>>>,
    Json(change): Json<PlayerChange>,
) -> Result<ApiResponse<Player>, ApiError>
where
    S: PlayerStorage + Send + Sync + 'static,
{
    let player = service.create_player(change).await?;
    Ok(ApiResponse::Created(Json(player)))
}

/// `PUT /api/players/{id}`
pub async fn update<S>(
    State(service): State<Arc<PlayerService<S>>>,
    Path(id): Path<Uuid>,
    Json(change): Json<PlayerChange>,
) -> Result<ApiResponse<Player>, ApiError>
where
    S: PlayerStorage + Send + Sync + 'static,
{
    let player = service
        .update_player(PlayerId::from_uuid(id), change)
        .await?;
    Ok(ApiResponse::Ok(Json(player)))
}

/// `DELETE /api/players/{id}`
pub async fn remove<S>(
    State(service): State<Arc<PlayerService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: PlayerStorage + Send + Sync + 'static,
{
    service.remove_player(PlayerId::from_uuid(id)).await?;
    Ok(ApiResponse::NoContent)
}
