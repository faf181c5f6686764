//! JSON REST handlers for items.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use mudstore_app::ports::ItemStorage;
use mudstore_app::services::item_service::ItemService;
use mudstore_domain::id::{ItemId, PlayerId};
use mudstore_domain::item::{Item, ItemChange, ItemFilter};
use mudstore_domain::page::Page;

use super::{ApiResponse, location_param};
use crate::error::ApiError;

/// Query string of `GET /api/items`.
///
/// A location is given as `location_kind` (`room`, `player` or `item`)
/// together with `location_id`.
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub owner_id: Option<Uuid>,
    pub location_kind: Option<String>,
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

impl TryFrom<ItemQuery> for ItemFilter {
    type Error = ApiError;

    fn try_from(query: ItemQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            owner_id: query.owner_id.map(PlayerId::from_uuid),
            location_id: location_param(query.location_kind.as_deref(), query.location_id)?,
            page: Page::new(query.offset, query.limit),
        })
    }
}

/// `GET /api/items`
pub async fn list<S>(
    State(service): State<Arc<ItemService<S>>>,
    Query(query): Query<ItemQuery>,
) -> Result<ApiResponse<Vec<Item>>, ApiError>
where
    S: ItemStorage + Send + Sync + 'static,
{
    let items = service.list_items(query.try_into()?).await?;
    Ok(ApiResponse::Ok(Json(items)))
}

/// `GET /api/items/{id}`
pub async fn get<S>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Item>, ApiError>
where
    S: ItemStorage + Send + Sync + 'static,
{
    let item = service.get_item(ItemId::from_uuid(id)).await?;
    Ok(ApiResponse::Ok(Json(item)))
}

/// `POST /api/items`
pub async fn create<S>(
    State(service): State<Arc<ItemService<S>>>,
    Json(change): Json<ItemChange>,
) -> Result<ApiResponse<Item>, ApiError>
where
    S: ItemStorage + Send + Sync + 'static,
{
    let item = service.create_item(change).await?;
    Ok(ApiResponse::Created(Json(item)))
}

/// `PUT /api/items/{id}`
pub async fn update<S>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<Uuid>,
    Json(change): Json<ItemChange>,
) -> Result<ApiResponse<Item>, ApiError>
where
    S: ItemStorage + Send + Sync + 'static,
{
    let item = service.update_item(ItemId::from_uuid(id), change).await?;
    Ok(ApiResponse::Ok(Json(item)))
}

/// `DELETE /api/items/{id}`
pub async fn remove<S>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: ItemStorage + Send + Sync + 'static,
{
    service.remove_item(ItemId::from_uuid(id)).await?;
    Ok(ApiResponse::NoContent)
}
