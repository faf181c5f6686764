//! JSON REST handlers for links.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use mudstore_app::ports::LinkStorage;
use mudstore_app::services::link_service::LinkService;
use mudstore_domain::id::{LinkId, PlayerId, RoomId};
use mudstore_domain::link::{Link, LinkChange, LinkFilter};
use mudstore_domain::page::Page;

use super::ApiResponse;
use crate::error::ApiError;

/// Query string of `GET /api/links`.
#[derive(Debug, Default, Deserialize)]
pub struct LinkQuery {
    pub owner_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

impl From<LinkQuery> for LinkFilter {
    fn from(query: LinkQuery) -> Self {
        Self {
            owner_id: query.owner_id.map(PlayerId::from_uuid),
            location_id: query.location_id.map(RoomId::from_uuid),
            destination_id: query.destination_id.map(RoomId::from_uuid),
            page: Page::new(query.offset, query.limit),
        }
    }
}

/// `GET /api/links`
pub async fn list<S>(
    State(service): State<Arc<LinkService<S>>>,
    Query(query): Query<LinkQuery>,
) -> Result<ApiResponse<Vec<Link>>, ApiError>
where
    S: LinkStorage + Send + Sync + 'static,
{
    let links = service.list_links(query.into()).await?;
    Ok(ApiResponse::Ok(Json(links)))
}

/// `GET /api/links/{id}`
pub async fn get<S>(
    State(service): State<Arc<LinkService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Link>, ApiError>
where
    S: LinkStorage + Send + Sync + 'static,
{
    let link = service.get_link(LinkId::from_uuid(id)).await?;
    Ok(ApiResponse::Ok(Json(link)))
}

/// `POST /api/links`
pub async fn create<S>(
    State(service): State<Arc<LinkService<S>>>,
    Json(change): Json<LinkChange>,
) -> Result<ApiResponse<Link>, ApiError>
where
    S: LinkStorage + Send + Sync + 'static,
{
    let link = service.create_link(change).await?;
    Ok(ApiResponse::Created(Json(link)))
}

/// `PUT /api/links/{id}`
pub async fn update<S>(
    State(service): State<Arc<LinkService<S>>>,
    Path(id): Path<Uuid>,
    Json(change): Json<LinkChange>,
) -> Result<ApiResponse<Link>, ApiError>
where
    S: LinkStorage + Send + Sync + 'static,
{
    let link = service.update_link(LinkId::from_uuid(id), change).await?;
    Ok(ApiResponse::Ok(Json(link)))
}

/// `DELETE /api/links/{id}`
pub async fn remove<S>(
    State(service): State<Arc<LinkService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: LinkStorage + Send + Sync + 'static,
{
    service.remove_link(LinkId::from_uuid(id)).await?;
    Ok(ApiResponse::NoContent)
}
