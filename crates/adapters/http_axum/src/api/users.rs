//! JSON REST handlers for users.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use mudstore_app::ports::UserStorage;
use mudstore_app::services::user_service::UserService;
use mudstore_domain::id::UserId;
use mudstore_domain::page::Page;
use mudstore_domain::user::{User, UserChange, UserFilter};

use super::ApiResponse;
use crate::error::ApiError;

/// Query string of `GET /api/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

impl From<UserQuery> for UserFilter {
    fn from(query: UserQuery) -> Self {
        Self {
            page: Page::new(query.offset, query.limit),
        }
    }
}

/// `GET /api/users`
pub async fn list<S>(
    State(service): State<Arc<UserService<S>>>,
    Query(query): Query<UserQuery>,
) -> Result<ApiResponse<Vec<User>>, ApiError>
where
    S: UserStorage + Send + Sync + 'static,
{
    let users = service.list_users(query.into()).await?;
    Ok(ApiResponse::Ok(Json(users)))
}

/// `GET /api/users/{id}`
pub async fn get<S>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<User>, ApiError>
where
    S: UserStorage + Send + Sync + 'static,
{
    let user = service.get_user(UserId::from_uuid(id)).await?;
    Ok(ApiResponse::Ok(Json(user)))
}

/// `POST /api/users`
pub async fn create<S>(
    State(service): State<Arc<UserService<S>>>,
    Json(change): Json<UserChange>,
) -> Result<ApiResponse<User>, ApiError>
where
    S: UserStorage + Send + Sync + 'static,
{
    let user = service.create_user(change).await?;
    Ok(ApiResponse::Created(Json(user)))
}

/// `PUT /api/users/{id}`
pub async fn update<S>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<Uuid>,
    Json(change): Json<UserChange>,
) -> Result<ApiResponse<User>, ApiError>
where
    S: UserStorage + Send + Sync + 'static,
{
    let user = service.update_user(UserId::from_uuid(id), change).await?;
    Ok(ApiResponse::Ok(Json(user)))
}

/// `DELETE /api/users/{id}`
pub async fn remove<S>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: UserStorage + Send + Sync + 'static,
{
    service.remove_user(UserId::from_uuid(id)).await?;
    Ok(ApiResponse::NoContent)
}
