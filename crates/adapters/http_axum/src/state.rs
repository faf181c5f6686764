//! Shared application state for axum handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use mudstore_app::services::item_service::ItemService;
use mudstore_app::services::link_service::LinkService;
use mudstore_app::services::player_service::PlayerService;
use mudstore_app::services::room_service::RoomService;
use mudstore_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the storages themselves do not need to be
/// `Clone`; only the `Arc` wrappers are cloned. Each service is also
/// extractable on its own through [`FromRef`].
pub struct AppState<RS, LS, IS, PS, US> {
    pub room_service: Arc<RoomService<RS>>,
    pub link_service: Arc<LinkService<LS>>,
    pub item_service: Arc<ItemService<IS>>,
    pub player_service: Arc<PlayerService<PS>>,
    pub user_service: Arc<UserService<US>>,
}

impl<RS, LS, IS, PS, US> Clone for AppState<RS, LS, IS, PS, US> {
    fn clone(&self) -> Self {
        Self {
            room_service: Arc::clone(&self.room_service),
            link_service: Arc::clone(&self.link_service),
            item_service: Arc::clone(&self.item_service),
            player_service: Arc::clone(&self.player_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<RS, LS, IS, PS, US> AppState<RS, LS, IS, PS, US> {
    /// Create a new application state from service instances.
    pub fn new(
        room_service: RoomService<RS>,
        link_service: LinkService<LS>,
        item_service: ItemService<IS>,
        player_service: PlayerService<PS>,
        user_service: UserService<US>,
    ) -> Self {
        Self {
            room_service: Arc::new(room_service),
            link_service: Arc::new(link_service),
            item_service: Arc::new(item_service),
            player_service: Arc::new(player_service),
            user_service: Arc::new(user_service),
        }
    }
}

impl<RS, LS, IS, PS, US> FromRef<AppState<RS, LS, IS, PS, US>> for Arc<RoomService<RS>> {
    fn from_ref(state: &AppState<RS, LS, IS, PS, US>) -> Self {
        Arc::clone(&state.room_service)
    }
}

impl<RS, LS, IS, PS, US> FromRef<AppState<RS, LS, IS, PS, US>> for Arc<LinkService<LS>> {
    fn from_ref(state: &AppState<RS, LS, IS, PS, US>) -> Self {
        Arc::clone(&state.link_service)
    }
}

impl<RS, LS, IS, PS, US> FromRef<AppState<RS, LS, IS, PS, US>> for Arc<ItemService<IS>> {
    fn from_ref(state: &AppState<RS, LS, IS, PS, US>) -> Self {
        Arc::clone(&state.item_service)
    }
}

impl<RS, LS, IS, PS, US> FromRef<AppState<RS, LS, IS, PS, US>> for Arc<PlayerService<PS>> {
    fn from_ref(state: &AppState<RS, LS, IS, PS, US>) -> Self {
        Arc::clone(&state.player_service)
    }
}

impl<RS, LS, IS, PS, US> FromRef<AppState<RS, LS, IS, PS, US>> for Arc<UserService<US>> {
    fn from_ref(state: &AppState<RS, LS, IS, PS, US>) -> Self {
        Arc::clone(&state.user_service)
    }
}
