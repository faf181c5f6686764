//! `sqlx` implementation of [`PlayerStorage`].

use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow, Row};

use mudstore_app::ports::PlayerStorage;
use mudstore_domain::error::{Action, EntityKind, MudError, Reference};
use mudstore_domain::id::PlayerId;
use mudstore_domain::page::Page;
use mudstore_domain::player::{Player, PlayerChange, PlayerFilter};

use crate::error::{Constraints, Failure};
use crate::location::{self, ITEM_COLUMN, LocationColumns, PLAYER_COLUMN, ROOM_COLUMN};
use crate::query::{ListFilter, Predicate, QueryBuilder, Statements, Table};
use crate::row::{decode_id, decode_timestamp};

struct Wrapper(Player);

impl<'r> FromRow<'r, AnyRow> for Wrapper {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Player {
            id: decode_id(row, "id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            home_id: decode_id(row, "home_id")?,
            location_id: location::recompose(LocationColumns::read(row)?),
            created: decode_timestamp(row, "created")?,
            updated: decode_timestamp(row, "updated")?,
        }))
    }
}

const TABLE: Table = Table {
    name: "players",
    writable: &[
        "name",
        "description",
        "home_id",
        ITEM_COLUMN,
        PLAYER_COLUMN,
        ROOM_COLUMN,
    ],
};

impl ListFilter for PlayerFilter {
    fn predicates(&self) -> Vec<Predicate> {
        self.location_id
            .map(|location_id| {
                Predicate::new(location::column(location_id.kind()), location_id.id())
            })
            .into_iter()
            .collect()
    }

    fn page(&self) -> Page {
        self.page
    }
}

fn constraints(change: &PlayerChange) -> Constraints {
    let mut references = vec![Reference::new("home_id", change.home_id)];
    if let Some(location_id) = change.location_id {
        references.push(Reference::new("location_id", location_id));
    }
    Constraints {
        references,
        unique: Some(Reference::new("name", &change.name)),
    }
}

/// Player storage over any supported SQL backend.
pub struct SqlxPlayerStorage {
    pool: AnyPool,
    queries: QueryBuilder,
    statements: Statements,
}

impl SqlxPlayerStorage {
    #[must_use]
    pub fn new(pool: AnyPool, queries: QueryBuilder) -> Self {
        Self {
            pool,
            queries,
            statements: Statements::new(queries, &TABLE),
        }
    }
}

impl PlayerStorage for SqlxPlayerStorage {
    async fn list(&self, filter: &PlayerFilter) -> Result<Vec<Player>, MudError> {
        let rows: Vec<Wrapper> = self
            .queries
            .list_query(&TABLE, filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Failure::new(Action::List, EntityKind::Player).internal(err))?;

        tracing::debug!(count = rows.len(), "listed players");
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, id: PlayerId) -> Result<Player, MudError> {
        let failure = Failure::new(Action::Get, EntityKind::Player);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.get)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.read(err, id))?;

        row.map(|w| w.0).ok_or_else(|| failure.not_found(id))
    }

    async fn create(&self, change: PlayerChange) -> Result<Player, MudError> {
        let [at_item, at_player, at_room] = location::decompose(change.location_id).binds();
        let Wrapper(player) = sqlx::query_as(&self.statements.create)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.home_id.to_string())
            .bind(at_item)
            .bind(at_player)
            .bind(at_room)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                Failure::new(Action::Create, EntityKind::Player).write(err, constraints(&change))
            })?;

        tracing::info!(player_id = %player.id, name = %player.name, "player created");
        Ok(player)
    }

    async fn update(&self, id: PlayerId, change: PlayerChange) -> Result<Player, MudError> {
        let failure = Failure::new(Action::Update, EntityKind::Player);
        let [at_item, at_player, at_room] = location::decompose(change.location_id).binds();
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.update)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.home_id.to_string())
            .bind(at_item)
            .bind(at_player)
            .bind(at_room)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.write(err, constraints(&change)))?;

        let player = row.map(|w| w.0).ok_or_else(|| failure.not_found(id))?;
        tracing::info!(player_id = %player.id, location = ?player.location_id, "player updated");
        Ok(player)
    }

    async fn remove(&self, id: PlayerId) -> Result<(), MudError> {
        let failure = Failure::new(Action::Remove, EntityKind::Player);
        let result = sqlx::query(&self.statements.remove)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| failure.remove(err, id))?;

        if result.rows_affected() == 0 {
            return Err(failure.not_found(id));
        }
        tracing::info!(player_id = %id, "player removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use mudstore_app::ports::ItemStorage;
    use mudstore_domain::error::{Cause, ErrorKind};
    use mudstore_domain::id::RoomId;
    use mudstore_domain::item::ItemChange;
    use mudstore_domain::location::LocationId;

    #[tokio::test]
    async fn should_create_player_at_home() {
        let db = fixtures::database().await;
        let world = fixtures::world(&db).await;
        let storage = fixtures::players(&db);

        let player = storage
            .create(PlayerChange::new("bsmith", world.start.id).location_id(world.hall.id))
            .await
            .unwrap();

        let fetched = storage.get(player.id).await.unwrap();
        assert_eq!(fetched.home_id, world.start.id);
        assert_eq!(fetched.location_id, Some(LocationId::Room(world.hall.id)));
    }

    #[tokio::test]
    async fn should_reject_duplicate_name_as_conflict() {
        let db = fixtures::database().await;
        let world = fixtures::world(&db).await;
        let storage = fixtures::players(&db);

        let err = storage
            .create(PlayerChange::new(world.player.name.clone(), world.start.id))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains(&world.player.name));
    }

    #[tokio::test]
    async fn should_reject_unknown_home_as_bad_request() {
        let db = fixtures::database().await;
        let storage = fixtures::players(&db);
        let home = RoomId::new();

        let err = storage
            .create(PlayerChange::new("drifter", home))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.to_string().contains(&format!("home_id={home}")));
    }

    #[tokio::test]
    async fn should_list_players_in_room() {
        let db = fixtures::database().await;
        let world = fixtures::world(&db).await;
        let storage = fixtures::players(&db);
        let visitor = storage
            .create(PlayerChange::new("bsmith", world.start.id).location_id(world.hall.id))
            .await
            .unwrap();

        let in_hall = storage
            .list(&PlayerFilter {
                location_id: Some(LocationId::Room(world.hall.id)),
                ..PlayerFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(in_hall, vec![visitor]);
    }

    #[tokio::test]
    async fn should_carry_player_inside_item() {
        let db = fixtures::database().await;
        let world = fixtures::world(&db).await;
        let barrel = fixtures::items(&db)
            .create(ItemChange::new("Barrel", world.player.id).location_id(world.start.id))
            .await
            .unwrap();
        let storage = fixtures::players(&db);

        let stowaway = storage
            .create(PlayerChange::new("stowaway", world.start.id).location_id(barrel.id))
            .await
            .unwrap();

        assert_eq!(stowaway.location_id, Some(LocationId::Item(barrel.id)));
    }

    #[tokio::test]
    async fn should_refuse_to_remove_player_who_owns_items() {
        let db = fixtures::database().await;
        let world = fixtures::world(&db).await;
        fixtures::items(&db)
            .create(ItemChange::new("Torch", world.player.id))
            .await
            .unwrap();

        let err = fixtures::players(&db)
            .remove(world.player.id)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(
            err,
            MudError::Operation(ref op) if matches!(op.cause, Cause::StillReferenced { .. })
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_player() {
        let db = fixtures::database().await;
        let world = fixtures::world(&db).await;

        let err = fixtures::players(&db)
            .update(PlayerId::new(), PlayerChange::new("nobody", world.start.id))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
