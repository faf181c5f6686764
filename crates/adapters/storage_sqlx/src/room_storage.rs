//! `sqlx` implementation of [`RoomStorage`].

use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow, Row};

use mudstore_app::ports::RoomStorage;
use mudstore_domain::error::{Action, EntityKind, MudError, Reference};
use mudstore_domain::id::RoomId;
use mudstore_domain::page::Page;
use mudstore_domain::room::{Room, RoomChange, RoomFilter};

use crate::error::{Constraints, Failure};
use crate::query::{ListFilter, Predicate, QueryBuilder, Statements, Table};
use crate::row::{decode_id, decode_optional_id, decode_timestamp};

/// Wrapper for converting database rows into domain [`Room`].
struct Wrapper(Room);

impl<'r> FromRow<'r, AnyRow> for Wrapper {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Room {
            id: decode_id(row, "id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            owner_id: decode_optional_id(row, "owner_id")?,
            parent_id: decode_optional_id(row, "parent_id")?,
            created: decode_timestamp(row, "created")?,
            updated: decode_timestamp(row, "updated")?,
        }))
    }
}

const TABLE: Table = Table {
    name: "rooms",
    writable: &["name", "description", "owner_id", "parent_id"],
};

impl ListFilter for RoomFilter {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(owner_id) = self.owner_id {
            predicates.push(Predicate::new("owner_id", owner_id));
        }
        if let Some(parent_id) = self.parent_id {
            predicates.push(Predicate::new("parent_id", parent_id));
        }
        predicates
    }

    fn page(&self) -> Page {
        self.page
    }
}

fn constraints(change: &RoomChange) -> Constraints {
    let mut references = Vec::new();
    if let Some(owner_id) = change.owner_id {
        references.push(Reference::new("owner_id", owner_id));
    }
    if let Some(parent_id) = change.parent_id {
        references.push(Reference::new("parent_id", parent_id));
    }
    Constraints {
        references,
        unique: None,
    }
}

/// Room storage over any supported SQL backend.
pub struct SqlxRoomStorage {
    pool: AnyPool,
    queries: QueryBuilder,
    statements: Statements,
}

impl SqlxRoomStorage {
    /// Create a new storage using the given pool and its query builder.
    #[must_use]
    pub fn new(pool: AnyPool, queries: QueryBuilder) -> Self {
        Self {
            pool,
            queries,
            statements: Statements::new(queries, &TABLE),
        }
    }
}

impl RoomStorage for SqlxRoomStorage {
    async fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, MudError> {
        let rows: Vec<Wrapper> = self
            .queries
            .list_query(&TABLE, filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Failure::new(Action::List, EntityKind::Room).internal(err))?;

        tracing::debug!(count = rows.len(), "listed rooms");
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, id: RoomId) -> Result<Room, MudError> {
        let failure = Failure::new(Action::Get, EntityKind::Room);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.get)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.read(err, id))?;

        row.map(|w| w.0).ok_or_else(|| failure.not_found(id))
    }

    async fn create(&self, change: RoomChange) -> Result<Room, MudError> {
        let Wrapper(room) = sqlx::query_as(&self.statements.create)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.owner_id.map(|id| id.to_string()))
            .bind(change.parent_id.map(|id| id.to_string()))
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                Failure::new(Action::Create, EntityKind::Room).write(err, constraints(&change))
            })?;

        tracing::info!(room_id = %room.id, name = %room.name, "room created");
        Ok(room)
    }

    async fn update(&self, id: RoomId, change: RoomChange) -> Result<Room, MudError> {
        let failure = Failure::new(Action::Update, EntityKind::Room);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.update)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.owner_id.map(|id| id.to_string()))
            .bind(change.parent_id.map(|id| id.to_string()))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.write(err, constraints(&change)))?;

        let room = row.map(|w| w.0).ok_or_else(|| failure.not_found(id))?;
        tracing::info!(room_id = %room.id, "room updated");
        Ok(room)
    }

    async fn remove(&self, id: RoomId) -> Result<(), MudError> {
        let failure = Failure::new(Action::Remove, EntityKind::Room);
        let result = sqlx::query(&self.statements.remove)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| failure.remove(err, id))?;

        if result.rows_affected() == 0 {
            return Err(failure.not_found(id));
        }
        tracing::info!(room_id = %id, "room removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use mudstore_domain::error::{Cause, ErrorKind};

    #[tokio::test]
    async fn should_create_and_get_room() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);

        let created = storage
            .create(RoomChange::new("Lobby").description("A quiet lobby."))
            .await
            .unwrap();
        let fetched = storage.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.description, "A quiet lobby.");
        assert_eq!(fetched.created, fetched.updated);
    }

    #[tokio::test]
    async fn should_return_not_found_when_room_missing() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        let id = RoomId::new();

        let err = storage.get(id).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_matches() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);

        let rooms = storage
            .list(&RoomFilter {
                parent_id: Some(RoomId::new()),
                ..RoomFilter::default()
            })
            .await
            .unwrap();

        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn should_list_only_children_of_parent() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        let a = storage.create(RoomChange::new("A")).await.unwrap();
        let b = storage
            .create(RoomChange::new("B").parent_id(a.id))
            .await
            .unwrap();
        storage.create(RoomChange::new("C")).await.unwrap();

        let rooms = storage
            .list(&RoomFilter {
                parent_id: Some(a.id),
                page: Page::new(0, RoomFilter::DEFAULT_LIMIT),
                ..RoomFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(rooms, vec![b]);
    }

    #[tokio::test]
    async fn should_filter_by_owner_and_parent_together() {
        let db = fixtures::database().await;
        let rooms = fixtures::rooms(&db);
        let start = rooms.create(RoomChange::new("Start")).await.unwrap();
        let player = fixtures::player(&db, "ajones", start.id).await;
        let owned = rooms
            .create(RoomChange::new("Den").owner_id(player.id).parent_id(start.id))
            .await
            .unwrap();
        rooms
            .create(RoomChange::new("Hall").parent_id(start.id))
            .await
            .unwrap();

        let found = rooms
            .list(&RoomFilter {
                owner_id: Some(player.id),
                parent_id: Some(start.id),
                page: Page::default(),
            })
            .await
            .unwrap();

        assert_eq!(found, vec![owned]);
    }

    #[tokio::test]
    async fn should_page_through_rooms() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        for name in ["A", "B", "C", "D", "E"] {
            storage.create(RoomChange::new(name)).await.unwrap();
        }
        let everything = storage.list(&RoomFilter::default()).await.unwrap();

        let page = storage
            .list(&RoomFilter {
                page: Page::new(1, 2),
                ..RoomFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(everything.len(), 5);
        assert_eq!(page, everything[1..3].to_vec());
    }

    #[tokio::test]
    async fn should_reject_unknown_parent_as_bad_request() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        let parent = RoomId::new();

        let err = storage
            .create(RoomChange::new("Orphan").parent_id(parent))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.to_string().contains(&format!("parent_id={parent}")));
    }

    #[tokio::test]
    async fn should_update_room_and_bump_timestamp() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        let room = storage.create(RoomChange::new("Lobby")).await.unwrap();

        let updated = storage
            .update(room.id, RoomChange::new("Foyer"))
            .await
            .unwrap();

        assert_eq!(updated.id, room.id);
        assert_eq!(updated.name, "Foyer");
        assert_eq!(updated.created, room.created);
        assert!(updated.updated >= room.updated);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_room() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);

        let err = storage
            .update(RoomId::new(), RoomChange::new("Nowhere"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn should_remove_room() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        let room = storage.create(RoomChange::new("Lobby")).await.unwrap();

        storage.remove(room.id).await.unwrap();

        let err = storage.get(room.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn should_return_not_found_when_removing_missing_room() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);

        let err = storage.remove(RoomId::new()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn should_refuse_to_remove_room_with_children() {
        let db = fixtures::database().await;
        let storage = fixtures::rooms(&db);
        let parent = storage.create(RoomChange::new("Tower")).await.unwrap();
        storage
            .create(RoomChange::new("Stair").parent_id(parent.id))
            .await
            .unwrap();

        let err = storage.remove(parent.id).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(
            err,
            MudError::Operation(ref op) if matches!(op.cause, Cause::StillReferenced { .. })
        ));
    }
}
