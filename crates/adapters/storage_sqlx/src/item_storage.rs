//! `sqlx` implementation of [`ItemStorage`].

use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow, Row};

use mudstore_app::ports::ItemStorage;
use mudstore_domain::error::{Action, EntityKind, MudError, Reference};
use mudstore_domain::id::ItemId;
use mudstore_domain::item::{Item, ItemChange, ItemFilter};
use mudstore_domain::page::Page;

use crate::error::{Constraints, Failure};
use crate::location::{self, ITEM_COLUMN, LocationColumns, PLAYER_COLUMN, ROOM_COLUMN};
use crate::query::{ListFilter, Predicate, QueryBuilder, Statements, Table};
use crate::row::{decode_id, decode_timestamp};

struct Wrapper(Item);

impl<'r> FromRow<'r, AnyRow> for Wrapper {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Item {
            id: decode_id(row, "id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            owner_id: decode_id(row, "owner_id")?,
            location_id: location::recompose(LocationColumns::read(row)?),
            created: decode_timestamp(row, "created")?,
            updated: decode_timestamp(row, "updated")?,
        }))
    }
}

const TABLE: Table = Table {
    name: "items",
    writable: &[
        "name",
        "description",
        "owner_id",
        ITEM_COLUMN,
        PLAYER_COLUMN,
        ROOM_COLUMN,
    ],
};

impl ListFilter for ItemFilter {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(owner_id) = self.owner_id {
            predicates.push(Predicate::new("owner_id", owner_id));
        }
        if let Some(location_id) = self.location_id {
            predicates.push(Predicate::new(
                location::column(location_id.kind()),
                location_id.id(),
            ));
        }
        predicates
    }

    fn page(&self) -> Page {
        self.page
    }
}

fn constraints(change: &ItemChange) -> Constraints {
    let mut references = vec![Reference::new("owner_id", change.owner_id)];
    if let Some(location_id) = change.location_id {
        references.push(Reference::new("location_id", location_id));
    }
    Constraints {
        references,
        unique: None,
    }
}

/// Item storage over any supported SQL backend.
pub struct SqlxItemStorage {
    pool: AnyPool,
    queries: QueryBuilder,
    statements: Statements,
}

impl SqlxItemStorage {
    #[must_use]
    pub fn new(pool: AnyPool, queries: QueryBuilder) -> Self {
        Self {
            pool,
            queries,
            statements: Statements::new(queries, &TABLE),
        }
    }
}

impl ItemStorage for SqlxItemStorage {
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, MudError> {
        let rows: Vec<Wrapper> = self
            .queries
            .list_query(&TABLE, filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Failure::new(Action::List, EntityKind::Item).internal(err))?;

        tracing::debug!(count = rows.len(), "listed items");
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, id: ItemId) -> Result<Item, MudError> {
        let failure = Failure::new(Action::Get, EntityKind::Item);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.get)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.read(err, id))?;

        row.map(|w| w.0).ok_or_else(|| failure.not_found(id))
    }

    async fn create(&self, change: ItemChange) -> Result<Item, MudError> {
        let [at_item, at_player, at_room] = location::decompose(change.location_id).binds();
        let Wrapper(item) = sqlx::query_as(&self.statements.create)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.owner_id.to_string())
            .bind(at_item)
            .bind(at_player)
            .bind(at_room)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                Failure::new(Action::Create, EntityKind::Item).write(err, constraints(&change))
            })?;

        tracing::info!(item_id = %item.id, name = %item.name, "item created");
        Ok(item)
    }

    async fn update(&self, id: ItemId, change: ItemChange) -> Result<Item, MudError> {
        let failure = Failure::new(Action::Update, EntityKind::Item);
        let [at_item, at_player, at_room] = location::decompose(change.location_id).binds();
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.update)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.owner_id.to_string())
            .bind(at_item)
            .bind(at_player)
            .bind(at_room)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.write(err, constraints(&change)))?;

        let item = row.map(|w| w.0).ok_or_else(|| failure.not_found(id))?;
        tracing::info!(item_id = %item.id, location = ?item.location_id, "item updated");
        Ok(item)
    }

    async fn remove(&self, id: ItemId) -> Result<(), MudError> {
        let failure = Failure::new(Action::Remove, EntityKind::Item);
        let result = sqlx::query(&self.statements.remove)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| failure.remove(err, id))?;

        if result.rows_affected() == 0 {
            return Err(failure.not_found(id));
        }
        tracing::info!(item_id = %id, "item removed");
        Ok(())
    }
}
