//! `sqlx` implementation of [`LinkStorage`].

use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow, Row};

use mudstore_app::ports::LinkStorage;
use mudstore_domain::error::{Action, EntityKind, MudError, Reference};
use mudstore_domain::id::LinkId;
use mudstore_domain::link::{Link, LinkChange, LinkFilter};
use mudstore_domain::page::Page;

use crate::error::{Constraints, Failure};
use crate::query::{ListFilter, Predicate, QueryBuilder, Statements, Table};
use crate::row::{decode_id, decode_timestamp};

struct Wrapper(Link);

impl<'r> FromRow<'r, AnyRow> for Wrapper {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Link {
            id: decode_id(row, "id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            owner_id: decode_id(row, "owner_id")?,
            location_id: decode_id(row, "location_id")?,
            destination_id: decode_id(row, "destination_id")?,
            created: decode_timestamp(row, "created")?,
            updated: decode_timestamp(row, "updated")?,
        }))
    }
}

const TABLE: Table = Table {
    name: "links",
    writable: &[
        "name",
        "description",
        "owner_id",
        "location_id",
        "destination_id",
    ],
};

impl ListFilter for LinkFilter {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(owner_id) = self.owner_id {
            predicates.push(Predicate::new("owner_id", owner_id));
        }
        if let Some(location_id) = self.location_id {
            predicates.push(Predicate::new("location_id", location_id));
        }
        if let Some(destination_id) = self.destination_id {
            predicates.push(Predicate::new("destination_id", destination_id));
        }
        predicates
    }

    fn page(&self) -> Page {
        self.page
    }
}

fn constraints(change: &LinkChange) -> Constraints {
    Constraints {
        references: vec![
            Reference::new("owner_id", change.owner_id),
            Reference::new("location_id", change.location_id),
            Reference::new("destination_id", change.destination_id),
        ],
        unique: None,
    }
}

/// Link storage over any supported SQL backend.
pub struct SqlxLinkStorage {
    pool: AnyPool,
    queries: QueryBuilder,
    statements: Statements,
}

impl SqlxLinkStorage {
    #[must_use]
    pub fn new(pool: AnyPool, queries: QueryBuilder) -> Self {
        Self {
            pool,
            queries,
            statements: Statements::new(queries, &TABLE),
        }
    }
}

impl LinkStorage for SqlxLinkStorage {
    async fn list(&self, filter: &LinkFilter) -> Result<Vec<Link>, MudError> {
        let rows: Vec<Wrapper> = self
            .queries
            .list_query(&TABLE, filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Failure::new(Action::List, EntityKind::Link).internal(err))?;

        tracing::debug!(count = rows.len(), "listed links");
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, id: LinkId) -> Result<Link, MudError> {
        let failure = Failure::new(Action::Get, EntityKind::Link);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.get)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.read(err, id))?;

        row.map(|w| w.0).ok_or_else(|| failure.not_found(id))
    }

    async fn create(&self, change: LinkChange) -> Result<Link, MudError> {
        let Wrapper(link) = sqlx::query_as(&self.statements.create)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.owner_id.to_string())
            .bind(change.location_id.to_string())
            .bind(change.destination_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                Failure::new(Action::Create, EntityKind::Link).write(err, constraints(&change))
            })?;

        tracing::info!(link_id = %link.id, name = %link.name, "link created");
        Ok(link)
    }

    async fn update(&self, id: LinkId, change: LinkChange) -> Result<Link, MudError> {
        let failure = Failure::new(Action::Update, EntityKind::Link);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.update)
            .bind(&change.name)
            .bind(&change.description)
            .bind(change.owner_id.to_string())
            .bind(change.location_id.to_string())
            .bind(change.destination_id.to_string())
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.write(err, constraints(&change)))?;

        let link = row.map(|w| w.0).ok_or_else(|| failure.not_found(id))?;
        tracing::info!(link_id = %link.id, "link updated");
        Ok(link)
    }

    async fn remove(&self, id: LinkId) -> Result<(), MudError> {
        let failure = Failure::new(Action::Remove, EntityKind::Link);
        let result = sqlx::query(&self.statements.remove)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| failure.remove(err, id))?;

        if result.rows_affected() == 0 {
            return Err(failure.not_found(id));
        }
        tracing::info!(link_id = %id, "link removed");
        Ok(())
    }
}
