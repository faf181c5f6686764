//! `sqlx` implementation of [`UserStorage`].

use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow, Row};

use mudstore_app::ports::UserStorage;
use mudstore_domain::error::{Action, EntityKind, MudError, Reference};
use mudstore_domain::id::UserId;
use mudstore_domain::page::Page;
use mudstore_domain::user::{User, UserChange, UserFilter};

use crate::error::{Constraints, Failure};
use crate::query::{ListFilter, Predicate, QueryBuilder, Statements, Table};
use crate::row::{decode_id, decode_optional_id, decode_timestamp};

struct Wrapper(User);

impl<'r> FromRow<'r, AnyRow> for Wrapper {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: decode_id(row, "id")?,
            login: row.try_get("login")?,
            public_key: row.try_get("public_key")?,
            player_id: decode_optional_id(row, "player_id")?,
            created: decode_timestamp(row, "created")?,
            updated: decode_timestamp(row, "updated")?,
        }))
    }
}

const TABLE: Table = Table {
    name: "users",
    writable: &["login", "public_key", "player_id"],
};

impl ListFilter for UserFilter {
    fn predicates(&self) -> Vec<Predicate> {
        Vec::new()
    }

    fn page(&self) -> Page {
        self.page
    }
}

fn constraints(change: &UserChange) -> Constraints {
    Constraints {
        references: change
            .player_id
            .map(|player_id| Reference::new("player_id", player_id))
            .into_iter()
            .collect(),
        unique: Some(Reference::new("login", &change.login)),
    }
}

/// User storage over any supported SQL backend.
pub struct SqlxUserStorage {
    pool: AnyPool,
    queries: QueryBuilder,
    statements: Statements,
}

impl SqlxUserStorage {
    #[must_use]
    pub fn new(pool: AnyPool, queries: QueryBuilder) -> Self {
        Self {
            pool,
            queries,
            statements: Statements::new(queries, &TABLE),
        }
    }
}

impl UserStorage for SqlxUserStorage {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, MudError> {
        let rows: Vec<Wrapper> = self
            .queries
            .list_query(&TABLE, filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Failure::new(Action::List, EntityKind::User).internal(err))?;

        tracing::debug!(count = rows.len(), "listed users");
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, id: UserId) -> Result<User, MudError> {
        let failure = Failure::new(Action::Get, EntityKind::User);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.get)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.read(err, id))?;

        row.map(|w| w.0).ok_or_else(|| failure.not_found(id))
    }

    async fn create(&self, change: UserChange) -> Result<User, MudError> {
        let Wrapper(user) = sqlx::query_as(&self.statements.create)
            .bind(&change.login)
            .bind(&change.public_key)
            .bind(change.player_id.map(|id| id.to_string()))
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                Failure::new(Action::Create, EntityKind::User).write(err, constraints(&change))
            })?;

        tracing::info!(user_id = %user.id, login = %user.login, "user created");
        Ok(user)
    }

    async fn update(&self, id: UserId, change: UserChange) -> Result<User, MudError> {
        let failure = Failure::new(Action::Update, EntityKind::User);
        let row: Option<Wrapper> = sqlx::query_as(&self.statements.update)
            .bind(&change.login)
            .bind(&change.public_key)
            .bind(change.player_id.map(|id| id.to_string()))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| failure.write(err, constraints(&change)))?;

        let user = row.map(|w| w.0).ok_or_else(|| failure.not_found(id))?;
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn remove(&self, id: UserId) -> Result<(), MudError> {
        let failure = Failure::new(Action::Remove, EntityKind::User);
        let result = sqlx::query(&self.statements.remove)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| failure.remove(err, id))?;

        if result.rows_affected() == 0 {
            return Err(failure.not_found(id));
        }
        tracing::info!(user_id = %id, "user removed");
        Ok(())
    }
}
