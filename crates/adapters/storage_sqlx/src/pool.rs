//! Connection pool setup and schema bootstrap.

use std::time::Duration;

use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use crate::error::StorageError;
use crate::query::{Dialect, QueryBuilder};

const SQLITE_SCHEMA: &str = include_str!("../schema/sqlite.sql");
const POSTGRES_SCHEMA: &str = include_str!("../schema/postgres.sql");

/// Configuration for the storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL, `sqlite:` or `postgres://` (e.g. `sqlite:mud.db`).
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

    /// Configuration for `database_url` with default pool sizing.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// A private in-memory `SQLite` database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Connects the pool and creates any missing tables.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is unsupported, or if the
    /// connection or schema creation fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(self).await
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Holds the connection pool and the query builder for its dialect.
pub struct Database {
    pool: AnyPool,
    queries: QueryBuilder,
}

impl Database {
    async fn initialize(config: Config) -> Result<Self, StorageError> {
        let dialect = Dialect::from_url(&config.database_url).ok_or_else(|| {
            let scheme = config
                .database_url
                .split_once(':')
                .map_or("", |(scheme, _)| scheme);
            StorageError::UnsupportedScheme(scheme.to_string())
        })?;

        sqlx::any::install_default_drivers();

        let mut options = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);
        if dialect == Dialect::Sqlite && is_in_memory(&config.database_url) {
            // every connection to an in-memory URL opens its own database
            options = options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = options.connect(&config.database_url).await?;
        let database = Self {
            pool,
            queries: QueryBuilder::new(dialect),
        };
        database.ensure_schema().await?;

        tracing::info!(?dialect, max_connections = config.max_connections, "database ready");
        Ok(database)
    }

    /// Create any missing table, index and constraint. Safe to run again.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a schema statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        let schema = match self.queries.dialect() {
            Dialect::Sqlite => SQLITE_SCHEMA,
            Dialect::Postgres => POSTGRES_SCHEMA,
        };
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.queries.dialect()
    }

    #[must_use]
    pub fn query_builder(&self) -> QueryBuilder {
        self.queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_create_tables_when_using_memory_db() {
        let db = Config::in_memory().build().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();
        assert_eq!(names, vec!["items", "links", "players", "rooms", "users"]);
        assert_eq!(db.dialect(), Dialect::Sqlite);
    }

    #[tokio::test]
    async fn should_allow_schema_to_be_ensured_twice() {
        let db = Config::in_memory().build().await.unwrap();
        db.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn should_reject_unknown_scheme() {
        let result = Config::new("mysql://localhost/mud").build().await;
        assert!(matches!(result, Err(StorageError::UnsupportedScheme(scheme)) if scheme == "mysql"));
    }

    /// Runs the storage scenarios against a live Postgres server, e.g.
    /// `MUDSTORE_TEST_POSTGRES_URL=postgres://mud@localhost/mud cargo test -- --ignored`.
    #[tokio::test]
    #[ignore = "needs a Postgres server in MUDSTORE_TEST_POSTGRES_URL"]
    async fn should_behave_like_sqlite_on_postgres() {
        use crate::fixtures;
        use mudstore_app::ports::{ItemStorage, PlayerStorage, RoomStorage, UserStorage};
        use mudstore_domain::error::ErrorKind;
        use mudstore_domain::item::{ItemChange, ItemFilter};
        use mudstore_domain::location::{LocationId, LocationKind};
        use mudstore_domain::page::Page;
        use mudstore_domain::player::PlayerChange;
        use mudstore_domain::room::{RoomChange, RoomFilter};
        use mudstore_domain::user::UserChange;

        let Ok(url) = std::env::var("MUDSTORE_TEST_POSTGRES_URL") else {
            return;
        };
        let db = Config::new(url).build().await.unwrap();
        assert_eq!(db.dialect(), Dialect::Postgres);
        db.ensure_schema().await.unwrap();

        // Tables outlive the test, so every unique value is suffixed.
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let rooms = fixtures::rooms(&db);
        let players = fixtures::players(&db);
        let items = fixtures::items(&db);
        let users = fixtures::users(&db);

        let start = rooms.create(RoomChange::new("Start")).await.unwrap();
        let hall = rooms
            .create(RoomChange::new("Hall").parent_id(start.id))
            .await
            .unwrap();
        let children = rooms
            .list(&RoomFilter {
                parent_id: Some(start.id),
                ..RoomFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(children, vec![hall.clone()]);

        let name = format!("ajones-{suffix}");
        let player = players
            .create(PlayerChange::new(name.as_str(), start.id).location_id(hall.id))
            .await
            .unwrap();
        let duplicate = players
            .create(PlayerChange::new(name.as_str(), start.id))
            .await
            .unwrap_err();
        assert_eq!(duplicate.kind(), ErrorKind::Conflict);

        let torch = items
            .create(ItemChange::new("Torch", player.id).location_id(player.id))
            .await
            .unwrap();
        let fetched = items.get(torch.id).await.unwrap();
        assert_eq!(
            fetched.location_id.map(LocationId::kind),
            Some(LocationKind::Player)
        );
        assert_eq!(fetched, torch);

        let carried = ItemFilter {
            location_id: Some(LocationId::Player(player.id)),
            ..ItemFilter::default()
        };
        assert_eq!(items.list(&carried).await.unwrap(), vec![torch.clone()]);
        let past_end = ItemFilter {
            page: Page::new(u64::MAX, 20),
            ..carried
        };
        assert_eq!(items.list(&past_end).await.unwrap(), Vec::new());

        let key = b"ssh-ed25519 AAAA".to_vec();
        let user = users
            .create(UserChange::new(format!("u-{suffix}"), key.clone()).player_id(player.id))
            .await
            .unwrap();
        assert_eq!(users.get(user.id).await.unwrap().public_key, key);

        let referenced = rooms.remove(start.id).await.unwrap_err();
        assert_eq!(referenced.kind(), ErrorKind::Conflict);

        let moved = players
            .update(
                player.id,
                PlayerChange::new(name.as_str(), start.id).location_id(torch.id),
            )
            .await
            .unwrap();
        assert_eq!(moved.location_id, Some(LocationId::Item(torch.id)));
        assert!(moved.updated >= moved.created);

        users.remove(user.id).await.unwrap();
        let missing = users.remove(user.id).await.unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn should_recognise_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:mud?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:mud.db"));
    }
}
