use anyhow::Result;
use rand::Rng;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::user::UserRow;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Opens the database (creating the file if needed) and applies
    /// migrations. The pool is capped at a single connection: every request
    /// runs one short query, and an in-memory SQLite database is only
    /// coherent while all queries share that one connection.
    pub async fn new(db_url: &str) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!("Database connected & migrations applied");

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    /// Inserts the fixed accounts plus `random_count` generated ones, but
    /// only when the user table is empty. Returns how many were inserted.
    pub async fn seed_if_empty<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        random_count: usize,
    ) -> Result<usize> {
        let repo = self.user_repo();

        if repo.count().await? > 0 {
            return Ok(0);
        }

        let mut users = seed::fixed_users();
        users.extend(seed::random_users(rng, random_count));
        let inserted = users.len();

        repo.insert_many(users).await?;
        info!("Seeded user table with {inserted} accounts");

        Ok(inserted)
    }

    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRow>> {
        self.user_repo().find_by_credentials(username, password).await
    }

    pub async fn search_by_username(&self, term: &str) -> Result<Vec<UserRow>> {
        self.user_repo().search_by_username(term).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRow>> {
        self.user_repo().list_all().await
    }

    pub async fn find_one_by_raw_sql(&self, sql: &str) -> Result<Option<UserRow>> {
        self.user_repo().find_one_by_statement(sql).await
    }

    pub async fn find_all_by_raw_sql(&self, sql: &str) -> Result<Vec<UserRow>> {
        self.user_repo().find_all_by_statement(sql).await
    }
}
