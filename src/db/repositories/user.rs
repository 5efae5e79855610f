use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, Set, Statement,
};

use crate::db::seed::SeedUser;
use crate::entities::user;

/// User data returned from the repository (password column dropped).
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserRow {
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<user::Model> for UserRow {
    fn from(model: user::Model) -> Self {
        Self {
            username: model.username,
            email: model.email,
            role: model.role,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Exact-match credential lookup with both values bound as parameters.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRow>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Password.eq(password))
            .one(&self.conn)
            .await
            .context("Failed to query user by credentials")?;

        Ok(user.map(UserRow::from))
    }

    /// Substring search over usernames. The term is bound into a
    /// `LIKE '%term%'` pattern, so `%` and `_` keep their wildcard meaning
    /// but quoting can never break out of the pattern.
    pub async fn search_by_username(&self, term: &str) -> Result<Vec<UserRow>> {
        let users = user::Entity::find()
            .filter(user::Column::Username.contains(term))
            .all(&self.conn)
            .await
            .context("Failed to search users by username")?;

        Ok(users.into_iter().map(UserRow::from).collect())
    }

    /// All users in insertion order.
    pub async fn list_all(&self) -> Result<Vec<UserRow>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(users.into_iter().map(UserRow::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        user::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    pub async fn insert_many(&self, users: Vec<SeedUser>) -> Result<()> {
        let models = users.into_iter().map(|u| user::ActiveModel {
            username: Set(u.username),
            password: Set(u.password),
            email: Set(u.email),
            role: Set(u.role),
            ..Default::default()
        });

        user::Entity::insert_many(models)
            .exec(&self.conn)
            .await
            .context("Failed to insert seed users")?;

        Ok(())
    }

    /// Runs caller-assembled SQL verbatim and maps the first row, if any.
    /// Nothing is escaped or bound here; the statement executes as given.
    pub async fn find_one_by_statement(&self, sql: &str) -> Result<Option<UserRow>> {
        let backend = self.conn.get_database_backend();
        UserRow::find_by_statement(Statement::from_string(backend, sql.to_owned()))
            .one(&self.conn)
            .await
            .context("Raw user lookup failed")
    }

    /// Runs caller-assembled SQL verbatim and maps every row.
    pub async fn find_all_by_statement(&self, sql: &str) -> Result<Vec<UserRow>> {
        let backend = self.conn.get_database_backend();
        UserRow::find_by_statement(Statement::from_string(backend, sql.to_owned()))
            .all(&self.conn)
            .await
            .context("Raw user search failed")
    }
}
