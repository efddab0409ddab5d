//! Diesel-based user repository for SQLite.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewUser, UserRecord};
use super::parse_datetime;
use super::pool::{AsyncSqlitePool, DieselError};
use crate::models::User;
use crate::schema::users;

/// Convert a database record to a domain model.
impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            email: record.email,
            name: record.name,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// User repository with compile-time query checking.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncSqlitePool,
}

impl UserRepository {
    /// Create a new user repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> Result<Option<User>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(id)
            .first::<UserRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(User::from))
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::email.eq(email))
            .first::<UserRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(User::from))
    }

    /// Get all users ordered by name.
    pub async fn get_all(&self) -> Result<Vec<User>, DieselError> {
        let mut conn = self.pool.get().await?;

        users::table
            .order(users::name.asc())
            .load::<UserRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(User::from).collect())
    }

    /// Save a user, upserting on id only.
    ///
    /// A collision on `email` surfaces as a `UniqueViolation` rather than
    /// replacing the conflicting row.
    pub async fn save(&self, user: &User) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        let created_at = user.created_at.to_rfc3339();

        let record = NewUser {
            id: &user.id,
            email: &user.email,
            name: &user.name,
            created_at: &created_at,
        };

        diesel::insert_into(users::table)
            .values(&record)
            .on_conflict(users::id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Delete a user.
    #[allow(dead_code)]
    pub async fn delete(&self, id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = users::table.select(count_star()).first(&mut conn).await?;

        Ok(count as u64)
    }
}
