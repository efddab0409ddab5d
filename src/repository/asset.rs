//! Diesel-based asset repository for SQLite.
//!
//! Uses diesel-async's SyncConnectionWrapper to provide an async interface
//! while maintaining Diesel's compile-time query checking.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{AssetRecord, NewAsset};
use super::pool::{AsyncSqlitePool, DieselError};
use super::{parse_datetime, parse_datetime_opt};
use crate::models::Asset;
use crate::schema::assets;

/// Convert a database record to a domain model.
impl From<AssetRecord> for Asset {
    fn from(record: AssetRecord) -> Self {
        Asset {
            id: record.id,
            name: record.name,
            asset_type: record.asset_type,
            description: record.description,
            serial_no: record.serial_no,
            code: record.code,
            purchased: parse_datetime_opt(record.purchased),
            added_by: record.added_by,
            assigned_to: record.assigned_to,
            return_date: parse_datetime_opt(record.return_date),
            lost: record.lost != 0,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Asset repository with compile-time query checking.
#[derive(Clone)]
pub struct AssetRepository {
    pool: AsyncSqlitePool,
}

impl AssetRepository {
    /// Create a new asset repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get an asset by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Asset>, DieselError> {
        let mut conn = self.pool.get().await?;

        assets::table
            .find(id)
            .first::<AssetRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Asset::from))
    }

    /// Get an asset by organization serial code.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Asset>, DieselError> {
        let mut conn = self.pool.get().await?;

        assets::table
            .filter(assets::code.eq(code))
            .first::<AssetRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Asset::from))
    }

    /// Get all assets ordered by creation time (newest first).
    pub async fn get_all(&self) -> Result<Vec<Asset>, DieselError> {
        let mut conn = self.pool.get().await?;

        assets::table
            .order(assets::created_at.desc())
            .load::<AssetRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Asset::from).collect())
    }

    /// Get assets assigned to a specific user.
    pub async fn get_assigned_to(&self, user_id: &str) -> Result<Vec<Asset>, DieselError> {
        let mut conn = self.pool.get().await?;

        assets::table
            .filter(assets::assigned_to.eq(user_id))
            .order(assets::created_at.desc())
            .load::<AssetRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Asset::from).collect())
    }

    /// Save an asset, upserting on id only.
    ///
    /// A collision on another unique column (`code`) surfaces as a
    /// `UniqueViolation` rather than replacing the conflicting row.
    pub async fn save(&self, asset: &Asset) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        let purchased = asset.purchased.map(|dt| dt.to_rfc3339());
        let return_date = asset.return_date.map(|dt| dt.to_rfc3339());
        let created_at = asset.created_at.to_rfc3339();

        let record = NewAsset {
            id: &asset.id,
            name: &asset.name,
            asset_type: &asset.asset_type,
            description: &asset.description,
            serial_no: &asset.serial_no,
            code: &asset.code,
            purchased: purchased.as_deref(),
            added_by: asset.added_by.as_deref(),
            assigned_to: asset.assigned_to.as_deref(),
            return_date: return_date.as_deref(),
            lost: asset.lost as i32,
            created_at: &created_at,
        };

        diesel::insert_into(assets::table)
            .values(&record)
            .on_conflict(assets::id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Assign an asset to a user with an optional return date.
    pub async fn assign(
        &self,
        id: &str,
        user_id: &str,
        return_date: Option<DateTime<Utc>>,
    ) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        let due = return_date.map(|dt| dt.to_rfc3339());

        diesel::update(assets::table.find(id))
            .set((
                assets::assigned_to.eq(Some(user_id)),
                assets::return_date.eq(due),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Reclaim an asset from its assignee.
    pub async fn reclaim(&self, id: &str) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::update(assets::table.find(id))
            .set((
                assets::assigned_to.eq(None::<String>),
                assets::return_date.eq(None::<String>),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Mark an asset lost or found.
    pub async fn set_lost(&self, id: &str, lost: bool) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::update(assets::table.find(id))
            .set(assets::lost.eq(lost as i32))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Delete an asset.
    #[allow(dead_code)]
    pub async fn delete(&self, id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(assets::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    /// Count all assets.
    pub async fn count(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = assets::table.select(count_star()).first(&mut conn).await?;

        Ok(count as u64)
    }

    /// Count assigned assets.
    pub async fn count_assigned(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = assets::table
            .filter(assets::assigned_to.is_not_null())
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count as u64)
    }

    /// Count lost assets.
    pub async fn count_lost(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = assets::table
            .filter(assets::lost.ne(0))
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel_async::SimpleAsyncConnection;
    use tempfile::tempdir;

    async fn setup_test_db() -> (AsyncSqlitePool, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let pool = AsyncSqlitePool::from_path(&db_path);

        let mut conn = pool.get().await.unwrap();
        conn.batch_execute(
            r#"CREATE TABLE IF NOT EXISTS assets (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                asset_type TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                serial_no TEXT NOT NULL,
                code TEXT NOT NULL UNIQUE,
                purchased TEXT,
                added_by TEXT,
                assigned_to TEXT,
                return_date TEXT,
                lost INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )"#,
        )
        .await
        .unwrap();

        (pool, dir)
    }

    fn sample_asset(code: &str) -> Asset {
        Asset::new(
            "ThinkPad X1".to_string(),
            "laptop".to_string(),
            String::new(),
            "SN-998877".to_string(),
            code.to_string(),
            Some(Utc::now()),
            None,
        )
    }

    #[tokio::test]
    async fn test_asset_crud() {
        let (pool, _dir) = setup_test_db().await;
        let repo = AssetRepository::new(pool);

        let asset = sample_asset("ORG-0001");
        repo.save(&asset).await.unwrap();

        let fetched = repo.get(&asset.id).await.unwrap().unwrap();
        assert_eq!(fetched.code, "ORG-0001");
        assert!(fetched.purchased.is_some());
        assert!(!fetched.lost);

        let by_code = repo.get_by_code("ORG-0001").await.unwrap();
        assert!(by_code.is_some());
        assert!(repo.get_by_code("ORG-9999").await.unwrap().is_none());

        assert!(repo.delete(&asset.id).await.unwrap());
        assert!(repo.get(&asset.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_is_upsert_on_id() {
        let (pool, _dir) = setup_test_db().await;
        let repo = AssetRepository::new(pool);

        let mut asset = sample_asset("ORG-0010");
        repo.save(&asset).await.unwrap();

        asset.name = "ThinkPad X1 Carbon".to_string();
        asset.purchased = None;
        repo.save(&asset).await.unwrap();

        let fetched = repo.get(&asset.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "ThinkPad X1 Carbon");
        assert!(fetched.purchased.is_none(), "cleared column is cleared");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_code() {
        let (pool, _dir) = setup_test_db().await;
        let repo = AssetRepository::new(pool);

        let first = sample_asset("ORG-0011");
        repo.save(&first).await.unwrap();

        // Different id, same organization code
        let second = sample_asset("ORG-0011");
        let err = repo.save(&second).await.unwrap_err();
        assert!(super::super::is_unique_violation(&err));

        assert_eq!(repo.count().await.unwrap(), 1);
        let kept = repo.get(&first.id).await.unwrap();
        assert!(kept.is_some(), "existing asset must survive the collision");
    }

    #[tokio::test]
    async fn test_assignment_lifecycle() {
        let (pool, _dir) = setup_test_db().await;
        let repo = AssetRepository::new(pool);

        let asset = sample_asset("ORG-0002");
        repo.save(&asset).await.unwrap();

        let due = Utc::now() + chrono::Duration::days(7);
        repo.assign(&asset.id, "user-1", Some(due)).await.unwrap();

        let fetched = repo.get(&asset.id).await.unwrap().unwrap();
        assert_eq!(fetched.assigned_to.as_deref(), Some("user-1"));
        assert!(fetched.return_date.is_some());

        let assigned = repo.get_assigned_to("user-1").await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(repo.count_assigned().await.unwrap(), 1);

        repo.reclaim(&asset.id).await.unwrap();
        let fetched = repo.get(&asset.id).await.unwrap().unwrap();
        assert!(fetched.assigned_to.is_none());
        assert!(fetched.return_date.is_none());
        assert_eq!(repo.count_assigned().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lost_flag_and_counts() {
        let (pool, _dir) = setup_test_db().await;
        let repo = AssetRepository::new(pool);

        repo.save(&sample_asset("ORG-0003")).await.unwrap();
        let asset = sample_asset("ORG-0004");
        repo.save(&asset).await.unwrap();

        repo.set_lost(&asset.id, true).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_lost().await.unwrap(), 1);

        repo.set_lost(&asset.id, false).await.unwrap();
        assert_eq!(repo.count_lost().await.unwrap(), 0);
    }
}
