use async_trait::async_trait;
use sqlx::Row;

use super::{DbConnection, OptionStorage};
use crate::error::StorageError;

/// SQLite-backed option table
#[derive(Clone)]
pub struct SqliteOptionRepository {
    db: DbConnection,
}

impl SqliteOptionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OptionStorage for SqliteOptionRepository {
    async fn get_option(&self, name: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT option_value FROM options WHERE option_name = ?")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| r.get::<String, _>("option_value")))
    }

    async fn update_option(&self, name: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query("INSERT OR REPLACE INTO options (option_name, option_value) VALUES (?, ?)")
            .bind(name)
            .bind(value)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_option(&self, name: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM options WHERE option_name = ?")
            .bind(name)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_options(&self) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query("SELECT option_name FROM options ORDER BY option_name")
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows.iter().map(|row| row.get::<String, _>("option_name")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> SqliteOptionRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SqliteOptionRepository::new(db)
    }

    #[tokio::test]
    async fn test_get_missing_option() {
        let repo = setup_test().await;
        assert_eq!(repo.get_option("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_and_get_option() {
        let repo = setup_test().await;
        repo.update_option("react_dummy_data", "[]").await.unwrap();
        assert_eq!(
            repo.get_option("react_dummy_data").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_existing_value() {
        let repo = setup_test().await;
        repo.update_option("key", "first").await.unwrap();
        repo.update_option("key", "second").await.unwrap();

        assert_eq!(repo.get_option("key").await.unwrap(), Some("second".to_string()));
        assert_eq!(repo.list_options().await.unwrap(), vec!["key".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_option() {
        let repo = setup_test().await;
        repo.update_option("key", "value").await.unwrap();

        assert!(repo.delete_option("key").await.unwrap());
        assert!(!repo.delete_option("key").await.unwrap());
        assert_eq!(repo.get_option("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_options_sorted() {
        let repo = setup_test().await;
        repo.update_option("b", "2").await.unwrap();
        repo.update_option("a", "1").await.unwrap();

        assert_eq!(repo.list_options().await.unwrap(), vec!["a", "b"]);
    }
}
