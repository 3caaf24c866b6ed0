//! Sources the data window reads its records from.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use shared::{Record, ServiceError};

use super::activation::read_records;
use crate::storage::OptionStorage;

/// Anything that can produce the full, ordered record set
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load_records(&self) -> Result<Vec<Record>, ServiceError>;
}

/// Records loaded once at startup and never modified afterwards
#[derive(Debug, Clone)]
pub struct SeedDataset {
    records: Arc<[Record]>,
}

impl SeedDataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSource for SeedDataset {
    async fn load_records(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.records.to_vec())
    }
}

/// Reads the seed option on every call
#[derive(Clone)]
pub struct OptionRecordSource {
    store: Arc<dyn OptionStorage>,
}

impl OptionRecordSource {
    pub fn new(store: Arc<dyn OptionStorage>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecordSource for OptionRecordSource {
    async fn load_records(&self) -> Result<Vec<Record>, ServiceError> {
        let records = read_records(self.store.as_ref()).await?;
        Ok(records.unwrap_or_default())
    }
}

/// Which record source the data endpoint uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum DataSourceMode {
    /// Load the option once at startup into a `SeedDataset`
    Snapshot,
    /// Re-read the option on every request
    Live,
}

impl FromStr for DataSourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snapshot" => Ok(DataSourceMode::Snapshot),
            "live" => Ok(DataSourceMode::Live),
            other => Err(format!("unknown data source '{}', expected snapshot or live", other)),
        }
    }
}

impl TryFrom<String> for DataSourceMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activation::{activate, SEED_OPTION_NAME};
    use crate::storage::{DbConnection, SqliteOptionRepository};
    use chrono::NaiveDate;

    async fn setup_store() -> Arc<dyn OptionStorage> {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        Arc::new(SqliteOptionRepository::new(db))
    }

    #[tokio::test]
    async fn test_seed_dataset_returns_copy_in_order() {
        let d = NaiveDate::from_ymd_opt(2023, 6, 12).unwrap();
        let dataset = SeedDataset::new(vec![
            Record::new(d, "b", 1, 1),
            Record::new(d, "a", 2, 2),
        ]);
        let names: Vec<String> = dataset
            .load_records()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_option_source_sees_updates() {
        let store = setup_store().await;
        let source = OptionRecordSource::new(store.clone());
        assert!(source.load_records().await.unwrap().is_empty());

        activate(store.as_ref()).await.unwrap();
        assert_eq!(source.load_records().await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_option_source_surfaces_storage_error() {
        let store = setup_store().await;
        store.update_option(SEED_OPTION_NAME, "not json").await.unwrap();

        let err = OptionRecordSource::new(store).load_records().await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[test]
    fn test_data_source_mode_parsing() {
        assert_eq!("snapshot".parse::<DataSourceMode>(), Ok(DataSourceMode::Snapshot));
        assert_eq!(" LIVE ".parse::<DataSourceMode>(), Ok(DataSourceMode::Live));
        assert!("cache".parse::<DataSourceMode>().is_err());
    }
}
