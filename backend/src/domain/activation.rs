//! Plugin activation: seeding the sample records into option storage.

use chrono::NaiveDate;
use shared::Record;
use tracing::{info, warn};

use super::SeedDataset;
use crate::error::StorageError;
use crate::storage::OptionStorage;

/// Option under which the seed records are stored
pub const SEED_OPTION_NAME: &str = "react_dummy_data";

const SEED_ROWS: [((i32, u32, u32), &str, u32, u32); 32] = [
    ((2023, 6, 12), "php", 200, 2000),
    ((2023, 6, 14), "java", 200, 4000),
    ((2023, 6, 15), "react", 500, 6000),
    ((2023, 6, 16), "python", 150, 3000),
    ((2023, 6, 17), "javascript", 300, 5000),
    ((2023, 6, 18), "c++", 250, 4500),
    ((2023, 6, 19), "ruby", 120, 2200),
    ((2023, 6, 20), "html", 180, 3200),
    ((2023, 6, 21), "css", 90, 1800),
    ((2023, 6, 22), "sql", 220, 4200),
    ((2023, 6, 23), "flutter", 350, 5500),
    ((2023, 6, 24), "swift", 280, 4800),
    ((2023, 6, 25), "kotlin", 190, 3400),
    ((2023, 6, 26), "typescript", 270, 4600),
    ((2023, 6, 27), "scala", 110, 2400),
    ((2023, 6, 28), "go", 130, 2600),
    ((2023, 6, 29), "rust", 80, 1600),
    ((2023, 8, 3), "php", 80, 1600),
    ((2023, 8, 4), "react", 420, 2800),
    ((2023, 8, 8), "python", 240, 4200),
    ((2023, 8, 6), "javascript", 390, 2200),
    ((2023, 8, 8), "c++", 280, 4500),
    ((2023, 8, 8), "html", 170, 3000),
    ((2023, 8, 9), "css", 110, 2000),
    ((2023, 8, 10), "sql", 320, 5200),
    ((2023, 8, 11), "flutter", 420, 6000),
    ((2023, 8, 12), "swift", 320, 4800),
    ((2023, 8, 13), "kotlin", 210, 3600),
    ((2023, 8, 14), "typescript", 310, 2200),
    ((2023, 8, 23), "scala", 130, 2400),
    ((2023, 8, 22), "go", 140, 2600),
    ((2023, 8, 20), "java", 190, 3800),
];

/// The fixed sample dataset, in the order it is stored
pub fn seed_records() -> Vec<Record> {
    SEED_ROWS
        .iter()
        .filter_map(|&((y, m, d), name, students, fees)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Record::new(date, name, students, fees))
        })
        .collect()
}

/// Activation hook: write the seed records to option storage, replacing any previous value.
///
/// Returns the number of records written.
pub async fn activate(store: &dyn OptionStorage) -> Result<usize, StorageError> {
    let records = seed_records();
    let value = serde_json::to_string(&records).map_err(|source| StorageError::Encode {
        name: SEED_OPTION_NAME.to_string(),
        source,
    })?;
    store.update_option(SEED_OPTION_NAME, &value).await?;

    info!("Seeded {} records into option '{}'", records.len(), SEED_OPTION_NAME);
    Ok(records.len())
}

/// Read the stored records back. `None` when the plugin was never activated
pub async fn read_records(store: &dyn OptionStorage) -> Result<Option<Vec<Record>>, StorageError> {
    let Some(raw) = store.get_option(SEED_OPTION_NAME).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Decode {
            name: SEED_OPTION_NAME.to_string(),
            source,
        })
}

/// Load the stored records into an immutable dataset
pub async fn load_seed(store: &dyn OptionStorage) -> Result<SeedDataset, StorageError> {
    match read_records(store).await? {
        Some(records) => {
            info!("Loaded {} records from option '{}'", records.len(), SEED_OPTION_NAME);
            Ok(SeedDataset::new(records))
        }
        None => {
            warn!("Option '{}' is missing, the graph will be empty", SEED_OPTION_NAME);
            Ok(SeedDataset::new(Vec::new()))
        }
    }
}
