use std::{ops::Deref, path::Path};

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::error::{Result, WellbeingError};

use super::entities::UsageRecord;

/// Interface for abstracting storage of records. The store is append-only: records are never
/// updated or deleted through it.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    /// Makes sure the underlying table exists. Safe to call any number of times.
    fn initialize(&self) -> Result<()>;

    /// Inserts every record of the batch or none of them. Returns the number of inserted records.
    fn append(&self, records: &[UsageRecord]) -> Result<usize>;

    /// Returns all records dated `since` or later, newest date first.
    fn query(&self, since: NaiveDate) -> Result<Vec<UsageRecord>>;

    fn count(&self) -> Result<u64>;
}

impl<T: Deref> RecordStore for T
where
    T::Target: RecordStore,
{
    fn initialize(&self) -> Result<()> {
        self.deref().initialize()
    }

    fn append(&self, records: &[UsageRecord]) -> Result<usize> {
        self.deref().append(records)
    }

    fn query(&self, since: NaiveDate) -> Result<Vec<UsageRecord>> {
        self.deref().query(since)
    }

    fn count(&self) -> Result<u64> {
        self.deref().count()
    }
}

/// Inserts the records produced by `generate` only when the store holds no records at all, so
/// repeated startups don't duplicate sample data. Returns the number of inserted records.
pub fn seed_if_empty(
    store: &impl RecordStore,
    generate: impl FnOnce() -> Vec<UsageRecord>,
) -> Result<usize> {
    if store.count()? > 0 {
        debug!("Store already has records, skipping seeding");
        return Ok(0);
    }
    let inserted = store.append(&generate())?;
    info!("Seeded empty store with {inserted} sample records");
    Ok(inserted)
}

/// The main realization of [RecordStore], backed by a single sqlite connection that lives as
/// long as the store.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening record store at {path:?}");
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}

fn validate(row: usize, record: &UsageRecord) -> Result<()> {
    if record.app.trim().is_empty() {
        return Err(WellbeingError::InvalidRecord {
            row,
            field: "app".into(),
            reason: "app name can't be empty".into(),
        });
    }
    Ok(())
}

impl RecordStore for SqliteRecordStore {
    fn initialize(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS screen_time
             (date DATE, app TEXT, minutes INTEGER, category TEXT)",
            [],
        )?;
        Ok(())
    }

    fn append(&self, records: &[UsageRecord]) -> Result<usize> {
        for (index, record) in records.iter().enumerate() {
            validate(index + 1, record)?;
        }
        if records.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO screen_time (date, app, minutes, category) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                inserted += stmt.execute(params![
                    record.date,
                    &*record.app,
                    record.minutes,
                    &*record.category,
                ])?;
            }
        }
        tx.commit()?;
        debug!("Appended {inserted} records");
        Ok(inserted)
    }

    fn query(&self, since: NaiveDate) -> Result<Vec<UsageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, app, minutes, category
             FROM screen_time
             WHERE date >= ?1
             ORDER BY date DESC",
        )?;
        let rows = stmt.query_map(params![since], |row| {
            Ok(UsageRecord {
                date: row.get(0)?,
                app: row.get::<_, String>(1)?.into(),
                minutes: row.get(2)?,
                category: row.get::<_, String>(3)?.into(),
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM screen_time", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, Local, NaiveDate};
    use tempfile::tempdir;

    use crate::{
        error::WellbeingError,
        store::{
            entities::UsageRecord,
            record_store::{seed_if_empty, RecordStore, SqliteRecordStore},
        },
    };

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    fn open() -> Result<SqliteRecordStore> {
        let store = SqliteRecordStore::open_in_memory()?;
        store.initialize()?;
        Ok(store)
    }

    fn test_records() -> Vec<UsageRecord> {
        vec![
            UsageRecord::new(TEST_DATE, "A", 30, "Work"),
            UsageRecord::new(TEST_DATE + Duration::days(2), "B", 90, "Play"),
            UsageRecord::new(TEST_DATE + Duration::days(1), "A", 10, "Work"),
            UsageRecord::new(TEST_DATE + Duration::days(1), "A", 10, "Work"),
        ]
    }

    fn sorted(mut records: Vec<UsageRecord>) -> Vec<UsageRecord> {
        records.sort();
        records
    }

    #[test]
    fn test_initialize_is_idempotent() -> Result<()> {
        let store = open()?;
        store.initialize()?;
        store.append(&test_records())?;
        store.initialize()?;
        assert_eq!(store.count()?, 4);
        Ok(())
    }

    #[test]
    fn test_append_then_query_returns_everything() -> Result<()> {
        let store = open()?;
        let inserted = store.append(&test_records())?;
        assert_eq!(inserted, 4);

        let stored = store.query(TEST_DATE - Duration::days(1))?;

        assert_eq!(sorted(stored.clone()), sorted(test_records()));
        assert!(stored.windows(2).all(|w| w[0].date >= w[1].date));
        Ok(())
    }

    #[test]
    fn test_query_is_inclusive_of_since() -> Result<()> {
        let store = open()?;
        store.append(&test_records())?;

        let stored = store.query(TEST_DATE + Duration::days(1))?;

        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|v| v.date >= TEST_DATE + Duration::days(1)));
        Ok(())
    }

    #[test]
    fn test_query_future_is_empty() -> Result<()> {
        let store = open()?;
        let today = Local::now().date_naive();
        store.append(&[UsageRecord::new(today, "A", 5, "Work")])?;

        assert!(store.query(today + Duration::days(1))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_append_rejects_whole_batch() -> Result<()> {
        let store = open()?;
        let mut records = test_records();
        records.push(UsageRecord::new(TEST_DATE, "  ", 10, "Work"));

        let result = store.append(&records);

        assert!(matches!(
            result,
            Err(WellbeingError::InvalidRecord { row: 5, ref field, .. }) if field == "app"
        ));
        assert_eq!(store.count()?, 0);
        Ok(())
    }

    #[test]
    fn test_seed_if_empty_runs_once() -> Result<()> {
        let store = open()?;

        let first = seed_if_empty(&store, test_records)?;
        let second = seed_if_empty(&store, || panic!("generator must not run"))?;

        assert_eq!(first, 4);
        assert_eq!(second, 0);
        assert_eq!(store.count()?, 4);
        Ok(())
    }

    #[test]
    fn test_records_survive_reopening() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("wellbeing.db");
        {
            let store = SqliteRecordStore::open(&path)?;
            store.initialize()?;
            store.append(&test_records())?;
        }

        let store = SqliteRecordStore::open(&path)?;
        store.initialize()?;

        assert_eq!(store.count()?, 4);
        assert_eq!(sorted(store.query(TEST_DATE)?), sorted(test_records()));
        Ok(())
    }
}
