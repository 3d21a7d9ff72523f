//!  Storage is organized through [record_store::SqliteRecordStore].
//!  The basic idea is:
//!   - There is a single `screen_time` table without keys, records are only ever appended.
//!   - Every record is a (date, app, minutes, category) observation.
//!   - An empty store is seeded with a week of sample data on startup.

pub mod entities;
pub mod record_store;
pub mod sample;
pub mod import;
