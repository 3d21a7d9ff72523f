use thiserror::Error;

/// Errors produced by the record store, the aggregations, the limit tracker and the focus
/// session runner. The cli wraps these into [anyhow::Error].
#[derive(Debug, Error)]
pub enum WellbeingError {
    /// A record failed validation on insert or import. `row` is 1-based and counts data rows
    /// only, so it matches what a user sees in a spreadsheet minus the header.
    #[error("invalid record at row {row}, field `{field}`: {reason}")]
    InvalidRecord {
        row: usize,
        field: String,
        reason: String,
    },
    #[error("invalid limit for {app}: {value} minutes is outside of 0..=180")]
    InvalidLimit { app: String, value: i64 },
    #[error("{0} is undefined for an empty set of records")]
    EmptyInput(&'static str),
    #[error("record store is unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
    #[error("focus session duration {0} is outside of 5..=120 minutes")]
    InvalidSessionDuration(u32),
    #[error("focus session was already started")]
    SessionAlreadyStarted,
}

pub type Result<T, E = WellbeingError> = std::result::Result<T, E>;
