//! Personal dashboard for screen time. Records per-app minutes by date and category in a local
//! sqlite database, summarizes the last days, suggests daily limits and runs focus sessions that
//! log themselves as usage.
//!

pub mod analysis;
pub mod cli;
pub mod error;
pub mod focus;
pub mod limits;
pub mod store;
pub mod utils;
