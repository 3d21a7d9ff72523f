//! Focus sessions. A session is a single timed wait that logs itself as usage of the
//! "Focus Session" app once it runs out. Sessions can be cancelled through a [CancellationToken],
//! a cancelled session logs nothing.

use std::{ops::RangeInclusive, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::{
    error::{Result, WellbeingError},
    store::{entities::UsageRecord, record_store::RecordStore},
    utils::clock::Clock,
};

pub const SESSION_MINUTES: RangeInclusive<u32> = 5..=120;
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug)]
pub enum FocusOutcome {
    /// The session ran for its whole duration. A failed write doesn't undo the session, the error
    /// is handed back so it can be shown to the user.
    Completed {
        record: UsageRecord,
        write_error: Option<WellbeingError>,
    },
    Cancelled {
        elapsed: Duration,
    },
}

pub struct FocusSession<S: RecordStore> {
    store: S,
    clock: Box<dyn Clock>,
    state: SessionState,
}

impl<S: RecordStore> FocusSession<S> {
    pub fn new(store: S, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Waits for `duration_minutes` and records the session. A session object runs at most once.
    #[instrument(skip(self, cancellation))]
    pub async fn start(
        &mut self,
        duration_minutes: u32,
        cancellation: CancellationToken,
    ) -> Result<FocusOutcome> {
        if !SESSION_MINUTES.contains(&duration_minutes) {
            return Err(WellbeingError::InvalidSessionDuration(duration_minutes));
        }
        if self.state != SessionState::Idle {
            return Err(WellbeingError::SessionAlreadyStarted);
        }

        self.state = SessionState::Running;
        info!("Focus session started for {duration_minutes} minutes");

        let started = self.clock.instant();
        let deadline = started + Duration::from_secs(duration_minutes as u64 * 60);

        tokio::select! {
            _ = cancellation.cancelled() => {
                self.state = SessionState::Cancelled;
                let elapsed = self.clock.instant() - started;
                info!("Focus session cancelled after {elapsed:?}");
                return Ok(FocusOutcome::Cancelled { elapsed });
            }
            _ = self.clock.sleep_until(deadline) => ()
        }

        let record = UsageRecord::focus_session(self.clock.today(), duration_minutes);
        let write_error = match self.store.append(std::slice::from_ref(&record)) {
            Ok(_) => None,
            Err(e) => {
                warn!("Focus session finished but wasn't recorded: {e}");
                Some(e)
            }
        };

        self.state = SessionState::Completed;
        info!("Focus session completed");
        Ok(FocusOutcome::Completed {
            record,
            write_error,
        })
    }
}
