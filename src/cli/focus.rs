use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    focus::{FocusOutcome, FocusSession, DEFAULT_SESSION_MINUTES},
    store::record_store::RecordStore,
    utils::{clock::DefaultClock, shutdown::detect_shutdown},
};

#[derive(Debug, Parser)]
pub struct FocusCommand {
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SESSION_MINUTES,
        value_parser = clap::value_parser!(u32).range(5..=120),
        help = "Session duration in minutes"
    )]
    minutes: u32,
}

/// Command to process `focus` command. Blocks until the session runs out or the user presses
/// Ctrl-C.
pub async fn process_focus_command(
    FocusCommand { minutes }: FocusCommand,
    store: &impl RecordStore,
) -> Result<()> {
    let cancellation = CancellationToken::new();
    let mut session = FocusSession::new(store, Box::new(DefaultClock));

    println!("Focus mode activated for {minutes} minutes!");

    let (_, outcome) = tokio::join!(detect_shutdown(cancellation.clone()), async {
        let outcome = session.start(minutes, cancellation.clone()).await;
        // Stops shutdown detection once the session is over
        cancellation.cancel();
        outcome
    });

    match outcome? {
        FocusOutcome::Completed {
            write_error: None, ..
        } => println!("Session complete!"),
        FocusOutcome::Completed {
            write_error: Some(e),
            ..
        } => {
            error!("Focus session record was lost: {e:?}");
            println!("Session complete! It couldn't be saved to your usage history: {e}");
        }
        FocusOutcome::Cancelled { elapsed } => {
            println!("Session cancelled after {} minutes.", elapsed.as_secs() / 60)
        }
    }
    Ok(())
}
