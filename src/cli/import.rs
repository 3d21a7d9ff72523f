use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use crate::store::{import::read_csv, record_store::RecordStore};

/// Appends every record of the csv file. A malformed row rejects the whole file.
pub fn process_import_command(file: &Path, store: &impl RecordStore) -> Result<()> {
    let added = import_file(file, store)?;
    println!("Added {added} records!");
    Ok(())
}

fn import_file(file: &Path, store: &impl RecordStore) -> Result<usize> {
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Couldn't open {}", file.display()))?,
    );
    let records =
        read_csv(reader).with_context(|| format!("Rejected {}", file.display()))?;
    let added = store.append(&records)?;
    info!("Imported {added} records from {file:?}");
    Ok(added)
}
