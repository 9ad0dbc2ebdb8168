use crate::error::Result;
use crate::models::{CurrentStore, History, Snapshot};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read the current-rates store. A missing file is empty prior state; a
/// file that exists but does not parse is an error worth reporting.
pub fn load_current(path: &str) -> Result<Option<CurrentStore>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(Some(serde_json::from_reader(reader)?))
}

/// Replace the current-rates store with this run's snapshot.
pub fn save_current(path: &str, payload: &CurrentStore) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, payload)?;
    Ok(())
}

pub fn load_history(path: &str) -> Result<History> {
    if !Path::new(path).exists() {
        return Ok(History::new());
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_history(path: &str, history: &History) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, history)?;
    Ok(())
}

/// Fold one snapshot into the history store, keyed currency → date → time.
/// Existing observations stay put; rows without a publish date or time do
/// not enter history.
pub fn merge_history(history: &mut History, snapshot: &Snapshot) {
    for (currency, record) in snapshot {
        let (Some(date), Some(time)) = (&record.update_date, &record.update_time) else {
            continue;
        };
        history
            .entry(currency.clone())
            .or_default()
            .entry(date.clone())
            .or_default()
            .insert(time.clone(), record.rate.clone());
    }
}
