//! JSONL snapshot loading with per-record validation

use std::fs;
use std::path::Path;

use super::observation::{Observation, ObservationError};

/// Observations accepted from a snapshot file
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub observations: Vec<Observation>,
    /// Lines that failed to parse or validate
    pub rejected: usize,
}

/// Load a JSONL snapshot, one observation per line
///
/// Blank lines are skipped. Malformed or invalid records are logged and
/// counted instead of failing the whole load; only I/O errors are returned.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, ObservationError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut snapshot = Snapshot::default();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Observation::from_jsonl(line) {
            Ok(obs) => snapshot.observations.push(obs),
            Err(e) => {
                log::warn!("Rejected record at {}:{}: {}", path.display(), line_no + 1, e);
                snapshot.rejected += 1;
            }
        }
    }

    log::info!(
        "Loaded {} observations from {} ({} rejected)",
        snapshot.observations.len(),
        path.display(),
        snapshot.rejected
    );

    Ok(snapshot)
}
