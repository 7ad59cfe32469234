use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;

use crate::courtside_prelude::*;

// Storage contract the host wires to the director. The library defines the
// snapshot shape; adapters own the bytes.
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &MatchSnapshot) -> anyhow::Result<()>;
    fn load(&mut self) -> anyhow::Result<Option<MatchSnapshot>>;
}

// One match, one JSON file.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotStore { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&mut self, snapshot: &MatchSnapshot) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).with_context(|| format!("Writing {}", self.path.display()))?;
        Ok(())
    }

    fn load(&mut self) -> anyhow::Result<Option<MatchSnapshot>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("Reading {}", self.path.display()));
            }
        };
        let snapshot = serde_json::from_str(&json)
            .with_context(|| format!("Parsing {}", self.path.display()))?;
        Ok(Some(snapshot))
    }
}
