use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::SeenSet;
use crate::errors::TrendResult;
use crate::storage::traits::SeenRepository;

/// Flat-file seen store: a JSON array of string identifiers.
///
/// Writes go to a temporary sibling first and are renamed over the target so
/// a crash mid-write leaves the previous state intact.
pub struct JsonSeenStore {
    path: PathBuf,
}

impl JsonSeenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeenRepository for JsonSeenStore {
    fn load(&self) -> SeenSet {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SeenSet::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "seen store unreadable: {}", e);
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => SeenSet::from_ids(ids),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "seen store corrupt, starting empty: {}",
                    e
                );
                SeenSet::new()
            }
        }
    }

    fn save(&self, seen: &SeenSet) -> TrendResult<()> {
        let json = serde_json::to_string_pretty(&seen.sorted_ids())
            .map_err(|e| crate::errors::TrendError::Parse(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}
