use crate::error::{Result, ResultExt};
use crate::types::DataQualityStats;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the statistics snapshot as pretty-printed JSON, replacing any previous file.
pub fn write_statistics(stats: &DataQualityStats, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
    }

    let mut file = File::create(path).context(format!("Creating {}", path.display()))?;
    file.write_all(serde_json::to_string_pretty(stats)?.as_bytes())?;

    info!("Statistics saved: {}", path.display());
    Ok(())
}
