// snapshot.rs - LZ4 compressed binary snapshots of a raw table

use crate::data::snp::RawTable;
use crate::error::{Result, XoError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Bumped whenever the serialized layout changes
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    format_version: u32,
    tool_version: String,
    created: String,
    table: T,
}

/// Save a table as bincode compressed with LZ4 (size prepended)
pub fn write_snapshot(path: &Path, table: &RawTable) -> Result<()> {
    let start = Instant::now();
    crate::output::ensure_parent_dir(path)?;

    let snapshot = Snapshot {
        format_version: SNAPSHOT_FORMAT_VERSION,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        created: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        table,
    };
    let data = bincode::serialize(&snapshot)
        .map_err(|e| XoError::Snapshot(format!("Failed to serialize table: {}", e)))?;
    let compressed = lz4_flex::compress_prepend_size(&data);

    std::fs::write(path, &compressed).map_err(|e| XoError::io(path, e))?;

    info!(
        "💾 Snapshot saved to {} in {:.2}s ({} rows, {} KB)",
        path.display(),
        start.elapsed().as_secs_f64(),
        table.len(),
        compressed.len() / 1024
    );
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<RawTable> {
    let compressed = std::fs::read(path).map_err(|e| XoError::io(path, e))?;
    let data = lz4_flex::decompress_size_prepended(&compressed)
        .map_err(|e| XoError::Snapshot(format!("Failed to decompress {}: {}", path.display(), e)))?;
    let snapshot: Snapshot<RawTable> = bincode::deserialize(&data)
        .map_err(|e| XoError::Snapshot(format!("Failed to deserialize {}: {}", path.display(), e)))?;

    if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(XoError::Snapshot(format!(
            "{} has format version {}, expected {}",
            path.display(),
            snapshot.format_version,
            SNAPSHOT_FORMAT_VERSION
        )));
    }

    info!(
        "📂 Snapshot {} loaded: {} rows (written by v{} at {})",
        path.display(),
        snapshot.table.len(),
        snapshot.tool_version,
        snapshot.created
    );
    Ok(snapshot.table)
}
