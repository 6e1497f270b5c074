// mod.rs - Table loaders: delimited text (optionally gzip) and LZ4 snapshots

pub mod delimited;
pub mod snapshot;

use crate::data::snp::{CallCoding, ColumnLayout, RawTable, SnpTable};
use crate::error::Result;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

pub use delimited::read_delimited;
pub use snapshot::{read_snapshot, write_snapshot};

/// On-disk table format, chosen from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Delimited { delimiter: u8, gzip: bool },
    Snapshot,
}

impl TableFormat {
    /// `.lz4` is a snapshot; otherwise `.tsv`/`.txt` are tab separated and
    /// everything else comma separated, each optionally followed by `.gz`.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        if name.ends_with(".lz4") {
            return TableFormat::Snapshot;
        }

        let gzip = name.ends_with(".gz");
        let stem = name.strip_suffix(".gz").unwrap_or(&name);
        let delimiter = if stem.ends_with(".tsv") || stem.ends_with(".txt") {
            b'\t'
        } else {
            b','
        };
        TableFormat::Delimited { delimiter, gzip }
    }
}

/// Load a table verbatim, whatever its on-disk format
pub fn load_raw_table(path: &Path) -> Result<RawTable> {
    match TableFormat::from_path(path) {
        TableFormat::Snapshot => read_snapshot(path),
        TableFormat::Delimited { delimiter, gzip } => read_delimited(path, delimiter, gzip),
    }
}

/// Load and group the SNP table the pipeline runs on
pub fn load_snp_table(path: &Path, layout: &ColumnLayout, coding: &CallCoding) -> Result<SnpTable> {
    let start = Instant::now();
    info!("📊 Reading {}", path.display());

    let raw = load_raw_table(path)?;
    let rows = raw.len();
    let table = SnpTable::from_raw(raw, layout, coding)?;

    info!(
        "✅ Read {} SNPs in {} chromosomes ({:.2}s)",
        rows,
        table.chromosomes.len(),
        start.elapsed().as_secs_f64()
    );
    if table.dropped_rows > 0 {
        warn!(
            "⚠️  {} of {} rows had no '{}' and were dropped",
            table.dropped_rows, rows, layout.chromosome
        );
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            TableFormat::from_path(Path::new("peaks.csv")),
            TableFormat::Delimited { delimiter: b',', gzip: false }
        );
        assert_eq!(
            TableFormat::from_path(Path::new("markers.TSV.gz")),
            TableFormat::Delimited { delimiter: b'\t', gzip: true }
        );
        assert_eq!(
            TableFormat::from_path(Path::new("data/sample.lz4")),
            TableFormat::Snapshot
        );
        assert_eq!(
            TableFormat::from_path(Path::new("no_extension")),
            TableFormat::Delimited { delimiter: b',', gzip: false }
        );
    }
}
