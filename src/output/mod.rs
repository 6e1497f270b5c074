// mod.rs - Output writers: labeled SNP tables, block summaries and run reports

use crate::core::pipeline::{PipelineOutput, PipelineReport};
use crate::data::loaders::{write_snapshot, TableFormat};
use crate::data::snp::RawTable;
use crate::error::{Result, XoError};
use crate::selection::{BlockSummary, Selection};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Columns appended to every labeled row
pub const LABEL_COLUMNS: [&str; 3] = ["blk_id", "blk_size", "blk_len"];

/// Ensure parent directory exists before creating file
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| XoError::io(parent, e))?;
        }
    }
    Ok(())
}

/// `# Command`, `# Generated` and version lines written above every table
pub fn header_comments(command_line: &str) -> Vec<String> {
    vec![
        format!("# Command: {}", command_line),
        format!("# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        format!("# xoblocks v{}", env!("CARGO_PKG_VERSION")),
    ]
}

/// File handle, gzip-compressed when the name ends in `.gz`
pub enum TableSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl TableSink {
    fn create(path: &Path, gzip: bool) -> Result<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| XoError::io(path, e))?;
        let writer = BufWriter::new(file);
        Ok(if gzip {
            TableSink::Gzip(GzEncoder::new(writer, Compression::default()))
        } else {
            TableSink::Plain(writer)
        })
    }

    fn finish(self) -> std::io::Result<()> {
        match self {
            TableSink::Plain(mut w) => w.flush(),
            TableSink::Gzip(gz) => gz.finish()?.flush(),
        }
    }
}

impl Write for TableSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            TableSink::Plain(w) => w.write(buf),
            TableSink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            TableSink::Plain(w) => w.flush(),
            TableSink::Gzip(w) => w.flush(),
        }
    }
}

/// Delimited table writer with leading `#` comment lines
pub struct DelimitedWriter {
    path: PathBuf,
    inner: csv::Writer<TableSink>,
}

impl DelimitedWriter {
    pub fn create(path: &Path, delimiter: u8, gzip: bool, comments: &[String]) -> Result<Self> {
        let mut sink = TableSink::create(path, gzip)?;
        for line in comments {
            writeln!(sink, "{}", line).map_err(|e| XoError::io(path, e))?;
        }
        let inner = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(sink);
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    pub fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.inner.write_record(fields)?;
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        let path = self.path;
        let sink = self
            .inner
            .into_inner()
            .map_err(|e| XoError::io(&path, std::io::Error::new(e.error().kind(), e.error().to_string())))?;
        sink.finish().map_err(|e| XoError::io(&path, e))
    }
}

/// Write a table in the format its file name asks for. Snapshots carry no comments.
pub fn write_raw_table(path: &Path, table: &RawTable, command_line: &str) -> Result<()> {
    match TableFormat::from_path(path) {
        TableFormat::Snapshot => write_snapshot(path, table),
        TableFormat::Delimited { delimiter, gzip } => {
            let mut writer = DelimitedWriter::create(path, delimiter, gzip, &header_comments(command_line))?;
            writer.write_row(&table.header)?;
            for row in &table.rows {
                writer.write_row(row)?;
            }
            writer.finish()?;
            info!("✅ {} rows written to {}", table.len(), path.display());
            Ok(())
        }
    }
}

/// Labeled rows as a table: the input columns followed by the block columns
pub fn labeled_table(header: &[String], output: &PipelineOutput) -> RawTable {
    let width = header.len();
    let mut out_header = header.to_vec();
    out_header.extend(LABEL_COLUMNS.iter().map(|c| c.to_string()));

    let rows = output
        .records()
        .map(|labeled| {
            let mut row = labeled.record.fields.clone();
            // Pad short rows; extra trailing fields stay as read
            if row.len() < width {
                row.resize(width, String::new());
            }
            row.push(labeled.blk_id.to_string());
            row.push(labeled.blk_size.to_string());
            row.push(labeled.blk_len.to_string());
            row
        })
        .collect();

    RawTable {
        header: out_header,
        rows,
    }
}

pub fn write_labeled_table(
    path: &Path,
    header: &[String],
    output: &PipelineOutput,
    command_line: &str,
) -> Result<()> {
    write_raw_table(path, &labeled_table(header, output), command_line)
}

/// Rows of the selected blocks, same columns as the labeled input
pub fn write_selection(path: &Path, selection: &Selection, command_line: &str) -> Result<()> {
    let table = RawTable {
        header: selection.header.clone(),
        rows: selection.rows.clone(),
    };
    write_raw_table(path, &table, command_line)
}

/// One line per selected block
pub fn write_block_summary(path: &Path, blocks: &[BlockSummary], command_line: &str) -> Result<()> {
    let (delimiter, gzip) = match TableFormat::from_path(path) {
        TableFormat::Delimited { delimiter, gzip } => (delimiter, gzip),
        TableFormat::Snapshot => {
            return Err(XoError::config(format!(
                "block summary '{}' must be a delimited file",
                path.display()
            )))
        }
    };

    let mut writer = DelimitedWriter::create(path, delimiter, gzip, &header_comments(command_line))?;
    writer.write_row([
        "chrom_id",
        "blk_id",
        "blk_size",
        "blk_len",
        "start_position",
        "end_position",
        "blk_loc",
    ])?;
    for block in blocks {
        writer.write_row([
            block.chrom_id.clone(),
            block.blk_id.to_string(),
            block.blk_size.to_string(),
            block.blk_len.to_string(),
            block.start_position.to_string(),
            block.end_position.to_string(),
            block.blk_loc.map(|loc| format!("{:.6}", loc)).unwrap_or_default(),
        ])?;
    }
    writer.finish()?;
    info!("✅ {} block summaries written to {}", blocks.len(), path.display());
    Ok(())
}

/// Run report as pretty JSON
pub fn write_report(path: &Path, report: &PipelineReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| XoError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer).map_err(|e| XoError::io(path, e))?;
    writer.flush().map_err(|e| XoError::io(path, e))?;
    info!("📝 Report written to {}", path.display());
    Ok(())
}
