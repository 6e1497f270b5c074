// delimited.rs - CSV/TSV loader for SNP tables

use crate::data::snp::RawTable;
use crate::error::{Result, XoError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Name given to an unnamed leading column (the row index of dataframe exports)
pub const INDEX_COLUMN: &str = "SNP";

/// Read a delimited table. `#` lines are comments; rows may be ragged and are
/// kept as-is so that malformed rows surface per chromosome, not per file.
pub fn read_delimited(path: &Path, delimiter: u8, gzip: bool) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| XoError::io(path, e))?;
    let source: Box<dyn Read> = if gzip {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    read_from(BufReader::new(source), delimiter)
}

pub(crate) fn read_from<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut header: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if header.is_empty() {
        return Err(XoError::InputFormat {
            context: "header".to_string(),
            reason: "empty table".to_string(),
        });
    }
    if header[0].is_empty() {
        header[0] = INDEX_COLUMN.to_string();
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(RawTable { header, rows })
}
