// snp.rs - SNP records, chromosome groups and the raw table they come from

use crate::error::{Result, XoError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Parent-of-origin call for a single SNP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentCall {
    ParentA,
    ParentB,
    NoCall,
}

impl ParentCall {
    /// Contribution of this call to the cumulative signal
    pub fn step(self) -> i64 {
        match self {
            ParentCall::ParentA => 1,
            ParentCall::ParentB => -1,
            ParentCall::NoCall => 0,
        }
    }

    pub fn is_resolved(self) -> bool {
        self != ParentCall::NoCall
    }
}

/// Maps the labels found in the call column onto the two parents.
/// Any other label (including an empty field) is an unresolved call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallCoding {
    pub parent_a: String,
    pub parent_b: String,
}

impl CallCoding {
    pub fn new(parent_a: impl Into<String>, parent_b: impl Into<String>) -> Self {
        Self {
            parent_a: parent_a.into(),
            parent_b: parent_b.into(),
        }
    }

    pub fn decode(&self, label: &str) -> ParentCall {
        let label = label.trim();
        if label == self.parent_a {
            ParentCall::ParentA
        } else if label == self.parent_b {
            ParentCall::ParentB
        } else {
            ParentCall::NoCall
        }
    }
}

impl Default for CallCoding {
    fn default() -> Self {
        Self::new("CB4856", "N2")
    }
}

/// Names of the columns the pipeline needs; all other columns pass through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub id: String,
    pub chromosome: String,
    pub position: String,
    pub call: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: "SNP".to_string(),
            chromosome: "chrom_id".to_string(),
            position: "position".to_string(),
            call: "hmm_state1".to_string(),
        }
    }
}

/// Column positions resolved against a concrete header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub id: usize,
    pub chromosome: usize,
    pub position: usize,
    pub call: usize,
}

impl ColumnLayout {
    pub fn resolve(&self, header: &[String]) -> Result<ColumnIndex> {
        Ok(ColumnIndex {
            id: find_column(header, &self.id)?,
            chromosome: find_column(header, &self.chromosome)?,
            position: find_column(header, &self.position)?,
            call: find_column(header, &self.call)?,
        })
    }
}

/// Position of a named column in a header
pub fn find_column(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| XoError::MissingColumn {
            column: name.to_string(),
        })
}

/// Table exactly as read from disk: header plus verbatim rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, same header
    pub fn head(&self, n: usize) -> RawTable {
        RawTable {
            header: self.header.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// One SNP call with its original row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    pub id: String,
    pub chrom_id: String,
    pub position: u64,
    pub call: ParentCall,
    /// Every field of the input row, verbatim and in header order
    pub fields: Vec<String>,
}

/// Records of one chromosome in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    pub id: String,
    pub records: Vec<SnpRecord>,
    /// First malformed row seen while grouping, reported when the chromosome runs
    pub defect: Option<String>,
}

impl Chromosome {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            records: Vec::new(),
            defect: None,
        }
    }

    pub fn from_records(id: impl Into<String>, records: Vec<SnpRecord>) -> Self {
        Self {
            id: id.into(),
            records,
            defect: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn mark_defect(&mut self, reason: String) {
        if self.defect.is_none() {
            self.defect = Some(reason);
        }
    }

    /// Check the record sequence is usable: no malformed rows, at least two
    /// records, positions non-decreasing. The core never re-sorts.
    pub fn validate(&self) -> Result<()> {
        if let Some(defect) = &self.defect {
            return Err(XoError::chromosome(&self.id, defect.clone()));
        }
        validate_records(&self.id, &self.records)
    }
}

/// Ordering and minimum-size checks behind `Chromosome::validate`
fn validate_records<'a, I>(chrom_id: &str, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a SnpRecord>,
{
    let mut count = 0usize;
    let mut previous: Option<&SnpRecord> = None;
    for record in records {
        if let Some(prev) = previous {
            if record.position < prev.position {
                return Err(XoError::chromosome(
                    chrom_id,
                    format!(
                        "positions not sorted: SNP {} at {} follows SNP {} at {}",
                        record.id, record.position, prev.id, prev.position
                    ),
                ));
            }
        }
        previous = Some(record);
        count += 1;
    }
    if count < 2 {
        return Err(XoError::chromosome(
            chrom_id,
            format!("{} record(s), at least 2 are required", count),
        ));
    }
    Ok(())
}

/// Input table grouped by chromosome in first-appearance order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnpTable {
    pub header: Vec<String>,
    pub chromosomes: Vec<Chromosome>,
    /// Rows without a chromosome id, left out of every chromosome
    pub dropped_rows: usize,
}

impl SnpTable {
    /// Group and decode a raw table. A missing column fails the whole table;
    /// a malformed row only marks its own chromosome. A row with no chromosome
    /// id belongs to none and is dropped with a warning.
    pub fn from_raw(raw: RawTable, layout: &ColumnLayout, coding: &CallCoding) -> Result<Self> {
        let columns = layout.resolve(&raw.header)?;
        let mut chromosomes: Vec<Chromosome> = Vec::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();
        let mut dropped_rows = 0usize;

        for (row_num, fields) in raw.rows.into_iter().enumerate() {
            let chrom_id = match fields.get(columns.chromosome) {
                Some(c) if !c.trim().is_empty() => c.trim().to_string(),
                _ => {
                    warn!(
                        "⚠️  Dropping record {}: missing '{}' field",
                        row_num + 1,
                        layout.chromosome
                    );
                    dropped_rows += 1;
                    continue;
                }
            };

            let slot = *lookup.entry(chrom_id.clone()).or_insert_with(|| {
                chromosomes.push(Chromosome::new(chrom_id.clone()));
                chromosomes.len() - 1
            });
            let chromosome = &mut chromosomes[slot];

            match decode_row(&fields, &columns, layout, coding) {
                Ok((id, position, call)) => chromosome.records.push(SnpRecord {
                    id,
                    chrom_id,
                    position,
                    call,
                    fields,
                }),
                Err(reason) => {
                    chromosome.mark_defect(format!("record {}: {}", row_num + 1, reason))
                }
            }
        }

        Ok(Self {
            header: raw.header,
            chromosomes,
            dropped_rows,
        })
    }

    pub fn total_records(&self) -> usize {
        self.chromosomes.iter().map(|c| c.len()).sum()
    }

    pub fn chromosome(&self, id: &str) -> Option<&Chromosome> {
        self.chromosomes.iter().find(|c| c.id == id)
    }
}

fn decode_row(
    fields: &[String],
    columns: &ColumnIndex,
    layout: &ColumnLayout,
    coding: &CallCoding,
) -> std::result::Result<(String, u64, ParentCall), String> {
    let id = fields
        .get(columns.id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing '{}' field", layout.id))?;

    let position_str = fields
        .get(columns.position)
        .map(|s| s.trim())
        .ok_or_else(|| format!("missing '{}' field", layout.position))?;
    let position = position_str
        .parse::<u64>()
        .map_err(|_| format!("invalid position '{}'", position_str))?;

    // An empty call is unresolved; a row cut short before the call column is malformed
    let call = fields
        .get(columns.call)
        .map(|s| coding.decode(s))
        .ok_or_else(|| format!("missing '{}' field", layout.call))?;

    Ok((id.to_string(), position, call))
}
