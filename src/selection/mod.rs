// mod.rs - Secondary selection of labeled blocks by size, length, coverage and genome match

use crate::data::snp::{find_column, RawTable};
use crate::error::{Result, XoError};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::info;

/// Columns read from a labeled table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionColumns {
    pub chromosome: String,
    pub position: String,
    pub call: String,
    pub block_id: String,
    pub ref_reads: String,
    pub var_reads: String,
    pub base_geno: String,
    /// Key into `ChromosomeLengths`; optional in the table
    pub chromosome_number: String,
}

impl Default for SelectionColumns {
    fn default() -> Self {
        Self {
            chromosome: "chrom_id".to_string(),
            position: "position".to_string(),
            call: "hmm_state1".to_string(),
            block_id: "blk_id".to_string(),
            ref_reads: "ref_reads".to_string(),
            var_reads: "var_reads".to_string(),
            base_geno: "base_geno".to_string(),
            chromosome_number: "chromosome".to_string(),
        }
    }
}

/// Chromosome lengths in bp, keyed by the `chromosome` column value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChromosomeLengths(HashMap<String, u64>);

impl ChromosomeLengths {
    pub fn new() -> Self {
        Self::default()
    }

    /// C. elegans autosomes 1-5 and X as 6
    pub fn c_elegans() -> Self {
        [
            ("1", 15_114_068),
            ("2", 15_311_845),
            ("3", 13_819_453),
            ("4", 17_493_838),
            ("5", 20_953_657),
            ("6", 17_739_129),
        ]
        .into_iter()
        .map(|(name, length)| (name.to_string(), length))
        .collect()
    }

    pub fn insert(&mut self, chromosome: impl Into<String>, length: u64) {
        self.0.insert(chromosome.into(), length);
    }

    pub fn get(&self, chromosome: &str) -> Option<u64> {
        self.0.get(chromosome.trim()).copied().filter(|&length| length > 0)
    }
}

impl FromIterator<(String, u64)> for ChromosomeLengths {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    /// Chromosomes whose id matches anywhere; `None` keeps all
    pub chromosomes: Option<Regex>,
    pub size: RangeInclusive<usize>,
    pub length: RangeInclusive<u64>,
    /// Rows need more than this many reads (ref + var); 0 disables
    pub coverage: u64,
    /// Rows need `base_geno` equal to the call
    pub matched: bool,
    /// Enables `blk_loc` when the table has a chromosome number column
    pub chromosome_lengths: Option<ChromosomeLengths>,
}

/// One surviving block after row-level filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub chrom_id: String,
    pub blk_id: u32,
    pub blk_size: usize,
    pub blk_len: u64,
    pub start_position: u64,
    pub end_position: u64,
    /// Mean of position / chromosome length over the block's rows
    pub blk_loc: Option<f64>,
}

/// Rows and summaries of the blocks that passed every criterion
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub blocks: Vec<BlockSummary>,
}

struct ResolvedColumns {
    chromosome: usize,
    position: usize,
    block_id: usize,
    coverage: Option<(usize, usize)>,
    matched: Option<(usize, usize)>,
    location: Option<usize>,
}

struct BlockRows {
    chrom_id: String,
    blk_id: u32,
    rows: Vec<usize>,
}

fn field<'a>(row: &'a [String], index: usize, row_num: usize, name: &str) -> Result<&'a str> {
    row.get(index)
        .map(|s| s.trim())
        .ok_or_else(|| XoError::InputFormat {
            context: format!("record {}", row_num + 1),
            reason: format!("missing '{}' field", name),
        })
}

fn parse_field<T: std::str::FromStr>(row: &[String], index: usize, row_num: usize, name: &str) -> Result<T> {
    let value = field(row, index, row_num, name)?;
    value.parse::<T>().map_err(|_| XoError::InputFormat {
        context: format!("record {}", row_num + 1),
        reason: format!("invalid {} '{}'", name, value),
    })
}

/// Narrow a labeled table down to the blocks a reviewer wants to see.
/// Row filters (coverage, genome match) run first; size and length are then
/// measured on the rows that remain.
pub fn select_blocks(
    table: &RawTable,
    columns: &SelectionColumns,
    criteria: &SelectionCriteria,
) -> Result<Selection> {
    let header = &table.header;
    let resolved = ResolvedColumns {
        chromosome: find_column(header, &columns.chromosome)?,
        position: find_column(header, &columns.position)?,
        block_id: find_column(header, &columns.block_id)?,
        coverage: if criteria.coverage > 0 {
            Some((
                find_column(header, &columns.ref_reads)?,
                find_column(header, &columns.var_reads)?,
            ))
        } else {
            None
        },
        matched: if criteria.matched {
            Some((
                find_column(header, &columns.base_geno)?,
                find_column(header, &columns.call)?,
            ))
        } else {
            None
        },
        location: criteria
            .chromosome_lengths
            .as_ref()
            .and_then(|_| header.iter().position(|h| h == &columns.chromosome_number)),
    };

    // Group by (chromosome, block id) in first-appearance order
    let mut groups: Vec<BlockRows> = Vec::new();
    let mut lookup: HashMap<(String, u32), usize> = HashMap::new();
    for (row_num, row) in table.rows.iter().enumerate() {
        let chrom_id = field(row, resolved.chromosome, row_num, &columns.chromosome)?.to_string();
        let blk_id: u32 = parse_field(row, resolved.block_id, row_num, &columns.block_id)?;

        let slot = *lookup.entry((chrom_id.clone(), blk_id)).or_insert_with(|| {
            groups.push(BlockRows {
                chrom_id,
                blk_id,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row_num);
    }
    let total_blocks = groups.len();

    let kept: Vec<Option<(BlockSummary, Vec<usize>)>> = groups
        .par_iter()
        .map(|group| select_group(table, group, &resolved, columns, criteria))
        .collect::<Result<_>>()?;

    let mut rows = Vec::new();
    let mut blocks = Vec::new();
    for (summary, row_nums) in kept.into_iter().flatten() {
        rows.extend(row_nums.into_iter().map(|i| table.rows[i].clone()));
        blocks.push(summary);
    }

    info!(
        "🔎 Selected {} of {} blocks ({} rows)",
        blocks.len(),
        total_blocks,
        rows.len()
    );

    Ok(Selection {
        header: header.clone(),
        rows,
        blocks,
    })
}

fn select_group(
    table: &RawTable,
    group: &BlockRows,
    resolved: &ResolvedColumns,
    columns: &SelectionColumns,
    criteria: &SelectionCriteria,
) -> Result<Option<(BlockSummary, Vec<usize>)>> {
    if let Some(pattern) = &criteria.chromosomes {
        if !pattern.is_match(&group.chrom_id) {
            return Ok(None);
        }
    }

    let mut kept = Vec::with_capacity(group.rows.len());
    let mut min_position = u64::MAX;
    let mut max_position = 0u64;
    let lengths = criteria.chromosome_lengths.as_ref();
    let mut location_sum = Some(0f64);

    for &row_num in &group.rows {
        let row = &table.rows[row_num];

        if let Some((ref_idx, var_idx)) = resolved.coverage {
            let ref_reads: u64 = parse_field(row, ref_idx, row_num, &columns.ref_reads)?;
            let var_reads: u64 = parse_field(row, var_idx, row_num, &columns.var_reads)?;
            if ref_reads + var_reads <= criteria.coverage {
                continue;
            }
        }

        if let Some((geno_idx, call_idx)) = resolved.matched {
            let base_geno = row.get(geno_idx).map(|s| s.trim()).unwrap_or("");
            let call = row.get(call_idx).map(|s| s.trim()).unwrap_or("");
            if base_geno != call {
                continue;
            }
        }

        let position: u64 = parse_field(row, resolved.position, row_num, &columns.position)?;
        min_position = min_position.min(position);
        max_position = max_position.max(position);

        // One row of unknown length leaves the block without a location
        location_sum = match (location_sum, resolved.location, lengths) {
            (Some(sum), Some(index), Some(lengths)) => row
                .get(index)
                .and_then(|number| lengths.get(number))
                .map(|length| sum + position as f64 / length as f64),
            _ => None,
        };
        kept.push(row_num);
    }

    if kept.is_empty() {
        return Ok(None);
    }

    let size = kept.len();
    let length = max_position - min_position;
    if !criteria.size.contains(&size) || !criteria.length.contains(&length) {
        return Ok(None);
    }

    Ok(Some((
        BlockSummary {
            chrom_id: group.chrom_id.clone(),
            blk_id: group.blk_id,
            blk_size: size,
            blk_len: length,
            start_position: min_position,
            end_position: max_position,
            blk_loc: location_sum.map(|sum| sum / size as f64),
        },
        kept,
    )))
}
