// pipeline.rs - Per-chromosome block detection and the parallel fan-out

use crate::core::blocks::extract_blocks;
use crate::core::extrema::{find_extrema, Extremum};
use crate::core::filter::BlockFilter;
use crate::core::labeler::{attach_labels, label_blocks, LabeledBlock, LabeledRecord};
use crate::core::signal::{NoCallPolicy, Signal};
use crate::data::snp::{Chromosome, SnpRecord, SnpTable};
use crate::error::Result;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Settings shared by every chromosome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub filter: BlockFilter,
    pub no_call: NoCallPolicy,
}

impl PipelineConfig {
    pub fn new(max_snps: i64, no_call: NoCallPolicy) -> Result<Self> {
        Ok(Self {
            filter: BlockFilter::new(max_snps)?,
            no_call,
        })
    }
}

/// Result of running one chromosome through all stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeBlocks {
    pub chrom_id: String,
    /// Records that entered the signal
    pub snps: usize,
    pub extrema: Vec<Extremum>,
    pub candidates: usize,
    pub blocks: Vec<LabeledBlock>,
    pub records: Vec<LabeledRecord>,
}

impl ChromosomeBlocks {
    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }
}

/// Signal, extrema, candidate blocks, size filter and labels for one chromosome.
/// Pure: touches nothing but its arguments.
pub fn process_chromosome(chrom: &Chromosome, config: &PipelineConfig) -> Result<ChromosomeBlocks> {
    chrom.validate()?;

    let retained: Vec<&SnpRecord> = match config.no_call {
        NoCallPolicy::Hold => chrom.records.iter().collect(),
        NoCallPolicy::Drop => chrom.records.iter().filter(|r| r.call.is_resolved()).collect(),
    };

    let signal = Signal::build(&chrom.id, retained.iter().map(|r| r.call))?;
    let extrema = find_extrema(signal.values());

    let positions: Vec<u64> = retained.iter().map(|r| r.position).collect();
    let candidates = extract_blocks(&chrom.id, &positions, &extrema);
    let candidate_count = candidates.len();

    let blocks = label_blocks(config.filter.apply(candidates));
    let records = attach_labels(&retained, &blocks);

    debug!(
        "{}: {} extrema, {} candidates, {} kept",
        chrom.id,
        extrema.len(),
        candidate_count,
        blocks.len()
    );

    Ok(ChromosomeBlocks {
        chrom_id: chrom.id.clone(),
        snps: retained.len(),
        extrema,
        candidates: candidate_count,
        blocks,
        records,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromosomeStatus {
    /// At least one block survived
    Labeled,
    /// Valid input, nothing survived: no switch found or every candidate too large
    NoBlocks,
    /// Input-format error, chromosome left out of the output
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChromosomeReport {
    pub chrom_id: String,
    pub status: ChromosomeStatus,
    pub snps: usize,
    pub extrema: usize,
    pub candidates: usize,
    pub blocks: usize,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ChromosomeReport {
    fn from_blocks(result: &ChromosomeBlocks) -> Self {
        Self {
            chrom_id: result.chrom_id.clone(),
            status: if result.has_blocks() {
                ChromosomeStatus::Labeled
            } else {
                ChromosomeStatus::NoBlocks
            },
            snps: result.snps,
            extrema: result.extrema.len(),
            candidates: result.candidates,
            blocks: result.blocks.len(),
            records: result.records.len(),
            reason: None,
        }
    }

    fn skipped(chrom: &Chromosome, reason: String) -> Self {
        Self {
            chrom_id: chrom.id.clone(),
            status: ChromosomeStatus::Skipped,
            snps: chrom.len(),
            extrema: 0,
            candidates: 0,
            blocks: 0,
            records: 0,
            reason: Some(reason),
        }
    }
}

/// Summary of one run, serialized as the `--report` file
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub tool_version: String,
    pub generated: String,
    pub max_snps: usize,
    pub no_call: NoCallPolicy,
    pub chromosomes: Vec<ChromosomeReport>,
}

impl PipelineReport {
    pub fn count(&self, status: ChromosomeStatus) -> usize {
        self.chromosomes.iter().filter(|c| c.status == status).count()
    }

    pub fn total_blocks(&self) -> usize {
        self.chromosomes.iter().map(|c| c.blocks).sum()
    }

    pub fn total_records(&self) -> usize {
        self.chromosomes.iter().map(|c| c.records).sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ChromosomeReport> {
        self.chromosomes
            .iter()
            .filter(|c| c.status == ChromosomeStatus::Skipped)
    }
}

/// Output of a whole run: results of every chromosome that ran, plus the report
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub results: Vec<ChromosomeBlocks>,
    pub report: PipelineReport,
}

impl PipelineOutput {
    pub fn records(&self) -> impl Iterator<Item = &LabeledRecord> {
        self.results.iter().flat_map(|r| r.records.iter())
    }
}

/// Run every chromosome independently and in parallel. A chromosome with an
/// input-format error is skipped with a warning; the others carry on.
pub fn run_pipeline(table: &SnpTable, config: &PipelineConfig, progress: &ProgressBar) -> PipelineOutput {
    let start = Instant::now();
    info!(
        "🔍 Detecting blocks in {} chromosomes (max {} SNPs per block, no-calls: {})",
        table.chromosomes.len(),
        config.filter.max_snps(),
        config.no_call.as_str()
    );

    let outcomes: Vec<(ChromosomeReport, Option<ChromosomeBlocks>)> = table
        .chromosomes
        .par_iter()
        .map(|chrom| {
            let outcome = match process_chromosome(chrom, config) {
                Ok(result) => {
                    if result.has_blocks() {
                        info!(
                            "{}: {} SNPs, {} blocks, {} in blocks",
                            result.chrom_id,
                            result.snps,
                            result.blocks.len(),
                            result.records.len()
                        );
                    } else {
                        info!(
                            "{}: no blocks ({} candidates, {} SNPs)",
                            result.chrom_id, result.candidates, result.snps
                        );
                    }
                    (ChromosomeReport::from_blocks(&result), Some(result))
                }
                Err(e) => {
                    warn!("⚠️  Skipping {}: {}", chrom.id, e);
                    (ChromosomeReport::skipped(chrom, e.to_string()), None)
                }
            };
            progress.inc(1);
            outcome
        })
        .collect();

    let mut chromosomes = Vec::with_capacity(outcomes.len());
    let mut results = Vec::with_capacity(outcomes.len());
    for (report, result) in outcomes {
        chromosomes.push(report);
        results.extend(result);
    }

    let report = PipelineReport {
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        generated: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        max_snps: config.filter.max_snps(),
        no_call: config.no_call,
        chromosomes,
    };

    info!(
        "✅ Block detection finished in {:.2}s: {} blocks, {} records",
        start.elapsed().as_secs_f64(),
        report.total_blocks(),
        report.total_records()
    );

    PipelineOutput { results, report }
}
