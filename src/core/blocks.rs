// blocks.rs - Candidate blocks between consecutive boundary points

use crate::core::extrema::{Extremum, ExtremumKind};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// What bounds a block on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    ChromosomeStart,
    Peak,
    Valley,
    ChromosomeEnd,
}

impl From<ExtremumKind> for Boundary {
    fn from(kind: ExtremumKind) -> Self {
        match kind {
            ExtremumKind::Peak => Boundary::Peak,
            ExtremumKind::Valley => Boundary::Valley,
        }
    }
}

/// Contiguous span of SNPs, inclusive on both ends. Adjacent blocks share
/// their boundary SNP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub chrom_id: String,
    pub start: usize,
    pub end: usize,
    pub start_position: u64,
    pub end_position: u64,
    pub opens_at: Boundary,
    pub closes_at: Boundary,
}

impl Block {
    /// Number of member SNPs
    pub fn size(&self) -> usize {
        self.end - self.start + 1
    }

    /// Distance in bp between the first and last member
    pub fn length(&self) -> u64 {
        self.end_position.saturating_sub(self.start_position)
    }

    pub fn span(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Partition a chromosome into candidate blocks using its first and last
/// record as synthetic boundaries plus every extremum. No extrema means no
/// detected switch, which yields no blocks rather than one whole-chromosome block.
pub fn extract_blocks(chrom_id: &str, positions: &[u64], extrema: &[Extremum]) -> Vec<Block> {
    if extrema.is_empty() || positions.len() < 2 {
        return Vec::new();
    }
    let last = positions.len() - 1;

    let mut boundaries: Vec<(usize, Boundary)> = Vec::with_capacity(extrema.len() + 2);
    boundaries.push((0, Boundary::ChromosomeStart));
    boundaries.extend(
        extrema
            .iter()
            .filter(|e| e.index > 0 && e.index < last)
            .map(|e| (e.index, Boundary::from(e.kind))),
    );
    boundaries.push((last, Boundary::ChromosomeEnd));
    boundaries.sort_by_key(|(index, _)| *index);

    boundaries
        .windows(2)
        .map(|pair| {
            let (start, opens_at) = pair[0];
            let (end, closes_at) = pair[1];
            Block {
                chrom_id: chrom_id.to_string(),
                start,
                end,
                start_position: positions[start],
                end_position: positions[end],
                opens_at,
                closes_at,
            }
        })
        .collect()
}
