// filter.rs - Size filter over candidate blocks

use crate::core::blocks::Block;
use crate::error::{Result, XoError};

/// Keeps candidate blocks with at most `max_snps` members.
///
/// Every candidate is judged on its own size, nested or not: a limit between
/// the size of a short blip and the size of the block enclosing it drops the
/// enclosing block only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFilter {
    max_snps: usize,
}

impl BlockFilter {
    /// The limit arrives as a signed value from CLI and config so that zero and
    /// negative settings are reported as configuration errors.
    pub fn new(max_snps: i64) -> Result<Self> {
        if max_snps <= 0 {
            return Err(XoError::config(format!(
                "max_snps must be a positive integer (got {})",
                max_snps
            )));
        }
        Ok(Self {
            max_snps: max_snps as usize,
        })
    }

    pub fn max_snps(&self) -> usize {
        self.max_snps
    }

    pub fn retains(&self, block: &Block) -> bool {
        block.size() <= self.max_snps
    }

    pub fn apply(&self, candidates: Vec<Block>) -> Vec<Block> {
        candidates.into_iter().filter(|b| self.retains(b)).collect()
    }
}
