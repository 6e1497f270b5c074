// labeler.rs - Block ids and per-SNP block tags

use crate::core::blocks::Block;
use crate::data::snp::SnpRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Id given to the first block of every chromosome; ids are scoped per
/// chromosome, so a block is keyed by (chrom_id, blk_id)
pub const FIRST_BLOCK_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledBlock {
    pub id: u32,
    #[serde(flatten)]
    pub block: Block,
}

impl LabeledBlock {
    pub fn size(&self) -> usize {
        self.block.size()
    }

    pub fn length(&self) -> u64 {
        self.block.length()
    }
}

/// Original record plus the block it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRecord {
    pub record: SnpRecord,
    pub blk_id: u32,
    pub blk_size: usize,
    pub blk_len: u64,
}

impl LabeledRecord {
    pub fn chrom_id(&self) -> &str {
        &self.record.chrom_id
    }
}

/// Number surviving blocks in ascending start order, without gaps
pub fn label_blocks(mut blocks: Vec<Block>) -> Vec<LabeledBlock> {
    blocks.sort_by_key(|b| (b.start, b.end));
    blocks
        .into_iter()
        .zip(FIRST_BLOCK_ID..)
        .map(|(block, id)| LabeledBlock { id, block })
        .collect()
}

/// Tag every member record of every labeled block. Records outside all blocks
/// are left out; a record on a shared boundary appears once per block.
/// Output order follows block order, so record order never goes backwards.
pub fn attach_labels<R>(records: &[R], blocks: &[LabeledBlock]) -> Vec<LabeledRecord>
where
    R: Borrow<SnpRecord>,
{
    blocks
        .iter()
        .flat_map(|labeled| {
            records[labeled.block.span()]
                .iter()
                .map(move |record| LabeledRecord {
                    record: record.borrow().clone(),
                    blk_id: labeled.id,
                    blk_size: labeled.size(),
                    blk_len: labeled.length(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blocks::Boundary;
    use crate::data::snp::ParentCall;

    fn block(start: usize, end: usize) -> Block {
        Block {
            chrom_id: "chr1".to_string(),
            start,
            end,
            start_position: start as u64 * 10,
            end_position: end as u64 * 10,
            opens_at: Boundary::ChromosomeStart,
            closes_at: Boundary::Peak,
        }
    }

    fn records(n: usize) -> Vec<SnpRecord> {
        (0..n)
            .map(|i| SnpRecord {
                id: format!("s{}", i),
                chrom_id: "chr1".to_string(),
                position: i as u64 * 10,
                call: ParentCall::ParentA,
                fields: vec![format!("s{}", i), "chr1".to_string()],
            })
            .collect()
    }

    #[test]
    fn test_ids_follow_start_order() {
        let labeled = label_blocks(vec![block(5, 8), block(0, 2), block(2, 5)]);
        let ids: Vec<_> = labeled.iter().map(|b| (b.id, b.block.start)).collect();
        assert_eq!(ids, vec![(1, 0), (2, 2), (3, 5)]);
    }

    #[test]
    fn test_attach_labels_keeps_fields_and_order() {
        let recs = records(6);
        let labeled = label_blocks(vec![block(1, 2), block(4, 5)]);
        let out = attach_labels(&recs, &labeled);

        let tags: Vec<_> = out.iter().map(|r| (r.record.id.as_str(), r.blk_id)).collect();
        assert_eq!(tags, vec![("s1", 1), ("s2", 1), ("s4", 2), ("s5", 2)]);
        assert_eq!(out[0].record.fields, recs[1].fields);
        assert_eq!(out[0].blk_size, 2);
        assert_eq!(out[0].blk_len, 10);
    }

    #[test]
    fn test_shared_boundary_in_both_blocks() {
        let recs = records(5);
        let refs: Vec<&SnpRecord> = recs.iter().collect();
        let out = attach_labels(&refs, &label_blocks(vec![block(0, 2), block(2, 4)]));
        let shared: Vec<_> = out.iter().filter(|r| r.record.id == "s2").map(|r| r.blk_id).collect();
        assert_eq!(shared, vec![1, 2]);
        assert_eq!(out.len(), 6);
    }
}
