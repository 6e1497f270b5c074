#![allow(dead_code)]

use xoblocks::data::{Chromosome, ParentCall, SnpRecord};

pub const CHROM: &str = "BSP-OR-001_chr1";

/// Chromosome with one record per call, 100 bp apart
pub fn chromosome_from_calls(chrom_id: &str, calls: &[ParentCall]) -> Chromosome {
    let records = calls
        .iter()
        .enumerate()
        .map(|(i, &call)| {
            let position = 100 * (i as u64 + 1);
            SnpRecord {
                id: format!("{}_{}", chrom_id, i),
                chrom_id: chrom_id.to_string(),
                position,
                call,
                fields: vec![
                    format!("{}_{}", chrom_id, i),
                    chrom_id.to_string(),
                    position.to_string(),
                    label(call).to_string(),
                ],
            }
        })
        .collect();
    Chromosome::from_records(chrom_id, records)
}

pub fn label(call: ParentCall) -> &'static str {
    match call {
        ParentCall::ParentA => "CB4856",
        ParentCall::ParentB => "N2",
        ParentCall::NoCall => "NA",
    }
}

/// Parse `A`, `B` and `N` into calls
pub fn calls(pattern: &str) -> Vec<ParentCall> {
    pattern
        .chars()
        .map(|c| match c {
            'A' => ParentCall::ParentA,
            'B' => ParentCall::ParentB,
            _ => ParentCall::NoCall,
        })
        .collect()
}

/// CSV text for a table of chromosomes given as call patterns
pub fn snp_csv(chromosomes: &[(&str, &str)]) -> String {
    let mut text = String::from("SNP,chrom_id,position,hmm_state1,base_geno,ref_reads,var_reads\n");
    for (chrom_id, pattern) in chromosomes {
        for (i, call) in calls(pattern).into_iter().enumerate() {
            text.push_str(&format!(
                "{}_{},{},{},{},{},3,4\n",
                chrom_id,
                i,
                chrom_id,
                100 * (i + 1),
                label(call),
                label(call)
            ));
        }
    }
    text
}
