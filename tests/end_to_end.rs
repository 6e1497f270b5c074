mod common;

use common::snp_csv;
use indicatif::ProgressBar;
use std::fs;
use xoblocks::core::{ChromosomeStatus, NoCallPolicy, PipelineConfig};
use xoblocks::data::{load_raw_table, load_snp_table, CallCoding, ColumnLayout};
use xoblocks::output::{write_block_summary, write_labeled_table, write_report, write_selection};
use xoblocks::selection::{select_blocks, SelectionColumns, SelectionCriteria};
use xoblocks::XoError;

#[test]
fn peaks_then_filter_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let snps = dir.path().join("snps.csv");
    let mut text = snp_csv(&[
        ("BSP-1_chr1", "AAABAAA"),
        ("BSP-1_chr2", "AAAAAA"),
        ("CTL-1_chr1", "BBBAAA"),
    ]);
    // Single record: skipped, the rest carry on
    text.push_str("lonely,BSP-1_chr3,100,N2,N2,3,4\n");
    fs::write(&snps, text).unwrap();

    let table = load_snp_table(&snps, &ColumnLayout::default(), &CallCoding::default()).unwrap();
    assert_eq!(table.chromosomes.len(), 4);

    let config = PipelineConfig::new(10, NoCallPolicy::Hold).unwrap();
    let output = xoblocks::core::run_pipeline(&table, &config, &ProgressBar::hidden());

    let statuses: Vec<(&str, ChromosomeStatus)> = output
        .report
        .chromosomes
        .iter()
        .map(|c| (c.chrom_id.as_str(), c.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("BSP-1_chr1", ChromosomeStatus::Labeled),
            ("BSP-1_chr2", ChromosomeStatus::NoBlocks),
            ("CTL-1_chr1", ChromosomeStatus::Labeled),
            ("BSP-1_chr3", ChromosomeStatus::Skipped),
        ]
    );
    assert_eq!(output.report.total_blocks(), 5);

    let peaks = dir.path().join("out").join("peaks.csv");
    write_labeled_table(&peaks, &table.header, &output, "xoblocks peaks").unwrap();
    let report = dir.path().join("report.json");
    write_report(&report, &output.report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["chromosomes"][3]["status"], "skipped");

    let labeled = load_raw_table(&peaks).unwrap();
    assert_eq!(&labeled.header[labeled.header.len() - 3..], &["blk_id", "blk_size", "blk_len"]);
    // chr1 blocks (0,2) (2,3) (3,6) share boundaries: 3 + 2 + 4 rows; CTL: (0,2) (2,5): 3 + 4
    assert_eq!(labeled.len(), 16);
    assert_eq!(labeled.rows[0][0], "BSP-1_chr1_0");
    assert_eq!(&labeled.rows[0][7..], &["1", "3", "200"]);

    let criteria = SelectionCriteria {
        chromosomes: Some(regex::Regex::new("BSP.*").unwrap()),
        size: 0..=3,
        length: 0..=10_000,
        coverage: 0,
        matched: true,
        chromosome_lengths: Some(xoblocks::selection::ChromosomeLengths::c_elegans()),
    };
    let selection = select_blocks(&labeled, &SelectionColumns::default(), &criteria).unwrap();
    let kept: Vec<(String, u32, usize)> = selection
        .blocks
        .iter()
        .map(|b| (b.chrom_id.clone(), b.blk_id, b.blk_size))
        .collect();
    assert_eq!(
        kept,
        vec![("BSP-1_chr1".to_string(), 1, 3), ("BSP-1_chr1".to_string(), 2, 2)]
    );

    let filtered = dir.path().join("filtered.tsv");
    write_selection(&filtered, &selection, "xoblocks filter").unwrap();
    assert_eq!(load_raw_table(&filtered).unwrap().len(), 5);

    let summary = dir.path().join("blocks.csv");
    write_block_summary(&summary, &selection.blocks, "xoblocks filter").unwrap();
    let summary = load_raw_table(&summary).unwrap();
    // No chromosome number column, so no relative location
    assert_eq!(summary.rows[1], vec!["BSP-1_chr1", "2", "2", "100", "300", "400", ""]);
}

#[test]
fn missing_call_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let snps = dir.path().join("snps.tsv");
    fs::write(&snps, "SNP\tchrom_id\tposition\ns1\tchr1\t1\n").unwrap();

    let err = load_snp_table(&snps, &ColumnLayout::default(), &CallCoding::default()).unwrap_err();
    assert!(matches!(err, XoError::MissingColumn { ref column } if column == "hmm_state1"));
}

#[test]
fn snapshot_input_matches_csv_input() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("snps.csv");
    fs::write(&csv_path, snp_csv(&[("BSP-2_chr1", "AABBBAA")])).unwrap();

    let raw = load_raw_table(&csv_path).unwrap();
    let lz4_path = dir.path().join("snps.lz4");
    xoblocks::output::write_raw_table(&lz4_path, &raw.head(100), "xoblocks sample").unwrap();

    let layout = ColumnLayout::default();
    let coding = CallCoding::default();
    let from_csv = load_snp_table(&csv_path, &layout, &coding).unwrap();
    let from_lz4 = load_snp_table(&lz4_path, &layout, &coding).unwrap();
    assert_eq!(from_csv.chromosomes, from_lz4.chromosomes);
}

#[test]
fn malformed_rows_cost_only_their_chromosome() {
    let dir = tempfile::tempdir().unwrap();
    let snps = dir.path().join("snps.csv");
    let text = "SNP,chrom_id,position,hmm_state1\n\
                s1,c1,1,CB4856\n\
                s2,c1,2,CB4856\n\
                s3,c1,3,N2\n\
                s4,c1,4\n\
                x1,,1,N2\n\
                t1,c2,1,CB4856\n\
                t2,c2,2,CB4856\n\
                t3,c2,3,N2\n\
                t4,c2,4,N2\n";
    fs::write(&snps, text).unwrap();

    let table = load_snp_table(&snps, &ColumnLayout::default(), &CallCoding::default()).unwrap();
    assert_eq!(table.dropped_rows, 1);

    let config = PipelineConfig::new(10, NoCallPolicy::Hold).unwrap();
    let output = xoblocks::core::run_pipeline(&table, &config, &ProgressBar::hidden());
    let statuses: Vec<(&str, ChromosomeStatus)> = output
        .report
        .chromosomes
        .iter()
        .map(|c| (c.chrom_id.as_str(), c.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("c1", ChromosomeStatus::Skipped),
            ("c2", ChromosomeStatus::Labeled),
        ]
    );
    assert!(output.report.chromosomes[0]
        .reason
        .as_deref()
        .unwrap()
        .contains("missing 'hmm_state1' field"));
}
