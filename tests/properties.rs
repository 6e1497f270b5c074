mod common;

use common::{calls, chromosome_from_calls, CHROM};
use proptest::prelude::*;
use xoblocks::core::{
    extract_blocks, find_extrema, process_chromosome, BlockFilter, ExtremumKind, NoCallPolicy,
    PipelineConfig, Signal, FIRST_BLOCK_ID,
};
use xoblocks::data::ParentCall;

fn any_call() -> impl Strategy<Value = ParentCall> {
    prop_oneof![
        Just(ParentCall::ParentA),
        Just(ParentCall::ParentB),
        Just(ParentCall::NoCall),
    ]
}

fn positions(n: usize) -> Vec<u64> {
    (0..n as u64).map(|i| 1000 + 10 * i).collect()
}

proptest! {
    #[test]
    fn signal_has_one_bounded_step_per_record(
        calls in proptest::collection::vec(any_call(), 2..200),
    ) {
        let signal = Signal::build(CHROM, calls.iter().copied()).expect("signal builds");
        prop_assert_eq!(signal.len(), calls.len());

        let values = signal.values();
        prop_assert_eq!(values[0], calls[0].step());
        for i in 1..values.len() {
            let step = values[i] - values[i - 1];
            prop_assert!((-1..=1).contains(&step), "step {} at {}", step, i);
        }
    }

    #[test]
    fn pipeline_is_deterministic(
        calls in proptest::collection::vec(any_call(), 2..150),
        max_snps in 1i64..40,
    ) {
        let chrom = chromosome_from_calls(CHROM, &calls);
        let config = PipelineConfig::new(max_snps, NoCallPolicy::Hold).unwrap();

        let first = process_chromosome(&chrom, &config).expect("valid chromosome");
        let second = process_chromosome(&chrom, &config).expect("valid chromosome");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn monotonic_signal_has_no_blocks(
        steps in proptest::collection::vec(prop_oneof![Just(ParentCall::ParentA), Just(ParentCall::NoCall)], 2..120),
        falling in any::<bool>(),
    ) {
        let calls: Vec<ParentCall> = steps
            .into_iter()
            .map(|c| if falling && c == ParentCall::ParentA { ParentCall::ParentB } else { c })
            .collect();
        let signal = Signal::build(CHROM, calls.iter().copied()).unwrap();

        let extrema = find_extrema(signal.values());
        prop_assert!(extrema.is_empty(), "extrema on monotonic signal: {:?}", extrema);
        prop_assert!(extract_blocks(CHROM, &positions(calls.len()), &extrema).is_empty());
    }

    #[test]
    fn single_crossover_splits_in_two(rise in 2usize..60, fall in 1usize..60) {
        let mut calls = vec![ParentCall::ParentA; rise];
        calls.extend(vec![ParentCall::ParentB; fall]);
        let n = calls.len();
        let signal = Signal::build(CHROM, calls).unwrap();

        let extrema = find_extrema(signal.values());
        prop_assert_eq!(extrema.len(), 1);
        prop_assert_eq!(extrema[0].index, rise - 1);
        prop_assert_eq!(extrema[0].kind, ExtremumKind::Peak);

        let blocks = extract_blocks(CHROM, &positions(n), &extrema);
        let spans: Vec<(usize, usize)> = blocks.iter().map(|b| (b.start, b.end)).collect();
        prop_assert_eq!(spans, vec![(0, rise - 1), (rise - 1, n - 1)]);
    }

    #[test]
    fn filter_is_monotone_in_limit_and_idempotent(
        calls in proptest::collection::vec(any_call(), 3..150),
        limit in 1i64..30,
        extra in 0i64..30,
    ) {
        let signal = Signal::build(CHROM, calls.iter().copied()).unwrap();
        let extrema = find_extrema(signal.values());
        let candidates = extract_blocks(CHROM, &positions(calls.len()), &extrema);

        let tight = BlockFilter::new(limit).unwrap();
        let loose = BlockFilter::new(limit + extra).unwrap();
        for block in &candidates {
            if tight.retains(block) {
                prop_assert!(loose.retains(block));
            }
        }

        let once = tight.apply(candidates.clone());
        let twice = tight.apply(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn block_ids_follow_start_order_without_gaps(
        calls in proptest::collection::vec(any_call(), 2..150),
        max_snps in 1i64..60,
    ) {
        let chrom = chromosome_from_calls(CHROM, &calls);
        let config = PipelineConfig::new(max_snps, NoCallPolicy::Hold).unwrap();
        let result = process_chromosome(&chrom, &config).unwrap();

        for (offset, block) in result.blocks.iter().enumerate() {
            prop_assert_eq!(block.id, FIRST_BLOCK_ID + offset as u32);
            prop_assert!(block.size() <= max_snps as usize);
        }
        for pair in result.blocks.windows(2) {
            prop_assert!(pair[0].block.start < pair[1].block.start);
        }
    }
}

#[test]
fn nested_blip_survives_alone() {
    // Signal [0,1,2,3,2,3,4,5]: peak at 3, valley at 4
    let chrom = chromosome_from_calls(CHROM, &calls("NAAABAAA"));
    let signal = Signal::build(CHROM, chrom.records.iter().map(|r| r.call)).unwrap();
    assert_eq!(signal.values(), &[0, 1, 2, 3, 2, 3, 4, 5]);

    let config = PipelineConfig::new(3, NoCallPolicy::Hold).unwrap();
    let result = process_chromosome(&chrom, &config).unwrap();

    assert_eq!(result.candidates, 3);
    let spans: Vec<(usize, usize)> = result.blocks.iter().map(|b| (b.block.start, b.block.end)).collect();
    assert_eq!(spans, vec![(3, 4)]);
    assert_eq!(result.blocks[0].id, FIRST_BLOCK_ID);
}

#[test]
fn lone_opposite_call_limits() {
    // Signal [1,2,3,2,3,4,5]: peak at 2, valley at 3
    let chrom = chromosome_from_calls(CHROM, &calls("AAABAAA"));

    let tight = PipelineConfig::new(3, NoCallPolicy::Hold).unwrap();
    let result = process_chromosome(&chrom, &tight).unwrap();
    let spans: Vec<(usize, usize)> = result.blocks.iter().map(|b| (b.block.start, b.block.end)).collect();
    assert_eq!(spans, vec![(0, 2), (2, 3)]);

    let loose = PipelineConfig::new(10, NoCallPolicy::Hold).unwrap();
    let result = process_chromosome(&chrom, &loose).unwrap();
    let ids: Vec<u32> = result.blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(result.blocks[2].block.span(), 3..=6);
}

#[test]
fn dropping_no_calls_shortens_signal() {
    let chrom = chromosome_from_calls(CHROM, &calls("AANNBB"));

    let held = process_chromosome(&chrom, &PipelineConfig::new(100, NoCallPolicy::Hold).unwrap()).unwrap();
    assert_eq!(held.snps, 6);

    let dropped = process_chromosome(&chrom, &PipelineConfig::new(100, NoCallPolicy::Drop).unwrap()).unwrap();
    assert_eq!(dropped.snps, 4);
    assert_eq!(dropped.blocks.len(), 2);
    assert!(dropped
        .records
        .iter()
        .all(|r| r.record.call != ParentCall::NoCall));
}
