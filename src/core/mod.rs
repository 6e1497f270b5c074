// mod.rs - Block-detection core: signal -> extrema -> blocks -> filter -> labels

pub mod blocks;
pub mod extrema;
pub mod filter;
pub mod labeler;
pub mod pipeline;
pub mod signal;

// Re-export main types for convenience
pub use blocks::{extract_blocks, Block, Boundary};
pub use extrema::{find_extrema, Extremum, ExtremumKind};
pub use filter::BlockFilter;
pub use labeler::{attach_labels, label_blocks, LabeledBlock, LabeledRecord, FIRST_BLOCK_ID};
pub use pipeline::{
    process_chromosome, run_pipeline, ChromosomeBlocks, ChromosomeReport, ChromosomeStatus,
    PipelineConfig, PipelineOutput, PipelineReport,
};
pub use signal::{NoCallPolicy, Signal};
