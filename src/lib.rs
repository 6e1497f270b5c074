// lib.rs - xoblocks library root

//! # xoblocks - Crossover and non-crossover block detection
//!
//! Turns ordered per-SNP parent-of-origin calls into labeled recombination
//! blocks. Each chromosome is reduced to a cumulative signal (+1 for parent A,
//! -1 for parent B, 0 for a no-call); local peaks and valleys of that signal
//! cut the chromosome into candidate blocks, which are size-filtered and
//! numbered per chromosome.
//!
//! ## Features
//!
//! - **Parallel**: chromosomes are independent and run on the rayon pool
//! - **Nested events**: extrema are local, so short non-crossover blips inside
//!   a long crossover run are found on their own
//! - **Formats**: CSV/TSV (optionally gzip) and LZ4 snapshots
//! - **Selection**: secondary filtering of labeled blocks by chromosome,
//!   size, length, read coverage and genome match
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use xoblocks::prelude::*;
//! use std::path::Path;
//!
//! let table = load_snp_table(
//!     Path::new("BSP_TIGER.marker_dataframe.csv"),
//!     &ColumnLayout::default(),
//!     &CallCoding::default(),
//! )?;
//! let config = PipelineConfig::new(1000, NoCallPolicy::Hold)?;
//! let output = run_pipeline(&table, &config, &indicatif::ProgressBar::hidden());
//! write_labeled_table(Path::new("peaks.csv"), &table.header, &output, "xoblocks")?;
//! # Ok::<(), xoblocks::XoError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;
pub mod selection;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Task, ValidationResult};
    pub use crate::core::{
        extract_blocks, find_extrema, process_chromosome, run_pipeline, Block, BlockFilter,
        LabeledBlock, LabeledRecord, NoCallPolicy, PipelineConfig, PipelineOutput, Signal,
    };
    pub use crate::data::{
        load_raw_table, load_snp_table, CallCoding, Chromosome, ColumnLayout, ParentCall,
        RawTable, SnpRecord, SnpTable,
    };
    pub use crate::error::{Result, XoError};
    pub use crate::output::{write_labeled_table, write_report};
    pub use crate::selection::{select_blocks, SelectionColumns, SelectionCriteria};
}

// Re-export main types at the root level for convenience
pub use crate::core::{Block, LabeledBlock, PipelineConfig, PipelineOutput};
pub use crate::data::{SnpRecord, SnpTable};
pub use crate::error::{Result, XoError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "xoblocks v{} - Crossover and non-crossover block detection",
        VERSION
    )
}
