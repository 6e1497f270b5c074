// mod.rs - Data structures module

pub mod loaders;
pub mod snp;

// Re-export main types for convenience
pub use loaders::{load_raw_table, load_snp_table, TableFormat};
pub use snp::{CallCoding, Chromosome, ColumnLayout, ParentCall, RawTable, SnpRecord, SnpTable};
