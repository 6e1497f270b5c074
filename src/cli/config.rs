// config.rs - Configuration file support

use crate::error::{Result, XoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Environment variables read once at startup as the lowest-priority config layer
pub const ENV_SNPS: &str = "XO_SNPS";
pub const ENV_PEAKS: &str = "XO_PEAKS";
pub const ENV_BLOCKS: &str = "XO_BLOCKS";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub snps: Option<String>,
    pub peaks: Option<String>,
    pub filtered: Option<String>,
    pub summary: Option<String>,
    pub report: Option<String>,
    pub sample: Option<String>,

    // Performance and logging
    pub threads: Option<usize>,
    pub log: Option<String>,

    // Block detection
    pub max_snps: Option<i64>,
    pub no_call: Option<String>,
    pub parent_a: Option<String>,
    pub parent_b: Option<String>,

    // Columns
    pub id_column: Option<String>,
    pub chrom_column: Option<String>,
    pub position_column: Option<String>,
    pub call_column: Option<String>,

    // Block selection
    pub chromosomes: Option<String>,
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub coverage: Option<u64>,
    pub matched: Option<bool>,

    // Sampling
    pub sample_size: Option<usize>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| XoError::io(path, e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| XoError::config(format!("Failed to parse config file '{}': {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| XoError::config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| XoError::io(path, e))?;

        info!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Defaults taken from `XO_SNPS`, `XO_PEAKS` and `XO_BLOCKS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            snps: non_empty(ENV_SNPS),
            peaks: non_empty(ENV_PEAKS),
            filtered: non_empty(ENV_BLOCKS),
            ..Self::default()
        }
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# xoblocks.toml - Configuration file for xoblocks
# Command line arguments override these settings, and these settings
# override the XO_SNPS, XO_PEAKS and XO_BLOCKS environment variables

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# SNP table (.csv, .tsv, optionally .gz, or .lz4 snapshot)
snps = "BSP_TIGER.marker_dataframe.csv"

# Labeled table written by `peaks` and read by `filter`
peaks = "peaks.csv"

# Rows of the blocks selected by `filter`
filtered = "filtered.csv"

# One line per selected block
# summary = "blocks.csv"

# JSON run report of `peaks`
# report = "report.json"

# Output of `sample`
sample = "sample.lz4"

# =============================================================================
# PERFORMANCE AND LOGGING
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 16

# Log level: quiet, info, debug
log = "info"

# =============================================================================
# BLOCK DETECTION
# =============================================================================

# Largest block kept, in SNPs
max_snps = 1000

# No-call handling: hold (signal unchanged) or drop (records removed)
no_call = "hold"

# Call labels: parent A counts +1, parent B counts -1, anything else is a no-call
parent_a = "CB4856"
parent_b = "N2"

# =============================================================================
# COLUMNS
# =============================================================================

id_column = "SNP"
chrom_column = "chrom_id"
position_column = "position"
call_column = "hmm_state1"

# =============================================================================
# BLOCK SELECTION
# =============================================================================

# Chromosome id regex
chromosomes = "BSP.*"

# Block size range in SNPs, inclusive
min_size = 0
max_size = 100

# Block length range in bp, inclusive
min_length = 0
max_length = 10000

# Drop SNPs with ref_reads + var_reads at or below this (0 = off)
coverage = 0

# Keep only SNPs whose base_geno matches the call
matched = false

# =============================================================================
# SAMPLING
# =============================================================================

sample_size = 100000
"#
        .to_string()
    }
}
