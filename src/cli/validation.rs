// validation.rs - Turn merged arguments into typed settings

use crate::cli::args::{Args, Command, FilterArgs, PeaksArgs, SampleArgs};
use crate::core::pipeline::PipelineConfig;
use crate::core::signal::NoCallPolicy;
use crate::data::snp::{CallCoding, ColumnLayout};
use crate::error::{Result, XoError};
use crate::selection::{ChromosomeLengths, SelectionColumns, SelectionCriteria};
use regex::Regex;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SNPS: &str = "BSP_TIGER.marker_dataframe.csv";
pub const DEFAULT_PEAKS: &str = "peaks.csv";
pub const DEFAULT_FILTERED: &str = "filtered.csv";
pub const DEFAULT_SAMPLE: &str = "sample.lz4";
pub const DEFAULT_MAX_SNPS: i64 = 1000;
pub const DEFAULT_CHROMOSOMES: &str = "BSP.*";
pub const DEFAULT_SIZE_RANGE: (usize, usize) = (0, 100);
pub const DEFAULT_LENGTH_RANGE: (u64, u64) = (0, 10_000);
pub const DEFAULT_SAMPLE_SIZE: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Quiet,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// `EnvFilter` directive for this level
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = XoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(LogLevel::Quiet),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(XoError::config(format!(
                "Invalid log level '{}'. Use: quiet, info, debug",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PeaksSettings {
    pub snps: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub pipeline: PipelineConfig,
    pub layout: ColumnLayout,
    pub coding: CallCoding,
}

#[derive(Debug, Clone)]
pub struct FilterSettings {
    pub peaks: PathBuf,
    pub output: PathBuf,
    pub summary: Option<PathBuf>,
    pub columns: SelectionColumns,
    pub criteria: SelectionCriteria,
}

#[derive(Debug, Clone)]
pub struct SampleSettings {
    pub snps: PathBuf,
    pub output: PathBuf,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub enum Task {
    Peaks(PeaksSettings),
    Filter(FilterSettings),
    Sample(SampleSettings),
}

pub struct ValidationResult {
    pub log: LogLevel,
    pub threads: Option<usize>,
    pub task: Task,
}

/// Validate all command line arguments. Nothing is read from disk here.
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    let log = match &args.log {
        Some(level) => LogLevel::from_str(level)?,
        None => LogLevel::default(),
    };

    if args.threads == Some(0) {
        return Err(XoError::config("--threads must be at least 1"));
    }

    let task = match &args.command {
        Some(Command::Peaks(peaks)) => Task::Peaks(validate_peaks(peaks)?),
        Some(Command::Filter(filter)) => Task::Filter(validate_filter(filter)?),
        Some(Command::Sample(sample)) => Task::Sample(validate_sample(sample)?),
        None => {
            return Err(XoError::config(
                "No command given. Use one of: peaks, filter, sample (or --generate-config)",
            ))
        }
    };

    Ok(ValidationResult {
        log,
        threads: args.threads,
        task,
    })
}

fn path_or(value: &Option<String>, default: &str) -> PathBuf {
    PathBuf::from(value.as_deref().unwrap_or(default))
}

fn column(value: &Option<String>, default: &str, option: &str) -> Result<String> {
    let name = value.as_deref().unwrap_or(default).trim();
    if name.is_empty() {
        return Err(XoError::config(format!("--{} must not be empty", option)));
    }
    Ok(name.to_string())
}

pub fn validate_peaks(args: &PeaksArgs) -> Result<PeaksSettings> {
    let no_call = match &args.no_call {
        Some(policy) => NoCallPolicy::from_str(policy)?,
        None => NoCallPolicy::default(),
    };
    let pipeline = PipelineConfig::new(args.max_snps.unwrap_or(DEFAULT_MAX_SNPS), no_call)?;

    let defaults = CallCoding::default();
    let parent_a = args.parent_a.clone().unwrap_or(defaults.parent_a).trim().to_string();
    let parent_b = args.parent_b.clone().unwrap_or(defaults.parent_b).trim().to_string();
    if parent_a.is_empty() || parent_b.is_empty() {
        return Err(XoError::config("Parent labels must not be empty"));
    }
    if parent_a == parent_b {
        return Err(XoError::config(format!(
            "Parent labels must differ (both are '{}')",
            parent_a
        )));
    }

    let defaults = ColumnLayout::default();
    let layout = ColumnLayout {
        id: column(&args.id_column, &defaults.id, "id-column")?,
        chromosome: column(&args.chrom_column, &defaults.chromosome, "chrom-column")?,
        position: column(&args.position_column, &defaults.position, "position-column")?,
        call: column(&args.call_column, &defaults.call, "call-column")?,
    };

    Ok(PeaksSettings {
        snps: path_or(&args.snps, DEFAULT_SNPS),
        output: path_or(&args.output, DEFAULT_PEAKS),
        report: args.report.as_ref().map(PathBuf::from),
        pipeline,
        layout,
        coding: CallCoding::new(parent_a, parent_b),
    })
}

pub fn validate_filter(args: &FilterArgs) -> Result<FilterSettings> {
    let pattern = args.chromosomes.as_deref().unwrap_or(DEFAULT_CHROMOSOMES);
    let chromosomes = Regex::new(pattern)
        .map_err(|e| XoError::config(format!("Invalid chromosomes regex: {}", e)))?;

    let min_size = args.min_size.unwrap_or(DEFAULT_SIZE_RANGE.0);
    let max_size = args.max_size.unwrap_or(DEFAULT_SIZE_RANGE.1);
    if min_size > max_size {
        return Err(XoError::config(format!(
            "--min-size ({}) is larger than --max-size ({})",
            min_size, max_size
        )));
    }

    let min_length = args.min_length.unwrap_or(DEFAULT_LENGTH_RANGE.0);
    let max_length = args.max_length.unwrap_or(DEFAULT_LENGTH_RANGE.1);
    if min_length > max_length {
        return Err(XoError::config(format!(
            "--min-length ({}) is larger than --max-length ({})",
            min_length, max_length
        )));
    }

    let defaults = SelectionColumns::default();
    let columns = SelectionColumns {
        chromosome: column(&args.chrom_column, &defaults.chromosome, "chrom-column")?,
        position: column(&args.position_column, &defaults.position, "position-column")?,
        call: column(&args.call_column, &defaults.call, "call-column")?,
        ..defaults
    };

    Ok(FilterSettings {
        peaks: path_or(&args.peaks, DEFAULT_PEAKS),
        output: path_or(&args.output, DEFAULT_FILTERED),
        summary: args.summary.as_ref().map(PathBuf::from),
        columns,
        criteria: SelectionCriteria {
            chromosomes: Some(chromosomes),
            size: min_size..=max_size,
            length: min_length..=max_length,
            coverage: args.coverage.unwrap_or(0),
            matched: args.matched,
            chromosome_lengths: Some(ChromosomeLengths::c_elegans()),
        },
    })
}

pub fn validate_sample(args: &SampleArgs) -> Result<SampleSettings> {
    let size = args.size.unwrap_or(DEFAULT_SAMPLE_SIZE);
    if size == 0 {
        return Err(XoError::config("--size must be at least 1"));
    }
    Ok(SampleSettings {
        snps: path_or(&args.snps, DEFAULT_SNPS),
        output: path_or(&args.output, DEFAULT_SAMPLE),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peaks_defaults() {
        let settings = validate_peaks(&PeaksArgs::default()).unwrap();
        assert_eq!(settings.snps, PathBuf::from(DEFAULT_SNPS));
        assert_eq!(settings.output, PathBuf::from("peaks.csv"));
        assert_eq!(settings.pipeline.filter.max_snps(), 1000);
        assert_eq!(settings.pipeline.no_call, NoCallPolicy::Hold);
        assert_eq!(settings.coding, CallCoding::default());
        assert_eq!(settings.layout, ColumnLayout::default());
    }

    #[test]
    fn test_invalid_max_snps() {
        for bad in [0, -3] {
            let args = PeaksArgs {
                max_snps: Some(bad),
                ..PeaksArgs::default()
            };
            assert!(matches!(validate_peaks(&args), Err(XoError::Configuration(_))));
        }
    }

    #[test]
    fn test_identical_parents_rejected() {
        let args = PeaksArgs {
            parent_a: Some("N2".to_string()),
            ..PeaksArgs::default()
        };
        assert!(matches!(validate_peaks(&args), Err(XoError::Configuration(_))));
    }

    #[test]
    fn test_unknown_no_call_policy() {
        let args = PeaksArgs {
            no_call: Some("guess".to_string()),
            ..PeaksArgs::default()
        };
        assert!(validate_peaks(&args).is_err());
    }

    #[test]
    fn test_filter_ranges_and_regex() {
        let settings = validate_filter(&FilterArgs::default()).unwrap();
        assert_eq!(settings.criteria.size, 0..=100);
        assert_eq!(settings.criteria.length, 0..=10_000);
        assert!(settings.criteria.chromosomes.unwrap().is_match("BSP-OR-001_chr2"));

        let inverted = FilterArgs {
            min_size: Some(10),
            max_size: Some(5),
            ..FilterArgs::default()
        };
        assert!(validate_filter(&inverted).is_err());

        let bad_regex = FilterArgs {
            chromosomes: Some("(".to_string()),
            ..FilterArgs::default()
        };
        assert!(matches!(validate_filter(&bad_regex), Err(XoError::Configuration(_))));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!("quiet".parse::<LogLevel>().unwrap().directive(), "warn");
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_missing_command() {
        let args = Args {
            config: None,
            generate_config: false,
            threads: None,
            log: None,
            command: None,
        };
        assert!(validate_args(&args).is_err());
    }
}
