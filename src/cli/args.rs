// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// xoblocks - crossover and non-crossover block detection from parent-of-origin SNP calls
pub struct Args {
    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// log level: quiet, info, debug (default: info)
    #[argh(option)]
    pub log: Option<String>,

    #[argh(subcommand)]
    pub command: Option<Command>,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Peaks(PeaksArgs),
    Filter(FilterArgs),
    Sample(SampleArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Peaks(_) => "peaks",
            Command::Filter(_) => "filter",
            Command::Sample(_) => "sample",
        }
    }
}

#[derive(FromArgs, Debug, Default, Clone)]
/// detect, size-filter and label blocks in a SNP table
#[argh(subcommand, name = "peaks")]
pub struct PeaksArgs {
    /// SNP table (.csv, .tsv, optionally .gz, or .lz4 snapshot)
    #[argh(option)]
    pub snps: Option<String>,

    /// labeled output table (default: peaks.csv)
    #[argh(option)]
    pub output: Option<String>,

    /// largest block kept, in SNPs (default: 1000)
    #[argh(option)]
    pub max_snps: Option<i64>,

    /// write a JSON run report to this file
    #[argh(option)]
    pub report: Option<String>,

    /// no-call handling: hold, drop (default: hold)
    #[argh(option)]
    pub no_call: Option<String>,

    /// call label of parent A, counted +1 (default: CB4856)
    #[argh(option)]
    pub parent_a: Option<String>,

    /// call label of parent B, counted -1 (default: N2)
    #[argh(option)]
    pub parent_b: Option<String>,

    /// SNP id column (default: SNP)
    #[argh(option)]
    pub id_column: Option<String>,

    /// chromosome column (default: chrom_id)
    #[argh(option)]
    pub chrom_column: Option<String>,

    /// position column (default: position)
    #[argh(option)]
    pub position_column: Option<String>,

    /// call column (default: hmm_state1)
    #[argh(option)]
    pub call_column: Option<String>,
}

#[derive(FromArgs, Debug, Default, Clone)]
/// select labeled blocks by chromosome, size, length, coverage and genome match
#[argh(subcommand, name = "filter")]
pub struct FilterArgs {
    /// labeled table written by `peaks` (default: peaks.csv)
    #[argh(option)]
    pub peaks: Option<String>,

    /// rows of the selected blocks (default: filtered.csv)
    #[argh(option)]
    pub output: Option<String>,

    /// write one line per selected block to this file
    #[argh(option)]
    pub summary: Option<String>,

    /// chromosome id regex (default: BSP.*)
    #[argh(option)]
    pub chromosomes: Option<String>,

    /// smallest block kept, in SNPs (default: 0)
    #[argh(option)]
    pub min_size: Option<usize>,

    /// largest block kept, in SNPs (default: 100)
    #[argh(option)]
    pub max_size: Option<usize>,

    /// shortest block kept, in bp (default: 0)
    #[argh(option)]
    pub min_length: Option<u64>,

    /// longest block kept, in bp (default: 10000)
    #[argh(option)]
    pub max_length: Option<u64>,

    /// drop SNPs with ref_reads + var_reads at or below this (default: 0 = off)
    #[argh(option)]
    pub coverage: Option<u64>,

    /// keep only SNPs whose base genotype matches the call
    #[argh(switch)]
    pub matched: bool,

    /// chromosome column (default: chrom_id)
    #[argh(option)]
    pub chrom_column: Option<String>,

    /// position column (default: position)
    #[argh(option)]
    pub position_column: Option<String>,

    /// call column (default: hmm_state1)
    #[argh(option)]
    pub call_column: Option<String>,
}

#[derive(FromArgs, Debug, Default, Clone)]
/// save the first records of a SNP table, as CSV/TSV or .lz4 snapshot
#[argh(subcommand, name = "sample")]
pub struct SampleArgs {
    /// SNP table to sample from
    #[argh(option)]
    pub snps: Option<String>,

    /// sample file (default: sample.lz4)
    #[argh(option)]
    pub output: Option<String>,

    /// number of records (default: 100000)
    #[argh(option)]
    pub size: Option<usize>,
}
