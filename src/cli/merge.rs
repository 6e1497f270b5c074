// merge.rs - Merge configuration layers with CLI arguments

use crate::cli::args::{Args, Command, FilterArgs, PeaksArgs, SampleArgs};
use crate::cli::Config;
use crate::error::Result;

fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if slot.is_none() {
        *slot = value.clone();
    }
}

impl Args {
    /// Merge with a configuration layer.
    /// Values already set (CLI, or an earlier layer) take precedence.
    pub fn merge_with_config(mut self, config: &Config) -> Self {
        fill(&mut self.threads, &config.threads);
        fill(&mut self.log, &config.log);

        self.command = self.command.map(|command| match command {
            Command::Peaks(args) => Command::Peaks(args.merge_with_config(config)),
            Command::Filter(args) => Command::Filter(args.merge_with_config(config)),
            Command::Sample(args) => Command::Sample(args.merge_with_config(config)),
        });
        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(&config))
    }

    /// Apply the config file (if any), then the environment defaults
    pub fn resolve(self) -> Result<Self> {
        let args = match self.config.clone() {
            Some(path) => self.with_config_file(&path)?,
            None => self,
        };
        Ok(args.merge_with_config(&Config::from_env()))
    }
}

impl PeaksArgs {
    pub fn merge_with_config(mut self, config: &Config) -> Self {
        // Input/Output
        fill(&mut self.snps, &config.snps);
        fill(&mut self.output, &config.peaks);
        fill(&mut self.report, &config.report);

        // Block detection
        fill(&mut self.max_snps, &config.max_snps);
        fill(&mut self.no_call, &config.no_call);
        fill(&mut self.parent_a, &config.parent_a);
        fill(&mut self.parent_b, &config.parent_b);

        // Columns
        fill(&mut self.id_column, &config.id_column);
        fill(&mut self.chrom_column, &config.chrom_column);
        fill(&mut self.position_column, &config.position_column);
        fill(&mut self.call_column, &config.call_column);
        self
    }
}

impl FilterArgs {
    pub fn merge_with_config(mut self, config: &Config) -> Self {
        fill(&mut self.peaks, &config.peaks);
        fill(&mut self.output, &config.filtered);
        fill(&mut self.summary, &config.summary);

        fill(&mut self.chromosomes, &config.chromosomes);
        fill(&mut self.min_size, &config.min_size);
        fill(&mut self.max_size, &config.max_size);
        fill(&mut self.min_length, &config.min_length);
        fill(&mut self.max_length, &config.max_length);
        fill(&mut self.coverage, &config.coverage);

        // Switch: config can only turn it on
        if !self.matched && config.matched.unwrap_or(false) {
            self.matched = true;
        }

        fill(&mut self.chrom_column, &config.chrom_column);
        fill(&mut self.position_column, &config.position_column);
        fill(&mut self.call_column, &config.call_column);
        self
    }
}

impl SampleArgs {
    pub fn merge_with_config(mut self, config: &Config) -> Self {
        fill(&mut self.snps, &config.snps);
        fill(&mut self.output, &config.sample);
        fill(&mut self.size, &config.sample_size);
        self
    }
}
