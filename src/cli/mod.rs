// mod.rs - CLI module

pub mod args;
pub mod config;
pub mod merge;
pub mod validation;

// Re-export main types for convenience
pub use args::{Args, Command, FilterArgs, PeaksArgs, SampleArgs};
pub use config::Config;
pub use validation::{
    validate_args, FilterSettings, LogLevel, PeaksSettings, SampleSettings, Task, ValidationResult,
};
