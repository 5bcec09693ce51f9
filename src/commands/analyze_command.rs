//! PNG/TIFF structure analysis command

use clap::ArgMatches;
use log::{debug, info};

use crate::api::Glowkit;
use crate::commands::command_traits::Command;
use crate::config::DecoderConfig;
use crate::errors::DecodeResult;

/// Command for printing the structure of a PNG or TIFF file
pub struct AnalyzeCommand {
    /// Path to the input file
    input_file: String,
    /// Whether to enable verbose output
    verbose: bool,
    config: DecoderConfig,
}

impl AnalyzeCommand {
    pub fn new(args: &ArgMatches, config: DecoderConfig) -> DecodeResult<Self> {
        Ok(AnalyzeCommand {
            input_file: super::input_path(args)?,
            verbose: args.get_flag("verbose"),
            config,
        })
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> DecodeResult<()> {
        info!("Analyzing file: {}", self.input_file);

        if self.verbose {
            debug!("Verbose mode enabled");
        }

        let mut reader = Glowkit::open(&self.input_file)?;
        let report = Glowkit::new(self.config).analyze(&mut reader)?;
        println!("{}", report);

        debug!("Analysis completed successfully");
        Ok(())
    }
}
