//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod decode_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use decode_command::DecodeCommand;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::debug;

use crate::config::DecoderConfig;
use crate::errors::{DecodeError, DecodeResult};

/// Argument definitions for the `glowkit` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("glowkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and decode PNG and TIFF/BigTIFF images")
        .arg(
            Arg::new("input")
                .help("Input PNG or TIFF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decode")
                .short('d')
                .long("decode")
                .help("Decode pixels and write them to the output file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output image file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .help("Source window to decode (x,y,width,height)")
                .value_name("REGION")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with decoder limits")
                .value_name("FILE")
                .required(false),
        )
}

/// Factory for creating command instances based on CLI arguments
pub struct GlowkitCommandFactory;

impl GlowkitCommandFactory {
    pub fn new() -> Self {
        GlowkitCommandFactory
    }
}

impl Default for GlowkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for GlowkitCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> DecodeResult<Box<dyn Command>> {
        let config = load_config(args)?;

        if args.get_flag("decode") {
            Ok(Box::new(DecodeCommand::new(args, config)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, config)?))
        }
    }
}

/// Reads `--config` if given, otherwise the default limits
fn load_config(args: &ArgMatches) -> DecodeResult<DecoderConfig> {
    match args.get_one::<String>("config") {
        Some(path) => {
            debug!("Loading config from {}", path);
            DecoderConfig::from_file(path)
        }
        None => Ok(DecoderConfig::default()),
    }
}

/// The required positional input path
pub(crate) fn input_path(args: &ArgMatches) -> DecodeResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| DecodeError::Config("Missing input file".to_string()))
}
