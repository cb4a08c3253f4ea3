//! Argument parsing shared by the `sentiment-batch` and `sentiment-analyze` binaries.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser};

use crate::batch::DEFAULT_OUTPUT_PATH;
use crate::error::Result;
use crate::logging::LOG_LEVELS;
use crate::sentiment::{
    DeviceRequest, SentimentAnalysisPipeline, SentimentAnalysisPipelineBuilder,
    SentimentDistilBert, DEFAULT_MODEL_ID,
};

/// Printed when `sentiment-batch` gets the wrong number of arguments.
pub const BATCH_USAGE: &str = "Usage: sentiment-batch <input.csv>";

/// Printed when `sentiment-analyze` gets the wrong number of arguments.
pub const ANALYZE_USAGE: &str = "Usage: sentiment-analyze \"your input text here\"";

/// Model selection and logging, common to both binaries.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Hugging Face model id or local model directory
    #[arg(long, short = 'm', env = "SENTIMENT_MODEL", default_value = DEFAULT_MODEL_ID)]
    pub model: String,

    /// Run on this CUDA device instead of the CPU
    #[arg(long, value_name = "INDEX")]
    pub cuda: Option<usize>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info", value_parser = LOG_LEVELS)]
    pub log_level: String,
}

impl ModelArgs {
    /// Device requested on the command line.
    pub fn device_request(&self) -> DeviceRequest {
        self.cuda.map_or(DeviceRequest::Cpu, DeviceRequest::Cuda)
    }

    /// Load the requested model.
    pub fn build_pipeline(&self) -> Result<SentimentAnalysisPipeline<SentimentDistilBert>> {
        SentimentAnalysisPipelineBuilder::distilbert(self.model.as_str())
            .device(self.device_request())
            .build()
    }
}

/// Analyze every row of a CSV file's `text` column.
#[derive(Parser, Debug)]
#[command(name = "sentiment-batch", version)]
pub struct BatchArgs {
    /// CSV file with a `text` column
    pub input: PathBuf,

    /// Where to write the `text,label,score` results
    #[arg(long, short = 'o', env = "SENTIMENT_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Model selection, device and log level
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Print the sentiment of a single text.
#[derive(Parser, Debug)]
#[command(name = "sentiment-analyze", version)]
pub struct AnalyzeArgs {
    /// Text to analyze
    pub text: String,

    /// Model selection, device and log level
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Why arguments were not accepted.
#[derive(Debug)]
pub enum CliError {
    /// Wrong number of positional arguments: print the usage line and exit 1.
    Usage,
    /// Anything else clap reports, including `--help` and `--version`.
    Clap(clap::Error),
}

/// Parse `args` (program name first), separating arity mistakes from other errors.
pub fn parse_args<P, I, T>(args: I) -> std::result::Result<P, CliError>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    P::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => CliError::Usage,
        _ => CliError::Clap(e),
    })
}

/// Parse the process arguments, exiting with status 1 after printing `usage` on arity errors.
pub fn parse_or_exit<P: Parser>(usage: &str) -> P {
    match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(CliError::Usage) => {
            println!("{usage}");
            std::process::exit(1);
        }
        Err(CliError::Clap(e)) => e.exit(),
    }
}
