use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oncobill")]
#[command(about = "Map brain tumor treatment recommendations to billing codes and cost estimates")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, global = true, env = "ONCOBILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a billing report for one recommendation
    Report(ReportArgs),

    /// Process a JSON array of treatment requests
    Batch {
        /// File holding the requests
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Resolve the ICD-10 code for a tumor type
    Diagnosis {
        #[arg(long)]
        tumor_type: String,

        #[arg(long)]
        subtype: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the procedure code table
    Codes {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the supported tumor types
    TumorTypes {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load configuration and reference tables, then print a summary
    CheckConfig {
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Recommendation text
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the recommendation from a file; stdin is used when neither is given
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub tumor_type: Option<String>,

    #[arg(long)]
    pub subtype: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}
