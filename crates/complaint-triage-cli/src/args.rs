use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "complaint-triage")]
#[command(about = "Classify customer complaints into categories by keyword rules")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Rule file (default: $COMPLAINT_TRIAGE_RULES, ~/.complaint-triage/rules.toml, or builtin)
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One JSON object per line: {"id": 1, "text": "..."}
    #[default]
    Jsonl,
    /// One complaint per line, ids assigned from 1
    Lines,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify complaint records from a file or stdin
    Classify {
        /// Input file (default: stdin)
        input: Option<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum, default_value_t = InputFormat::Jsonl)]
        format: InputFormat,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Only show records in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Classify a single text given on the command line
    Text {
        /// Complaint text (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Run the classifier on the built-in sample complaints
    Demo {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Manage rule files
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Show the active rule table
    List,

    /// Show where the rule table is loaded from
    Path,

    /// Write a rule file with the builtin rules
    Init {
        /// Destination (default: ~/.complaint-triage/rules.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a rule file
    Check {
        /// Rule file to validate
        path: PathBuf,
    },
}
