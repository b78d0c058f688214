//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "samara",
    version,
    about = "Match the columns of two spreadsheets and merge them",
    long_about = "Match the columns of two spreadsheets and merge them.\n\n\
                  Columns are paired by exact name, name similarity, or common\n\
                  business synonyms; a hosted model can be used instead when an\n\
                  API key is configured."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the per-user one.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Work out which columns of the two sheets correspond.
    Analyze(AnalyzeArgs),

    /// Merge the right sheet into the left one and write the result.
    Merge(MergeArgs),

    /// Preview a merge: show the mapping and any conflicting cells.
    Compare(CompareArgs),

    /// Inspect or create the settings file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Print the settings file location.
    Path,
    /// Print the effective settings (API key hidden).
    Show,
    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// The two input sheets.
#[derive(Args, Clone)]
pub struct SheetArgs {
    /// Left (source) file: CSV, XLSX, XLSM, XLS, XLSB, or ODS.
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    /// Right (target) file.
    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,

    /// Worksheet to read from the left workbook (default: first).
    #[arg(long = "left-sheet", value_name = "NAME")]
    pub left_sheet: Option<String>,

    /// Worksheet to read from the right workbook (default: first).
    #[arg(long = "right-sheet", value_name = "NAME")]
    pub right_sheet: Option<String>,
}

/// Matcher selection; flags win over the settings file and environment.
#[derive(Args, Clone, Default)]
pub struct MatcherArgs {
    /// Never call the hosted model; use the local heuristic.
    #[arg(long)]
    pub offline: bool,

    /// Hosted model name.
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Chat-completions endpoint URL.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub sheets: SheetArgs,

    #[command(flatten)]
    pub matcher: MatcherArgs,

    /// Print the analysis as JSON.
    #[arg(long)]
    pub json: bool,

    /// Store the analysis so it can be reviewed and passed to `merge`.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub sheets: SheetArgs,

    #[command(flatten)]
    pub matcher: MatcherArgs,

    /// Output file (.csv or .xlsx).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Use a stored (possibly hand-edited) analysis instead of matching.
    #[arg(long, value_name = "PATH")]
    pub analysis: Option<PathBuf>,

    /// Pair rows on this mapped left column instead of by position.
    #[arg(long = "join-key", value_name = "COLUMN")]
    pub join_key: Option<String>,

    /// Text placed between two differing values.
    #[arg(long, value_name = "TEXT")]
    pub separator: Option<String>,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub sheets: SheetArgs,

    #[command(flatten)]
    pub matcher: MatcherArgs,

    /// Pair rows on this mapped left column instead of by position.
    #[arg(long = "join-key", value_name = "COLUMN")]
    pub join_key: Option<String>,

    /// Maximum number of conflicts to list.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn merge_flags_parse() {
        let cli = Cli::try_parse_from([
            "samara",
            "merge",
            "a.xlsx",
            "b.csv",
            "-o",
            "out.xlsx",
            "--join-key",
            "Id",
            "--offline",
            "--log-data",
        ])
        .unwrap();
        assert!(cli.log_data);
        let Command::Merge(args) = cli.command else {
            panic!("expected merge");
        };
        assert_eq!(args.output, PathBuf::from("out.xlsx"));
        assert_eq!(args.join_key.as_deref(), Some("Id"));
        assert!(args.matcher.offline);
    }

    #[test]
    fn merge_requires_output() {
        assert!(Cli::try_parse_from(["samara", "merge", "a.csv", "b.csv"]).is_err());
    }
}
