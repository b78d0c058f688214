//! Samara CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use samara_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use samara_cli::commands::{analysis_json, run_analyze, run_compare, run_config, run_merge};
use samara_cli::logging::{LogConfig, LogFormat, init_logging};
use samara_cli::settings::load_settings;
use samara_cli::summary::{print_analysis, print_conflicts, print_merge};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_deref());
    match &cli.command {
        Command::Analyze(args) => {
            let report = run_analyze(args, &settings)?;
            if args.json {
                println!("{}", analysis_json(&report)?);
            } else {
                print_analysis(&report);
            }
        }
        Command::Merge(args) => {
            let report = run_merge(args, &settings)?;
            print_merge(&report);
        }
        Command::Compare(args) => {
            let report = run_compare(args, &settings)?;
            print_merge(&report);
            print_conflicts(&report.result.conflicts, args.limit);
        }
        Command::Config { action } => {
            println!("{}", run_config(*action, cli.config.as_deref(), &settings)?);
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
