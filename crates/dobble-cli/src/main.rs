//! Dobble deck client CLI.

use clap::{ColorChoice, Parser};
use dobble_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use dobble_cli::logging::{LogConfig, LogFormat, init_logging};
use dobble_cli::render::{print_deck, print_validation};
use dobble_client::{BASE_URL_ENV, ClientConfig, DobbleClient};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod commands;

use crate::commands::{run_export, run_generate, run_validate};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let client = match client_from_cli(&cli) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let exit_code = match &cli.command {
        Command::Validate(args) => match run_validate(&client, args).await {
            Ok(result) => {
                print_validation(&result);
                if result.valid { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Generate(args) => match run_generate(&client, args).await {
            Ok(deck) if args.json => match serde_json::to_string_pretty(&deck) {
                Ok(json) => {
                    println!("{json}");
                    0
                }
                Err(error) => {
                    eprintln!("error: {error}");
                    1
                }
            },
            Ok(deck) => {
                print_deck(&deck);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Export(args) => match run_export(&client, args).await {
            Ok(path) => {
                println!("Saved {}", path.display());
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Base URL precedence: `--base-url`, then the environment, then the default.
fn client_from_cli(cli: &Cli) -> Result<DobbleClient, dobble_client::ClientError> {
    let mut config = ClientConfig::resolve(cli.base_url.clone(), std::env::var(BASE_URL_ENV).ok())
        .with_asset_base(cli.asset_base.clone());
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    DobbleClient::new(config)
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
    config.with_timestamps = cli.log_timestamps;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
