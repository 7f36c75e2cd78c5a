use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{CommandFactory, Parser};
use ti_core::TiError;
use tracing_subscriber::EnvFilter;

use ti_cli::commands::{
    Invocation, calview, csv, edit, log, note, report, start, status, stop, tag,
};
use ti_cli::{Cli, Colorizer, Commands, Config};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; usage errors fail
            // with the same code as every other error.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            if message.trim().is_empty() {
                let _ = Cli::command().print_help();
            } else {
                eprintln!("{message}");
                if matches!(err.downcast_ref::<TiError>(), Some(TiError::BadArguments(_))) {
                    eprintln!("\n{}", Cli::command().render_usage());
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Some(command) = &cli.command else {
        let _ = Cli::command().write_help(&mut std::io::stderr());
        eprintln!();
        anyhow::bail!("You must specify a command.");
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let store = ti_store::open(&config.datasource, &config.sheet_file)?;
    let inv = Invocation {
        now: Utc::now(),
        tz: Local,
        current_day: config.current_day.clone(),
        colors: Colorizer::new(!cli.no_color),
    };

    let mut out = std::io::stdout().lock();
    match command {
        Commands::Start { name, time } => start::run(&mut out, store.as_ref(), &inv, name, time)?,
        Commands::Stop { time } => stop::run(&mut out, store.as_ref(), &inv, time)?,
        Commands::Status => status::run(&mut out, store.as_ref(), &inv)?,
        Commands::Tag { tags } => tag::run(&mut out, store.as_ref(), tags)?,
        Commands::Note { text } => note::run(&mut out, store.as_ref(), inv.colors, text)?,
        Commands::Log { period } => log::run(&mut out, store.as_ref(), &inv, period.as_deref())?,
        Commands::Csv => csv::run(&mut out, store.as_ref(), inv.now)?,
        Commands::Report { activity } => report::run(&mut out, store.as_ref(), &inv, activity)?,
        Commands::Calview { month } => calview::run(&mut out, store.as_ref(), &inv, month)?,
        Commands::Edit => edit::run(&mut out, store.as_ref(), &config.editor_command())?,
    }
    out.flush()?;
    Ok(())
}
