use anyhow::Context;
use clap::Parser;
use prompter::{ConfigError, Kind, Options, PromptError, Request, Terminal};
use std::{fs, path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

/// Ask for one validated value (or many) and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "prompter", version)]
struct Cli {
    /// JSON file with the request options (`outputText`, `min`, `exiton`, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target type, overrides the `type` option
    #[arg(short = 't', long = "type")]
    kind: Option<Kind>,

    /// Keep asking until an exit sentinel, the `numInputs` budget or the end of input
    #[arg(long)]
    collect: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let request = load(cli)?;
    tracing::debug!(kind = %request.kind(), collect = cli.collect, "request loaded");

    let mut terminal = Terminal::stdio();

    if cli.collect {
        let values = terminal.collect(&request)?;
        return Ok(serde_json::to_string(&values)?);
    }

    if request.kind() == Kind::FileName && request.options().mode.is_some() {
        let opened = match terminal.ask_file(&request)? {
            Some(file) => {
                let len = file.metadata().context("Couldn't stat the opened file")?.len();
                serde_json::json!({ "opened": true, "len": len })
            }
            None => serde_json::Value::Null,
        };
        return Ok(opened.to_string());
    }

    let value = terminal.ask(&request)?;
    Ok(serde_json::to_string(&value)?)
}

fn load(cli: &Cli) -> anyhow::Result<Request> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Couldn't read {}", path.display()))?;
            Options::from_json(&json)?
        }
        None => Options::new(),
    };

    if let Some(kind) = cli.kind {
        options = options.kind(kind);
    }

    Ok(Request::from_options(options)?)
}

/// 2 for configuration errors, 1 for everything else.
fn exit_code(e: &anyhow::Error) -> ExitCode {
    let config = e.downcast_ref::<ConfigError>().is_some()
        || e.downcast_ref::<PromptError>().is_some_and(PromptError::is_config);
    if config {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
