use anyhow::{bail, Context, Result};
use std::{fs, path::Path, process::ExitCode, sync::Mutex};
use tracing_subscriber::EnvFilter;

use toll_fraud_form::{runner, tui, ClientConfig, HttpPredictionClient, RunReport};

const USAGE: &str = "usage: toll-fraud-form [submit <form.json> | health]";

fn init_tracing(config: &ClientConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    // The terminal belongs to the form; log to a file or not at all.
    if let Some(path) = &config.log_file {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn finish(report: RunReport) -> ExitCode {
    print!("{}", report.text);
    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = ClientConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    init_tracing(&config, args.is_empty())?;
    tracing::info!("prediction backend: {}", config.api_base_url);

    let client = HttpPredictionClient::from_config(&config);
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => {
            tui::run(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        ["submit", path] => Ok(finish(
            runner::submit_form_file(&client, Path::new(path)).await?,
        )),
        ["health"] => Ok(finish(runner::check_health(&client).await)),
        _ => bail!(USAGE),
    }
}
