mod app_system;
mod cart;
mod clients;
mod config;
mod domain;
mod error;
mod messages;
mod queries;
mod shell;
mod view;

#[cfg(test)]
mod mock_framework;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, DeliverySystem};
use crate::clients::HttpBackend;
use crate::config::Config;
use crate::shell::{Command, HELP};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::parse();
    config.validate().map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, "Starting delivery client");

    let backend = HttpBackend::new(&config.api_url).map_err(|e| e.to_string())?;
    let system = DeliverySystem::start(backend, config.app_settings());

    let span = tracing::info_span!("initial_page", page = %config.page);
    let opened = async { shell::execute(&system, Command::Open(config.page.clone())).await }
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    let mut stdout = tokio::io::stdout();
    let banner = format!("{opened}\n{HELP}\n");
    stdout.write_all(banner.as_bytes()).await.map_err(|e| e.to_string())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
        if line.trim().is_empty() {
            continue;
        }
        let output = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match shell::execute(&system, command).await {
                Ok(output) => output,
                Err(e) => {
                    error!(error = %e, "Command failed");
                    e.to_string()
                }
            },
            Err(e) => e.to_string(),
        };
        stdout
            .write_all(format!("{output}\n").as_bytes())
            .await
            .map_err(|e| e.to_string())?;
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Delivery client exited");
    Ok(())
}
