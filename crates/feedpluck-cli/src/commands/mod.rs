pub mod annunciator;
pub mod forecast;
pub mod pluck;
pub mod questions;

use std::sync::Arc;

use feedpluck_core::{ClientConfig, HttpClient, ReqwestHttpClient};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::offline;

/// Command result handed to the output layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let config = ClientConfig::default()
        .with_timeout_ms(cli.timeout_ms)
        .with_user_agent(cli.user_agent.as_str());

    match &cli.command {
        Command::Pluck(args) => pluck::run(args),
        Command::Annunciator(args) => annunciator::run(args, executor(cli, &config)?, &config).await,
        Command::Questions(args) => questions::run(args, executor(cli, &config)?, &config).await,
        Command::Forecast(args) => forecast::run(args, executor(cli, &config)?, &config).await,
    }
}

fn executor(cli: &Cli, config: &ClientConfig) -> Result<Arc<dyn HttpClient>, CliError> {
    match &cli.offline {
        Some(dir) => Ok(Arc::new(offline::load(dir)?)),
        None => Ok(Arc::new(ReqwestHttpClient::new(&config.user_agent))),
    }
}
