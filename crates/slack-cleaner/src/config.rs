use crate::client::{ClientOptions, DEFAULT_BASE_URL};
use crate::deleter::DEFAULT_CONCURRENCY;
use crate::error::Error;
use clap::Parser;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DAYS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug, Clone)]
#[command(name = "slack-cleaner", version, about = "Delete Slack files older than N days")]
pub struct Args {
    /// Slack API token, get one at https://api.slack.com/docs/oauth-test-tokens
    #[arg(short, long)]
    pub token: Option<String>,

    /// Delete files older than `n` days
    #[arg(short, long, default_value_t = DEFAULT_DAYS)]
    pub days: u64,

    /// Base URL of the Slack Web API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Maximum number of requests in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub threshold_days: u64,
    pub api_url: Url,
    pub concurrency: usize,
    pub timeout: Duration,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, Error> {
        let token = match args.token {
            Some(token) if !token.trim().is_empty() => token,
            _ => return Err(Error::MissingCredential),
        };
        if args.concurrency == 0 {
            return Err(Error::InvalidConfig(
                "--concurrency must be at least 1".to_string(),
            ));
        }
        if args.timeout == 0 {
            return Err(Error::InvalidConfig(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        let api_url = Url::parse(&args.api_url)?;

        Ok(Self {
            token,
            threshold_days: args.days,
            api_url,
            concurrency: args.concurrency,
            timeout: Duration::from_secs(args.timeout),
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            token: self.token.clone(),
            base_url: Some(self.api_url.to_string()),
            timeout: Some(self.timeout),
        }
    }
}
