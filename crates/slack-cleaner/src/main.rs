use clap::Parser;
use slack_cleaner::{logging, Args, Cleaner, CleanupSummary, Config, Error};
use std::process::ExitCode;
use std::time::SystemTime;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<CleanupSummary, Error> {
    let config = Config::from_args(args)?;
    Cleaner::new(config)?.run(SystemTime::now()).await
}
