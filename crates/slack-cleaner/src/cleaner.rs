use crate::client::SlackClient;
use crate::config::Config;
use crate::error::Error;
use crate::filter::filter_old;
use std::collections::HashSet;
use std::time::SystemTime;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupSummary {
    /// Files older than the threshold.
    pub found: usize,
    pub deleted: usize,
}

/// Lists, filters and deletes in one pass.
pub struct Cleaner {
    client: SlackClient,
    config: Config,
}

impl Cleaner {
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = SlackClient::new(config.client_options())?;
        Ok(Self { client, config })
    }

    pub async fn run(&self, now: SystemTime) -> Result<CleanupSummary, Error> {
        let files = self.client.files.list_all(self.config.concurrency).await?;
        info!(total = files.len(), "listed files");

        let old_files = filter_old(&files, self.config.threshold_days, now);
        // Pages can overlap when files are added mid-listing.
        let mut seen = HashSet::new();
        let file_ids: Vec<String> = old_files
            .into_iter()
            .map(|file| file.id)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        let found = file_ids.len();
        info!("Found {found} old files");

        let deleted = self
            .client
            .files
            .delete_all(file_ids, self.config.concurrency)
            .await?;
        info!("All old files successfully deleted");

        Ok(CleanupSummary { found, deleted })
    }
}
