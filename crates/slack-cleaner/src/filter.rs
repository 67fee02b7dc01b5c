use crate::types::files::FileRecord;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MS_PER_DAY: i128 = 24 * 60 * 60 * 1000;
const MS_PER_SEC: i128 = 1000;

/// Keeps the records created more than `threshold_days` before `now`.
///
/// A record exactly `threshold_days` old is kept out.
pub fn filter_old(records: &[FileRecord], threshold_days: u64, now: SystemTime) -> Vec<FileRecord> {
    let now_ms = unix_millis(now);
    let max_age_ms = MS_PER_DAY * i128::from(threshold_days);

    records
        .iter()
        .filter(|record| now_ms - i128::from(record.created) * MS_PER_SEC > max_age_ms)
        .cloned()
        .collect()
}

fn unix_millis(at: SystemTime) -> i128 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_millis() as i128,
        Err(before) => -(before.duration().as_millis() as i128),
    }
}
