use crate::error::Error;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use std::future::Future;
use tracing::{debug, warn};

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Runs `delete_one` for every id with at most `limit` calls outstanding.
///
/// Each completion frees a slot for the next queued id. After the first
/// failure no further ids are dispatched, but calls already in flight run to
/// completion before the failure is returned. Returns the number of ids
/// deleted.
pub async fn delete_all<I, F, Fut>(ids: I, limit: usize, delete_one: F) -> Result<usize, Error>
where
    I: IntoIterator<Item = String>,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    let limit = limit.max(1);
    let mut queue = ids.into_iter();
    let mut in_flight = FuturesUnordered::new();
    let mut deleted = 0usize;
    let mut first_error: Option<(String, Error)> = None;

    let dispatch = |id: String| {
        let fut = delete_one(id.clone());
        async move { (id, fut.await) }
    };

    for id in queue.by_ref().take(limit) {
        in_flight.push(dispatch(id));
    }

    while let Some((id, outcome)) = in_flight.next().await {
        match outcome {
            Ok(()) => {
                deleted += 1;
                debug!(file_id = %id, "deleted file");
            }
            Err(err) => {
                warn!(file_id = %id, error = %err, "failed to delete file");
                if first_error.is_none() {
                    first_error = Some((id, err));
                }
            }
        }

        if first_error.is_none() {
            if let Some(next) = queue.next() {
                in_flight.push(dispatch(next));
            }
        }
    }

    match first_error {
        Some((file_id, source)) => Err(Error::Deletion {
            file_id,
            deleted,
            source: Box::new(source),
        }),
        None => Ok(deleted),
    }
}
