use crate::client::Inner;
use crate::deleter;
use crate::error::Error;
use crate::pagination::Page;
use crate::types::files::{DeletedFile, FileRecord};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const FILES_LIST: &str = "files.list";
const FILES_DELETE: &str = "files.delete";

pub const DEFAULT_PAGE_CONCURRENCY: usize = 10;

#[derive(Clone)]
pub struct Files {
    inner: Arc<Inner>,
}

impl Files {
    pub(crate) fn new(inner: Arc<Inner>) -> Self {
        Self { inner }
    }

    /// Fetches a single page of `files.list`, validating every record.
    pub async fn list_page(&self, page: u32) -> Result<Page<FileRecord>, Error> {
        let raw: Page<Value> = self
            .inner
            .request_json(Method::GET, FILES_LIST, &[("page", page.to_string())])
            .await?;

        let files = raw
            .files
            .into_iter()
            .enumerate()
            .map(|(index, value)| FileRecord::from_value(index, value))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            page,
            reported_page = raw.paging.page,
            pages = raw.paging.pages,
            count = files.len(),
            "fetched files page"
        );
        Ok(Page {
            files,
            paging: raw.paging,
        })
    }

    /// Lists every file visible to the token.
    ///
    /// The first page is fetched alone to learn the page count; the rest are
    /// fetched with at most `concurrency` requests outstanding and stitched
    /// back together in page order. Any page failure discards everything.
    pub async fn list_all(&self, concurrency: usize) -> Result<Vec<FileRecord>, Error> {
        let first = self.list_page(0).await.map_err(|source| Error::Listing {
            page: 0,
            source: Box::new(source),
        })?;

        let remaining = first
            .paging
            .remaining_pages()
            .map_err(|source| Error::Listing {
                page: 0,
                source: Box::new(source),
            })?;
        let mut files = first.files;

        let rest: Vec<Vec<FileRecord>> = stream::iter(remaining)
            .map(|page| async move {
                self.list_page(page)
                    .await
                    .map(|p| p.files)
                    .map_err(|source| Error::Listing {
                        page,
                        source: Box::new(source),
                    })
            })
            .buffered(concurrency.max(1))
            .try_collect()
            .await?;

        files.extend(rest.into_iter().flatten());
        Ok(files)
    }

    pub async fn delete(&self, file_id: &str) -> Result<DeletedFile, Error> {
        self.inner
            .request_json(Method::POST, FILES_DELETE, &[("file", file_id.to_string())])
            .await
    }

    /// Deletes every id with at most `concurrency` requests in flight.
    pub async fn delete_all(&self, file_ids: Vec<String>, concurrency: usize) -> Result<usize, Error> {
        deleter::delete_all(file_ids, concurrency, |id| async move {
            self.delete(&id).await.map(|_| ())
        })
        .await
    }
}
