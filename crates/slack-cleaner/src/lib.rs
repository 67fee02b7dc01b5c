mod client;
pub mod cleaner;
pub mod config;
pub mod deleter;
mod error;
pub mod filter;
pub mod logging;
mod pagination;
pub mod resources;
pub mod types;

pub use crate::cleaner::{Cleaner, CleanupSummary};
pub use crate::client::{ClientOptions, SlackClient};
pub use crate::config::{Args, Config};
pub use crate::error::{ApiError, Error, HttpApiError};
pub use crate::pagination::{Page, Paging};
