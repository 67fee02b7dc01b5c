use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,

    /// Unix seconds.
    pub created: i64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FileRecord {
    pub fn new(id: impl Into<String>, created: i64) -> Self {
        Self {
            id: id.into(),
            created,
            extra: BTreeMap::new(),
        }
    }

    /// Validates one raw entry of a `files.list` response.
    pub fn from_value(index: usize, value: Value) -> Result<Self, Error> {
        let record =
            serde_json::from_value::<FileRecord>(value).map_err(|e| Error::MalformedRecord {
                index,
                reason: e.to_string(),
            })?;
        if record.id.is_empty() {
            return Err(Error::MalformedRecord {
                index,
                reason: "empty `id`".to_string(),
            });
        }
        Ok(record)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedFile {
    #[serde(default)]
    pub ok: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
