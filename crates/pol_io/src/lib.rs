//! Campaign snapshot persistence.
//!
//! One JSON file per saved campaign, keyed by id, written whole: no partial
//! updates and no schema versioning. Writes go through a temp file and a
//! rename so a crash never leaves a torn snapshot behind.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

pub mod snapshot;

pub use snapshot::{delete_campaign, list_campaigns, load_campaign, save_campaign};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("no saved campaign named {0:?}")]
    NotFound(String),

    #[error("campaign id {0:?} is not a valid file key")]
    InvalidId(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
