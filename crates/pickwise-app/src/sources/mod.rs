// External data sources: the entity catalog provider and the live session
// observer. Both degrade to "unavailable" instead of failing the app.

pub mod catalog;
pub mod session;

use std::path::PathBuf;

use pickwise_core::catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("version list is empty")]
    NoVersion,
}
