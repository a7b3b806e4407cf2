// Catalog loading: curated table plus one provider (Data Dragon over HTTP,
// a local champion.json, or nothing), resolved into a `Catalog`.
//
// Provider failures never abort startup. The curated entries still resolve
// and `available` is false.

use std::path::{Path, PathBuf};

use pickwise_core::catalog::curated::{self, CuratedEntry};
use pickwise_core::catalog::ddragon::{self, RawEntry};
use pickwise_core::catalog::resolver::resolve;
use pickwise_core::catalog::Catalog;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::sources::SourceError;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    DataDragon { base_url: String },
    File { path: PathBuf },
    CuratedOnly,
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::DataDragon { base_url } => format!("Data Dragon at {base_url}"),
            CatalogSource::File { path } => format!("file {}", path.display()),
            CatalogSource::CuratedOnly => "curated table only".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// Major.minor patch of the provider data, when known.
    pub patch: Option<String>,
    /// False when the provider could not be reached or parsed.
    pub available: bool,
}

/// Load the curated table and the configured provider, then resolve them.
pub async fn load_catalog(config: &CatalogConfig, http: &reqwest::Client) -> LoadedCatalog {
    let curated = load_curated_table(config.curated_path.as_deref());

    let (raw, patch, available) = match fetch_raw(&config.source, http).await {
        Ok((raw, patch)) => {
            info!(
                "Loaded {} provider entries from {}",
                raw.len(),
                config.source.describe()
            );
            (raw, patch, true)
        }
        Err(e) => {
            warn!(
                "Catalog provider unavailable ({}): {}; using curated table only",
                config.source.describe(),
                e
            );
            (Vec::new(), None, false)
        }
    };

    let catalog = resolve(&curated, &raw);
    info!(
        "Catalog ready: {} entities (patch {})",
        catalog.len(),
        patch.as_deref().unwrap_or("unknown")
    );

    LoadedCatalog {
        catalog,
        patch,
        available,
    }
}

fn load_curated_table(path: Option<&Path>) -> Vec<CuratedEntry> {
    match path {
        Some(path) => match curated::load_curated(path) {
            Ok(entries) => {
                debug!("Loaded {} curated entries from {}", entries.len(), path.display());
                entries
            }
            Err(e) => {
                warn!("Failed to load curated table: {}; using embedded table", e);
                curated::builtin()
            }
        },
        None => curated::builtin(),
    }
}

async fn fetch_raw(
    source: &CatalogSource,
    http: &reqwest::Client,
) -> Result<(Vec<RawEntry>, Option<String>), SourceError> {
    match source {
        CatalogSource::DataDragon { base_url } => {
            let (raw, patch) = fetch_ddragon(http, base_url).await?;
            Ok((raw, Some(patch)))
        }
        CatalogSource::File { path } => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SourceError::Io {
                    path: path.clone(),
                    source: e,
                })?;
            Ok((ddragon::parse_champions(&text)?, None))
        }
        CatalogSource::CuratedOnly => Ok((Vec::new(), None)),
    }
}

/// Newest version from `versions.json`, then that version's champion list.
async fn fetch_ddragon(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<(Vec<RawEntry>, String), SourceError> {
    let versions = fetch_text(http, &format!("{base_url}/api/versions.json")).await?;
    let version = ddragon::latest_version(&versions)?.ok_or(SourceError::NoVersion)?;
    debug!("Latest Data Dragon version: {}", version);

    let champions = fetch_text(
        http,
        &format!("{base_url}/cdn/{version}/data/en_US/champion.json"),
    )
    .await?;
    let raw = ddragon::parse_champions(&champions)?;
    Ok((raw, ddragon::patch_of(&version)))
}

async fn fetch_text(http: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
