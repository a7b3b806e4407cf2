// Live session observer and its polling task.
//
// The poller awaits each fetch before sleeping, so polls never overlap. It
// stops when the receiving side goes away or when its handle is aborted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pickwise_core::session::SessionSnapshot;
use reqwest::StatusCode;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::sources::SourceError;

/// Source of champion-select snapshots.
///
/// `Ok(None)` means the source answered but has nothing to report (no
/// session in progress). `Err` means it could not be reached or understood.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn fetch(&self) -> Result<Option<SessionSnapshot>, SourceError>;
}

/// Polls the local bridge's champion-select endpoint over HTTP.
pub struct HttpSessionObserver {
    http: reqwest::Client,
    url: String,
}

impl HttpSessionObserver {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpSessionObserver {
            http,
            url: url.into(),
        })
    }

    /// Build an observer from config, or `None` when the session source is
    /// disabled.
    pub fn from_config(config: &SessionConfig) -> Result<Option<Self>, SourceError> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(config.url.clone(), config.timeout).map(Some)
    }
}

#[async_trait]
impl SessionObserver for HttpSessionObserver {
    async fn fetch(&self) -> Result<Option<SessionSnapshot>, SourceError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT || !status.is_success() {
            debug!("Session endpoint returned {}", status);
            return Ok(None);
        }
        let body = response.bytes().await?;
        let snapshot: SessionSnapshot = serde_json::from_slice(&body)?;
        Ok(Some(snapshot))
    }
}

/// One poll outcome, forwarded to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Snapshot(SessionSnapshot),
    NoData,
    Unavailable,
}

/// Spawn the polling task. The first poll happens immediately.
pub fn spawn_poller(
    observer: Arc<dyn SessionObserver>,
    interval: Duration,
    tx: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Session poller started (interval {:?})", interval);
        loop {
            let event = match observer.fetch().await {
                Ok(Some(snapshot)) => SessionEvent::Snapshot(snapshot),
                Ok(None) => SessionEvent::NoData,
                Err(e) => {
                    debug!("Session poll failed: {}", e);
                    SessionEvent::Unavailable
                }
            };
            if tx.send(event).await.is_err() {
                info!("Session channel closed, stopping poller");
                break;
            }
            tokio::time::sleep(interval).await;
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================
