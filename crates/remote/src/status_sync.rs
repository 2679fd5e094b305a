//! Client persisting lane changes to the backend project API.

use std::str::FromStr;
use std::time::Duration;

use board::{Card, CardId, Lane};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the backend base URL.
pub const API_URL_ENV: &str = "KANBAN_API_URL";

#[derive(Debug, Clone, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("json error: {0}")]
    Serde(String),
    #[error("unknown status {0:?} in backend payload")]
    UnknownStatus(String),
    #[error("missing base url: KANBAN_API_URL environment variable not set")]
    MissingBaseUrl,
}

/// Body for a status PATCH.
#[derive(Debug, Serialize)]
struct StatusPatch {
    status: String,
}

/// One project record as the backend serializes it. Kept separate from
/// [`Card`]: the wire status vocabulary is validated at this boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    tags: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRecord> for Card {
    type Error = SyncError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let lane = Lane::from_str(&record.status)
            .map_err(|_| SyncError::UnknownStatus(record.status.clone()))?;
        Ok(Card {
            id: CardId::new(record.id),
            lane,
            title: record.title,
            description: record.description,
            price: record.price,
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Client for the backend's project endpoints.
#[derive(Debug, Clone)]
pub struct StatusSyncClient {
    http: Client,
    base_url: String,
}

impl StatusSyncClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client using the `KANBAN_API_URL` environment variable.
    pub fn from_env() -> Result<Self, SyncError> {
        let base_url = std::env::var(API_URL_ENV).map_err(|_| SyncError::MissingBaseUrl)?;
        Self::new(base_url)
    }

    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("taskboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    /// Persist a lane change: one PATCH, no retry. The caller decides
    /// what to do with a failure; the optimistic board state is never
    /// rolled back here.
    pub async fn sync_status(&self, id: &CardId, lane: Lane) -> Result<(), SyncError> {
        let url = format!("{}/projects/{}/status", self.base_url, id);
        let body = StatusPatch {
            status: lane.to_string(),
        };
        debug!(card_id = %id, status = %body.status, "syncing card status");
        let res = self
            .http
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => Ok(()),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(SyncError::Http { status, body })
            }
        }
    }

    /// Fetch the full card collection for the initial board load.
    pub async fn fetch_cards(&self) -> Result<Vec<Card>, SyncError> {
        let url = format!("{}/projects", self.base_url);
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let records = match res.status() {
            s if s.is_success() => res
                .json::<Vec<ProjectRecord>>()
                .await
                .map_err(|e| SyncError::Serde(e.to_string()))?,
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                return Err(SyncError::Http { status, body });
            }
        };

        records.into_iter().map(Card::try_from).collect()
    }
}

fn map_reqwest_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Timeout
    } else {
        SyncError::Transport(e.to_string())
    }
}
