//! Where the shell gets its data from
//!
//! A [`SpecSource`] supplies the generated index and resolves a spec id to
//! the URL the rendering widget should load.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::config::{Config, INDEX_FILE_NAME, SPECS_DIR_NAME};
use crate::error::FetchError;
use crate::indexer::SpecMetadata;

/// Extension of the spec documents served to the widget
pub const SPEC_EXTENSION: &str = "yaml";

/// Site-relative path of the document for `id`
pub fn spec_path(id: &str) -> String {
    format!("{SPECS_DIR_NAME}/{id}.{SPEC_EXTENSION}")
}

fn spec_file_name(id: &str) -> String {
    format!("{id}.{SPEC_EXTENSION}")
}

/// Index and spec document provider
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Fetch the sidebar index
    async fn fetch_index(&self) -> Result<Vec<SpecMetadata>, FetchError>;

    /// Confirm the document for `id` exists and return its URL
    async fn resolve_spec(&self, id: &str) -> Result<String, FetchError>;
}

/// Reads a deployed portal over HTTP
#[derive(Debug, Clone)]
pub struct HttpPortalClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpPortalClient {
    /// Create a client for the portal rooted at `base_url`
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Result<Self, FetchError> {
        // Url::join drops the last path segment unless it ends with a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&normalized).map_err(|e| FetchError::Transport {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url.join(path).map_err(|e| FetchError::Transport {
            url: format!("{}{}", self.base_url, path),
            message: e.to_string(),
        })
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, FetchError> {
        debug!(url = %url, "Fetching");
        self.http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl SpecSource for HttpPortalClient {
    async fn fetch_index(&self) -> Result<Vec<SpecMetadata>, FetchError> {
        let url = self.url_for(INDEX_FILE_NAME)?;
        let response = self.get(url.clone()).await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Vec<SpecMetadata>>()
            .await
            .map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn resolve_spec(&self, id: &str) -> Result<String, FetchError> {
        let url = self.url_for(&spec_path(id))?;
        let response = self.get(url.clone()).await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.url().to_string())
        } else if status == StatusCode::NOT_FOUND {
            Err(FetchError::NotFound(spec_file_name(id)))
        } else {
            Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// Reads the index and specs straight from a site directory
///
/// Used by the preview server; resolved URLs are root-relative so the
/// browser fetches them from the same server.
#[derive(Debug, Clone)]
pub struct LocalSite {
    index_path: PathBuf,
    specs_dir: PathBuf,
}

impl LocalSite {
    pub fn new(index_path: impl Into<PathBuf>, specs_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            specs_dir: specs_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.index_path, &config.specs_dir)
    }
}

/// Ids must name a file directly inside the specs directory
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

#[async_trait]
impl SpecSource for LocalSite {
    async fn fetch_index(&self) -> Result<Vec<SpecMetadata>, FetchError> {
        let location = self.index_path.display().to_string();

        let raw = tokio::fs::read_to_string(&self.index_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FetchError::NotFound(location.clone()),
                _ => FetchError::Transport {
                    url: location.clone(),
                    message: e.to_string(),
                },
            })?;

        serde_json::from_str(&raw).map_err(|e| FetchError::Decode {
            url: location,
            message: e.to_string(),
        })
    }

    async fn resolve_spec(&self, id: &str) -> Result<String, FetchError> {
        if !is_plain_id(id) {
            return Err(FetchError::NotFound(spec_file_name(id)));
        }

        let path = self.specs_dir.join(spec_file_name(id));
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(format!("/{}", spec_path(id))),
            _ => Err(FetchError::NotFound(spec_file_name(id))),
        }
    }
}
