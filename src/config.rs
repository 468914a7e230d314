//! Configuration management for the API portal
//!
//! Configuration is loaded from environment variables. Both the preview
//! server and the `generate_index` build step read the same [`SiteLayout`];
//! only the server reads the bind address.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Directory (relative to the site root) holding the OpenAPI YAML files
pub const SPECS_DIR_NAME: &str = "openapi";

/// File name of the generated sidebar index
pub const INDEX_FILE_NAME: &str = "sidebar-data.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Root of the static site (HTML, CSS, JS assets)
    pub site_dir: PathBuf,
    /// Directory scanned by the indexer and served under `/openapi`
    pub specs_dir: PathBuf,
    /// Output path of the generated index
    pub index_path: PathBuf,
}

/// Where the site, the specs and the generated index live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub site_dir: PathBuf,
    pub specs_dir: PathBuf,
    pub index_path: PathBuf,
}

impl SiteLayout {
    /// Resolve the layout from `PORTAL_SITE_DIR`, `PORTAL_SPECS_DIR` and
    /// `PORTAL_INDEX_PATH`; never fails
    pub fn from_env() -> Self {
        let site_dir = env::var("PORTAL_SITE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("site"));

        Self {
            specs_dir: env::var("PORTAL_SPECS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| site_dir.join(SPECS_DIR_NAME)),
            index_path: env::var("PORTAL_INDEX_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| site_dir.join(INDEX_FILE_NAME)),
            site_dir,
        }
    }

    /// Conventional layout rooted at `site_dir`
    pub fn for_site(site_dir: impl Into<PathBuf>) -> Self {
        let site_dir = site_dir.into();
        Self {
            specs_dir: site_dir.join(SPECS_DIR_NAME),
            index_path: site_dir.join(INDEX_FILE_NAME),
            site_dir,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORTAL_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("Invalid PORTAL_PORT")?;

        Ok(Self::with_layout(
            env::var("PORTAL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            SiteLayout::from_env(),
        ))
    }

    fn with_layout(host: String, port: u16, layout: SiteLayout) -> Self {
        Self {
            host,
            port,
            site_dir: layout.site_dir,
            specs_dir: layout.specs_dir,
            index_path: layout.index_path,
        }
    }

    /// Configuration rooted at `site_dir` with the conventional layout
    pub fn for_site(site_dir: impl Into<PathBuf>) -> Self {
        Self::with_layout("127.0.0.1".to_string(), 0, SiteLayout::for_site(site_dir))
    }
}
