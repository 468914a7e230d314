//! Common test utilities for the API portal
//!
//! Fixture spec documents and helpers for laying out a site directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use api_portal::SpecMetadata;
use tempfile::TempDir;

/// Fixture OpenAPI documents
pub mod fixtures {
    pub const USERS: &str = r#"openapi: 3.0.0
info:
  title: User Endpoints
  description: Login and profile management
  version: 2.0.0
paths:
  /login:
    post:
      summary: Log in
"#;

    pub const DOWNLOADS: &str = r#"openapi: 3.0.0
info:
  title: Download Plugin
  version: 1.2.0
paths: {}
"#;

    pub const SEARCH: &str = r#"openapi: 3.0.0
info:
  description: Search the repository
paths: {}
"#;

    pub const VISUALIZATION: &str = r#"openapi: 3.0.0
info:
  title: Visualization Plugin
  description: Render designs
paths: {}
"#;

    pub const BROKEN: &str = "openapi: 3.0.0\ninfo: [title: oops\n";
}

/// Write `content` to `dir/name`, creating `dir` if needed
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// A specs directory with a representative mix of files
pub fn sample_specs_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "10-users.yaml", fixtures::USERS);
    write_file(dir.path(), "20-download.yml", fixtures::DOWNLOADS);
    write_file(dir.path(), "search.yaml", fixtures::SEARCH);
    write_file(dir.path(), "visualization.yaml", fixtures::VISUALIZATION);
    write_file(dir.path(), "broken.yaml", fixtures::BROKEN);
    write_file(dir.path(), "README.md", "# Not a spec\n");
    dir
}

/// A site directory with specs under `openapi/` and a generated index
pub fn sample_site() -> TempDir {
    let site = tempfile::tempdir().unwrap();
    let specs = site.path().join("openapi");
    write_file(&specs, "10-users.yaml", fixtures::USERS);
    write_file(&specs, "visualization.yaml", fixtures::VISUALIZATION);
    write_file(&site.path().join("css"), "styles.css", "body { margin: 0; }\n");

    let mut index = api_portal::indexer::index(&specs);
    // Listed in the index but missing on disk
    index.push(SpecMetadata {
        id: "retired".to_string(),
        title: "Retired API".to_string(),
        description: String::new(),
        version: "0.9.0".to_string(),
        order: 999,
    });
    api_portal::indexer::write_index(&site.path().join("sidebar-data.json"), &index).unwrap();

    site
}
