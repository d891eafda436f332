use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::artifact::{Artifact, render_yaml};
use crate::error::CatalogError;
use crate::profile::{Namespace, Profiles};

/// Role a directory plays on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryType {
  SharedScratch,
  SharedStorage,
  LocalScratch,
  LocalStorage,
}

/// Operations a file server permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
  Get,
  Put,
  All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileServer {
  pub url: String,
  pub operation: Operation,
}

impl FileServer {
  pub fn new(url: impl Into<String>, operation: Operation) -> Self {
    Self {
      url: url.into(),
      operation,
    }
  }

  /// A `file://` server for an absolute local path.
  pub fn local(path: &Path, operation: Operation) -> Result<Self, CatalogError> {
    let url = Url::from_file_path(path)
      .map_err(|()| CatalogError::RelativePath(path.display().to_string()))?;
    Ok(Self::new(url, operation))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
  #[serde(rename = "type")]
  pub kind: DirectoryType,
  pub path: String,
  #[serde(default)]
  pub file_servers: Vec<FileServer>,
}

impl Directory {
  pub fn new(kind: DirectoryType, path: impl Into<String>) -> Self {
    Self {
      kind,
      path: path.into(),
      file_servers: Vec::new(),
    }
  }

  pub fn with_file_server(mut self, server: FileServer) -> Self {
    self.file_servers.push(server);
    self
  }
}

/// A named execution or storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
  pub name: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub directories: Vec<Directory>,
  #[serde(default, skip_serializing_if = "Profiles::is_empty")]
  pub profiles: Profiles,
}

impl Site {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      directories: Vec::new(),
      profiles: Profiles::new(),
    }
  }

  pub fn with_directory(mut self, directory: Directory) -> Self {
    self.directories.push(directory);
    self
  }

  pub fn with_profile(
    mut self,
    namespace: Namespace,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.profiles = self.profiles.with(namespace, key, value);
    self
  }

  /// Find the first directory playing the given role.
  pub fn directory(&self, kind: DirectoryType) -> Option<&Directory> {
    self.directories.iter().find(|d| d.kind == kind)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCatalog {
  pub sites: Vec<Site>,
}

impl SiteCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a site. Names must be non-empty and unique within the catalog.
  pub fn with_site(mut self, site: Site) -> Result<Self, CatalogError> {
    if site.name.is_empty() {
      return Err(CatalogError::EmptyName { kind: "site" });
    }
    if self.contains(&site.name) {
      return Err(CatalogError::DuplicateSite(site.name));
    }
    self.sites.push(site);
    Ok(self)
  }

  pub fn get(&self, name: &str) -> Option<&Site> {
    self.sites.iter().find(|s| s.name == name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }
}

impl Artifact for SiteCatalog {
  fn default_file_name(&self) -> &'static str {
    "sites.yml"
  }

  fn render(&self) -> Result<String, CatalogError> {
    render_yaml(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rejects_duplicate_site() {
    let result = SiteCatalog::new()
      .with_site(Site::new("local"))
      .unwrap()
      .with_site(Site::new("local"));

    assert!(matches!(result, Err(CatalogError::DuplicateSite(name)) if name == "local"));
  }

  #[test]
  fn test_rejects_empty_site_name() {
    let result = SiteCatalog::new().with_site(Site::new(""));
    assert!(matches!(result, Err(CatalogError::EmptyName { kind: "site" })));
  }

  #[test]
  fn test_local_file_server_url() {
    let server = FileServer::local(Path::new("/work/scratch"), Operation::All).unwrap();
    assert_eq!(server.url, "file:///work/scratch");
  }

  #[test]
  fn test_local_file_server_requires_absolute_path() {
    let result = FileServer::local(Path::new("scratch"), Operation::All);
    assert!(matches!(result, Err(CatalogError::RelativePath(_))));
  }

  #[test]
  fn test_render_uses_engine_field_names() {
    let catalog = SiteCatalog::new()
      .with_site(
        Site::new("local").with_directory(
          Directory::new(DirectoryType::SharedScratch, "/work/scratch")
            .with_file_server(FileServer::new("file:///work/scratch", Operation::All)),
        ),
      )
      .unwrap();

    let yaml = catalog.render().unwrap();

    assert!(yaml.contains("type: sharedScratch"));
    assert!(yaml.contains("fileServers:"));
    assert!(yaml.contains("operation: all"));
    assert!(!yaml.contains("profiles"));
  }
}
