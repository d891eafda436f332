use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, render_yaml};
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaLocation {
  pub site: String,
  pub pfn: String,
}

/// Every known physical location of one logical file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replica {
  pub lfn: String,
  pub pfns: Vec<ReplicaLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaCatalog {
  pub replicas: Vec<Replica>,
}

impl ReplicaCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `lfn` at `pfn` on `site`.
  ///
  /// Locations for an already known logical file are appended to its entry.
  /// Registering the exact same triple twice is an error.
  pub fn with_replica(
    mut self,
    site: impl Into<String>,
    lfn: impl Into<String>,
    pfn: impl Into<String>,
  ) -> Result<Self, CatalogError> {
    let (site, lfn, pfn) = (site.into(), lfn.into(), pfn.into());
    if lfn.is_empty() {
      return Err(CatalogError::EmptyName { kind: "replica" });
    }
    if site.is_empty() {
      return Err(CatalogError::EmptyName { kind: "site" });
    }

    let location = ReplicaLocation { site, pfn };
    match self.replicas.iter_mut().find(|r| r.lfn == lfn) {
      Some(existing) if existing.pfns.contains(&location) => {
        return Err(CatalogError::DuplicateReplica {
          lfn,
          site: location.site,
          pfn: location.pfn,
        });
      }
      Some(existing) => existing.pfns.push(location),
      None => self.replicas.push(Replica {
        lfn,
        pfns: vec![location],
      }),
    }
    Ok(self)
  }

  pub fn get(&self, lfn: &str) -> Option<&Replica> {
    self.replicas.iter().find(|r| r.lfn == lfn)
  }

  pub fn contains(&self, lfn: &str) -> bool {
    self.get(lfn).is_some()
  }

  /// All sites referenced by any replica, in registration order.
  pub fn sites(&self) -> impl Iterator<Item = &str> {
    self
      .replicas
      .iter()
      .flat_map(|r| r.pfns.iter().map(|p| p.site.as_str()))
  }
}

impl Artifact for ReplicaCatalog {
  fn default_file_name(&self) -> &'static str {
    "replicas.yml"
  }

  fn render(&self) -> Result<String, CatalogError> {
    render_yaml(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_groups_locations_by_lfn() {
    let catalog = ReplicaCatalog::new()
      .with_replica("local", "data.csv", "/a/data.csv")
      .unwrap()
      .with_replica("remote", "data.csv", "gsiftp://host/data.csv")
      .unwrap()
      .with_replica("local", "other.csv", "/a/other.csv")
      .unwrap();

    assert_eq!(catalog.replicas.len(), 2);
    assert_eq!(catalog.get("data.csv").unwrap().pfns.len(), 2);
    assert_eq!(
      catalog.sites().collect::<Vec<_>>(),
      vec!["local", "remote", "local"]
    );
  }

  #[test]
  fn test_rejects_exact_duplicate() {
    let result = ReplicaCatalog::new()
      .with_replica("local", "data.csv", "/a/data.csv")
      .unwrap()
      .with_replica("local", "data.csv", "/a/data.csv");

    assert!(matches!(result, Err(CatalogError::DuplicateReplica { .. })));
  }

  #[test]
  fn test_rejects_empty_lfn() {
    let result = ReplicaCatalog::new().with_replica("local", "", "/a");
    assert!(matches!(
      result,
      Err(CatalogError::EmptyName { kind: "replica" })
    ));
  }
}
