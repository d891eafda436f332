use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, render_yaml};
use crate::error::CatalogError;

/// Whether the engine copies the executable to the execution site or
/// expects it to be installed there already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationType {
  Stageable,
  Installed,
}

/// Physical location of an executable on one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationSite {
  pub name: String,
  pub pfn: String,
  #[serde(rename = "type")]
  pub kind: TransformationType,
}

/// A logical executable and the sites it can run from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
  pub name: String,
  pub sites: Vec<TransformationSite>,
}

impl Transformation {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      sites: Vec::new(),
    }
  }

  /// Shorthand for a transformation with a single stageable location.
  pub fn stageable(
    name: impl Into<String>,
    site: impl Into<String>,
    pfn: impl Into<String>,
  ) -> Self {
    Self::new(name).with_site(site, pfn, TransformationType::Stageable)
  }

  pub fn with_site(
    mut self,
    site: impl Into<String>,
    pfn: impl Into<String>,
    kind: TransformationType,
  ) -> Self {
    self.sites.push(TransformationSite {
      name: site.into(),
      pfn: pfn.into(),
      kind,
    });
    self
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationCatalog {
  pub transformations: Vec<Transformation>,
}

impl TransformationCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a transformation.
  ///
  /// A name may appear once per site; a transformation whose name already
  /// exists has its sites merged into the existing entry.
  pub fn with_transformation(
    mut self,
    transformation: Transformation,
  ) -> Result<Self, CatalogError> {
    if transformation.name.is_empty() {
      return Err(CatalogError::EmptyName {
        kind: "transformation",
      });
    }
    for (i, site) in transformation.sites.iter().enumerate() {
      if site.name.is_empty() {
        return Err(CatalogError::EmptyName { kind: "site" });
      }
      let repeated = transformation.sites[..i].iter().any(|s| s.name == site.name);
      if repeated || self.pfn(&transformation.name, &site.name).is_some() {
        return Err(CatalogError::DuplicateTransformation {
          name: transformation.name.clone(),
          site: site.name.clone(),
        });
      }
    }

    match self
      .transformations
      .iter_mut()
      .find(|t| t.name == transformation.name)
    {
      Some(existing) => existing.sites.extend(transformation.sites),
      None => self.transformations.push(transformation),
    }
    Ok(self)
  }

  pub fn get(&self, name: &str) -> Option<&Transformation> {
    self.transformations.iter().find(|t| t.name == name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  /// Physical path of `name` on `site`, if registered.
  pub fn pfn(&self, name: &str, site: &str) -> Option<&str> {
    self
      .get(name)?
      .sites
      .iter()
      .find(|s| s.name == site)
      .map(|s| s.pfn.as_str())
  }
}

impl Artifact for TransformationCatalog {
  fn default_file_name(&self) -> &'static str {
    "transformations.yml"
  }

  fn render(&self) -> Result<String, CatalogError> {
    render_yaml(self)
  }
}
