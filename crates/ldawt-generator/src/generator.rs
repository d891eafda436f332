use std::fs;
use std::path::{Path, PathBuf};

use ldawt_catalog::{Artifact, Properties, ReplicaCatalog, SiteCatalog, TransformationCatalog};
use ldawt_workflow::Workflow;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::properties::build_properties;
use crate::replicas::build_replica_catalog;
use crate::sites::build_site_catalog;
use crate::stage::{DownloadStage, SplitStage, Stage, build_workflow};
use crate::transformations::build_transformation_catalog;
use crate::validate::check_consistency;

/// Everything produced by one generator run.
#[derive(Debug, Clone)]
pub struct Artifacts {
  /// `None` when the site catalog was skipped.
  pub sites: Option<SiteCatalog>,
  pub properties: Properties,
  pub transformations: TransformationCatalog,
  pub replicas: ReplicaCatalog,
  pub workflow: Workflow,
  /// Where the workflow is written, relative to the output directory unless
  /// absolute.
  pub workflow_file: PathBuf,
}

/// Build the catalogs and the workflow described by `config`.
///
/// Nothing is written; see [`Artifacts::write_all`].
pub fn generate(config: &GeneratorConfig) -> Result<Artifacts, GenerateError> {
  config.validate()?;

  let sites = if config.skip_sites_catalog {
    debug!("skipping site catalog");
    None
  } else {
    info!(execution_site = %config.execution_site, "creating execution sites");
    Some(build_site_catalog(&config.execution_site, &config.work_dir)?)
  };

  info!("creating workflow properties");
  let properties = build_properties(&config.properties);

  info!("creating transformation catalog");
  let transformations = build_transformation_catalog(
    &config.execution_site,
    &config.work_dir,
    &config.executables,
  )?;

  info!("creating replica catalog");
  let replicas = build_replica_catalog(&config.replicas)?;

  info!(groups = config.split.groups, "creating workflow dag");
  let split = SplitStage::new(config.split.clone());
  let download = config
    .download
    .clone()
    .map(|download| DownloadStage::new(config.split.groups, download));
  let mut stages: Vec<&dyn Stage> = vec![&split];
  if let Some(download) = &download {
    stages.push(download);
  }
  let workflow = build_workflow(&config.workflow_name, &stages)?;

  check_consistency(
    &config.execution_site,
    sites.as_ref(),
    &transformations,
    &replicas,
    &workflow,
  )?;

  Ok(Artifacts {
    sites,
    properties,
    transformations,
    replicas,
    workflow,
    workflow_file: config.workflow_file.clone(),
  })
}

impl Artifacts {
  /// Render every artifact paired with the path it is written to, in write
  /// order: sites, properties, replicas, transformations, workflow.
  pub fn render_all(&self, dir: &Path) -> Result<Vec<(PathBuf, String)>, GenerateError> {
    let mut catalogs: Vec<&dyn Artifact> = Vec::with_capacity(4);
    if let Some(sites) = &self.sites {
      catalogs.push(sites);
    }
    catalogs.push(&self.properties);
    catalogs.push(&self.replicas);
    catalogs.push(&self.transformations);

    let mut rendered = catalogs
      .into_iter()
      .map(|artifact| -> Result<_, GenerateError> {
        Ok((dir.join(artifact.default_file_name()), artifact.render()?))
      })
      .collect::<Result<Vec<_>, _>>()?;
    rendered.push((dir.join(&self.workflow_file), self.workflow.render()?));
    Ok(rendered)
  }

  /// Write every artifact into `dir` and return the paths written.
  ///
  /// Stops at the first failure; files already written are left in place.
  pub fn write_all(&self, dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::new();
    for (path, content) in self.render_all(dir)? {
      fs::write(&path, content).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
      })?;
      info!(path = %path.display(), "wrote artifact");
      written.push(path);
    }
    Ok(written)
  }
}
