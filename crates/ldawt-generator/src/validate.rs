use ldawt_catalog::{ReplicaCatalog, SiteCatalog, TransformationCatalog};
use ldawt_workflow::Workflow;

use crate::error::GenerateError;

/// Cross-check the workflow against the catalogs it will be planned with.
///
/// - every job's transformation is registered on the execution site
/// - every input no job produces has a replica
/// - when a site catalog is generated, every site the other catalogs name
///   is in it
///
/// None of this changes what is written; it only refuses configurations
/// the engine would reject at submission time.
pub fn check_consistency(
  execution_site: &str,
  sites: Option<&SiteCatalog>,
  transformations: &TransformationCatalog,
  replicas: &ReplicaCatalog,
  workflow: &Workflow,
) -> Result<(), GenerateError> {
  for job in workflow.jobs() {
    let job_id = job.id.as_deref().unwrap_or_default();

    if transformations.pfn(&job.name, execution_site).is_none() {
      return Err(GenerateError::UnregisteredTransformation {
        job: job_id.to_string(),
        transformation: job.name.clone(),
        site: execution_site.to_string(),
      });
    }

    for file in job.inputs() {
      if workflow.producer_of(file.lfn()).is_none() && !replicas.contains(file.lfn()) {
        return Err(GenerateError::MissingReplica {
          job: job_id.to_string(),
          lfn: file.lfn().to_string(),
        });
      }
    }
  }

  let Some(sites) = sites else {
    return Ok(());
  };

  for transformation in &transformations.transformations {
    for site in &transformation.sites {
      if !sites.contains(&site.name) {
        return Err(GenerateError::UnknownSite {
          site: site.name.clone(),
          referenced_by: format!("transformation '{}'", transformation.name),
        });
      }
    }
  }

  for replica in &replicas.replicas {
    for location in &replica.pfns {
      if !sites.contains(&location.site) {
        return Err(GenerateError::UnknownSite {
          site: location.site.clone(),
          referenced_by: format!("replica '{}'", replica.lfn),
        });
      }
    }
  }

  Ok(())
}
