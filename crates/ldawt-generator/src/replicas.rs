use ldawt_catalog::ReplicaCatalog;

use crate::config::{ReplicaSpec, path_string};
use crate::error::GenerateError;

pub fn build_replica_catalog(replicas: &[ReplicaSpec]) -> Result<ReplicaCatalog, GenerateError> {
  replicas.iter().try_fold(ReplicaCatalog::new(), |catalog, spec| -> Result<_, GenerateError> {
    let pfn = path_string(&spec.pfn)?;
    Ok(catalog.with_replica(spec.site.as_str(), spec.lfn.as_str(), pfn)?)
  })
}
