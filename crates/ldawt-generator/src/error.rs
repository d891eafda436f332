use std::path::PathBuf;

use ldawt_catalog::CatalogError;
use ldawt_workflow::WorkflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("path is not valid UTF-8: {}", .0.display())]
  NonUtf8Path(PathBuf),

  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error(transparent)]
  Workflow(#[from] WorkflowError),

  #[error("job '{job}' runs '{transformation}', which is not registered on site '{site}'")]
  UnregisteredTransformation {
    job: String,
    transformation: String,
    site: String,
  },

  #[error("job '{job}' reads '{lfn}', which no job produces and no replica provides")]
  MissingReplica { job: String, lfn: String },

  #[error("site '{site}' referenced by {referenced_by} is not in the site catalog")]
  UnknownSite { site: String, referenced_by: String },

  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
