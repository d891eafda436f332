use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("{kind} name must not be empty")]
  EmptyName { kind: &'static str },

  #[error("duplicate site: {0}")]
  DuplicateSite(String),

  #[error("duplicate transformation '{name}' on site '{site}'")]
  DuplicateTransformation { name: String, site: String },

  #[error("duplicate replica '{lfn}' at '{pfn}' on site '{site}'")]
  DuplicateReplica {
    lfn: String,
    site: String,
    pfn: String,
  },

  #[error("file server path is not absolute: {0}")]
  RelativePath(String),

  #[error("failed to serialize catalog: {0}")]
  Serialize(#[from] serde_yaml::Error),
}
