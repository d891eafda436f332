use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("job has no transformation name")]
  EmptyTransformation,

  #[error("duplicate job id: {0}")]
  DuplicateJobId(String),

  #[error("file '{lfn}' is produced by both '{first}' and '{second}'")]
  DuplicateOutput {
    lfn: String,
    first: String,
    second: String,
  },

  #[error("inferred dependencies form a cycle through job '{0}'")]
  Cycle(String),
}
