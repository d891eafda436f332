use ldawt_catalog::{Artifact, CatalogError, render_yaml};
use serde::Serialize;

use crate::error::WorkflowError;
use crate::graph::{Dependency, Graph};
use crate::job::Job;

/// An abstract workflow: named jobs whose ordering the engine derives from
/// the files they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
  name: String,
  infer_dependencies: bool,
  jobs: Vec<Job>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowDocument<'a> {
  name: &'a str,
  jobs: &'a [Job],
  job_dependencies: Vec<Dependency>,
}

impl Workflow {
  pub fn new(name: impl Into<String>, infer_dependencies: bool) -> Self {
    Self {
      name: name.into(),
      infer_dependencies,
      jobs: Vec::new(),
    }
  }

  /// Add a job, assigning the next sequential id when it has none.
  ///
  /// Rejects jobs that would produce a file another job already produces,
  /// reuse an id, or (with inference on) close a dependency cycle.
  pub fn add_job(mut self, mut job: Job) -> Result<Self, WorkflowError> {
    if job.name.is_empty() {
      return Err(WorkflowError::EmptyTransformation);
    }

    let id = match job.id.take() {
      Some(id) => id,
      None => self.next_free_id(),
    };
    if self.get_job(&id).is_some() {
      return Err(WorkflowError::DuplicateJobId(id));
    }

    let mut seen: Vec<&str> = Vec::new();
    for file in job.outputs() {
      if let Some(first) = self.producer_of(file.lfn()) {
        return Err(WorkflowError::DuplicateOutput {
          lfn: file.lfn().to_string(),
          first: first.to_string(),
          second: id,
        });
      }
      if seen.contains(&file.lfn()) {
        return Err(WorkflowError::DuplicateOutput {
          lfn: file.lfn().to_string(),
          first: id.clone(),
          second: id,
        });
      }
      seen.push(file.lfn());
    }

    job.id = Some(id);
    self.jobs.push(job);

    if self.infer_dependencies {
      self.graph().topological_order()?;
    }
    Ok(self)
  }

  /// First `ID{n:07}` not already taken, counting up from the job count.
  fn next_free_id(&self) -> String {
    (self.jobs.len() + 1..)
      .map(|n| format!("ID{n:07}"))
      .find(|id| self.get_job(id).is_none())
      .unwrap_or_default()
  }

  /// Add several jobs in order, stopping at the first rejected one.
  pub fn add_jobs(self, jobs: impl IntoIterator<Item = Job>) -> Result<Self, WorkflowError> {
    jobs.into_iter().try_fold(self, Workflow::add_job)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn infers_dependencies(&self) -> bool {
    self.infer_dependencies
  }

  pub fn jobs(&self) -> &[Job] {
    &self.jobs
  }

  pub fn get_job(&self, id: &str) -> Option<&Job> {
    self.jobs.iter().find(|j| j.id.as_deref() == Some(id))
  }

  /// Id of the job producing `lfn`, if any.
  pub fn producer_of(&self, lfn: &str) -> Option<&str> {
    self
      .jobs
      .iter()
      .find(|j| j.outputs().any(|f| f.lfn() == lfn))
      .and_then(|j| j.id.as_deref())
  }

  /// Build the inferred dependency graph.
  pub fn graph(&self) -> Graph {
    Graph::infer(&self.jobs)
  }
}

impl Artifact for Workflow {
  fn default_file_name(&self) -> &'static str {
    "workflow.yml"
  }

  fn render(&self) -> Result<String, CatalogError> {
    let job_dependencies = if self.infer_dependencies {
      self.graph().dependencies()
    } else {
      Vec::new()
    };
    render_yaml(&WorkflowDocument {
      name: &self.name,
      jobs: &self.jobs,
      job_dependencies,
    })
  }
}
