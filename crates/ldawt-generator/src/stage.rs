//! Workflow stages.
//!
//! A stage contributes a batch of jobs. Stages never reference each other:
//! a later stage consumes files an earlier one produces, and the workflow's
//! dependency inference turns that into ordering.

use ldawt_catalog::Namespace;
use ldawt_workflow::{File, Job, Workflow, WorkflowError};
use tracing::debug;

use crate::config::{DOWNLOAD_TRANSFORMATION, DownloadConfig, SPLIT_TRANSFORMATION, SplitConfig};

/// A batch of jobs added to the workflow.
pub trait Stage {
  /// Name used in logs.
  fn name(&self) -> &str;

  /// Jobs of this stage, in the order they are added.
  fn jobs(&self) -> Vec<Job>;
}

/// Output of split job `i` (1-based).
pub fn group_file(i: usize) -> File {
  File::new(format!("group{i}.parquet"))
}

/// Fan-out splitting one CSV into `groups` Parquet files.
///
/// Every job reads the same input and writes its own `group{i}.parquet`, so
/// the jobs share no edges and can all run at once.
#[derive(Debug, Clone)]
pub struct SplitStage {
  config: SplitConfig,
}

impl SplitStage {
  pub fn new(config: SplitConfig) -> Self {
    Self { config }
  }

  pub fn input(&self) -> File {
    File::new(self.config.input.as_str())
  }
}

impl Stage for SplitStage {
  fn name(&self) -> &str {
    "split"
  }

  fn jobs(&self) -> Vec<Job> {
    let input = self.input();
    let groups = self.config.groups.to_string();
    (1..=self.config.groups)
      .map(|i| {
        Job::new(SPLIT_TRANSFORMATION)
          .with_option("--file", &input)
          .with_option("--grouping_col", self.config.grouping_column.as_str())
          .with_option("--groups", groups.as_str())
          .with_option("--output_file", self.config.output_token.as_str())
          .with_input(input.clone())
          .with_output(group_file(i), true, false)
      })
      .collect()
  }
}

/// Per-group asset download chained behind [`SplitStage`].
///
/// Not part of the default pipeline. It is kept so the second phase can be
/// switched on from configuration, but its arguments are the only ones ever
/// described for it and the `Download` executable has not been run against
/// them.
#[derive(Debug, Clone)]
pub struct DownloadStage {
  groups: usize,
  config: DownloadConfig,
}

impl DownloadStage {
  pub fn new(groups: usize, config: DownloadConfig) -> Self {
    Self { groups, config }
  }

  pub fn archive_file(i: usize) -> File {
    File::new(format!("group{i}.tar.gz"))
  }
}

impl Stage for DownloadStage {
  fn name(&self) -> &str {
    "download"
  }

  fn jobs(&self) -> Vec<Job> {
    let download_number = self.config.download_number.to_string();
    (1..=self.groups)
      .map(|i| {
        let group = group_file(i);
        Job::new(DOWNLOAD_TRANSFORMATION)
          .with_option("--input_path", &group)
          .with_option("--output_folder", format!("group{i}"))
          .with_option("--url_name", self.config.url_column.as_str())
          .with_option("--class_name", self.config.class_column.as_str())
          .with_option("--download_number", download_number.as_str())
          .with_input(group)
          .with_output(Self::archive_file(i), true, true)
          .with_profile(
            Namespace::Condor,
            "request_memory",
            self.config.request_memory.as_str(),
          )
      })
      .collect()
  }
}

/// Assemble a workflow with dependency inference on from `stages`, in order.
pub fn build_workflow(name: &str, stages: &[&dyn Stage]) -> Result<Workflow, WorkflowError> {
  stages
    .iter()
    .try_fold(Workflow::new(name, true), |workflow, stage| {
      let jobs = stage.jobs();
      debug!(stage = stage.name(), jobs = jobs.len(), "adding stage");
      workflow.add_jobs(jobs)
    })
}

#[cfg(test)]
mod tests {
  use ldawt_workflow::Argument;

  use super::*;

  #[test]
  fn test_split_arguments() {
    let jobs = SplitStage::new(SplitConfig::default()).jobs();
    let input = File::new("hundred_AIIRA.csv");

    assert_eq!(jobs.len(), 10);
    assert_eq!(
      jobs[0].arguments,
      vec![
        Argument::from("--file"),
        Argument::File(input.clone()),
        Argument::from("--grouping_col"),
        Argument::from("name"),
        Argument::from("--groups"),
        Argument::from("10"),
        Argument::from("--output_file"),
        Argument::from("output"),
      ]
    );
    assert_eq!(jobs[0].inputs().collect::<Vec<_>>(), vec![&input]);
  }

  #[test]
  fn test_split_outputs_are_distinct() {
    let config = SplitConfig {
      groups: 25,
      ..Default::default()
    };
    let jobs = SplitStage::new(config).jobs();

    let mut outputs: Vec<_> = jobs
      .iter()
      .flat_map(|j| j.outputs().map(|f| f.lfn().to_string()))
      .collect();
    assert_eq!(outputs.len(), 25);
    outputs.sort();
    outputs.dedup();
    assert_eq!(outputs.len(), 25);
  }

  #[test]
  fn test_download_chains_behind_split() {
    let split = SplitStage::new(SplitConfig {
      groups: 3,
      ..Default::default()
    });
    let download = DownloadStage::new(3, DownloadConfig::default());

    let workflow = build_workflow("ldawt", &[&split, &download]).unwrap();
    let graph = workflow.graph();

    assert_eq!(workflow.jobs().len(), 6);
    assert_eq!(graph.entry_points().len(), 3);
    for i in 1..=3 {
      let parent = format!("ID{i:07}");
      let child = format!("ID{:07}", i + 3);
      assert_eq!(graph.downstream(&parent), &[child]);
    }

    let first = &workflow.jobs()[3];
    assert_eq!(first.name, "Download");
    assert_eq!(
      first.profiles.get(Namespace::Condor, "request_memory"),
      Some("200")
    );
    let archive = first.output("group1.tar.gz").unwrap();
    assert_eq!(archive.stage_out, Some(true));
    assert_eq!(archive.register_replica, Some(true));
  }

  #[test]
  fn test_stage_applied_twice_collides() {
    let split = SplitStage::new(SplitConfig::default());
    let result = build_workflow("ldawt", &[&split, &split]);

    assert!(matches!(result, Err(WorkflowError::DuplicateOutput { .. })));
  }
}
