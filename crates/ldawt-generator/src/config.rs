use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ldawt_catalog::{IntegrityChecking, Mode};
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

pub const WORKFLOW_NAME: &str = "ldawt";
pub const LOCAL_SITE: &str = "local";
pub const DEFAULT_EXECUTION_SITE: &str = "condorpool";
pub const DEFAULT_INPUT: &str = "hundred_AIIRA.csv";
pub const SPLIT_TRANSFORMATION: &str = "SplitParquet";
pub const DOWNLOAD_TRANSFORMATION: &str = "Download";

/// A physical copy of a workflow input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaSpec {
  pub site: String,
  pub lfn: String,
  /// Absolute path or URL of the copy.
  pub pfn: PathBuf,
}

/// Parameters of the CSV → Parquet fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
  /// Logical name of the CSV every split job reads.
  pub input: String,
  pub grouping_column: String,
  /// Number of split jobs, and of `group{i}.parquet` outputs.
  pub groups: usize,
  /// Value passed as `--output_file`.
  pub output_token: String,
}

impl Default for SplitConfig {
  fn default() -> Self {
    Self {
      input: DEFAULT_INPUT.to_string(),
      grouping_column: "name".to_string(),
      groups: 10,
      output_token: "output".to_string(),
    }
  }
}

/// Parameters of the per-group download stage.
///
/// This stage was never wired into a production run; the values below are
/// the only ones it has been described with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
  pub url_column: String,
  pub class_column: String,
  pub download_number: u32,
  /// Condor `request_memory`, in MB.
  pub request_memory: String,
}

impl Default for DownloadConfig {
  fn default() -> Self {
    Self {
      url_column: "photo_url".to_string(),
      class_column: "name".to_string(),
      download_number: 1,
      request_memory: "200".to_string(),
    }
  }
}

/// Engine properties to set. Nothing is set by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mode: Option<Mode>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub integrity_checking: Option<IntegrityChecking>,
  /// Passed through verbatim.
  #[serde(default)]
  pub extra: BTreeMap<String, String>,
}

/// Everything one generator run depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
  /// Absolute directory the pipeline lives in; `bin/`, `input/`,
  /// `scratch/` and `output/` are resolved against it.
  pub work_dir: PathBuf,
  pub workflow_name: String,
  /// Workflow file name, relative to the output directory unless absolute.
  pub workflow_file: PathBuf,
  pub skip_sites_catalog: bool,
  pub execution_site: String,
  /// Executables registered from `bin/` on the execution site.
  pub executables: Vec<String>,
  pub replicas: Vec<ReplicaSpec>,
  pub split: SplitConfig,
  /// Chain a download job behind every split job.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub download: Option<DownloadConfig>,
  #[serde(default)]
  pub properties: PropertiesConfig,
}

impl GeneratorConfig {
  /// Defaults for the LDAWT pipeline rooted at `work_dir`.
  pub fn new(work_dir: impl Into<PathBuf>) -> Self {
    let work_dir = work_dir.into();
    let input = work_dir.join("input").join(DEFAULT_INPUT);
    Self {
      workflow_name: WORKFLOW_NAME.to_string(),
      workflow_file: PathBuf::from("workflow.yml"),
      skip_sites_catalog: false,
      execution_site: DEFAULT_EXECUTION_SITE.to_string(),
      executables: vec![
        SPLIT_TRANSFORMATION.to_string(),
        DOWNLOAD_TRANSFORMATION.to_string(),
      ],
      replicas: vec![ReplicaSpec {
        site: LOCAL_SITE.to_string(),
        lfn: DEFAULT_INPUT.to_string(),
        pfn: input,
      }],
      split: SplitConfig::default(),
      download: None,
      properties: PropertiesConfig::default(),
      work_dir,
    }
  }

  pub fn with_execution_site(mut self, site: impl Into<String>) -> Self {
    self.execution_site = site.into();
    self
  }

  pub fn with_skip_sites_catalog(mut self, skip: bool) -> Self {
    self.skip_sites_catalog = skip;
    self
  }

  pub fn with_workflow_file(mut self, file: impl Into<PathBuf>) -> Self {
    self.workflow_file = file.into();
    self
  }

  pub fn with_split_groups(mut self, groups: usize) -> Self {
    self.split.groups = groups;
    self
  }

  pub fn with_download(mut self, download: DownloadConfig) -> Self {
    self.download = Some(download);
    self
  }

  pub fn with_properties(mut self, properties: PropertiesConfig) -> Self {
    self.properties = properties;
    self
  }

  pub fn with_replica(
    mut self,
    site: impl Into<String>,
    lfn: impl Into<String>,
    pfn: impl Into<PathBuf>,
  ) -> Self {
    self.replicas.push(ReplicaSpec {
      site: site.into(),
      lfn: lfn.into(),
      pfn: pfn.into(),
    });
    self
  }

  pub fn validate(&self) -> Result<(), GenerateError> {
    if !self.work_dir.is_absolute() {
      return Err(GenerateError::InvalidConfig(format!(
        "work_dir must be absolute: {}",
        self.work_dir.display()
      )));
    }
    if self.workflow_name.is_empty() {
      return Err(GenerateError::InvalidConfig(
        "workflow_name must not be empty".to_string(),
      ));
    }
    if self.execution_site.is_empty() {
      return Err(GenerateError::InvalidConfig(
        "execution_site must not be empty".to_string(),
      ));
    }
    if self.split.groups == 0 {
      return Err(GenerateError::InvalidConfig(
        "split.groups must be at least 1".to_string(),
      ));
    }
    Ok(())
  }
}

pub(crate) fn path_string(path: &Path) -> Result<String, GenerateError> {
  path
    .to_str()
    .map(str::to_string)
    .ok_or_else(|| GenerateError::NonUtf8Path(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = GeneratorConfig::new("/work");

    assert_eq!(config.execution_site, "condorpool");
    assert_eq!(config.workflow_file, PathBuf::from("workflow.yml"));
    assert!(!config.skip_sites_catalog);
    assert_eq!(config.split.groups, 10);
    assert_eq!(config.executables, vec!["SplitParquet", "Download"]);
    assert_eq!(
      config.replicas[0].pfn,
      PathBuf::from("/work/input/hundred_AIIRA.csv")
    );
    assert!(config.download.is_none());
    config.validate().unwrap();
  }

  #[test]
  fn test_rejects_relative_work_dir() {
    let result = GeneratorConfig::new("relative").validate();
    assert!(matches!(result, Err(GenerateError::InvalidConfig(_))));
  }

  #[test]
  fn test_rejects_zero_groups() {
    let result = GeneratorConfig::new("/work").with_split_groups(0).validate();
    assert!(matches!(result, Err(GenerateError::InvalidConfig(_))));
  }
}
