use ldawt_catalog::{Namespace, Profiles};
use serde::Serialize;

use crate::file::File;

/// One command-line argument of a job.
///
/// File arguments render as their logical name; the engine rewrites them to
/// the staged path on the execution site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Argument {
  Literal(String),
  File(File),
}

impl From<&str> for Argument {
  fn from(value: &str) -> Self {
    Argument::Literal(value.to_string())
  }
}

impl From<String> for Argument {
  fn from(value: String) -> Self {
    Argument::Literal(value)
  }
}

impl From<File> for Argument {
  fn from(file: File) -> Self {
    Argument::File(file)
  }
}

impl From<&File> for Argument {
  fn from(file: &File) -> Self {
    Argument::File(file.clone())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
  Input,
  Output,
}

/// A file a job reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Use {
  #[serde(rename = "lfn")]
  pub file: File,
  #[serde(rename = "type")]
  pub link: Link,
  /// Copy the output to the local storage site once the job finishes.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stage_out: Option<bool>,
  /// Record the staged output in the replica catalog for later runs.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub register_replica: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum JobType {
  #[default]
  Job,
}

/// An invocation of a transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
  #[serde(rename = "type")]
  kind: JobType,
  /// Transformation name.
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  pub arguments: Vec<Argument>,
  pub uses: Vec<Use>,
  #[serde(skip_serializing_if = "Profiles::is_empty")]
  pub profiles: Profiles,
}

impl Job {
  pub fn new(transformation: impl Into<String>) -> Self {
    Self {
      kind: JobType::Job,
      name: transformation.into(),
      id: None,
      arguments: Vec::new(),
      uses: Vec::new(),
      profiles: Profiles::new(),
    }
  }

  /// Give the job an explicit id instead of a generated one.
  pub fn with_id(mut self, id: impl Into<String>) -> Self {
    self.id = Some(id.into());
    self
  }

  pub fn with_arg(mut self, arg: impl Into<Argument>) -> Self {
    self.arguments.push(arg.into());
    self
  }

  pub fn with_args<I, A>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = A>,
    A: Into<Argument>,
  {
    self.arguments.extend(args.into_iter().map(Into::into));
    self
  }

  /// `--flag value` pair.
  pub fn with_option(self, flag: &str, value: impl Into<Argument>) -> Self {
    self.with_arg(flag).with_arg(value)
  }

  pub fn with_input(mut self, file: File) -> Self {
    self.uses.push(Use {
      file,
      link: Link::Input,
      stage_out: None,
      register_replica: None,
    });
    self
  }

  pub fn with_output(mut self, file: File, stage_out: bool, register_replica: bool) -> Self {
    self.uses.push(Use {
      file,
      link: Link::Output,
      stage_out: Some(stage_out),
      register_replica: Some(register_replica),
    });
    self
  }

  pub fn with_profile(
    mut self,
    namespace: Namespace,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.profiles = self.profiles.with(namespace, key, value);
    self
  }

  pub fn inputs(&self) -> impl Iterator<Item = &File> {
    self
      .uses
      .iter()
      .filter(|u| u.link == Link::Input)
      .map(|u| &u.file)
  }

  pub fn outputs(&self) -> impl Iterator<Item = &File> {
    self
      .uses
      .iter()
      .filter(|u| u.link == Link::Output)
      .map(|u| &u.file)
  }

  pub fn output(&self, lfn: &str) -> Option<&Use> {
    self
      .uses
      .iter()
      .find(|u| u.link == Link::Output && u.file.lfn() == lfn)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder_keeps_argument_order() {
    let input = File::new("in.csv");
    let job = Job::new("Split")
      .with_option("--file", &input)
      .with_option("--groups", "3")
      .with_input(input.clone());

    assert_eq!(
      job.arguments,
      vec![
        Argument::from("--file"),
        Argument::File(input),
        Argument::from("--groups"),
        Argument::from("3"),
      ]
    );
  }

  #[test]
  fn test_inputs_and_outputs_are_split_by_link() {
    let job = Job::new("Split")
      .with_input(File::new("a"))
      .with_output(File::new("b"), true, false)
      .with_input(File::new("c"));

    let inputs: Vec<_> = job.inputs().map(File::lfn).collect();
    let outputs: Vec<_> = job.outputs().map(File::lfn).collect();
    assert_eq!(inputs, vec!["a", "c"]);
    assert_eq!(outputs, vec!["b"]);

    let b = job.output("b").unwrap();
    assert_eq!(b.stage_out, Some(true));
    assert_eq!(b.register_replica, Some(false));
  }

  #[test]
  fn test_file_argument_serializes_as_name() {
    let job = Job::new("Split").with_arg(File::new("in.csv"));
    let value = serde_yaml::to_value(&job).unwrap();

    assert_eq!(value["type"].as_str(), Some("job"));
    assert_eq!(value["arguments"][0].as_str(), Some("in.csv"));
    assert!(value.get("profiles").is_none());
  }
}
