//! Dependency inference across a multi-stage workflow.

use ldawt_catalog::{Artifact, Namespace};
use ldawt_workflow::{File, Job, Workflow};

fn split_then_process(groups: usize) -> Workflow {
  let input = File::new("input.csv");
  let split = (1..=groups).map(|i| {
    Job::new("Split")
      .with_option("--file", &input)
      .with_input(input.clone())
      .with_output(File::new(format!("part{i}")), true, false)
  });
  let process = (1..=groups).map(|i| {
    Job::new("Process")
      .with_input(File::new(format!("part{i}")))
      .with_output(File::new(format!("result{i}")), true, true)
      .with_profile(Namespace::Condor, "request_memory", "200")
  });

  Workflow::new("pipeline", true)
    .add_jobs(split.chain(process))
    .unwrap()
}

#[test]
fn second_stage_hangs_off_first() {
  let wf = split_then_process(3);
  let graph = wf.graph();

  assert_eq!(graph.entry_points(), &["ID0000001", "ID0000002", "ID0000003"]);
  assert_eq!(graph.downstream("ID0000001"), &["ID0000004"]);
  assert_eq!(graph.downstream("ID0000003"), &["ID0000006"]);
  assert_eq!(graph.edge_count(), 3);
}

#[test]
fn rendered_dependencies_match_graph() {
  let wf = split_then_process(2);
  let yaml = wf.render().unwrap();
  let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

  let deps = value["jobDependencies"].as_sequence().unwrap();
  assert_eq!(deps.len(), 2);
  assert_eq!(deps[0]["id"].as_str(), Some("ID0000001"));
  assert_eq!(deps[0]["children"][0].as_str(), Some("ID0000003"));

  let process = &value["jobs"][2];
  assert_eq!(process["name"].as_str(), Some("Process"));
  assert_eq!(process["profiles"]["condor"]["request_memory"].as_str(), Some("200"));
  assert_eq!(process["uses"][1]["registerReplica"].as_bool(), Some(true));
}

#[test]
fn producer_lookup() {
  let wf = split_then_process(2);

  assert_eq!(wf.producer_of("part2"), Some("ID0000002"));
  assert_eq!(wf.producer_of("input.csv"), None);
}
