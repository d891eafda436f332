use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::error::WorkflowError;
use crate::job::Job;

/// A parent job and the jobs that consume its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
  pub id: String,
  pub children: Vec<String>,
}

/// Job graph inferred from shared file references.
///
/// Every list is kept in job order so that anything derived from the graph
/// is deterministic.
#[derive(Debug, Clone)]
pub struct Graph {
  /// Job ids in the order the jobs were given.
  order: Vec<String>,
  /// Adjacency list: job_id -> list of downstream job_ids.
  adjacency: HashMap<String, Vec<String>>,
  /// Reverse adjacency: job_id -> list of upstream job_ids.
  reverse_adjacency: HashMap<String, Vec<String>>,
  /// Jobs with no upstream producer.
  entry_points: Vec<String>,
}

impl Graph {
  /// Infer edges from producers to consumers.
  ///
  /// Jobs without an id are left out. When several jobs claim the same
  /// output the last one wins; [`crate::Workflow`] rejects that case before
  /// a graph is ever built.
  pub fn infer(jobs: &[Job]) -> Self {
    let mut order = Vec::new();
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut reverse_adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut producers: HashMap<&str, &str> = HashMap::new();

    // Initialize all jobs
    for job in jobs {
      let Some(id) = job.id.as_deref() else {
        continue;
      };
      order.push(id.to_string());
      adjacency.entry(id.to_string()).or_default();
      reverse_adjacency.entry(id.to_string()).or_default();
      for file in job.outputs() {
        producers.insert(file.lfn(), id);
      }
    }

    // Link each input to its producer
    for job in jobs {
      let Some(id) = job.id.as_deref() else {
        continue;
      };
      for file in job.inputs() {
        let Some(&parent) = producers.get(file.lfn()) else {
          continue;
        };
        let children = adjacency.entry(parent.to_string()).or_default();
        if !children.iter().any(|c| c == id) {
          children.push(id.to_string());
          reverse_adjacency
            .entry(id.to_string())
            .or_default()
            .push(parent.to_string());
        }
      }
    }

    let entry_points = order
      .iter()
      .filter(|id| reverse_adjacency.get(*id).is_none_or(|v| v.is_empty()))
      .cloned()
      .collect();

    Self {
      order,
      adjacency,
      reverse_adjacency,
      entry_points,
    }
  }

  /// Get entry points (jobs that only read pre-existing files).
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Get downstream jobs for a given job.
  pub fn downstream(&self, job_id: &str) -> &[String] {
    self
      .adjacency
      .get(job_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Get upstream jobs for a given job.
  pub fn upstream(&self, job_id: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(job_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  pub fn edge_count(&self) -> usize {
    self.adjacency.values().map(Vec::len).sum()
  }

  /// Parent/children pairs for every job that has children, in job order.
  pub fn dependencies(&self) -> Vec<Dependency> {
    self
      .order
      .iter()
      .filter_map(|id| {
        let children = self.downstream(id);
        (!children.is_empty()).then(|| Dependency {
          id: id.clone(),
          children: children.to_vec(),
        })
      })
      .collect()
  }

  /// Kahn's algorithm, ties broken by job order.
  pub fn topological_order(&self) -> Result<Vec<String>, WorkflowError> {
    let mut in_degree: HashMap<&str, usize> = self
      .order
      .iter()
      .map(|id| (id.as_str(), self.upstream(id).len()))
      .collect();

    let mut ready: VecDeque<&str> = self
      .order
      .iter()
      .map(String::as_str)
      .filter(|id| in_degree[id] == 0)
      .collect();

    let mut sorted = Vec::with_capacity(self.order.len());
    while let Some(id) = ready.pop_front() {
      sorted.push(id.to_string());
      for child in self.downstream(id) {
        if let Some(degree) = in_degree.get_mut(child.as_str()) {
          *degree -= 1;
          if *degree == 0 {
            ready.push_back(child.as_str());
          }
        }
      }
    }

    if sorted.len() < self.order.len() {
      let stuck = self
        .order
        .iter()
        .find(|id| in_degree[id.as_str()] > 0)
        .cloned()
        .unwrap_or_default();
      return Err(WorkflowError::Cycle(stuck));
    }

    Ok(sorted)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::file::File;

  fn job(id: &str, inputs: &[&str], outputs: &[&str]) -> Job {
    let mut job = Job::new("T").with_id(id);
    for lfn in inputs {
      job = job.with_input(File::new(*lfn));
    }
    for lfn in outputs {
      job = job.with_output(File::new(*lfn), true, false);
    }
    job
  }

  #[test]
  fn test_fan_out_has_no_edges() {
    let jobs = vec![
      job("a", &["in"], &["a.out"]),
      job("b", &["in"], &["b.out"]),
      job("c", &["in"], &["c.out"]),
    ];

    let graph = Graph::infer(&jobs);

    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.entry_points(), &["a", "b", "c"]);
    assert!(graph.dependencies().is_empty());
  }

  #[test]
  fn test_diamond() {
    let jobs = vec![
      job("top", &["in"], &["l", "r"]),
      job("left", &["l"], &["l2"]),
      job("right", &["r"], &["r2"]),
      job("bottom", &["l2", "r2"], &["out"]),
    ];

    let graph = Graph::infer(&jobs);

    assert_eq!(graph.entry_points(), &["top"]);
    assert_eq!(graph.downstream("top"), &["left", "right"]);
    assert_eq!(graph.upstream("bottom"), &["left", "right"]);
    assert_eq!(
      graph.topological_order().unwrap(),
      vec!["top", "left", "right", "bottom"]
    );
    assert_eq!(
      graph.dependencies(),
      vec![
        Dependency {
          id: "top".to_string(),
          children: vec!["left".to_string(), "right".to_string()],
        },
        Dependency {
          id: "left".to_string(),
          children: vec!["bottom".to_string()],
        },
        Dependency {
          id: "right".to_string(),
          children: vec!["bottom".to_string()],
        },
      ]
    );
  }

  #[test]
  fn test_two_files_from_same_parent_make_one_edge() {
    let jobs = vec![
      job("p", &[], &["x", "y"]),
      job("c", &["x", "y"], &["z"]),
    ];

    let graph = Graph::infer(&jobs);

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.upstream("c"), &["p"]);
  }

  #[test]
  fn test_cycle_detected() {
    let jobs = vec![job("a", &["y"], &["x"]), job("b", &["x"], &["y"])];

    let graph = Graph::infer(&jobs);

    assert!(graph.entry_points().is_empty());
    assert!(matches!(
      graph.topological_order(),
      Err(WorkflowError::Cycle(id)) if id == "a"
    ));
  }

  #[test]
  fn test_self_consuming_job_is_a_cycle() {
    let jobs = vec![job("a", &["x"], &["x"])];
    assert!(Graph::infer(&jobs).topological_order().is_err());
  }
}
