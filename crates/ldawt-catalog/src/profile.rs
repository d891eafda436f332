use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Profile namespaces understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
  Pegasus,
  Condor,
  Dagman,
  Env,
  Globus,
  Hints,
  Selector,
}

/// Engine-specific key/value settings grouped by namespace.
///
/// Keys and values are passed through verbatim. Both levels are ordered so
/// that rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profiles(BTreeMap<Namespace, BTreeMap<String, String>>);

impl Profiles {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a profile value, replacing any earlier value for the same key.
  pub fn with(
    mut self,
    namespace: Namespace,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self
      .0
      .entry(namespace)
      .or_default()
      .insert(key.into(), value.into());
    self
  }

  pub fn get(&self, namespace: Namespace, key: &str) -> Option<&str> {
    self
      .0
      .get(&namespace)
      .and_then(|entries| entries.get(key))
      .map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.0.values().all(BTreeMap::is_empty)
  }
}
