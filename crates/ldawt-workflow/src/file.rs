use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical file name.
///
/// Files carry no physical location. Inputs nobody produces are resolved
/// through the replica catalog; outputs are staged by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct File {
  lfn: String,
}

impl File {
  pub fn new(lfn: impl Into<String>) -> Self {
    Self { lfn: lfn.into() }
  }

  pub fn lfn(&self) -> &str {
    &self.lfn
  }
}

impl fmt::Display for File {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.lfn)
  }
}
