//! Engine properties.
//!
//! Properties are opaque `key = value` pairs handed to the engine untouched.
//! Only a handful of keys are recognized here, and only so that they can be
//! set with typed values; anything else passes through as given.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::error::CatalogError;

pub const MODE_KEY: &str = "pegasus.mode";
pub const INTEGRITY_CHECKING_KEY: &str = "pegasus.integrity.checking";

/// Engine execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  Production,
  Development,
  Debug,
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mode::Production => write!(f, "production"),
      Mode::Development => write!(f, "development"),
      Mode::Debug => write!(f, "debug"),
    }
  }
}

/// Checksum verification of transferred files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityChecking {
  Full,
  None,
}

impl fmt::Display for IntegrityChecking {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      IntegrityChecking::Full => write!(f, "full"),
      IntegrityChecking::None => write!(f, "none"),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.0.insert(key.into(), value.into());
    self
  }

  pub fn with_mode(self, mode: Mode) -> Self {
    self.with(MODE_KEY, mode.to_string())
  }

  pub fn with_integrity_checking(self, checking: IntegrityChecking) -> Self {
    self.with(INTEGRITY_CHECKING_KEY, checking.to_string())
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }
}

impl Artifact for Properties {
  fn default_file_name(&self) -> &'static str {
    "pegasus.properties"
  }

  fn render(&self) -> Result<String, CatalogError> {
    let mut out = String::new();
    for (key, value) in &self.0 {
      out.push_str(key);
      out.push_str(" = ");
      out.push_str(value);
      out.push('\n');
    }
    Ok(out)
  }
}
