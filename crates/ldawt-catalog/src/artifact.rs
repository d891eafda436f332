use serde::Serialize;

use crate::error::CatalogError;

/// Version tag written at the top of every YAML document.
pub const FORMAT_VERSION: &str = "5.0";

/// A catalog or workflow that can be written out for the engine.
pub trait Artifact {
  /// File name the engine looks for when none is given explicitly.
  fn default_file_name(&self) -> &'static str;

  /// Render the artifact into the exact bytes written to disk.
  fn render(&self) -> Result<String, CatalogError>;
}

#[derive(Serialize)]
struct Document<'a, T: Serialize> {
  pegasus: &'static str,
  #[serde(flatten)]
  body: &'a T,
}

/// Render `body` as a YAML document headed by the format version.
///
/// The body must serialize as a map; its keys follow `pegasus` in
/// declaration order.
pub fn render_yaml<T: Serialize>(body: &T) -> Result<String, CatalogError> {
  let document = Document {
    pegasus: FORMAT_VERSION,
    body,
  };
  Ok(serde_yaml::to_string(&document)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize)]
  struct Body {
    items: Vec<&'static str>,
  }

  #[test]
  fn test_version_comes_first() {
    let yaml = render_yaml(&Body {
      items: vec!["a", "b"],
    })
    .unwrap();

    assert!(yaml.starts_with("pegasus:"));
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["pegasus"].as_str(), Some(FORMAT_VERSION));
    assert_eq!(value["items"][1].as_str(), Some("b"));
  }
}
