use ldawt_catalog::Properties;

use crate::config::PropertiesConfig;

pub fn build_properties(config: &PropertiesConfig) -> Properties {
  let mut properties = config
    .extra
    .iter()
    .fold(Properties::new(), |props, (key, value)| {
      props.with(key.as_str(), value.as_str())
    });
  if let Some(mode) = config.mode {
    properties = properties.with_mode(mode);
  }
  if let Some(checking) = config.integrity_checking {
    properties = properties.with_integrity_checking(checking);
  }
  properties
}
