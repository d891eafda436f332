use std::path::Path;

use ldawt_catalog::{Transformation, TransformationCatalog};

use crate::config::path_string;
use crate::error::GenerateError;

/// Register each executable found at `bin/<name>` under `work_dir` on the
/// execution site. They are staged by the engine, so nothing is checked on
/// disk here.
pub fn build_transformation_catalog(
  execution_site: &str,
  work_dir: &Path,
  executables: &[String],
) -> Result<TransformationCatalog, GenerateError> {
  let bin = work_dir.join("bin");
  executables
    .iter()
    .try_fold(TransformationCatalog::new(), |catalog, name| -> Result<_, GenerateError> {
      let pfn = path_string(&bin.join(name))?;
      Ok(catalog.with_transformation(Transformation::stageable(
        name.as_str(),
        execution_site,
        pfn,
      ))?)
    })
}
