use std::path::Path;

use ldawt_catalog::{
  Directory, DirectoryType, FileServer, Namespace, Operation, Site, SiteCatalog,
};

use crate::config::{LOCAL_SITE, path_string};
use crate::error::GenerateError;

/// The submit-side `local` site plus the condor pool jobs run on.
///
/// `local` scratch and storage live in `scratch/` and `output/` under
/// `work_dir`. The execution site submits through condor's vanilla universe
/// and moves data through the submit node (`condorio`), so it needs no
/// directories of its own.
pub fn build_site_catalog(
  execution_site: &str,
  work_dir: &Path,
) -> Result<SiteCatalog, GenerateError> {
  let scratch = work_dir.join("scratch");
  let storage = work_dir.join("output");

  let local = Site::new(LOCAL_SITE)
    .with_directory(
      Directory::new(DirectoryType::SharedScratch, path_string(&scratch)?)
        .with_file_server(FileServer::local(&scratch, Operation::All)?),
    )
    .with_directory(
      Directory::new(DirectoryType::LocalStorage, path_string(&storage)?)
        .with_file_server(FileServer::local(&storage, Operation::All)?),
    );

  let exec = Site::new(execution_site)
    .with_profile(Namespace::Pegasus, "style", "condor")
    .with_profile(Namespace::Condor, "universe", "vanilla")
    .with_profile(Namespace::Pegasus, "data.configuration", "condorio");

  Ok(SiteCatalog::new().with_site(local)?.with_site(exec)?)
}
