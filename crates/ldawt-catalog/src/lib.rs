//! LDAWT Catalog
//!
//! This crate contains the serializable catalog types handed to the workflow
//! engine alongside the workflow itself:
//! - [`SiteCatalog`]: execution and storage sites with their directories
//! - [`TransformationCatalog`]: logical executables bound to physical paths
//! - [`ReplicaCatalog`]: physical locations of workflow input files
//! - [`Properties`]: opaque engine configuration
//!
//! Every catalog implements [`Artifact`], which renders it into the file
//! format the engine reads. Catalogs are built by value: each `with_*`
//! method consumes the catalog and returns the extended one.

mod artifact;
mod error;
mod profile;
mod properties;
mod replica;
mod site;
mod transformation;

pub use artifact::{Artifact, FORMAT_VERSION, render_yaml};
pub use error::CatalogError;
pub use profile::{Namespace, Profiles};
pub use properties::{INTEGRITY_CHECKING_KEY, IntegrityChecking, MODE_KEY, Mode, Properties};
pub use replica::{Replica, ReplicaCatalog, ReplicaLocation};
pub use site::{Directory, DirectoryType, FileServer, Operation, Site, SiteCatalog};
pub use transformation::{
  Transformation, TransformationCatalog, TransformationSite, TransformationType,
};
