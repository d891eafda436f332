//! LDAWT Generator
//!
//! Builds everything the workflow engine needs to run the LDAWT pipeline and
//! writes it to disk:
//!
//! 1. site catalog (unless skipped)
//! 2. engine properties
//! 3. transformation catalog
//! 4. replica catalog
//! 5. the workflow, assembled from [`Stage`]s
//!
//! [`generate`] is pure: it turns a [`GeneratorConfig`] into [`Artifacts`]
//! without touching the filesystem. [`Artifacts::write_all`] does the I/O.

mod config;
mod error;
mod generator;
mod properties;
mod replicas;
mod sites;
mod stage;
mod transformations;
mod validate;

pub use config::{
  DEFAULT_EXECUTION_SITE, DEFAULT_INPUT, DOWNLOAD_TRANSFORMATION, DownloadConfig, GeneratorConfig,
  LOCAL_SITE, PropertiesConfig, ReplicaSpec, SPLIT_TRANSFORMATION, SplitConfig, WORKFLOW_NAME,
};
pub use error::GenerateError;
pub use generator::{Artifacts, generate};
pub use properties::build_properties;
pub use replicas::build_replica_catalog;
pub use sites::build_site_catalog;
pub use stage::{DownloadStage, SplitStage, Stage, build_workflow, group_file};
pub use transformations::build_transformation_catalog;
pub use validate::check_consistency;
