//! LDAWT Workflow
//!
//! This crate provides the abstract workflow handed to the engine: a set of
//! [`Job`]s that read and write logical [`File`]s.
//!
//! Jobs never name each other. When dependency inference is enabled, the
//! [`Graph`] derives an edge from the job producing a file to every job
//! consuming it. The invariants that keep that inference sound are checked
//! as each job is added to a [`Workflow`]:
//! - a logical file has at most one producing job
//! - job ids are unique
//! - the inferred graph stays acyclic

mod error;
mod file;
mod graph;
mod job;
mod workflow;

pub use error::WorkflowError;
pub use file::File;
pub use graph::{Dependency, Graph};
pub use job::{Argument, Job, Link, Use};
pub use workflow::Workflow;
