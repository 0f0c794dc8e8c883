//! OpenAPI code generation for Kubernetes operator projects
//!
//! Discovers the API group/versions of a project, runs an OpenAPI
//! definitions generator once per API package and scaffolds the CRD
//! manifests declared under `deploy/crds`.

pub mod adapters;
pub mod config;
pub mod crd;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod paths;
pub mod project;
pub mod scaffold;

pub use error::{Error, Result};
