//! Adapters for building Kubernetes resources

pub mod crd_builder;
