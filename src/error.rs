//! Error types for the OpenAPI code generator

use std::path::PathBuf;

use thiserror::Error;

/// Result type for the code generator
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the code generator
///
/// Every variant is terminal: a run stops at the first one and leaves
/// already-written files in place.
#[derive(Debug, Error)]
pub enum Error {
    /// The API source tree could not be read or holds no group/version
    #[error("failed to parse group versions in {}: {message}", path.display())]
    Discovery { path: PathBuf, message: String },

    /// A CRD manifest declares neither a primary version nor a version list
    #[error("crd of group {group} kind {kind} has no version")]
    MissingVersion { group: String, kind: String },

    /// The generator rejected its arguments
    #[error("openapi-gen argument validation error for {api}: {message}")]
    GeneratorValidation { api: String, message: String },

    /// The generator failed while running
    #[error("openapi-gen generator error for {api}: {message}")]
    GeneratorExecution { api: String, message: String },

    /// The CRD manifest directory could not be read
    #[error("failed to read CRD directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CRD manifest is not valid YAML or is missing required fields
    #[error("failed to parse CRD manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A resource identity could not be formed from group/version/kind
    #[error("invalid resource {api_version}, {kind}: {message}")]
    ResourceConstruction {
        api_version: String,
        kind: String,
        message: String,
    },

    /// The scaffolder failed to write a file
    #[error("failed to scaffold {}: {message}", path.display())]
    ScaffoldWrite { path: PathBuf, message: String },

    /// The temporary header template could not be created
    #[error("failed to prepare header file: {0}")]
    HeaderFile(#[source] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Name of the run stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Discovery { .. } => "discovery",
            Error::GeneratorValidation { .. }
            | Error::GeneratorExecution { .. }
            | Error::HeaderFile(_) => "generation",
            Error::MissingVersion { .. }
            | Error::DirectoryRead { .. }
            | Error::ManifestParse { .. } => "enumeration",
            Error::ResourceConstruction { .. } | Error::ScaffoldWrite { .. } => "scaffolding",
            Error::Config(_) => "configuration",
        }
    }
}
