//! OpenAPI validation code generation for API packages
//!
//! The schema generator is an injected capability: [`generate_openapi`]
//! builds one [`GenerationRequest`] per API package and hands it to a
//! [`SchemaGenerator`], stopping at the first failure.

pub mod header;
pub mod openapi_gen;

pub use header::with_header_file;
pub use openapi_gen::OpenApiGenCommand;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::paths::FqApiPath;
use crate::project::ProjectRoot;
use crate::{Error, Result};

/// Base name of every generated file, so re-runs overwrite rather than accumulate
pub const OUTPUT_FILE_BASE_NAME: &str = "zz_generated.openapi";

/// Report destination for API rule violations (`-` is stdout)
pub const REPORT_TO_STDOUT: &str = "-";

/// Failure reported by a schema generator
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Arguments were rejected before generation started
    #[error("{0}")]
    Validation(String),
    /// Generation started and failed
    #[error("{0}")]
    Execution(String),
}

/// Schema generator collaborator
pub trait SchemaGenerator {
    /// Generate the OpenAPI definitions described by `request`
    fn generate(&self, request: &GenerationRequest) -> std::result::Result<(), GenError>;
}

impl<G: SchemaGenerator + ?Sized> SchemaGenerator for &G {
    fn generate(&self, request: &GenerationRequest) -> std::result::Result<(), GenError> {
        (**self).generate(request)
    }
}

/// Arguments for one generator run over a single API package
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Input package directories, relative to the project root
    pub input_dirs: Vec<String>,
    /// Generated file name without extension
    pub output_file_base_name: String,
    /// Absolute directory the generated file is written to
    pub output_package_path: PathBuf,
    /// File whose contents head every generated file
    pub header_file: PathBuf,
    /// Generator's own output base; `None` suppresses it
    pub output_base: Option<String>,
    /// Generator's own "do not edit" banner; `None` suppresses it
    pub generated_by_comment: Option<String>,
    /// Where API rule violations are reported
    pub report_filename: String,
}

impl GenerationRequest {
    /// Request for one API package with the fixed naming convention
    pub fn for_api(api: &FqApiPath, root: &ProjectRoot, header_file: &Path) -> Result<Self> {
        Ok(Self {
            input_dirs: vec![api.relative()?],
            output_file_base_name: OUTPUT_FILE_BASE_NAME.to_string(),
            output_package_path: api.output_package(root)?,
            header_file: header_file.to_path_buf(),
            output_base: None,
            generated_by_comment: None,
            report_filename: REPORT_TO_STDOUT.to_string(),
        })
    }

    /// Check the request before it reaches the generator
    pub fn validate(&self) -> std::result::Result<(), GenError> {
        if self.input_dirs.is_empty() || self.input_dirs.iter().any(|d| d.is_empty()) {
            return Err(GenError::Validation(
                "input directories cannot be empty".to_string(),
            ));
        }

        if self.output_file_base_name.is_empty() {
            return Err(GenError::Validation(
                "output file base name cannot be empty".to_string(),
            ));
        }

        if self.output_package_path.as_os_str().is_empty() {
            return Err(GenError::Validation(
                "output package path cannot be empty".to_string(),
            ));
        }

        if !self.header_file.is_file() {
            return Err(GenError::Validation(format!(
                "header file {} does not exist",
                self.header_file.display()
            )));
        }

        Ok(())
    }
}

/// Run the generator once per API package
///
/// The first failing package aborts the phase; packages already generated
/// keep their output.
pub fn generate_openapi<G: SchemaGenerator>(
    generator: &G,
    root: &ProjectRoot,
    header_file: &Path,
    fq_apis: &[FqApiPath],
) -> Result<()> {
    for api in fq_apis {
        let request = GenerationRequest::for_api(api, root, header_file)?;

        request.validate().map_err(|e| into_error(api, e))?;

        debug!(
            "Generating OpenAPI definitions for {} into {}",
            api,
            request.output_package_path.display()
        );

        generator
            .generate(&request)
            .map_err(|e| into_error(api, e))?;
    }

    info!("Generated OpenAPI definitions for {} API packages", fq_apis.len());

    Ok(())
}

fn into_error(api: &FqApiPath, err: GenError) -> Error {
    match err {
        GenError::Validation(message) => Error::GeneratorValidation {
            api: api.to_string(),
            message,
        },
        GenError::Execution(message) => Error::GeneratorExecution {
            api: api.to_string(),
            message,
        },
    }
}
