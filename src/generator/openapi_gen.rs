//! `openapi-gen` executable adapter

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use super::{GenError, GenerationRequest, SchemaGenerator};
use crate::project::ProjectRoot;

/// Default generator executable, looked up on `PATH`
pub const DEFAULT_GENERATOR: &str = "openapi-gen";

/// Runs an external `openapi-gen` binary from the project root
#[derive(Clone, Debug)]
pub struct OpenApiGenCommand {
    program: PathBuf,
    working_dir: PathBuf,
}

impl OpenApiGenCommand {
    pub fn new(program: impl Into<PathBuf>, root: &ProjectRoot) -> Self {
        Self {
            program: program.into(),
            working_dir: root.path().to_path_buf(),
        }
    }

    /// Command-line arguments for a request
    pub fn args(request: &GenerationRequest) -> Vec<String> {
        vec![
            "--logtostderr".to_string(),
            format!("--input-dirs={}", request.input_dirs.join(",")),
            format!("--output-file-base={}", request.output_file_base_name),
            format!(
                "--output-package={}",
                request.output_package_path.display()
            ),
            format!("--go-header-file={}", request.header_file.display()),
            format!(
                "--output-base={}",
                request.output_base.as_deref().unwrap_or_default()
            ),
            format!(
                "--generated-by-comment-template={}",
                request.generated_by_comment.as_deref().unwrap_or_default()
            ),
            format!("--report-filename={}", request.report_filename),
        ]
    }
}

impl SchemaGenerator for OpenApiGenCommand {
    fn generate(&self, request: &GenerationRequest) -> Result<(), GenError> {
        let args = Self::args(request);
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| {
                GenError::Execution(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        let report = String::from_utf8_lossy(&output.stdout);
        for line in report.lines().filter(|l| !l.trim().is_empty()) {
            info!("API rule violation: {}", line);
        }

        if !output.status.success() {
            return Err(GenError::Execution(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
