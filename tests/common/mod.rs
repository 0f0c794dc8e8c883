//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crd_openapi_gen::generator::{GenError, GenerationRequest, SchemaGenerator};
use crd_openapi_gen::project::{ProjectConfig, ProjectRoot};
use crd_openapi_gen::scaffold::{Resource, Scaffolder};
use crd_openapi_gen::{Error, Result};
use tempfile::TempDir;

pub const REPO: &str = "github.com/example/app-operator";

// ============================================================================
// Project Tree
// ============================================================================

/// Throwaway operator project on disk
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add `pkg/apis/<group>/<version>/types.go`
    pub fn with_api(self, group: &str, version: &str) -> Self {
        let dir = self.path().join("pkg/apis").join(group).join(version);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("types.go"), "package ".to_string() + version).unwrap();
        self
    }

    /// Add `deploy/crds/<file>` with the given manifest
    pub fn with_crd_file(self, file: &str, yaml: &str) -> Self {
        let dir = self.path().join("deploy/crds");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), yaml).unwrap();
        self
    }

    /// Add a v1beta1 manifest with a primary version
    pub fn with_crd(self, group: &str, version: &str, kind: &str) -> Self {
        let file = format!("{}_{}_{}_crd.yaml", group, version, kind.to_lowercase());
        let yaml = v1beta1_crd(group, version, kind);
        self.with_crd_file(&file, &yaml)
    }

    pub fn with_boilerplate(self, contents: &str) -> Self {
        let dir = self.path().join("hack");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("boilerplate.go.txt"), contents).unwrap();
        self
    }

    pub fn root(&self) -> ProjectRoot {
        ProjectRoot::new(self.path()).expect("project root")
    }

    pub fn config(&self) -> ProjectConfig {
        ProjectConfig::new(&self.root(), Some(REPO.to_string()))
    }
}

pub fn v1beta1_crd(group: &str, version: &str, kind: &str) -> String {
    format!(
        r#"apiVersion: apiextensions.k8s.io/v1beta1
kind: CustomResourceDefinition
metadata:
  name: {plural}.{group}
spec:
  group: {group}
  names:
    kind: {kind}
    listKind: {kind}List
    plural: {plural}
    singular: {singular}
  scope: Namespaced
  version: {version}
"#,
        group = group,
        version = version,
        kind = kind,
        plural = format!("{}s", kind.to_lowercase()),
        singular = kind.to_lowercase(),
    )
}

pub fn versions_only_crd(group: &str, versions: &[&str], kind: &str) -> String {
    let mut yaml = format!(
        r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: {plural}.{group}
spec:
  group: {group}
  names:
    kind: {kind}
    plural: {plural}
  scope: Namespaced
  versions:"#,
        group = group,
        kind = kind,
        plural = format!("{}s", kind.to_lowercase()),
    );

    if versions.is_empty() {
        yaml.push_str(" []\n");
    } else {
        yaml.push('\n');
        for v in versions {
            yaml.push_str(&format!("  - name: {}\n    served: true\n    storage: true\n", v));
        }
    }

    yaml
}

/// v1 manifest serving v1alpha1 (with a validation schema) and v1beta1
pub const MEMCACHED_TWO_VERSION_CRD: &str = r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: memcacheds.cache.example.com
spec:
  group: cache.example.com
  names:
    kind: Memcached
    listKind: MemcachedList
    plural: memcacheds
    singular: memcached
  scope: Namespaced
  versions:
  - name: v1alpha1
    served: true
    storage: true
    schema:
      openAPIV3Schema:
        type: object
        properties:
          spec:
            type: object
            required:
            - size
            properties:
              size:
                type: integer
                minimum: 1
  - name: v1beta1
    served: true
    storage: false
"#;

// ============================================================================
// Fake Collaborators
// ============================================================================

/// How a [`RecordingGenerator`] fails
#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Validation,
    Execution,
}

/// Schema generator that records requests instead of generating
#[derive(Default)]
pub struct RecordingGenerator {
    pub requests: RefCell<Vec<GenerationRequest>>,
    /// Fail requests whose input directory ends with this suffix
    pub fail_on: Option<(String, Failure)>,
}

impl RecordingGenerator {
    pub fn failing_on(suffix: &str, failure: Failure) -> Self {
        Self {
            requests: RefCell::default(),
            fail_on: Some((suffix.to_string(), failure)),
        }
    }

    pub fn input_dirs(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .flat_map(|r| r.input_dirs.clone())
            .collect()
    }

    pub fn header_files(&self) -> Vec<PathBuf> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.header_file.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl SchemaGenerator for RecordingGenerator {
    fn generate(&self, request: &GenerationRequest) -> std::result::Result<(), GenError> {
        if let Some((suffix, failure)) = &self.fail_on {
            if request.input_dirs.iter().any(|d| d.ends_with(suffix.as_str())) {
                return Err(match failure {
                    Failure::Validation => GenError::Validation("bad input dir".to_string()),
                    Failure::Execution => GenError::Execution("bad source types".to_string()),
                });
            }
        }

        self.requests.borrow_mut().push(request.clone());
        Ok(())
    }
}

/// Scaffolder that records resources instead of writing files
#[derive(Default)]
pub struct RecordingScaffolder {
    pub resources: RefCell<Vec<Resource>>,
    /// Fail for resources of this kind
    pub fail_kind: Option<String>,
}

impl RecordingScaffolder {
    pub fn count(&self) -> usize {
        self.resources.borrow().len()
    }

    pub fn kinds(&self) -> Vec<String> {
        self.resources
            .borrow()
            .iter()
            .map(|r| r.kind().to_string())
            .collect()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.resources
            .borrow()
            .iter()
            .filter(|r| r.kind() == kind)
            .count()
    }
}

impl Scaffolder for RecordingScaffolder {
    fn materialize(&self, config: &ProjectConfig, resource: &Resource) -> Result<()> {
        if self.fail_kind.as_deref() == Some(resource.kind()) {
            return Err(Error::ScaffoldWrite {
                path: config.abs_project_path.join("deploy/crds"),
                message: "disk full".to_string(),
            });
        }

        self.resources.borrow_mut().push(resource.clone());
        Ok(())
    }
}
