//! CustomResourceDefinition manifest as read from disk
//!
//! Only the fields needed to identify a resource are modelled. Both the
//! `apiextensions.k8s.io/v1beta1` shape (with `spec.version`) and the `v1`
//! shape (with `spec.versions` only) deserialize into it.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// A CRD manifest
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdManifest {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    pub spec: CrdManifestSpec,
}

/// Identifying part of a CRD spec
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdManifestSpec {
    /// API group, e.g. `cache.example.com`
    pub group: String,

    /// Primary version (v1beta1 manifests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Declared versions
    #[serde(default)]
    pub versions: Vec<CrdManifestVersion>,

    pub names: CrdManifestNames,
}

/// One declared version
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdManifestVersion {
    pub name: String,

    #[serde(default)]
    pub served: bool,

    #[serde(default)]
    pub storage: bool,
}

/// Resource names
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdManifestNames {
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}
