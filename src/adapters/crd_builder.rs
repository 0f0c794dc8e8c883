//! Kubernetes CustomResourceDefinition builder for scaffolded resources

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
    CustomResourceDefinitionVersion, CustomResourceValidation, JSONSchemaProps,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_yaml::Value;

use crate::scaffold::Resource;

/// Build a namespaced CRD serving a single storage version of `resource`
pub fn build_crd(resource: &Resource) -> CustomResourceDefinition {
    CustomResourceDefinition {
        metadata: ObjectMeta {
            name: Some(format!("{}.{}", resource.plural, resource.group())),
            ..Default::default()
        },
        spec: CustomResourceDefinitionSpec {
            group: resource.group().to_string(),
            names: build_names(resource),
            scope: "Namespaced".to_string(),
            versions: vec![build_version(resource, true)],
            ..Default::default()
        },
        status: None,
    }
}

fn build_names(resource: &Resource) -> CustomResourceDefinitionNames {
    CustomResourceDefinitionNames {
        kind: resource.kind().to_string(),
        list_kind: Some(format!("{}List", resource.kind())),
        plural: resource.plural.clone(),
        singular: Some(resource.lower_kind.clone()),
        ..Default::default()
    }
}

/// Add the version of `resource` to an existing CRD manifest
///
/// Every other field of the manifest is left untouched. Returns whether the
/// manifest changed; a version already listed (or given as the v1beta1
/// primary `spec.version`) is not added again.
pub fn add_version(manifest: &mut Value, resource: &Resource) -> Result<bool, String> {
    if lists_version(manifest, resource) {
        return Ok(false);
    }

    let spec = manifest
        .get_mut("spec")
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| "manifest has no spec mapping".to_string())?;
    let has_primary = spec
        .get("version")
        .and_then(Value::as_str)
        .is_some_and(|v| !v.is_empty());

    if !spec.contains_key("versions") {
        spec.insert(
            Value::String("versions".to_string()),
            Value::Sequence(Vec::new()),
        );
    }
    let versions = spec
        .get_mut("versions")
        .and_then(Value::as_sequence_mut)
        .ok_or_else(|| "spec.versions is not a list".to_string())?;

    let has_storage = has_primary
        || versions
            .iter()
            .any(|v| v.get("storage").and_then(Value::as_bool) == Some(true));
    let version = build_version(resource, !has_storage);
    let value = serde_yaml::to_value(&version)
        .map_err(|e| format!("failed to serialize version {}: {}", resource.version(), e))?;
    versions.push(value);

    Ok(true)
}

/// Whether `manifest` already serves the version of `resource`
pub fn lists_version(manifest: &Value, resource: &Resource) -> bool {
    let Some(spec) = manifest.get("spec") else {
        return false;
    };

    if spec.get("version").and_then(Value::as_str) == Some(resource.version()) {
        return true;
    }

    spec.get("versions")
        .and_then(Value::as_sequence)
        .map(|versions| {
            versions
                .iter()
                .any(|v| v.get("name").and_then(Value::as_str) == Some(resource.version()))
        })
        .unwrap_or(false)
}

/// Whether `manifest` declares the group and kind of `resource`
pub fn declares(manifest: &Value, resource: &Resource) -> bool {
    let spec = manifest.get("spec");
    let group = spec.and_then(|s| s.get("group")).and_then(Value::as_str);
    let kind = spec
        .and_then(|s| s.get("names"))
        .and_then(|n| n.get("kind"))
        .and_then(Value::as_str);

    group == Some(resource.group()) && kind == Some(resource.kind())
}

fn build_version(resource: &Resource, storage: bool) -> CustomResourceDefinitionVersion {
    CustomResourceDefinitionVersion {
        name: resource.version().to_string(),
        served: true,
        storage,
        schema: Some(CustomResourceValidation {
            open_api_v3_schema: Some(JSONSchemaProps {
                type_: Some("object".to_string()),
                x_kubernetes_preserve_unknown_fields: Some(true),
                ..Default::default()
            }),
        }),
        ..Default::default()
    }
}
