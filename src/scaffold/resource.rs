//! Resource identity handed to the scaffolder

use kube::core::GroupVersionKind;

use crate::{Error, Result};

/// A validated API resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Group, version and kind
    pub gvk: GroupVersionKind,
    /// First DNS label of the group, e.g. `cache` for `cache.example.com`
    pub short_group: String,
    /// Lower-case kind
    pub lower_kind: String,
    /// Plural resource name
    pub plural: String,
}

impl Resource {
    /// Build a resource from `group/version` and a kind
    pub fn new(api_version: &str, kind: &str) -> Result<Self> {
        let invalid = |message: String| Error::ResourceConstruction {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            message,
        };

        let (group, version) = api_version
            .split_once('/')
            .ok_or_else(|| invalid("api version must have the form group/version".to_string()))?;

        if group.is_empty() {
            return Err(invalid("group cannot be empty".to_string()));
        }

        if !is_kube_version(version) {
            return Err(invalid(format!(
                "version {:?} must match v<N>, v<N>alpha<M> or v<N>beta<M>",
                version
            )));
        }

        let first = kind
            .chars()
            .next()
            .ok_or_else(|| invalid("kind cannot be empty".to_string()))?;
        if !first.is_ascii_uppercase() {
            return Err(invalid(
                "kind must start with an uppercase character".to_string(),
            ));
        }
        if !kind.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("kind must be alphanumeric".to_string()));
        }

        let lower_kind = kind.to_lowercase();
        Ok(Self {
            gvk: GroupVersionKind::gvk(group, version, kind),
            short_group: group.split('.').next().unwrap_or(group).to_string(),
            plural: pluralize(&lower_kind),
            lower_kind,
        })
    }

    pub fn group(&self) -> &str {
        &self.gvk.group
    }

    pub fn version(&self) -> &str {
        &self.gvk.version
    }

    pub fn kind(&self) -> &str {
        &self.gvk.kind
    }
}

/// `v1`, `v2beta1`, `v1alpha3`
fn is_kube_version(version: &str) -> bool {
    let Some(rest) = version.strip_prefix('v') else {
        return false;
    };

    let major_len = rest.chars().take_while(char::is_ascii_digit).count();
    if major_len == 0 || rest.starts_with('0') {
        return false;
    }

    let suffix = &rest[major_len..];
    if suffix.is_empty() {
        return true;
    }

    let minor = suffix
        .strip_prefix("alpha")
        .or_else(|| suffix.strip_prefix("beta"));
    match minor {
        Some(m) => !m.is_empty() && !m.starts_with('0') && m.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if matches!(before, Some(c) if !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }

    format!("{}s", word)
}
