use serde::{Deserialize, Serialize};

/// Whether the `locked` flag of a property rejects writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockPolicy {
    /// Writes to a locked property fail with `PropertyError::Locked`
    #[default]
    Enforce,
    /// The flag is recorded but never consulted
    Advisory,
}

/// What happens to the output of the transform-trigger chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformCommit {
    /// Transforms run but the raw written value is notified and stored
    #[default]
    Discard,
    /// The final transformed value is notified and stored
    Commit,
}

/// Per-property construction options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyOptions {
    pub group: String,
    pub locked: bool,
    /// Display template, empty for the value's natural form
    pub format: String,
    pub lock_policy: LockPolicy,
    pub transform_commit: TransformCommit,
}

/// Configuration for a property pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(default)]
    pub lock_policy: LockPolicy,
    #[serde(default)]
    pub transform_commit: TransformCommit,
}

impl PoolConfig {
    /// Options for a property created through the pool
    pub fn property_options(&self, group: &str, locked: bool) -> PropertyOptions {
        PropertyOptions {
            group: group.to_string(),
            locked,
            format: String::new(),
            lock_policy: self.lock_policy,
            transform_commit: self.transform_commit,
        }
    }
}
