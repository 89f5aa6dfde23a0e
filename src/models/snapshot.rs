use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::value::ValueKind;

/// Debug view of one registered property
#[derive(Debug, Clone, Serialize)]
pub struct PropertySnapshot {
    pub id: u64,
    pub name: String,
    pub group: String,
    pub type_name: String,
    pub kind: ValueKind,
    /// Value rendered through the property's format
    pub value: String,
    pub mod_count: u64,
    pub subscribers: usize,
    pub locked: bool,
}

/// Debug view of a whole pool, in registry order
#[derive(Debug, Clone, Serialize)]
pub struct PoolSnapshot {
    pub taken_at: DateTime<Utc>,
    pub properties: Vec<PropertySnapshot>,
}
