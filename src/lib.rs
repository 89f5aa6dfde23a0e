pub mod config;
pub mod errors;
pub mod implementations;
pub mod models;
pub mod traits;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{LockPolicy, PoolConfig, PropertyOptions, TransformCommit};
pub use errors::{CallbackError, ErrorSeverity, PropertyError, PropertyResult};
pub use implementations::{
    config::{ConfigError, PoolFile, PropertySeed, SeedValue},
    pattern::{MatchTarget, Pattern},
    pool::PropertyPool,
    property::{Property, PropertyBuilder, FIRST_PROPERTY_ID},
};
pub use models::{
    change::{ErasedChange, PropertyChange},
    snapshot::{PoolSnapshot, PropertySnapshot},
    value::{NumericValue, PropertyValue, ValueKind},
};
pub use traits::{ChangeListener, ErasedProperty, PropertyListener, TypedListener};
