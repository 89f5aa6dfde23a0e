pub mod change;
pub mod snapshot;
pub mod value;

// Re-export common model types
pub use change::{ErasedChange, PropertyChange};
pub use snapshot::{PoolSnapshot, PropertySnapshot};
pub use value::{AnyValue, NumericValue, PropertyValue, ValueKind};
