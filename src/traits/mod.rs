pub mod erased_property;
pub mod listener;

// Re-export traits
pub use erased_property::ErasedProperty;
pub use listener::{ChangeListener, PropertyListener, TypedListener};
