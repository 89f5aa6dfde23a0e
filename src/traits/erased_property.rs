use std::any::Any;
use std::rc::Rc;

use crate::models::value::ValueKind;
use crate::traits::listener::ChangeListener;

/// Non-generic view of a `Property<T>`.
///
/// The pool stores every property through this trait, so it can resolve
/// names and groups and attach listeners without knowing `T`.
pub trait ErasedProperty {
    fn id(&self) -> u64;

    fn name(&self) -> &str;

    fn group(&self) -> &str;

    /// Name of the payload type
    fn type_name(&self) -> &'static str;

    fn value_kind(&self) -> ValueKind;

    /// Current value rendered through the property's format
    fn value_text(&self) -> String;

    fn mod_count(&self) -> u64;

    fn subscriber_count(&self) -> usize;

    fn is_locked(&self) -> bool;

    fn subscribe_untyped(&self, listener: Rc<dyn ChangeListener>);

    /// Returns false if the listener was not subscribed
    fn unsubscribe_untyped(&self, listener: &Rc<dyn ChangeListener>) -> bool;

    fn as_any(&self) -> &dyn Any;

    /// One-line debug rendering, as used by `PropertyPool::as_string`
    fn describe(&self) -> String;
}
