use std::rc::Rc;

use crate::implementations::property::Property;
use crate::models::change::{ErasedChange, PropertyChange};
use crate::models::value::PropertyValue;
use crate::traits::erased_property::ErasedProperty;

/// Receives change events from properties of a known payload type
pub trait PropertyListener<T: PropertyValue> {
    /// Called synchronously from `Property::set_value`, before the new value is stored
    fn on_property_change(&self, sender: &Property<T>, change: &PropertyChange<T>);
}

impl<T, F> PropertyListener<T> for F
where
    T: PropertyValue,
    F: Fn(&Property<T>, &PropertyChange<T>),
{
    fn on_property_change(&self, sender: &Property<T>, change: &PropertyChange<T>) {
        self(sender, change)
    }
}

/// Receives change events from properties of any payload type.
///
/// This is the capability the pool attaches through `subscribe_untyped`, so a
/// single listener can be bound to every property a pattern resolves to.
pub trait ChangeListener {
    fn on_change(&self, sender: &dyn ErasedProperty, change: &ErasedChange<'_>);
}

impl<F> ChangeListener for F
where
    F: Fn(&dyn ErasedProperty, &ErasedChange<'_>),
{
    fn on_change(&self, sender: &dyn ErasedProperty, change: &ErasedChange<'_>) {
        self(sender, change)
    }
}

/// Adapts a typed listener so it can be attached through the pool.
///
/// Events from properties whose payload is not `T` are ignored.
pub struct TypedListener<T: PropertyValue> {
    inner: Rc<dyn PropertyListener<T>>,
}

impl<T: PropertyValue> TypedListener<T> {
    pub fn new(inner: Rc<dyn PropertyListener<T>>) -> Self {
        Self { inner }
    }
}

impl<T: PropertyValue> ChangeListener for TypedListener<T> {
    fn on_change(&self, sender: &dyn ErasedProperty, change: &ErasedChange<'_>) {
        let Some(property) = sender.as_any().downcast_ref::<Property<T>>() else {
            return;
        };
        if let Some(change) = change.downcast::<T>() {
            self.inner.on_property_change(property, &change);
        }
    }
}
