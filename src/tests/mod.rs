mod pattern_tests;
mod pool_tests;

use std::cell::RefCell;

use log::info;

use crate::implementations::property::Property;
use crate::models::change::{ErasedChange, PropertyChange};
use crate::models::value::PropertyValue;
use crate::traits::erased_property::ErasedProperty;
use crate::traits::listener::{ChangeListener, PropertyListener};

// Setup function to initialize logging
fn setup() {
    // Logger may already be initialized by another test, which is fine
    if env_logger::builder().is_test(true).try_init().is_ok() {
        info!("Logger initialized");
    }
}

/// Typed listener that records every change it receives
struct Recorder<T> {
    events: RefCell<Vec<PropertyChange<T>>>,
}

impl<T> Recorder<T> {
    fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<PropertyChange<T>>
    where
        T: Clone,
    {
        self.events.borrow().clone()
    }

    fn count(&self) -> usize {
        self.events.borrow().len()
    }
}

impl<T: PropertyValue> PropertyListener<T> for Recorder<T> {
    fn on_property_change(&self, _sender: &Property<T>, change: &PropertyChange<T>) {
        self.events.borrow_mut().push(change.clone());
    }
}

/// Erased listener recording (name, old, new) as text
struct TextRecorder {
    events: RefCell<Vec<(String, String, String)>>,
}

impl TextRecorder {
    fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|(name, _, _)| name.clone()).collect()
    }

    fn count(&self) -> usize {
        self.events.borrow().len()
    }
}

impl ChangeListener for TextRecorder {
    fn on_change(&self, sender: &dyn ErasedProperty, change: &ErasedChange<'_>) {
        self.events.borrow_mut().push((
            sender.name().to_string(),
            change.old_text(),
            change.new_text(),
        ));
    }
}
