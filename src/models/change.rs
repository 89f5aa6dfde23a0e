use crate::models::value::AnyValue;

/// Old and new payload of a single write
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange<T> {
    pub old: T,
    pub new: T,
}

/// A change event whose payload type is not known statically
pub struct ErasedChange<'a> {
    old: &'a dyn AnyValue,
    new: &'a dyn AnyValue,
}

impl<'a> ErasedChange<'a> {
    pub fn new(old: &'a dyn AnyValue, new: &'a dyn AnyValue) -> Self {
        Self { old, new }
    }

    pub fn old_as<T: 'static>(&self) -> Option<&'a T> {
        self.old.as_any().downcast_ref::<T>()
    }

    pub fn new_as<T: 'static>(&self) -> Option<&'a T> {
        self.new.as_any().downcast_ref::<T>()
    }

    /// Both sides as `T`, or `None` when the payload is some other type
    pub fn downcast<T: Clone + 'static>(&self) -> Option<PropertyChange<T>> {
        Some(PropertyChange {
            old: self.old_as::<T>()?.clone(),
            new: self.new_as::<T>()?.clone(),
        })
    }

    pub fn old_text(&self) -> String {
        self.old.to_string()
    }

    pub fn new_text(&self) -> String {
        self.new.to_string()
    }
}

impl std::fmt::Debug for ErasedChange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedChange")
            .field("old", &self.old_text())
            .field("new", &self.new_text())
            .finish()
    }
}
