//! Operator sugar over [`Property::set_value`].
//!
//! Each operation computes a new value from the stored one and writes it
//! through the full pipeline, so triggers run and subscribers are notified
//! exactly as for a direct write.

use std::any::type_name;
use std::cmp::Ordering;

use log::debug;

use crate::errors::{PropertyError, PropertyResult};
use crate::implementations::property::Property;
use crate::models::value::{NumericValue, PropertyValue};

impl<T: NumericValue> Property<T> {
    pub fn add(&self, rhs: T) -> PropertyResult<()> {
        self.apply("add", |value| value.try_add(&rhs))
    }

    pub fn subtract(&self, rhs: T) -> PropertyResult<()> {
        self.apply("subtract", |value| value.try_sub(&rhs))
    }

    pub fn multiply(&self, rhs: T) -> PropertyResult<()> {
        self.apply("multiply", |value| value.try_mul(&rhs))
    }

    /// Integer division by zero fails with `Arithmetic`; floats follow IEEE 754
    pub fn divide(&self, rhs: T) -> PropertyResult<()> {
        self.apply("divide", |value| value.try_div(&rhs))
    }

    pub fn increment(&self) -> PropertyResult<()> {
        self.apply("increment", |value| value.try_add(&T::one()))
    }

    pub fn decrement(&self) -> PropertyResult<()> {
        self.apply("decrement", |value| value.try_sub(&T::one()))
    }

    /// Compute the next value from the stored one; nothing runs when it is unrepresentable
    fn apply(&self, op: &'static str, next: impl FnOnce(&T) -> Option<T>) -> PropertyResult<()> {
        match self.with_value(next) {
            Some(value) => self.set_value(value),
            None => {
                debug!("{}: {} rejected at {}", self.name(), op, self.value());
                Err(PropertyError::Arithmetic {
                    name: self.name().to_string(),
                    op,
                })
            }
        }
    }
}

impl<T: PropertyValue> Property<T> {
    /// Arithmetic negation, wrapping for integers; fails with `TypeMismatch` for non-numeric payloads
    pub fn negate(&self) -> PropertyResult<()> {
        let negated = self
            .with_value(|value| value.negated())
            .ok_or_else(|| self.mismatch("a numeric type"))?;
        self.set_value(negated)
    }

    /// Logical negation; fails with `TypeMismatch` for non-boolean payloads
    pub fn invert(&self) -> PropertyResult<()> {
        let inverted = self
            .with_value(|value| value.inverted())
            .ok_or_else(|| self.mismatch("bool"))?;
        self.set_value(inverted)
    }

    /// Integer view of the value; `0` unless the payload is an integer that fits
    pub fn as_i64(&self) -> i64 {
        self.with_value(|value| value.to_i64()).unwrap_or(0)
    }

    /// Float view of the value; `0.0` unless the payload is a float
    pub fn as_f64(&self) -> f64 {
        self.with_value(|value| value.to_f64()).unwrap_or(0.0)
    }

    /// Boolean view of the value; `false` unless the payload is a bool
    pub fn as_bool(&self) -> bool {
        self.with_value(|value| value.to_bool()).unwrap_or(false)
    }

    fn mismatch(&self, expected: &str) -> PropertyError {
        PropertyError::TypeMismatch {
            name: self.name().to_string(),
            expected: expected.to_string(),
            found: type_name::<T>().to_string(),
        }
    }
}

impl<T: PropertyValue + PartialEq> PartialEq<T> for Property<T> {
    fn eq(&self, other: &T) -> bool {
        self.with_value(|value| value == other)
    }
}

impl<T: PropertyValue + PartialOrd> PartialOrd<T> for Property<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.with_value(|value| value.partial_cmp(other))
    }
}
