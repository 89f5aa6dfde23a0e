use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, ToPrimitive, WrappingNeg};
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// Numeric and logical family of a payload type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    SignedInteger,
    UnsignedInteger,
    Float,
    Boolean,
    Text,
    Other,
}

/// A type that can be stored in a `Property`.
///
/// The negation and conversion hooks default to "unsupported"; the numeric,
/// boolean and text families below override the ones that apply to them. A
/// custom payload only needs `impl PropertyValue for MyType {}`.
pub trait PropertyValue: Clone + fmt::Debug + fmt::Display + 'static {
    fn kind() -> ValueKind {
        ValueKind::Other
    }

    /// Arithmetic negation, `None` when the family has none
    fn negated(&self) -> Option<Self> {
        None
    }

    /// Logical negation, `None` for anything but booleans
    fn inverted(&self) -> Option<Self> {
        None
    }

    fn to_i64(&self) -> Option<i64> {
        None
    }

    fn to_f64(&self) -> Option<f64> {
        None
    }

    fn to_bool(&self) -> Option<bool> {
        None
    }
}

/// Payloads the arithmetic sugar applies to.
///
/// Each operation returns `None` when the result is not representable:
/// integer overflow or integer division by zero. Float operations follow
/// IEEE 754 and always succeed.
pub trait NumericValue: PropertyValue + One {
    fn try_add(&self, rhs: &Self) -> Option<Self>;
    fn try_sub(&self, rhs: &Self) -> Option<Self>;
    fn try_mul(&self, rhs: &Self) -> Option<Self>;
    fn try_div(&self, rhs: &Self) -> Option<Self>;
}

// Integer negation wraps, so `-i32::MIN` stays `i32::MIN` and `-5u8` is `251`.
macro_rules! integer_value {
    ($kind:ident: $($t:ty),*) => {$(
        impl PropertyValue for $t {
            fn kind() -> ValueKind { ValueKind::$kind }
            fn negated(&self) -> Option<Self> { Some(WrappingNeg::wrapping_neg(self)) }
            fn to_i64(&self) -> Option<i64> { ToPrimitive::to_i64(self) }
        }

        impl NumericValue for $t {
            fn try_add(&self, rhs: &Self) -> Option<Self> { CheckedAdd::checked_add(self, rhs) }
            fn try_sub(&self, rhs: &Self) -> Option<Self> { CheckedSub::checked_sub(self, rhs) }
            fn try_mul(&self, rhs: &Self) -> Option<Self> { CheckedMul::checked_mul(self, rhs) }
            fn try_div(&self, rhs: &Self) -> Option<Self> { CheckedDiv::checked_div(self, rhs) }
        }
    )*};
}

macro_rules! float_value {
    ($($t:ty),*) => {$(
        impl PropertyValue for $t {
            fn kind() -> ValueKind { ValueKind::Float }
            fn negated(&self) -> Option<Self> { Some(-*self) }
            fn to_f64(&self) -> Option<f64> { ToPrimitive::to_f64(self) }
        }

        impl NumericValue for $t {
            fn try_add(&self, rhs: &Self) -> Option<Self> { Some(*self + *rhs) }
            fn try_sub(&self, rhs: &Self) -> Option<Self> { Some(*self - *rhs) }
            fn try_mul(&self, rhs: &Self) -> Option<Self> { Some(*self * *rhs) }
            fn try_div(&self, rhs: &Self) -> Option<Self> { Some(*self / *rhs) }
        }
    )*};
}

integer_value!(SignedInteger: i8, i16, i32, i64, isize);
integer_value!(UnsignedInteger: u8, u16, u32, u64, usize);
float_value!(f32, f64);

impl PropertyValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Boolean
    }

    fn inverted(&self) -> Option<Self> {
        Some(!*self)
    }

    fn to_bool(&self) -> Option<bool> {
        Some(*self)
    }
}

impl PropertyValue for String {
    fn kind() -> ValueKind {
        ValueKind::Text
    }
}

impl PropertyValue for char {
    fn kind() -> ValueKind {
        ValueKind::Text
    }
}

/// Object-safe view of a payload, used where the concrete type is erased
pub trait AnyValue: fmt::Display {
    fn as_any(&self) -> &dyn Any;
}

impl<T: PropertyValue> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
