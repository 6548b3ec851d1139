//! Operation arguments for named dispatch
//!
//! Arguments are positional and top-level only: a delegated call carries
//! plain values and at most a couple of callables, never callables
//! buried inside nested structures.

use std::fmt;

use wrapmap_core::{Key, Value};

/// Per-item callback: receives `(value, key)` and returns a value.
pub type ItemFn = Box<dyn FnMut(&Value, &Key) -> Value>;

/// Reduction callback: receives `(carry, item)` and returns the new
/// carry. The carry is accumulator state, not a collection element.
pub type ReduceFn = Box<dyn FnMut(Value, &Value) -> Value>;

/// One positional argument of a delegated operation.
pub enum OpArg {
    /// A plain value argument.
    Value(Value),
    /// A per-item callback argument.
    Callback(ItemFn),
    /// A reduction callback argument.
    Reducer(ReduceFn),
}

impl OpArg {
    /// Build a plain value argument.
    pub fn value(value: impl Into<Value>) -> Self {
        OpArg::Value(value.into())
    }

    /// Build a per-item callback argument.
    pub fn callback(f: impl FnMut(&Value, &Key) -> Value + 'static) -> Self {
        OpArg::Callback(Box::new(f))
    }

    /// Build a reduction callback argument.
    pub fn reducer(f: impl FnMut(Value, &Value) -> Value + 'static) -> Self {
        OpArg::Reducer(Box::new(f))
    }
}

impl fmt::Debug for OpArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpArg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            OpArg::Callback(_) => f.write_str("Callback(..)"),
            OpArg::Reducer(_) => f.write_str("Reducer(..)"),
        }
    }
}

impl From<Value> for OpArg {
    fn from(value: Value) -> Self {
        OpArg::Value(value)
    }
}
