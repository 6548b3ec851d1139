//! Higher-order deferred-operation proxy
//!
//! A proxy binds an operation name to a frozen reference instance so the
//! caller can hand over the callback later without naming the operation
//! twice. The proxy never writes back to the collection it was created
//! from.

use wrapmap_core::{Result, Value};

use crate::args::OpArg;
use crate::collection::RefCollection;

/// A deferred operation bound to a reference instance.
#[derive(Debug)]
pub struct OpProxy {
    collection: RefCollection,
    op: String,
}

impl OpProxy {
    /// Bind `op` to a reference instance.
    pub fn new(collection: RefCollection, op: impl Into<String>) -> Self {
        Self {
            collection,
            op: op.into(),
        }
    }

    /// The bound operation name.
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Invoke the bound operation with a single argument, usually the
    /// callback it was deferred for.
    pub fn invoke(&mut self, arg: OpArg) -> Result<Value> {
        self.invoke_with(vec![arg])
    }

    /// Invoke the bound operation with explicit arguments.
    pub fn invoke_with(&mut self, args: Vec<OpArg>) -> Result<Value> {
        let op = self.op.clone();
        self.collection.invoke(&op, args)
    }
}
