//! Delegation to the reference engine
//!
//! Any operation the facade does not implement locally runs against a
//! fresh reference instance built from a deep raw export of the current
//! item mapping. After a successful invocation the reference instance's
//! final mapping replaces the owner's, so restructuring the engine
//! performs (reindexing, grouping, sorting) is absorbed wholesale. A
//! failed invocation commits nothing.

use wrapmap_core::wrap::{export_items, wrap};
use wrapmap_core::{Result, Value};
use wrapmap_engine::{OpArg, RefCollection};

use crate::adapt::adapt_args;
use crate::collection::Collection;

/// Operations whose result is a raw structure, returned without
/// re-wrapping.
pub(crate) const RETURNS_RAW: &[&str] = &["to_array", "json_serialize", "unwrap", "get_iterator"];

impl Collection {
    /// Invoke a named operation: a registered extension if one exists,
    /// otherwise delegation to the reference engine.
    pub fn call(&mut self, op: &str, args: Vec<OpArg>) -> Result<Value> {
        if let Some(handler) = self.registry.get(op) {
            return handler(self, args);
        }
        self.delegate(op, args)
    }

    fn delegate(&mut self, op: &str, args: Vec<OpArg>) -> Result<Value> {
        let mut reference = RefCollection::new(export_items(&self.items));
        let result = reference.invoke(op, adapt_args(op, args))?;
        let result = if RETURNS_RAW.contains(&op) {
            result
        } else {
            wrap(&result)
        };
        self.items = reference.into_items();
        Ok(result)
    }
}
