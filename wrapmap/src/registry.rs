//! Extension operation registry
//!
//! Additional named operations can be registered at runtime and become
//! callable exactly like built-ins: [`Collection::call`] consults the
//! registry before falling back to delegation. Registration is an
//! explicit call, not implicit type mutation.
//!
//! [`Collection::call`]: crate::Collection::call

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use wrapmap_engine::OpArg;
use wrapmap_core::{Result, Value};

use crate::collection::Collection;

/// A registered extension operation.
pub type ExtensionFn = Arc<dyn Fn(&mut Collection, Vec<OpArg>) -> Result<Value> + Send + Sync>;

/// Explicit mutable registry mapping operation names to handlers.
#[derive(Clone, Default)]
pub struct OpRegistry {
    ops: HashMap<String, ExtensionFn>,
}

impl OpRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`; replaces any previous handler under that name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut Collection, Vec<OpArg>) -> Result<Value> + Send + Sync + 'static,
    ) {
        self.ops.insert(name.into(), Arc::new(handler));
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Fetch the handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<ExtensionFn> {
        self.ops.get(name).cloned()
    }

    /// Registered operation names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }
}

impl fmt::Debug for OpRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.ops.keys().collect();
        names.sort();
        f.debug_struct("OpRegistry").field("ops", &names).finish()
    }
}
