//! Dynamic, case/format-insensitive attribute access
//!
//! Property names resolve against stored keys under multiple naming
//! conventions; names that miss but match a proxyable operation yield a
//! deferred-operation handle instead. The result is an explicit sum
//! type, not reflection.

use wrapmap_core::keys::resolve_key;
use wrapmap_core::wrap::{export_items, is_collection_like, wrap};
use wrapmap_core::{Error, Result, Value};
use wrapmap_engine::{OpArg, OpProxy, RefCollection};

use crate::adapt::adapt_args;
use crate::collection::Collection;
use crate::delegate::RETURNS_RAW;

/// Operation names that dynamic access may defer to a proxy.
pub const PROXYABLE: &[&str] = &[
    "average",
    "avg",
    "contains",
    "each",
    "every",
    "filter",
    "first",
    "flat_map",
    "key_by",
    "map",
    "partition",
    "reject",
    "sort_by",
    "sort_by_desc",
    "sum",
];

/// The outcome of dynamic property access.
#[derive(Debug)]
pub enum Attr {
    /// The property resolved to a stored value (wrapped if aggregate),
    /// or to null under lenient configuration.
    Value(Value),
    /// The property named a proxyable operation; invoke the handle with
    /// the callback later.
    Proxy(BoundOp),
    /// The property resolved to neither a stored key nor a proxyable
    /// operation name.
    NotFound,
}

impl Attr {
    /// The value, if this is a value.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Proxy(_) | Attr::NotFound => None,
        }
    }
}

/// A proxyable operation bound to a freshly exported reference
/// instance. Invoking it never writes back to the owning collection.
#[derive(Debug)]
pub struct BoundOp {
    proxy: OpProxy,
}

impl BoundOp {
    /// The bound operation name.
    pub fn op(&self) -> &str {
        self.proxy.op()
    }

    /// Run the bound operation, adapting callbacks and wrapping the
    /// result exactly like a delegated call.
    pub fn invoke(&mut self, args: Vec<OpArg>) -> Result<Value> {
        let op = self.proxy.op().to_string();
        let result = self.proxy.invoke_with(adapt_args(&op, args))?;
        Ok(if RETURNS_RAW.contains(&op.as_str()) {
            result
        } else {
            wrap(&result)
        })
    }
}

impl Collection {
    /// Dynamic property access without the missing-property policy.
    ///
    /// Resolution order: stored key (verbatim, then normalized form),
    /// then the proxyable operation allow-list; a full miss is
    /// [`Attr::NotFound`].
    pub fn attr(&self, name: &str) -> Attr {
        if let Some(value) = resolve_key(&self.items, name).and_then(|key| self.items.get(&key)) {
            let value = if is_collection_like(value) {
                wrap(value)
            } else {
                value.clone()
            };
            return Attr::Value(value);
        }

        if PROXYABLE.contains(&name) {
            let reference = RefCollection::new(export_items(&self.items));
            return Attr::Proxy(BoundOp {
                proxy: OpProxy::new(reference, name),
            });
        }

        Attr::NotFound
    }

    /// Dynamic property access with the configured missing-property
    /// policy applied: a miss raises [`Error::MissingProperty`] under
    /// strict configuration and yields `Attr::Value(Value::Null)`
    /// otherwise.
    pub fn prop(&self, name: &str) -> Result<Attr> {
        match self.attr(name) {
            Attr::NotFound if self.config.raise_on_missing => {
                Err(Error::MissingProperty(name.to_string()))
            }
            Attr::NotFound => Ok(Attr::Value(Value::Null)),
            found => Ok(found),
        }
    }
}
