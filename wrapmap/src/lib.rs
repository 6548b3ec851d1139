//! wrapmap - Wrapping, delegating, ordered keyed collections
//!
//! A decorator over an ordered, keyed collection:
//!
//! - every nested array-like value is itself a collection,
//! - entries are reachable by case/format-insensitive attribute-style
//!   names ([`Collection::prop`]),
//! - operations not implemented locally are delegated by name to a
//!   fresh reference engine instance whose resulting state is committed
//!   back ([`Collection::call`]),
//! - user callbacks handed into delegated operations receive wrapped
//!   values, never raw structures.
//!
//! ```
//! use wrapmap::{Collection, Value};
//!
//! let mut users = Collection::from_json(
//!     r#"[{"firstName":"ada"},{"firstName":"grace"}]"#,
//! )?;
//!
//! // delegated sort commits the reordered state back
//! users.call("sort_by", vec![wrapmap::OpArg::callback(|item, _| {
//!     wrapmap::get_path(item, "first_name")
//!         .or_else(|| wrapmap::get_path(item, "firstName"))
//!         .cloned()
//!         .unwrap_or(Value::Null)
//! })])?;
//!
//! // attribute-style access, any naming convention
//! let first = Collection::from_value(users.get(0i64, None)?);
//! assert!(matches!(first.prop("first_name")?, wrapmap::Attr::Value(_)));
//! # Ok::<(), wrapmap::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod attr;
pub mod collection;
pub mod config;
pub mod registry;

mod adapt;
mod delegate;

// Re-export commonly used types
pub use wrapmap_core::{
    get_in, get_path, is_collection_like, normalize, resolve_key, unwrap, wrap, Error, ItemMap,
    Key, Result, Value,
};
pub use wrapmap_engine::{ItemFn, OpArg, OpProxy, RefCollection, ReduceFn};

pub use attr::{Attr, BoundOp, PROXYABLE};
pub use collection::{Collection, Selector};
pub use config::Config;
pub use registry::{ExtensionFn, OpRegistry};
