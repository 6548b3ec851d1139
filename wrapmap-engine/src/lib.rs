//! wrapmap engine - The reference collection engine
//!
//! This crate provides the ordered keyed collection that delegated
//! operations run against:
//!
//! - `RefCollection`: an ephemeral, operation-scoped collection built
//!   from a full export of an item mapping
//! - A large named operation set (map/filter/reduce/sort/group/...)
//!   dispatched by string name
//! - Boxed-callback operation arguments
//! - A higher-order deferred-operation proxy
//!
//! The facade crate's correctness depends only on this engine preserving
//! element order and key identity across operations that are not
//! explicitly key-reindexing.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod args;
pub mod collection;
pub mod proxy;

mod dispatch;

// Re-export commonly used types
pub use wrapmap_core::{Error, ItemMap, Key, Result, Value};

pub use args::{ItemFn, OpArg, ReduceFn};
pub use collection::RefCollection;
pub use proxy::OpProxy;
