//! wrapmap core - Primitives for wrapping, delegating collections
//!
//! This crate provides the fundamental building blocks for the wrapmap
//! collection decorator with no dependency on the reference engine:
//!
//! - Type-tagged dynamic values and ordered item mappings
//! - Error types
//! - Property-name normalization and key resolution
//! - Recursive wrap/unwrap between raw aggregates and collection nodes
//! - Dotted-path lookup
//! - Permissive source-to-mapping conversion

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod keys;
pub mod path;
pub mod value;
pub mod wrap;

// Re-export commonly used types
pub use convert::{items_from_json, to_items};
pub use error::{Error, Result};
pub use keys::{normalize, resolve_key};
pub use path::{get_in, get_path};
pub use value::{is_sequential, next_index, ItemMap, Key, Value};
pub use wrap::{export_items, is_collection_like, unwrap, wrap};
