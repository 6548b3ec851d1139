//! The public collection facade

use wrapmap_core::convert::to_items;
use wrapmap_core::path::get_in;
use wrapmap_core::value::next_index;
use wrapmap_core::wrap::{is_collection_like, unwrap, wrap};
use wrapmap_core::{Error, ItemMap, Key, Result, Value};
use wrapmap_engine::OpArg;

use crate::config::Config;
use crate::registry::OpRegistry;

/// An ordered, keyed collection decorator.
///
/// Every nested array-like value is itself a collection, entries are
/// reachable by case/format-insensitive attribute-style names (see
/// [`Collection::prop`]), and operations the facade does not implement
/// locally are delegated by name to a fresh reference engine instance
/// whose resulting state is committed back (see [`Collection::call`]).
///
/// Construction is permissive: mappings keep their entries, sequences
/// are indexed in order, JSON sources are parsed, and any other value
/// becomes a single-element sequence.
///
/// A collection is exclusively owned and synchronous: concurrent use of
/// one instance must be serialized by the caller.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub(crate) items: ItemMap,
    pub(crate) config: Config,
    pub(crate) registry: OpRegistry,
}

impl Collection {
    /// Create an empty collection with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection over an existing item mapping.
    pub fn from_items(items: ItemMap) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Build a collection from an arbitrary value.
    pub fn from_value(value: Value) -> Self {
        Self::from_items(to_items(value))
    }

    /// Parse a collection from a JSON string.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(Self::from_items(wrapmap_core::items_from_json(s)?))
    }

    /// Replace the configuration, builder style.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Toggle missing-property behavior for this instance.
    pub fn set_raise_on_missing(&mut self, raise: bool) {
        self.config.raise_on_missing = raise;
    }

    /// The backing item mapping, as stored.
    pub fn items(&self) -> &ItemMap {
        &self.items
    }

    /// Consume the collection and return its item mapping.
    pub fn into_items(self) -> ItemMap {
        self.items
    }

    /// Register an extension operation on this instance; it is consulted
    /// by [`Collection::call`] before delegation.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut Collection, Vec<OpArg>) -> Result<Value> + Send + Sync + 'static,
    ) {
        self.registry.register(name, handler);
    }

    // --- keyed access ---

    /// Get an item by key, reference-engine semantics first.
    ///
    /// A delegated `get` runs first; on a miss the local mapping is
    /// consulted directly, including dotted-path descent for string
    /// keys. Aggregate results come back wrapped. When nothing matches,
    /// `default` (or null) is returned.
    pub fn get(&mut self, key: impl Into<Key>, default: Option<Value>) -> Result<Value> {
        let key = key.into();
        let hit = self.call("get", vec![OpArg::Value(key.to_value())])?;
        if hit != Value::Null {
            return Ok(hit);
        }

        let found = match &key {
            Key::Str(path) => get_in(&self.items, path).cloned(),
            Key::Int(_) => self.items.get(&key).cloned(),
        };
        match found {
            Some(value) if is_collection_like(&value) => Ok(wrap(&value)),
            Some(value) => Ok(value),
            None => Ok(default.unwrap_or(Value::Null)),
        }
    }

    // --- array-style access: local, exact keys, raw values ---

    /// Whether an item exists at `key` (exact match, no normalization).
    pub fn offset_exists(&self, key: &Key) -> bool {
        self.items.contains_key(key)
    }

    /// The item at `key` exactly as stored; no wrapping, no
    /// normalization.
    pub fn offset_get(&self, key: &Key) -> Option<&Value> {
        self.items.get(key)
    }

    /// Set the item at `key`; with no key, append under the next
    /// sequential integer key.
    pub fn offset_set(&mut self, key: Option<Key>, value: Value) {
        let key = key.unwrap_or_else(|| next_index(&self.items));
        self.items.insert(key, value);
    }

    /// Remove and return the item at `key`, preserving the order of the
    /// remaining items.
    pub fn offset_unset(&mut self, key: &Key) -> Option<Value> {
        self.items.shift_remove(key)
    }

    /// Append a value under the next sequential integer key.
    pub fn push(&mut self, value: Value) {
        self.offset_set(None, value);
    }

    // --- export ---

    /// Shallow-recursive export: top-level wrapped nodes export raw,
    /// everything else stays exactly as stored.
    pub fn to_array(&self) -> ItemMap {
        self.items
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::Coll(_) => unwrap(v),
                    other => other.clone(),
                };
                (k.clone(), v)
            })
            .collect()
    }

    /// Full recursive export of the whole collection down to raw
    /// sequences and mappings of primitives.
    pub fn to_raw(&self) -> Value {
        unwrap(&Value::Coll(self.items.clone()))
    }

    // --- delegating conveniences ---

    /// JSON representation, via the reference engine.
    pub fn to_json(&mut self) -> Result<String> {
        match self.call("to_json", vec![])? {
            Value::Str(json) => Ok(json),
            other => Err(Error::operation(
                "to_json",
                format!("engine returned {}", other.type_name()),
            )),
        }
    }

    /// JSON-serializable tree, via the reference engine. Returns the
    /// raw structure, not a wrapped collection.
    pub fn json_serialize(&mut self) -> Result<Value> {
        self.call("json_serialize", vec![])
    }

    /// Number of items, via the reference engine.
    pub fn count(&mut self) -> Result<usize> {
        match self.call("count", vec![])? {
            Value::Int(n) if n >= 0 => Ok(n as usize),
            other => Err(Error::operation(
                "count",
                format!("engine returned {:?}", other),
            )),
        }
    }

    /// Iterate the values in order, via the reference engine's iterator
    /// operation. Yields raw values.
    pub fn iter(&mut self) -> Result<std::vec::IntoIter<Value>> {
        match self.call("get_iterator", vec![])? {
            Value::Seq(values) => Ok(values.into_iter()),
            other => Err(Error::operation(
                "get_iterator",
                format!("engine returned {}", other.type_name()),
            )),
        }
    }

    // --- deep merge ---

    /// Deep-merge `other` into this collection in place.
    ///
    /// Colliding keys whose values are both aggregates merge
    /// recursively; otherwise the incoming value replaces the stored
    /// one. Returns `self` for chaining.
    pub fn overwrite(&mut self, other: impl Into<Value>) -> &mut Self {
        let incoming = to_items(other.into());
        merge_items(&mut self.items, incoming);
        self
    }

    // --- uniqueness, computed locally ---
    //
    // The reference engine's built-in unique conflates values that
    // differ in type but coerce equal, so uniqueness never delegates.

    /// Items whose selector output has not been seen before, in
    /// original order with original keys. First occurrence wins.
    ///
    /// `strict` compares seen outputs by type and value; non-strict
    /// comparison is loose (coercive). Without a selector, the item
    /// itself (in raw form) is the identity.
    pub fn unique(&self, selector: Option<Selector>, strict: bool) -> Collection {
        let mut selector = selector;
        let mut seen: Vec<Value> = Vec::new();
        let mut kept = ItemMap::new();
        for (k, v) in &self.items {
            let id = match selector.as_mut() {
                None => unwrap(v),
                Some(Selector::Path(path)) => wrapmap_core::get_path(v, path)
                    .cloned()
                    .unwrap_or(Value::Null),
                Some(Selector::Func(f)) => f(&wrap(v), k),
            };
            let duplicate = seen
                .iter()
                .any(|s| if strict { s == &id } else { s.loose_eq(&id) });
            if !duplicate {
                seen.push(id);
                kept.insert(k.clone(), v.clone());
            }
        }
        Collection {
            items: kept,
            config: self.config.clone(),
            registry: self.registry.clone(),
        }
    }

    /// [`Collection::unique`] with strict comparison.
    pub fn unique_strict(&self, selector: Option<Selector>) -> Collection {
        self.unique(selector, true)
    }
}

/// How `unique` computes the identity of an item.
pub enum Selector {
    /// Dotted-path projection into the (raw) item.
    Path(String),
    /// Arbitrary callback over the (wrapped) item and its key.
    Func(Box<dyn FnMut(&Value, &Key) -> Value>),
}

impl Selector {
    /// Dotted-path selector.
    pub fn path(path: impl Into<String>) -> Self {
        Selector::Path(path.into())
    }

    /// Callback selector.
    pub fn func(f: impl FnMut(&Value, &Key) -> Value + 'static) -> Self {
        Selector::Func(Box::new(f))
    }
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Selector::Func(_) => f.write_str("Func(..)"),
        }
    }
}

fn merge_items(dst: &mut ItemMap, src: ItemMap) {
    for (key, incoming) in src {
        match dst.get_mut(&key) {
            Some(existing) => merge_value(existing, incoming),
            None => {
                dst.insert(key, incoming);
            }
        }
    }
}

fn merge_value(existing: &mut Value, incoming: Value) {
    if !(is_collection_like(existing) && is_collection_like(&incoming)) {
        *existing = incoming;
        return;
    }
    let src = to_items(incoming);
    match existing {
        Value::Map(items) | Value::Coll(items) => merge_items(items, src),
        Value::Seq(values) => {
            let mut items: ItemMap = values
                .drain(..)
                .enumerate()
                .map(|(i, v)| (Key::Int(i as i64), v))
                .collect();
            merge_items(&mut items, src);
            if wrapmap_core::is_sequential(&items) {
                *existing = Value::Seq(items.into_iter().map(|(_, v)| v).collect());
            } else {
                *existing = Value::Map(items);
            }
        }
        _ => unreachable!("checked collection-like above"),
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl std::fmt::Display for Collection {
    /// Renders the fully unwrapped collection as compact JSON.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_raw().to_json_string() {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Collection::from_value(value)
    }
}

impl From<serde_json::Value> for Collection {
    fn from(json: serde_json::Value) -> Self {
        Collection::from_value(Value::from_json(json))
    }
}

impl From<Vec<Value>> for Collection {
    fn from(values: Vec<Value>) -> Self {
        Collection::from_value(Value::Seq(values))
    }
}

impl From<ItemMap> for Collection {
    fn from(items: ItemMap) -> Self {
        Collection::from_items(items)
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Coll(collection.into_items())
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Collection::from_value(Value::Seq(iter.into_iter().collect()))
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Collection::from_items(iter.into_iter().collect())
    }
}
