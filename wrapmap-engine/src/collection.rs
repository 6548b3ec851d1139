//! The reference collection and its operation set
//!
//! A `RefCollection` is built fresh for every delegated call from a deep
//! export of the owning collection's item mapping, runs exactly one
//! operation, and hands its final mapping back to the owner. Query
//! operations return new state without touching the instance;
//! restructuring operations (`sort`, `sort_by`, `key_by`, `push`, `put`)
//! mutate the instance in place so the commit step absorbs them.

use wrapmap_core::convert::to_items;
use wrapmap_core::path::get_path;
use wrapmap_core::value::{is_sequential, next_index};
use wrapmap_core::{ItemMap, Key, Result, Value};

use crate::args::{ItemFn, ReduceFn};

/// An ephemeral, operation-scoped ordered keyed collection.
#[derive(Debug, Clone, Default)]
pub struct RefCollection {
    items: ItemMap,
}

impl RefCollection {
    /// Build a reference collection over an item mapping.
    pub fn new(items: ItemMap) -> Self {
        Self { items }
    }

    /// Build a reference collection from an arbitrary value.
    pub fn from_value(value: Value) -> Self {
        Self::new(to_items(value))
    }

    /// The current item mapping.
    pub fn all(&self) -> &ItemMap {
        &self.items
    }

    /// Consume the collection and return its final item mapping.
    pub fn into_items(self) -> ItemMap {
        self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.items.get(key)
    }

    /// Export the collection as a value: a sequence when the keys are
    /// exactly `0..n` integers, a mapping otherwise.
    pub fn to_value(&self) -> Value {
        if is_sequential(&self.items) {
            Value::Seq(self.items.values().cloned().collect())
        } else {
            Value::Map(self.items.clone())
        }
    }

    /// Serialize the collection to a compact JSON string.
    pub fn to_json(&self) -> Result<String> {
        self.to_value().to_json_string()
    }

    // --- queries ---

    /// Transform every value, keeping keys and order.
    pub fn map(&self, f: &mut ItemFn) -> ItemMap {
        self.items
            .iter()
            .map(|(k, v)| (k.clone(), f(v, k)))
            .collect()
    }

    /// Keep items whose callback result is truthy; without a callback,
    /// keep truthy values. Keys are preserved.
    pub fn filter(&self, f: Option<&mut ItemFn>) -> ItemMap {
        match f {
            Some(f) => self
                .items
                .iter()
                .filter(|(k, v)| f(v, k).is_truthy())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => self
                .items
                .iter()
                .filter(|(_, v)| v.is_truthy())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Drop items whose callback result is truthy. Keys are preserved.
    pub fn reject(&self, f: &mut ItemFn) -> ItemMap {
        self.items
            .iter()
            .filter(|(k, v)| !f(v, k).is_truthy())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Visit every item in order; stops early when the callback returns
    /// `false` exactly.
    pub fn each(&self, f: &mut ItemFn) {
        for (k, v) in &self.items {
            if matches!(f(v, k), Value::Bool(false)) {
                break;
            }
        }
    }

    /// Whether every item satisfies the callback (or is truthy, without
    /// one).
    pub fn every(&self, f: Option<&mut ItemFn>) -> bool {
        match f {
            Some(f) => self.items.iter().all(|(k, v)| f(v, k).is_truthy()),
            None => self.items.values().all(Value::is_truthy),
        }
    }

    /// Whether any value loosely equals `needle`.
    pub fn contains_value(&self, needle: &Value) -> bool {
        self.items.values().any(|v| v.loose_eq(needle))
    }

    /// Whether any item satisfies the callback.
    pub fn contains_by(&self, f: &mut ItemFn) -> bool {
        self.items.iter().any(|(k, v)| f(v, k).is_truthy())
    }

    /// First item satisfying the callback (or the first item, without
    /// one); null when nothing matches.
    pub fn first(&self, f: Option<&mut ItemFn>) -> Value {
        match f {
            Some(f) => self
                .items
                .iter()
                .find(|(k, v)| f(v, k).is_truthy())
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null),
            None => self
                .items
                .values()
                .next()
                .cloned()
                .unwrap_or(Value::Null),
        }
    }

    /// Fold the items into a single carry value.
    pub fn reduce(&self, f: &mut ReduceFn, initial: Value) -> Value {
        let mut carry = initial;
        for v in self.items.values() {
            carry = f(carry, v);
        }
        carry
    }

    /// Numeric sum of the values (or of the callback's results).
    ///
    /// Stays an exact integer while every contributing value is one,
    /// saturating at the `i64` bounds; the first non-integer
    /// contribution switches the whole sum to floating point.
    pub fn sum(&self, mut f: Option<&mut ItemFn>) -> Value {
        let mut int_total: i64 = 0;
        let mut float_total = 0.0;
        let mut all_int = true;
        for (k, v) in &self.items {
            let val = match f.as_mut() {
                Some(f) => f(v, k),
                None => v.clone(),
            };
            match val {
                Value::Int(i) if all_int => int_total = int_total.saturating_add(i),
                Value::Int(i) => float_total += i as f64,
                other => {
                    if let Some(x) = other.coerce_f64() {
                        if all_int {
                            float_total = int_total as f64;
                            all_int = false;
                        }
                        float_total += x;
                    }
                }
            }
        }
        if all_int {
            Value::Int(int_total)
        } else {
            Value::Float(float_total)
        }
    }

    /// Arithmetic mean of the values (or of the callback's results);
    /// null for an empty collection.
    pub fn avg(&self, f: Option<&mut ItemFn>) -> Value {
        if self.items.is_empty() {
            return Value::Null;
        }
        let total = match self.sum(f) {
            Value::Int(i) => i as f64,
            Value::Float(x) => x,
            _ => 0.0,
        };
        Value::Float(total / self.items.len() as f64)
    }

    /// The keys, as values, in order.
    pub fn keys(&self) -> Vec<Value> {
        self.items.keys().map(Key::to_value).collect()
    }

    /// The values, in order.
    pub fn values(&self) -> Vec<Value> {
        self.items.values().cloned().collect()
    }

    /// Dotted-path projection of every item; misses become null.
    pub fn pluck(&self, path: &str) -> Vec<Value> {
        self.items
            .values()
            .map(|v| get_path(v, path).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Group items by the callback's result; each group is a reindexed
    /// sequence of the items that produced that key.
    pub fn group_by(&self, f: &mut ItemFn) -> Result<ItemMap> {
        let mut groups: ItemMap = ItemMap::new();
        for (k, v) in &self.items {
            let group_key = Key::from_value(&f(v, k))?;
            match groups.entry(group_key).or_insert_with(|| Value::Seq(Vec::new())) {
                Value::Seq(members) => members.push(v.clone()),
                _ => unreachable!("groups only ever hold sequences"),
            }
        }
        Ok(groups)
    }

    /// Split items into those satisfying the callback and the rest,
    /// keys preserved on both sides.
    pub fn partition(&self, f: &mut ItemFn) -> (ItemMap, ItemMap) {
        let mut matching = ItemMap::new();
        let mut rest = ItemMap::new();
        for (k, v) in &self.items {
            if f(v, k).is_truthy() {
                matching.insert(k.clone(), v.clone());
            } else {
                rest.insert(k.clone(), v.clone());
            }
        }
        (matching, rest)
    }

    /// Map every item, then flatten aggregate results one level into the
    /// output: string keys overwrite, integer-keyed and plain results
    /// append.
    pub fn flat_map(&self, f: &mut ItemFn) -> ItemMap {
        let mut out = ItemMap::new();
        for (k, v) in &self.items {
            match f(v, k) {
                Value::Seq(items) => {
                    for item in items {
                        let key = next_index(&out);
                        out.insert(key, item);
                    }
                }
                Value::Map(items) | Value::Coll(items) => {
                    for (key, item) in items {
                        match key {
                            Key::Str(_) => {
                                out.insert(key, item);
                            }
                            Key::Int(_) => {
                                let key = next_index(&out);
                                out.insert(key, item);
                            }
                        }
                    }
                }
                plain => {
                    let key = next_index(&out);
                    out.insert(key, plain);
                }
            }
        }
        out
    }

    /// Built-in uniqueness: first occurrence wins under loose
    /// comparison only. Known to conflate values that differ in type
    /// but coerce equal; the facade's local `unique` exists to bypass
    /// this.
    pub fn unique_loose(&self, mut f: Option<&mut ItemFn>) -> ItemMap {
        let mut seen: Vec<Value> = Vec::new();
        let mut kept = ItemMap::new();
        for (k, v) in &self.items {
            let id = match f.as_mut() {
                Some(f) => f(v, k),
                None => v.clone(),
            };
            if !seen.iter().any(|s| s.loose_eq(&id)) {
                seen.push(id);
                kept.insert(k.clone(), v.clone());
            }
        }
        kept
    }

    // --- restructuring operations (mutate in place) ---

    /// Stable sort by value ordering. A sequential collection is
    /// reindexed `0..n`; a keyed one keeps its keys.
    pub fn sort(&mut self) {
        let was_sequential = is_sequential(&self.items);
        let mut entries: Vec<(Key, Value)> = self.items.drain(..).collect();
        entries.sort_by(|a, b| a.1.cmp_order(&b.1));
        self.items = Self::rebuild(entries, was_sequential);
    }

    /// Stable sort by the callback's result, ascending or descending.
    pub fn sort_by(&mut self, f: &mut ItemFn, descending: bool) {
        let was_sequential = is_sequential(&self.items);
        let mut decorated: Vec<(Key, Value, Value)> = self
            .items
            .drain(..)
            .map(|(k, v)| {
                let sort_key = f(&v, &k);
                (k, v, sort_key)
            })
            .collect();
        decorated.sort_by(|a, b| {
            let ord = a.2.cmp_order(&b.2);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        let entries = decorated.into_iter().map(|(k, v, _)| (k, v)).collect();
        self.items = Self::rebuild(entries, was_sequential);
    }

    /// Reindex the collection by the callback's result; later items
    /// overwrite earlier ones on key collision.
    pub fn key_by(&mut self, f: &mut ItemFn) -> Result<()> {
        let entries: Vec<(Key, Value)> = self.items.drain(..).collect();
        for (k, v) in entries {
            let new_key = Key::from_value(&f(&v, &k))?;
            self.items.insert(new_key, v);
        }
        Ok(())
    }

    /// Append a value under the next sequential integer key.
    pub fn push(&mut self, value: Value) {
        let key = next_index(&self.items);
        self.items.insert(key, value);
    }

    /// Insert or replace the value under `key`.
    pub fn put(&mut self, key: Key, value: Value) {
        self.items.insert(key, value);
    }

    fn rebuild(entries: Vec<(Key, Value)>, reindex: bool) -> ItemMap {
        if reindex {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (_, v))| (Key::Int(i as i64), v))
                .collect()
        } else {
            entries.into_iter().collect()
        }
    }
}
