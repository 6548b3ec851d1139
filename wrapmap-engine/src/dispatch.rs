//! String-name dispatch over the operation set
//!
//! Delegated calls arrive as an operation name plus positional
//! arguments. Unknown names surface as `UnknownOperation`; arity or
//! shape mismatches surface as `Operation` failures naming the
//! operation. Neither is ever retried.

use wrapmap_core::{Error, Key, Result, Value};

use crate::args::{ItemFn, OpArg, ReduceFn};
use crate::collection::RefCollection;

/// Attach the operation name to key-conversion failures.
fn annotate(op: &str, err: Error) -> Error {
    match err {
        Error::InvalidKey(message) => Error::operation(op, message),
        other => other,
    }
}

/// Positional argument cursor with operation-annotated failures.
struct Args<'a> {
    op: &'a str,
    inner: std::vec::IntoIter<OpArg>,
}

impl<'a> Args<'a> {
    fn new(op: &'a str, args: Vec<OpArg>) -> Self {
        Self {
            op,
            inner: args.into_iter(),
        }
    }

    fn next_any(&mut self) -> Option<OpArg> {
        self.inner.next()
    }

    fn next_value(&mut self) -> Result<Value> {
        match self.inner.next() {
            Some(OpArg::Value(v)) => Ok(v),
            Some(_) => Err(Error::operation(self.op, "expected a value argument")),
            None => Err(Error::operation(self.op, "missing a value argument")),
        }
    }

    fn optional_value(&mut self) -> Result<Option<Value>> {
        match self.inner.next() {
            Some(OpArg::Value(v)) => Ok(Some(v)),
            Some(_) => Err(Error::operation(self.op, "expected a value argument")),
            None => Ok(None),
        }
    }

    fn next_str(&mut self) -> Result<String> {
        match self.next_value()? {
            Value::Str(s) => Ok(s),
            other => Err(Error::operation(
                self.op,
                format!("expected a string argument, got {}", other.type_name()),
            )),
        }
    }

    fn next_callback(&mut self) -> Result<ItemFn> {
        match self.inner.next() {
            Some(OpArg::Callback(f)) => Ok(f),
            Some(_) => Err(Error::operation(self.op, "expected a callback argument")),
            None => Err(Error::operation(self.op, "missing a callback argument")),
        }
    }

    fn optional_callback(&mut self) -> Result<Option<ItemFn>> {
        match self.inner.next() {
            Some(OpArg::Callback(f)) => Ok(Some(f)),
            Some(_) => Err(Error::operation(self.op, "expected a callback argument")),
            None => Ok(None),
        }
    }

    fn next_key(&mut self) -> Result<Key> {
        let value = self.next_value()?;
        Key::from_value(&value).map_err(|e| annotate(self.op, e))
    }

    fn next_reducer(&mut self) -> Result<ReduceFn> {
        match self.inner.next() {
            Some(OpArg::Reducer(f)) => Ok(f),
            Some(_) => Err(Error::operation(self.op, "expected a reduction callback")),
            None => Err(Error::operation(self.op, "missing a reduction callback")),
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.inner.next().is_some() {
            return Err(Error::operation(self.op, "too many arguments"));
        }
        Ok(())
    }
}

impl RefCollection {
    /// Invoke a named operation with positional arguments.
    pub fn invoke(&mut self, op: &str, args: Vec<OpArg>) -> Result<Value> {
        let mut args = Args::new(op, args);
        match op {
            "all" | "to_array" | "unwrap" | "json_serialize" => {
                args.finish()?;
                Ok(self.to_value())
            }
            "avg" | "average" => {
                let mut f = args.optional_callback()?;
                args.finish()?;
                Ok(self.avg(f.as_mut()))
            }
            "contains" => {
                let result = match args.next_any() {
                    Some(OpArg::Callback(mut f)) => self.contains_by(&mut f),
                    Some(OpArg::Value(needle)) => self.contains_value(&needle),
                    _ => {
                        return Err(Error::operation(op, "expected a value or callback"));
                    }
                };
                args.finish()?;
                Ok(Value::Bool(result))
            }
            "count" => {
                args.finish()?;
                Ok(Value::Int(self.len() as i64))
            }
            "each" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                self.each(&mut f);
                Ok(self.to_value())
            }
            "every" => {
                let mut f = args.optional_callback()?;
                args.finish()?;
                Ok(Value::Bool(self.every(f.as_mut())))
            }
            "filter" => {
                let mut f = args.optional_callback()?;
                args.finish()?;
                Ok(Value::Map(self.filter(f.as_mut())))
            }
            "first" => {
                let mut f = args.optional_callback()?;
                args.finish()?;
                Ok(self.first(f.as_mut()))
            }
            "flat_map" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                Ok(Value::Map(self.flat_map(&mut f)))
            }
            "get" => {
                let key = args.next_key()?;
                let default = args.optional_value()?;
                args.finish()?;
                Ok(self
                    .get(&key)
                    .cloned()
                    .or(default)
                    .unwrap_or(Value::Null))
            }
            "get_iterator" | "values" => {
                args.finish()?;
                Ok(Value::Seq(self.values()))
            }
            "group_by" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                Ok(Value::Map(self.group_by(&mut f).map_err(|e| annotate(op, e))?))
            }
            "key_by" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                self.key_by(&mut f).map_err(|e| annotate(op, e))?;
                Ok(self.to_value())
            }
            "keys" => {
                args.finish()?;
                Ok(Value::Seq(self.keys()))
            }
            "map" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                Ok(Value::Map(self.map(&mut f)))
            }
            "partition" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                let (matching, rest) = self.partition(&mut f);
                Ok(Value::Seq(vec![Value::Map(matching), Value::Map(rest)]))
            }
            "pluck" => {
                let path = args.next_str()?;
                args.finish()?;
                Ok(Value::Seq(self.pluck(&path)))
            }
            "push" => {
                let value = args.next_value()?;
                args.finish()?;
                self.push(value);
                Ok(self.to_value())
            }
            "put" => {
                let key = args.next_key()?;
                let value = args.next_value()?;
                args.finish()?;
                self.put(key, value);
                Ok(self.to_value())
            }
            "reduce" => {
                let mut f = args.next_reducer()?;
                let initial = args.optional_value()?.unwrap_or(Value::Null);
                args.finish()?;
                Ok(self.reduce(&mut f, initial))
            }
            "reject" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                Ok(Value::Map(self.reject(&mut f)))
            }
            "sort" => {
                args.finish()?;
                self.sort();
                Ok(self.to_value())
            }
            "sort_by" | "sort_by_desc" => {
                let mut f = args.next_callback()?;
                args.finish()?;
                self.sort_by(&mut f, op == "sort_by_desc");
                Ok(self.to_value())
            }
            "sum" => {
                let mut f = args.optional_callback()?;
                args.finish()?;
                Ok(self.sum(f.as_mut()))
            }
            "to_json" => {
                args.finish()?;
                Ok(Value::Str(self.to_json()?))
            }
            "unique" => {
                let mut f = args.optional_callback()?;
                args.finish()?;
                Ok(Value::Map(self.unique_loose(f.as_mut())))
            }
            _ => Err(Error::UnknownOperation(op.to_string())),
        }
    }
}
