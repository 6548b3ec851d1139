//! Callback adaptation for delegated operations
//!
//! User callbacks handed into delegated operations receive wrapped
//! values, never raw structures. Only callable arguments are adapted,
//! positionally and at the top level; the reduction shape applies only
//! when the operation is a fold, and its carry passes through untouched
//! since it is accumulator state, not a collection element.

use wrapmap_core::{wrap, Key, Value};
use wrapmap_engine::OpArg;

/// Adapt the callable arguments of an `op` invocation.
pub(crate) fn adapt_args(op: &str, args: Vec<OpArg>) -> Vec<OpArg> {
    args.into_iter()
        .map(|arg| match arg {
            OpArg::Callback(mut f) => OpArg::Callback(Box::new(move |v: &Value, k: &Key| {
                f(&wrap(v), k)
            })),
            OpArg::Reducer(mut f) if op == "reduce" => {
                OpArg::Reducer(Box::new(move |carry, item: &Value| f(carry, &wrap(item))))
            }
            other => other,
        })
        .collect()
}
