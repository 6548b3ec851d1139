//! Collection configuration

/// Per-instance configuration for a [`Collection`](crate::Collection).
///
/// Held explicitly by each collection rather than as process-wide
/// state; the process-wide default is the [`Default`] impl.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether accessing a property that resolves to neither a stored
    /// key nor a proxyable operation raises
    /// [`Error::MissingProperty`](wrapmap_core::Error::MissingProperty).
    /// When cleared, such access yields null instead.
    pub raise_on_missing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raise_on_missing: true,
        }
    }
}
