use crate::errors::Result;

/// Synchronous, string-keyed persistence medium.
///
/// Values are opaque strings (JSON documents in practice). Implementations
/// provide no transactions: a `set_item` replaces the whole value, and two
/// writers racing on the same key lose one update.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}
