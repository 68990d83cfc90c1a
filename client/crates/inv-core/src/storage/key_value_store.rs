use crate::Result as CoreResult;

/// Durable client-side key-value storage.
///
/// Every call is a single read, write or delete of one key. Absence of a key
/// means "unset"; an empty string is a value like any other.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> CoreResult<()>;
}
