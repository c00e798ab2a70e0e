//! Caller-supplied transfer fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extra fields merged into a transfer request body.
///
/// The mapping is open: keys and values are sent verbatim. When a key
/// collides with one of the fixed transfer fields (`amount`, `token`,
/// `address`) the option wins; see [`merge_fields`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferOptions(Map<String, Value>);

impl TransferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text note attached to the transfer.
    pub fn memo(self, memo: impl Into<String>) -> Self {
        self.with("memo", memo.into())
    }

    /// Caller reference for reconciling the transfer later.
    pub fn identifier(self, identifier: impl Into<String>) -> Self {
        self.with("identifier", identifier.into())
    }

    /// Username of a hub20 account to credit. The server refuses a
    /// transfer naming both a recipient and an address.
    pub fn recipient(self, username: impl Into<String>) -> Self {
        self.with("recipient", username.into())
    }

    /// Set an arbitrary field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for TransferOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TransferOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Merge `overrides` on top of `base`. Later keys win: any key present in
/// `overrides` replaces the value in `base`.
pub fn merge_fields(
    mut base: Map<String, Value>,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
    base
}
