//! Request and context passed through population and evaluation

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Inbound request as seen by role assessors
///
/// The engine never reads it; it is handed to every assessor's
/// `init_context` so they can derive facts from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AclRequest {
    /// Endpoint being called, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Authenticated principal (e.g., "user:alice@example.com")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,

    /// Request attributes (headers, params, session data)
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl AclRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint name
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the principal
    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    /// Add a request attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Look up a request attribute
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Mutable per-request facts shared by assessors and rule evaluation
///
/// Backed by a `DashMap` so assessors running concurrently within one
/// priority tier can write through a shared reference. Assessors in the
/// same tier must still write disjoint keys; the last writer of a key wins.
#[derive(Debug, Clone, Default)]
pub struct AclContext {
    values: DashMap<String, Value>,
}

impl AclContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with one value
    pub fn with(self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Store a value, returning the previous one
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Clone a value out of the context
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).map(|entry| entry.value().clone())
    }

    /// Deserialize a value into `T`; `None` if missing or of the wrong shape
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|value| serde_json::from_value(value).ok())
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a value
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.remove(key).map(|(_, value)| value)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy all values into a JSON object
    pub fn snapshot(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
