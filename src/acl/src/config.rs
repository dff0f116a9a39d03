//! Access control configuration documents
//!
//! ```json
//! {
//!   "rules": [{"allow": true, "role": "all"}],
//!   "endpoints": {
//!     "post-create": {
//!       "path": "/create",
//!       "acl": {"rules": [{"role": "authed"}]}
//!     }
//!   }
//! }
//! ```
//!
//! Every level is optional; `null` is treated like an absent field. Endpoint
//! fields other than `acl` belong to the routing layer and are preserved
//! without interpretation.

use crate::error::{AclError, Result};
use crate::types::{EndpointName, Rule};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Global rules plus per-endpoint overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Rules applied to every endpoint, evaluated first
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,

    /// Endpoint definitions by name
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoints: HashMap<EndpointName, EndpointConfig>,
}

/// One endpoint definition; only `acl` is read here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Endpoint-specific access rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<EndpointAcl>,

    /// Routing fields (path, verbs, args, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EndpointConfig {
    /// Endpoint with the given access rules and no routing fields
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            acl: Some(EndpointAcl { rules }),
            extra: Map::new(),
        }
    }

    /// Endpoint rules, empty when `acl` or `acl.rules` is absent
    pub fn rules(&self) -> &[Rule] {
        self.acl.as_ref().map(|acl| acl.rules.as_slice()).unwrap_or(&[])
    }
}

/// `acl` block of an endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointAcl {
    /// Rules appended after the global rules
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

impl AclConfig {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AclError::Config(format!(
                "expected a JSON object at the top level, found {}",
                value
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Endpoint rules for `endpoint`, empty if the endpoint is unknown
    pub fn endpoint_rules(&self, endpoint: &str) -> &[Rule] {
        self.endpoints
            .get(endpoint)
            .map(EndpointConfig::rules)
            .unwrap_or(&[])
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
