//! Decisions and credentials
//!
//! A [`Credential`] is what one role assessor answers for one role. A
//! [`Decision`] is the value folded over a rule list: it starts as
//! [`Decision::Denied`] and each granted rule moves it forward with
//! [`Decision::apply`].

use crate::types::{Conditions, Rule};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Answer of a single role check
#[derive(Debug, Clone, PartialEq)]
pub enum Credential {
    /// The context does not hold the role
    Denied,

    /// The context holds the role unconditionally
    Granted,

    /// The context holds the role under these conditions
    Conditions(Conditions),
}

impl Credential {
    /// Whether the role holds at all
    pub fn is_granted(&self) -> bool {
        !matches!(self, Credential::Denied)
    }
}

impl From<bool> for Credential {
    fn from(granted: bool) -> Self {
        if granted {
            Credential::Granted
        } else {
            Credential::Denied
        }
    }
}

impl From<Conditions> for Credential {
    fn from(conditions: Conditions) -> Self {
        Credential::Conditions(conditions)
    }
}

/// Only `true` and objects grant; any other JSON value contributes nothing.
impl From<Value> for Credential {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(true) => Credential::Granted,
            Value::Object(conditions) => Credential::Conditions(conditions),
            _ => Credential::Denied,
        }
    }
}

/// Final (or running) access decision
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Decision {
    /// Access is denied
    #[default]
    Denied,

    /// Access is permitted unconditionally
    Permitted,

    /// Access is permitted subject to the merged condition set
    Conditional(Conditions),
}

impl Decision {
    /// Whether the decision grants access, conditionally or not
    pub fn is_permitted(&self) -> bool {
        !matches!(self, Decision::Denied)
    }

    /// Conditions attached to the grant, if any
    pub fn conditions(&self) -> Option<&Conditions> {
        match self {
            Decision::Conditional(conditions) => Some(conditions),
            _ => None,
        }
    }

    /// Fold one evaluated rule into the decision
    ///
    /// - A denied credential leaves the decision unchanged.
    /// - A conditions credential is merged key by key into prior conditions,
    ///   overwriting existing keys, or becomes the decision if there are none.
    /// - A plain grant keeps prior conditions; without them the decision
    ///   takes the rule's allow value.
    pub fn apply(self, rule: &Rule, credential: Credential) -> Decision {
        match (self, credential) {
            (decision, Credential::Denied) => decision,
            (Decision::Conditional(mut prior), Credential::Conditions(granted)) => {
                prior.extend(granted);
                Decision::Conditional(prior)
            }
            (_, Credential::Conditions(granted)) => Decision::Conditional(granted),
            (Decision::Conditional(prior), Credential::Granted) => Decision::Conditional(prior),
            (_, Credential::Granted) => Decision::from(rule.allow_value()),
        }
    }
}

impl From<bool> for Decision {
    fn from(permitted: bool) -> Self {
        if permitted {
            Decision::Permitted
        } else {
            Decision::Denied
        }
    }
}

impl From<Decision> for Value {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Denied => Value::Bool(false),
            Decision::Permitted => Value::Bool(true),
            Decision::Conditional(conditions) => Value::Object(conditions),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Denied => f.write_str("denied"),
            Decision::Permitted => f.write_str("permitted"),
            Decision::Conditional(conditions) => {
                write!(f, "conditional({})", Value::Object(conditions.clone()))
            }
        }
    }
}

/// Serialized as `false`, `true`, or the conditions object
impl Serialize for Decision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Decision::Denied => serializer.serialize_bool(false),
            Decision::Permitted => serializer.serialize_bool(true),
            Decision::Conditional(conditions) => conditions.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Decision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(permitted) => Ok(Decision::from(permitted)),
            Value::Object(conditions) => Ok(Decision::Conditional(conditions)),
            other => Err(D::Error::custom(format!(
                "expected boolean or object decision, found {}",
                other
            ))),
        }
    }
}
