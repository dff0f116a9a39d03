//! Core access control types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role name used as a registry key (e.g. "all", "owner", "teamAdmin")
pub type RoleName = String;

/// Endpoint name used to look up endpoint-specific rules
pub type EndpointName = String;

/// Structured grant: the scope under which access is permitted
pub type Conditions = Map<String, Value>;

/// One access rule: a role and the allow value it yields when the role holds
///
/// Fields other than `role` and `allow` (for instance `contextArgs`) are kept
/// in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Role that must hold for this rule to apply
    #[serde(default)]
    pub role: RoleName,

    /// Value taken by the decision on a plain grant (absent means `true`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<bool>,

    /// Assessor-specific auxiliary fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rule {
    /// Create a rule for `role` with no explicit allow value
    pub fn new(role: impl Into<RoleName>) -> Self {
        Self {
            role: role.into(),
            allow: None,
            extra: Map::new(),
        }
    }

    /// Create a rule for `role` with `allow: true`
    pub fn allow(role: impl Into<RoleName>) -> Self {
        Self::new(role).with_allow(true)
    }

    /// Create a rule for `role` with `allow: false`
    pub fn deny(role: impl Into<RoleName>) -> Self {
        Self::new(role).with_allow(false)
    }

    /// Set the explicit allow value
    pub fn with_allow(mut self, allow: bool) -> Self {
        self.allow = Some(allow);
        self
    }

    /// Attach an auxiliary field
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up an auxiliary field
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Allow value applied when this rule's role is granted without conditions
    pub fn allow_value(&self) -> bool {
        self.allow.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_builders() {
        let rule = Rule::allow("owner").with_extra("contextArgs", json!({"order": "order"}));

        assert_eq!(rule.role, "owner");
        assert_eq!(rule.allow, Some(true));
        assert_eq!(rule.extra("contextArgs"), Some(&json!({"order": "order"})));
        assert!(Rule::new("all").allow_value());
        assert!(!Rule::deny("all").allow_value());
    }

    #[test]
    fn test_rule_deserialize_keeps_auxiliary_fields() {
        let rule: Rule = serde_json::from_value(json!({
            "allow": true,
            "role": "teamAdmin",
            "contextArgs": {"order": "order"}
        }))
        .unwrap();

        assert_eq!(rule.role, "teamAdmin");
        assert_eq!(rule.allow, Some(true));
        assert_eq!(rule.extra.len(), 1);

        let back = serde_json::to_value(&rule).unwrap();
        assert_eq!(back["contextArgs"]["order"], "order");
    }

    #[test]
    fn test_rule_without_allow() {
        let rule: Rule = serde_json::from_str(r#"{"role": "authed"}"#).unwrap();
        assert_eq!(rule.allow, None);
        assert!(rule.extra.is_empty());

        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"role":"authed"}"#);
    }

    #[test]
    fn test_rule_without_role_defaults_to_empty() {
        let rule: Rule = serde_json::from_str(r#"{"allow": true}"#).unwrap();
        assert!(rule.role.is_empty());
    }
}
