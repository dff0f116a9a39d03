//! Rule source: global rules followed by endpoint overrides

use crate::config::{AclConfig, EndpointAcl};
use crate::types::{EndpointName, Rule};

/// Produces the ordered rule list for an endpoint
///
/// Endpoint rules are appended after the global rules, so they are
/// evaluated last and get the final say in refining a grant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSource {
    config: AclConfig,
}

impl RuleSource {
    /// Empty rule source
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule to the global list
    pub fn add_rule(&mut self, rule: Rule) {
        self.config.rules.push(rule);
    }

    /// Append a batch of rules to the global list, preserving their order
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.config.rules.extend(rules);
    }

    /// Replace the rules of `endpoint`, creating the endpoint if needed
    pub fn set_endpoint_rules(&mut self, endpoint: impl Into<EndpointName>, rules: Vec<Rule>) {
        let entry = self.config.endpoints.entry(endpoint.into()).or_default();
        entry.acl = Some(EndpointAcl { rules });
    }

    /// Ordered rules for `endpoint`: global rules first, then the endpoint's
    ///
    /// An empty or unknown endpoint name yields only the global rules.
    pub fn rules_for(&self, endpoint: &str) -> Vec<Rule> {
        let endpoint_rules: &[Rule] = if endpoint.is_empty() {
            &[]
        } else {
            self.config.endpoint_rules(endpoint)
        };

        self.config
            .rules
            .iter()
            .chain(endpoint_rules)
            .cloned()
            .collect()
    }

    /// Global rules in evaluation order
    pub fn global_rules(&self) -> &[Rule] {
        &self.config.rules
    }

    /// Configured endpoint names, sorted
    pub fn endpoint_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.config.endpoints.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Underlying configuration
    pub fn config(&self) -> &AclConfig {
        &self.config
    }
}

impl From<AclConfig> for RuleSource {
    fn from(config: AclConfig) -> Self {
        Self { config }
    }
}
